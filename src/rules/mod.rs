//! The abstract game contract.
//!
//! The engine never interprets game-specific concepts: it only asks a
//! `Game` for its legal actions, applies one, and checks for the end.

pub mod game;

pub use game::{Game, Score, DRAW, LOSS, WIN};
