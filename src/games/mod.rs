//! Reference games implementing `rules::Game`.

pub mod tictactoe;
