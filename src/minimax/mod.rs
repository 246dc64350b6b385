//! Memoized minimax search for automated players.
//!
//! ## Overview
//!
//! `MinimaxSolver` explores the complete game tree below a position with an
//! explicit stack (no recursion, so tree depth never threatens the thread
//! stack) and returns the best action for the player to move:
//!
//! - **Negamax scoring**: every score is from the point of view of the player
//!   to move, and a position is worth the negation of its worst child
//! - **Depth-aware**: scores shrink by one per ply toward zero, so quick wins
//!   beat slow ones and slow losses beat quick ones
//! - **Transpositions**: each evaluated position goes into a `PositionMemo`
//!   that lives as long as the solver, so later turns start warm
//!
//! Only suitable for small, finite, acyclic games.
//!
//! ## Usage
//!
//! ```rust
//! use turn_engine::games::tictactoe::TicTacToe;
//! use turn_engine::minimax::{MinimaxSolver, SolverConfig};
//! use turn_engine::rules::{Game, DRAW};
//!
//! let mut solver = MinimaxSolver::new(SolverConfig::default());
//! let board = TicTacToe::new();
//!
//! let action = solver.best_action(&board).unwrap();
//! assert!(board.legal_actions().contains(&action));
//! assert_eq!(solver.score(&board), Some(DRAW));
//! ```

pub mod config;
pub mod memo;
pub mod search;
pub mod stats;

pub use config::SolverConfig;
pub use memo::{MemoSnapshot, PositionMemo};
pub use search::MinimaxSolver;
pub use stats::SearchStats;
