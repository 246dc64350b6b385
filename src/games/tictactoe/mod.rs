//! Tic-tac-toe on a 3x3 board.
//!
//! Small enough for `MinimaxSolver` to search completely from the empty
//! board, which makes it the engine's end-to-end test game:
//! - X moves first; the mark to move follows from the mark counts
//! - Squares are numbered 0-8 in row-major order
//! - Legal actions are the empty squares, stored as runs of adjacent squares
//! - Perfect play from both sides is a draw

mod game;

pub use game::{Mark, Square, TicTacToe};
