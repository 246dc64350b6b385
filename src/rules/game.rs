//! Game contract consumed by the orchestrator and the minimax solver.
//!
//! A `Game` is a position plus its rules: it lists legal actions, mutates
//! itself when an action is applied, and says when play is over. It must be
//! cheap enough to clone, since the solver explores hypothetical futures on
//! copies, and hashable so evaluated positions can be memoized.
//!
//! ## Implementation Notes
//!
//! - `legal_actions`: empty once the game is over
//! - `apply`: return `false` (and leave the position untouched) for anything illegal
//! - `terminal_score`: only consulted on positions with no legal actions

use std::fmt::Debug;
use std::hash::Hash;

use crate::ranges::{IntervalSet, Step};

/// Position value from the perspective of the player to move.
pub type Score = i32;

/// Score of a position the player to move has already won.
pub const WIN: Score = 1_000;
/// Score of a drawn position.
pub const DRAW: Score = 0;
/// Score of a position the player to move has already lost.
pub const LOSS: Score = -WIN;

/// Abstract, turn-based, perfect-information game state.
pub trait Game: Clone + Eq + Hash {
    /// A single move. Enumerable so legal moves can be stored as ranges.
    type Action: Step + Debug;

    /// Legal actions for the player to move.
    fn legal_actions(&self) -> IntervalSet<Self::Action>;

    /// Apply `action` for the player to move.
    ///
    /// Returns `false` if the action is rejected; the position is unchanged then.
    #[must_use]
    fn apply(&mut self, action: Self::Action) -> bool;

    /// Check if the game is over.
    fn is_terminal(&self) -> bool {
        self.legal_actions().is_empty()
    }

    /// Value of a finished position for the player who would move next.
    ///
    /// The default treats running out of actions as a loss. Games with draws
    /// override this. Magnitudes must stay well above the game's length in
    /// plies, because the solver shrinks scores by one per ply.
    fn terminal_score(&self) -> Score {
        LOSS
    }
}
