//! Player capability contract and the built-in player variants.
//!
//! The engine talks to players only through `Player`:
//! - `notify` is called from pool workers, concurrently across players
//! - `select` is called from the orchestrator thread, one player at a time
//!
//! Both block until done. That is the "resolve now" form of a deferred
//! result: adapters that wait on a UI or a network do so inside the call.
//!
//! ## Variants
//!
//! - `InteractivePlayer`: relays states to, and choices from, a UI adapter
//! - `MinimaxPlayer`: searches the full game tree for the best action
//! - `RandomPlayer`: seeded uniform choice, mostly useful as an opponent in tests

pub mod interactive;
pub mod minimax;
pub mod random;

pub use interactive::{InteractiveHandle, InteractivePlayer};
pub use minimax::MinimaxPlayer;
pub use random::RandomPlayer;

use crate::error::PlayerError;
use crate::ranges::IntervalSet;
use crate::rules::Game;

/// Something that can watch a game and take turns in it.
pub trait Player<G: Game>: Send + Sync {
    /// Show the current state. Must eventually return.
    fn notify(&self, state: &G) -> Result<(), PlayerError>;

    /// Choose one action from `actions`.
    ///
    /// Returning anything outside `actions` aborts the game.
    fn select(&self, actions: &IntervalSet<G::Action>) -> Result<G::Action, PlayerError>;
}
