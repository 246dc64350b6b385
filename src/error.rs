//! Error types.
//!
//! Configuration mistakes fail at construction. Everything that goes wrong
//! during a game surfaces as an `EngineError` from `TurnOrchestrator::play`,
//! so an aborted game can never be mistaken for a finished one.

use derive_more::{Display, Error};

use crate::core::PlayerId;

/// Settings the engine refuses to run with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// A rotation was built from no players.
    #[display("rotation needs at least one player")]
    EmptyRotation,
    /// A worker pool was asked to run with zero workers.
    #[display("worker pool needs at least one worker")]
    ZeroWorkers,
}

/// Worker pool misuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum PoolError {
    /// Work was submitted, or workers started, after `stop`.
    #[display("worker pool has been stopped")]
    Stopped,
}

/// Failure reported by a player adapter.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct PlayerError {
    /// Human-readable cause.
    pub message: String,
}

impl PlayerError {
    /// Create a player error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One player's failed state notification.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
#[display("{player}: {reason}")]
pub struct NotifyFailure {
    /// Player whose notification failed.
    pub player: PlayerId,
    /// What went wrong.
    pub reason: String,
}

/// A broadcast in which at least one notification failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub struct DispatchError {
    /// Every failed notification, in completion order.
    pub failures: Vec<NotifyFailure>,
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} notification(s) failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "; {failure}")?;
        }
        Ok(())
    }
}

/// Minimax search failure.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// Asked to choose from an empty action set.
    #[display("no legal actions to choose from")]
    NoActions,
    /// The game refused an action it listed as legal.
    #[display("game rejected its own legal action {action}")]
    RejectedAction {
        /// Debug rendering of the action.
        action: String,
    },
    /// Encoding or decoding a memo snapshot failed.
    #[display("memo snapshot failed: {message}")]
    Snapshot {
        /// Codec error text.
        message: String,
    },
}

/// Fatal error that aborts an orchestrated game.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// Invalid engine setup.
    #[display("configuration error: {source}")]
    Config {
        /// Underlying cause.
        source: ConfigError,
    },
    /// Worker pool refused work.
    #[display("worker pool error: {source}")]
    Pool {
        /// Underlying cause.
        source: PoolError,
    },
    /// A state broadcast did not reach every player.
    #[display("state broadcast failed: {source}")]
    Dispatch {
        /// Underlying cause.
        source: DispatchError,
    },
    /// A player failed to produce a selection.
    #[display("{player} failed to select an action: {source}")]
    Player {
        /// Player that failed.
        player: PlayerId,
        /// Underlying cause.
        source: PlayerError,
    },
    /// A player picked an action outside the offered set.
    #[display("{player} selected {action}, which was not offered")]
    IllegalSelection {
        /// Offending player.
        player: PlayerId,
        /// Debug rendering of the action.
        action: String,
    },
    /// The game refused an action it had offered.
    #[display("game rejected {action} selected by {player}")]
    RejectedAction {
        /// Player whose action was rejected.
        player: PlayerId,
        /// Debug rendering of the action.
        action: String,
    },
}

impl From<ConfigError> for EngineError {
    fn from(source: ConfigError) -> Self {
        Self::Config { source }
    }
}

impl From<PoolError> for EngineError {
    fn from(source: PoolError) -> Self {
        Self::Pool { source }
    }
}

impl From<DispatchError> for EngineError {
    fn from(source: DispatchError) -> Self {
        Self::Dispatch { source }
    }
}

impl From<SearchError> for PlayerError {
    fn from(err: SearchError) -> Self {
        Self::new(err.to_string())
    }
}
