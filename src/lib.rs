//! # turn-engine
//!
//! A small engine for turn-based, perfect-information games between any mix
//! of interactive and automated players.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: the engine only sees the `Game` contract (legal
//!    actions, apply, terminal check). Rules live in the game.
//!
//! 2. **Explicit Ownership**: the worker pool, the dispatcher and every
//!    solver are constructed and owned by whoever runs the game. There is
//!    no process-wide state.
//!
//! 3. **Fail Loudly**: configuration mistakes fail at construction, and a
//!    game stopped by an error is returned as `Err`, never as a result.
//!
//! ## Architecture
//!
//! - **Interval sets**: legal actions are stored as merged half-open ranges
//!   and enumerated lazily.
//!
//! - **Broadcast**: every state is shown to every player concurrently on a
//!   fixed worker pool; the turn continues once all of them have seen it.
//!
//! - **Minimax**: automated players search the complete game tree with an
//!   explicit stack and a per-player position memo.
//!
//! ## Modules
//!
//! - `core`: Player IDs, turn rotation, RNG, engine configuration
//! - `ranges`: `IntervalSet` and the `Step` trait
//! - `rules`: The `Game` trait and score constants
//! - `workers`: Worker pool and state broadcast
//! - `players`: The `Player` trait and its built-in variants
//! - `play`: The turn orchestrator
//! - `minimax`: Memoized minimax solver
//! - `games`: Reference games (tic-tac-toe)

pub mod core;
pub mod error;
pub mod ranges;
pub mod rules;
pub mod workers;
pub mod players;
pub mod play;
pub mod minimax;
pub mod games;

// Re-export commonly used types
pub use crate::core::{EngineConfig, GameRng, PlayerId, Rotation};

pub use crate::error::{
    ConfigError, DispatchError, EngineError, NotifyFailure, PlayerError, PoolError, SearchError,
};

pub use crate::ranges::{Interval, IntervalSet, Step};

pub use crate::rules::{Game, Score, DRAW, LOSS, WIN};

pub use crate::workers::{BroadcastDispatcher, PoolStats, ShutdownReport, WorkerPool};

pub use crate::players::{InteractiveHandle, InteractivePlayer, MinimaxPlayer, Player, RandomPlayer};

pub use crate::play::{GameReport, TurnOrchestrator, TurnPhase, TurnRecord};

pub use crate::minimax::{MemoSnapshot, MinimaxSolver, PositionMemo, SearchStats, SolverConfig};
