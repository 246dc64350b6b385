//! Turn sequencing for one game at a time.
//!
//! `TurnOrchestrator` owns the broadcast dispatcher and the turn rotation
//! and runs the display, select, apply loop until the game ends or a
//! protocol violation aborts it.

pub mod orchestrator;

pub use orchestrator::{GameReport, TurnOrchestrator, TurnPhase, TurnRecord};
