//! Core engine types: player identity, turn rotation, RNG, configuration.

pub mod config;
pub mod player;
pub mod rng;
pub mod rotation;

pub use config::EngineConfig;
pub use player::PlayerId;
pub use rng::GameRng;
pub use rotation::Rotation;
