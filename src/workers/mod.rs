//! Concurrent fan-out of per-player work.
//!
//! - `WorkerPool`: persistent threads pulling closures from one shared queue
//! - `BroadcastDispatcher`: sends the current state to every player through
//!   the pool and waits until all of them have acknowledged it

pub mod broadcast;
pub mod pool;

pub use broadcast::BroadcastDispatcher;
pub use pool::{PoolStats, ShutdownReport, WorkerPool};

use std::any::Any;

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
