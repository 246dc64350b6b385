//! Concurrent state broadcast with all-or-nothing completion.
//!
//! `display` submits one notification per registered player to the pool,
//! then blocks on a call-scoped acknowledgement counter until every one of
//! them has settled. The counter has its own lock, separate from the pool's.
//!
//! Each work item carries an `AckGuard`. Success, an `Err`, a panic, or the
//! item being dropped unrun (pool stopped) each settle the guard exactly
//! once, so the counter always reaches zero and `display` cannot hang.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use tracing::{trace, warn};

use super::panic_message;
use super::pool::{ShutdownReport, WorkerPool};
use crate::core::{EngineConfig, PlayerId};
use crate::error::{ConfigError, DispatchError, EngineError, NotifyFailure, PoolError};
use crate::players::Player;
use crate::rules::Game;

struct AckState {
    outstanding: usize,
    failures: Vec<NotifyFailure>,
}

struct Acknowledgements {
    state: Mutex<AckState>,
    settled: Condvar,
}

impl Acknowledgements {
    fn new(outstanding: usize) -> Self {
        Self {
            state: Mutex::new(AckState {
                outstanding,
                failures: Vec::new(),
            }),
            settled: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AckState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, player: PlayerId, failure: Option<String>) {
        let mut state = self.lock();
        state.outstanding = state.outstanding.saturating_sub(1);
        if let Some(reason) = failure {
            warn!(player = %player, reason = %reason, "state notification failed");
            state.failures.push(NotifyFailure { player, reason });
        }
        drop(state);
        self.settled.notify_all();
    }

    fn wait(&self) -> Result<(), DispatchError> {
        let state = self.lock();
        let mut state = self
            .settled
            .wait_while(state, |s| s.outstanding > 0)
            .unwrap_or_else(PoisonError::into_inner);
        if state.failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError {
                failures: std::mem::take(&mut state.failures),
            })
        }
    }
}

/// Settles one player's acknowledgement, even if the work never runs.
struct AckGuard {
    acks: Arc<Acknowledgements>,
    player: PlayerId,
    settled: bool,
}

impl AckGuard {
    fn settle(mut self, failure: Option<String>) {
        self.settled = true;
        self.acks.settle(self.player, failure);
    }
}

impl Drop for AckGuard {
    fn drop(&mut self) {
        if !self.settled {
            self.acks
                .settle(self.player, Some("notification was never run".to_string()));
        }
    }
}

/// Fans state out to every registered player through a `WorkerPool`.
///
/// Must not be driven from one of its own pool's workers: `display` would
/// wait on work that needs that same worker.
pub struct BroadcastDispatcher<G: Game> {
    pool: WorkerPool,
    players: Vec<Arc<dyn Player<G>>>,
}

impl<G> BroadcastDispatcher<G>
where
    G: Game + Send + Sync + 'static,
{
    /// Create a dispatcher that owns a freshly started pool.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Self::with_pool(WorkerPool::with_workers(config.workers)?)
    }

    /// Create a dispatcher around an existing pool.
    ///
    /// The pool must already be running: an unstarted pool has no worker to
    /// drain notifications and a stopped one rejects them.
    pub fn with_pool(pool: WorkerPool) -> Result<Self, EngineError> {
        if pool.worker_count() == 0 {
            return Err(ConfigError::ZeroWorkers.into());
        }
        if pool.is_stopped() {
            return Err(PoolError::Stopped.into());
        }
        Ok(Self {
            pool,
            players: Vec::new(),
        })
    }

    /// Add a player. IDs follow registration order.
    pub fn register(&mut self, player: Arc<dyn Player<G>>) -> PlayerId {
        self.players.push(player);
        PlayerId::new(self.players.len() - 1)
    }

    /// Look up a registered player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Arc<dyn Player<G>>> {
        self.players.get(id.index())
    }

    /// Number of registered players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// IDs of all registered players, in registration order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    /// The pool doing the fan-out.
    #[must_use]
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Notify every player of `state` concurrently and wait for all of them.
    ///
    /// Returns every failed notification, attributed to its player, once
    /// all notifications have settled.
    pub fn display(&self, state: &G) -> Result<(), DispatchError> {
        if self.players.is_empty() {
            return Ok(());
        }
        trace!(players = self.players.len(), "broadcasting state");

        let state = Arc::new(state.clone());
        let acks = Arc::new(Acknowledgements::new(self.players.len()));

        for (index, player) in self.players.iter().enumerate() {
            let guard = AckGuard {
                acks: Arc::clone(&acks),
                player: PlayerId::new(index),
                settled: false,
            };
            let player = Arc::clone(player);
            let state = Arc::clone(&state);

            let submitted = self.pool.submit(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| player.notify(&state)));
                let failure = match outcome {
                    Ok(Ok(())) => None,
                    Ok(Err(err)) => Some(err.to_string()),
                    Err(payload) => Some(format!("panicked: {}", panic_message(&*payload))),
                };
                guard.settle(failure);
            });
            // A rejected closure is dropped here, and its guard reports the miss.
            if let Err(err) = submitted {
                warn!(player = index, error = %err, "could not queue state notification");
            }
        }

        acks.wait()
    }

    /// Stop the pool and wait for its workers.
    pub fn shutdown(self) -> ShutdownReport {
        self.pool.shutdown()
    }
}
