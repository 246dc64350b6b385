//! Fixed-size pool of persistent worker threads.
//!
//! ## Queue discipline
//!
//! One mutex guards the pending queue, the in-progress set and the counters;
//! one condition variable wakes workers and waiters. A work item is always in
//! exactly one of `pending` or `in_progress` until it completes, and it is
//! moved out of the queue by value, so no item ever runs twice.
//!
//! Worker `i` only takes work while more than `i` items are pending, so
//! low-numbered workers pick up light loads first. Submissions wake every
//! worker so the eligible one is never missed.
//!
//! ## Shutdown
//!
//! `stop` is cooperative: in-flight items finish, nothing new is started.
//! `shutdown` (or `Drop`) then joins every worker and drops whatever was
//! never started, reporting how many items that was.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::panic_message;
use crate::error::{ConfigError, EngineError, PoolError};

type Job = Box<dyn FnOnce() + Send + 'static>;
type JobId = u64;

#[derive(Default)]
struct Queue {
    pending: VecDeque<(JobId, Job)>,
    in_progress: FxHashSet<JobId>,
    next_id: JobId,
    stopping: bool,
    completed: u64,
    panicked: u64,
}

struct Shared {
    queue: Mutex<Queue>,
    signal: Condvar,
}

impl Shared {
    // Jobs never run under the lock, so a poisoned queue is still consistent.
    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Snapshot of pool activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Spawned worker threads still attached to the pool.
    pub workers: usize,
    /// Items waiting for a worker.
    pub pending: usize,
    /// Items currently executing.
    pub in_progress: usize,
    /// Items that ran to completion.
    pub completed: u64,
    /// Items that panicked (the panic was caught).
    pub panicked: u64,
}

/// What happened to submitted work by the time the pool shut down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownReport {
    /// Items that ran to completion.
    pub completed: u64,
    /// Items that panicked.
    pub panicked: u64,
    /// Items still queued at shutdown; dropped without running.
    pub abandoned: usize,
}

/// Persistent worker threads sharing one work queue.
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerPool {
    /// Create a pool with no workers yet. Submitted work queues until `start`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(Queue::default()),
                signal: Condvar::new(),
            }),
            workers: Vec::new(),
        }
    }

    /// Create a pool and start `workers` threads.
    pub fn with_workers(workers: usize) -> Result<Self, EngineError> {
        let mut pool = Self::new();
        pool.start(workers)?;
        Ok(pool)
    }

    /// Spawn `count` more workers.
    pub fn start(&mut self, count: usize) -> Result<(), EngineError> {
        if count == 0 {
            return Err(ConfigError::ZeroWorkers.into());
        }
        if self.shared.lock().stopping {
            return Err(PoolError::Stopped.into());
        }

        let first = self.workers.len();
        for id in first..first + count {
            let shared = Arc::clone(&self.shared);
            self.workers
                .push(thread::spawn(move || run_worker(id, &shared)));
        }
        debug!(workers = self.workers.len(), "worker pool started");
        Ok(())
    }

    /// Queue `work` for the next eligible worker. Never blocks on execution.
    ///
    /// Fails with `PoolError::Stopped` once `stop` has been requested; the
    /// closure is dropped without running.
    pub fn submit<F>(&self, work: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut queue = self.shared.lock();
        if queue.stopping {
            return Err(PoolError::Stopped);
        }
        let id = queue.next_id;
        queue.next_id += 1;
        queue.pending.push_back((id, Box::new(work)));
        drop(queue);

        self.shared.signal.notify_all();
        Ok(())
    }

    /// Ask every worker to exit once its current item is done. Idempotent.
    pub fn stop(&self) {
        let mut queue = self.shared.lock();
        if queue.stopping {
            return;
        }
        queue.stopping = true;
        let pending = queue.pending.len();
        drop(queue);

        debug!(pending, "worker pool stopping");
        self.shared.signal.notify_all();
    }

    /// Check if `stop` has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.shared.lock().stopping
    }

    /// Block until no work is pending or executing.
    ///
    /// After `stop`, only waits for in-flight items. Returns at once if the
    /// pool has no workers, since queued work could never drain.
    pub fn wait_idle(&self) {
        if self.workers.is_empty() {
            return;
        }
        let queue = self.shared.lock();
        let _idle = self
            .shared
            .signal
            .wait_while(queue, |q| {
                !q.in_progress.is_empty() || (!q.stopping && !q.pending.is_empty())
            })
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Current activity counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let queue = self.shared.lock();
        PoolStats {
            workers: self.workers.len(),
            pending: queue.pending.len(),
            in_progress: queue.in_progress.len(),
            completed: queue.completed,
            panicked: queue.panicked,
        }
    }

    /// Number of spawned workers.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stop, join every worker and report what never ran.
    pub fn shutdown(mut self) -> ShutdownReport {
        self.finish()
    }

    fn finish(&mut self) -> ShutdownReport {
        self.stop();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("worker thread exited abnormally");
            }
        }

        let mut queue = self.shared.lock();
        let abandoned = std::mem::take(&mut queue.pending);
        let report = ShutdownReport {
            completed: queue.completed,
            panicked: queue.panicked,
            abandoned: abandoned.len(),
        };
        drop(queue);

        if report.abandoned > 0 {
            warn!(abandoned = report.abandoned, "dropping work that never ran");
        }
        drop(abandoned);
        report
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.finish();
    }
}

fn run_worker(id: usize, shared: &Shared) {
    debug!(worker = id, "worker started");
    loop {
        let queue = shared.lock();
        let mut queue = shared
            .signal
            .wait_while(queue, |q| !q.stopping && q.pending.len() <= id)
            .unwrap_or_else(PoisonError::into_inner);
        if queue.stopping {
            break;
        }
        let Some((job_id, job)) = queue.pending.pop_front() else {
            continue;
        };
        queue.in_progress.insert(job_id);
        drop(queue);

        let outcome = panic::catch_unwind(AssertUnwindSafe(job));

        let mut queue = shared.lock();
        queue.in_progress.remove(&job_id);
        match outcome {
            Ok(()) => queue.completed += 1,
            Err(_) => queue.panicked += 1,
        }
        drop(queue);
        shared.signal.notify_all();

        if let Err(payload) = outcome {
            error!(worker = id, job = job_id, panic = %panic_message(&*payload), "work item panicked");
        }
    }
    debug!(worker = id, "worker exiting");
}
