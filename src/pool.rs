// ABOUTME: Bounded worker pool shared by API calls and webhook dispatch
// ABOUTME: Owns a dedicated tokio runtime, caps concurrent jobs with a semaphore, and shuts down once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Worker pool
//!
//! Every asynchronous piece of the client runs here: HTTP round-trips,
//! response normalization, and user-supplied webhook handlers. The pool owns
//! its own multi-threaded runtime so callers never need one of their own, and
//! a semaphore caps how many jobs run at once. Once [`WorkerPool::shutdown`]
//! is called, new submissions fail with [`TerraError::PoolShutDown`] instead of
//! queueing forever.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use terra_core::constants::POOL_THREADS_PER_CPU;
use terra_core::{TerraError, TerraResult};
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::Semaphore;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

/// Fixed-size pool of workers backed by a dedicated tokio runtime
pub struct WorkerPool {
    size: usize,
    handle: Handle,
    runtime: Mutex<Option<Runtime>>,
    limiter: Limiter,
    in_flight: Arc<AtomicUsize>,
    closed: AtomicBool,
}

impl WorkerPool {
    /// Start a pool with `size` workers
    ///
    /// A size of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolStart`] if the runtime threads cannot be spawned
    pub fn new(size: usize) -> TerraResult<Self> {
        let size = size.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(size)
            .max_blocking_threads(size)
            .thread_name("terra-worker")
            .enable_all()
            .build()
            .map_err(|source| TerraError::PoolStart { source })?;

        info!(workers = size, "Started Terra worker pool");

        Ok(Self {
            size,
            handle: runtime.handle().clone(),
            runtime: Mutex::new(Some(runtime)),
            limiter: Limiter {
                permits: Arc::new(Semaphore::new(size)),
            },
            in_flight: Arc::new(AtomicUsize::new(0)),
            closed: AtomicBool::new(false),
        })
    }

    /// Start a pool sized at four workers per available CPU
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolStart`] if the runtime threads cannot be spawned
    pub fn with_default_size() -> TerraResult<Self> {
        Self::new(Self::default_size())
    }

    /// Four workers per available CPU
    #[must_use]
    pub fn default_size() -> usize {
        thread::available_parallelism().map_or(1, NonZeroUsize::get) * POOL_THREADS_PER_CPU
    }

    /// Number of workers
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Jobs submitted and not yet finished
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether [`WorkerPool::shutdown`] has been called
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Run an async task on the pool without taking a worker permit
    ///
    /// Used for I/O that waits on the network; CPU work inside the task should
    /// go through [`Limiter::run`].
    pub(crate) fn spawn<F>(&self, task: F) -> TerraResult<JoinHandle<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.ensure_open()?;
        let guard = InFlight::enter(&self.in_flight);
        Ok(self.handle.spawn(async move {
            let _guard = guard;
            task.await;
        }))
    }

    /// Run a blocking job on a pool worker once a permit is free
    ///
    /// A panic inside the job is logged and contained to that job.
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`] if the pool no longer accepts work
    pub fn execute<F>(&self, job: F) -> TerraResult<AbortHandle>
    where
        F: FnOnce() + Send + 'static,
    {
        let limiter = self.limiter.clone();
        let handle = self.handle.clone();
        let task = self.spawn(async move {
            let Ok(_permit) = limiter.permits.acquire().await else {
                debug!("Dropping job queued before pool shutdown");
                return;
            };
            if let Err(e) = handle.spawn_blocking(job).await {
                if e.is_panic() {
                    warn!(error = %e, "Job panicked on worker pool");
                }
            }
        })?;
        Ok(task.abort_handle())
    }

    /// Concurrency limiter shared with tasks already on the pool
    pub(crate) fn limiter(&self) -> Limiter {
        self.limiter.clone()
    }

    /// Stop accepting work and tear the runtime down
    ///
    /// Running tasks are dropped at their next await point. Returns `false` if
    /// the pool had already been shut down.
    pub fn shutdown(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.limiter.permits.close();
        let runtime = self
            .runtime
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
        }
        info!(in_flight = self.in_flight(), "Terra worker pool shut down");
        true
    }

    fn ensure_open(&self) -> TerraResult<()> {
        if self.is_shut_down() {
            warn!("Rejected submission to a shut down worker pool");
            return Err(TerraError::PoolShutDown);
        }
        Ok(())
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.size)
            .field("in_flight", &self.in_flight())
            .field("closed", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}

/// Caps how many jobs do CPU work at the same time
#[derive(Clone)]
pub(crate) struct Limiter {
    permits: Arc<Semaphore>,
}

impl Limiter {
    /// Run `job` while holding a worker permit
    pub(crate) async fn run<R>(&self, job: impl FnOnce() -> R) -> TerraResult<R> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| TerraError::PoolShutDown)?;
        Ok(job())
    }
}

struct InFlight {
    counter: Arc<AtomicUsize>,
}

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_zero_size_is_clamped() {
        let pool = WorkerPool::new(0).unwrap();
        assert_eq!(pool.size(), 1);
    }

    #[test]
    fn test_execute_runs_job() {
        let pool = WorkerPool::new(2).unwrap();
        let (tx, rx) = mpsc::channel();
        pool.execute(move || tx.send(42).unwrap()).unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
    }

    #[test]
    fn test_shutdown_happens_once() {
        let pool = WorkerPool::new(1).unwrap();
        assert!(pool.shutdown());
        assert!(!pool.shutdown());
        assert!(pool.is_shut_down());
    }

    #[test]
    fn test_execute_after_shutdown_fails_fast() {
        let pool = WorkerPool::new(1).unwrap();
        pool.shutdown();
        let err = pool.execute(|| {}).unwrap_err();
        assert!(matches!(err, TerraError::PoolShutDown));
    }

    #[test]
    fn test_panicking_job_does_not_poison_pool() {
        let pool = WorkerPool::new(1).unwrap();
        pool.execute(|| panic!("handler failure")).unwrap();
        let (tx, rx) = mpsc::channel();
        pool.execute(move || tx.send(()).unwrap()).unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
