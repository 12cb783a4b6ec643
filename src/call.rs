// ABOUTME: Pending call handle bridging a pool task to awaiting, blocking, or polling callers
// ABOUTME: Resolves exactly once with a value, an error, or cancellation, and supports bounded waits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pending calls
//!
//! A [`PendingCall`] is handed back as soon as a request is issued. The task
//! doing the work runs on the [`WorkerPool`] and completes the call once; the
//! caller can `.await` it, block on it from synchronous code, poll it with
//! [`PendingCall::try_take`], or cancel it.
//!
//! Dropping a `PendingCall` detaches it: the task keeps running and its result
//! is discarded. Use [`PendingCall::cancel`] to stop the work.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use terra_core::{TerraError, TerraResult};
use tokio::task::AbortHandle;
use tracing::debug;

use crate::pool::WorkerPool;

enum Slot<T> {
    Pending(Option<Waker>),
    Ready(TerraResult<T>),
    Cancelled,
    Consumed,
}

struct Shared<T> {
    slot: Mutex<Slot<T>>,
    resolved: Condvar,
}

impl<T> Shared<T> {
    fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Pending(None)),
            resolved: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move out of `Pending` into `next`, waking every waiter
    fn resolve(&self, next: Slot<T>) -> bool {
        let waker = {
            let mut slot = self.lock();
            let Slot::Pending(waker) = &mut *slot else {
                return false;
            };
            let waker = waker.take();
            *slot = next;
            waker
        };
        self.resolved.notify_all();
        if let Some(waker) = waker {
            waker.wake();
        }
        true
    }

    fn take(slot: &mut Slot<T>) -> Option<TerraResult<T>> {
        match std::mem::replace(slot, Slot::Consumed) {
            Slot::Ready(outcome) => Some(outcome),
            Slot::Cancelled => {
                *slot = Slot::Cancelled;
                Some(Err(TerraError::Cancelled))
            }
            Slot::Consumed => Some(Err(TerraError::ResultConsumed)),
            pending @ Slot::Pending(_) => {
                *slot = pending;
                None
            }
        }
    }
}

/// Completes the shared slot from inside the pool task
///
/// If the task is dropped before producing a value (runtime shutdown, abort,
/// or a panic), the call resolves with [`TerraError::Abandoned`] so no waiter
/// is left hanging. A call already cancelled stays cancelled.
struct Completer<T> {
    shared: Arc<Shared<T>>,
    finished: bool,
}

impl<T> Completer<T> {
    fn finish(mut self, outcome: TerraResult<T>) {
        self.finished = true;
        if !self.shared.resolve(Slot::Ready(outcome)) {
            debug!("Discarding result of a call that was already resolved");
        }
    }
}

impl<T> Drop for Completer<T> {
    fn drop(&mut self) {
        if !self.finished {
            self.shared.resolve(Slot::Ready(Err(TerraError::Abandoned)));
        }
    }
}

/// Handle to an in-flight call
///
/// Resolves exactly once. The first successful wait takes the value; later
/// waits return [`TerraError::ResultConsumed`].
pub struct PendingCall<T> {
    shared: Arc<Shared<T>>,
    task: AbortHandle,
}

impl<T: Send + 'static> PendingCall<T> {
    /// Run `work` on the pool and return a handle to its eventual result
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`] if the pool no longer accepts work
    pub fn spawn<F>(pool: &WorkerPool, work: F) -> TerraResult<Self>
    where
        F: Future<Output = TerraResult<T>> + Send + 'static,
    {
        let shared = Arc::new(Shared::new());
        let completer = Completer {
            shared: Arc::clone(&shared),
            finished: false,
        };
        let task = pool.spawn(async move {
            let outcome = work.await;
            completer.finish(outcome);
        })?;
        Ok(Self {
            shared,
            task: task.abort_handle(),
        })
    }
}

impl<T> PendingCall<T> {
    /// Cancel the call and stop the underlying request
    ///
    /// Returns `false` if the call had already resolved or been cancelled.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.resolve(Slot::Cancelled);
        if cancelled {
            self.task.abort();
            debug!("Cancelled pending Terra call");
        }
        cancelled
    }

    /// Whether the call was cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(*self.shared.lock(), Slot::Cancelled)
    }

    /// Whether the call has resolved (including by cancellation)
    #[must_use]
    pub fn is_done(&self) -> bool {
        !matches!(*self.shared.lock(), Slot::Pending(_))
    }

    /// Take the result if the call has resolved, without waiting
    pub fn try_take(&mut self) -> Option<TerraResult<T>> {
        Shared::take(&mut self.shared.lock())
    }

    /// Await the result for at most `timeout`
    ///
    /// On timeout the call keeps running and can be awaited again.
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::Timeout`] if the call did not resolve in time, or
    /// the call's own error
    pub async fn wait_timeout(&mut self, timeout: Duration) -> TerraResult<T> {
        tokio::time::timeout(timeout, self)
            .await
            .map_err(|_| TerraError::Timeout { after: timeout })?
    }

    /// Block the current thread until the call resolves
    ///
    /// Must not be called from inside an async task.
    ///
    /// # Errors
    ///
    /// Returns the call's error, [`TerraError::Cancelled`], or
    /// [`TerraError::ResultConsumed`]
    pub fn blocking_wait(self) -> TerraResult<T> {
        let mut slot = self
            .shared
            .resolved
            .wait_while(self.shared.lock(), |slot| matches!(slot, Slot::Pending(_)))
            .unwrap_or_else(PoisonError::into_inner);
        let outcome = Shared::take(&mut slot);
        drop(slot);
        outcome.unwrap_or(Err(TerraError::Abandoned))
    }

    /// Block the current thread for at most `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::Timeout`] if the call did not resolve in time, or
    /// the call's own error
    pub fn blocking_wait_timeout(&mut self, timeout: Duration) -> TerraResult<T> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.shared.lock();
        loop {
            if let Some(outcome) = Shared::take(&mut slot) {
                return outcome;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(TerraError::Timeout { after: timeout });
            }
            slot = self
                .shared
                .resolved
                .wait_timeout(slot, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

impl<T> Future for PendingCall<T> {
    type Output = TerraResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.shared.lock();
        if let Some(outcome) = Shared::take(&mut slot) {
            return Poll::Ready(outcome);
        }
        if let Slot::Pending(waker) = &mut *slot {
            match waker {
                Some(existing) if existing.will_wake(cx.waker()) => {}
                _ => *waker = Some(cx.waker().clone()),
            }
        }
        Poll::Pending
    }
}

impl<T> std::fmt::Debug for PendingCall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCall")
            .field("done", &self.is_done())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
