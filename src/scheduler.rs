#![cfg(feature = "std")]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::time::{sleep, Duration};

use crate::engine::config::THINKING_DELAY_MS;

/// Shared flag that tears a match down mid-sequence.
///
/// Clones observe the same flag. Once cancelled, it stays cancelled.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake everything waiting on it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Paces computer moves: a continuation runs only after the thinking delay,
/// and never once the match has been cancelled.
pub struct TurnScheduler {
    delay: Duration,
    cancel: CancelToken,
}

impl TurnScheduler {
    pub fn new(delay: Duration, cancel: CancelToken) -> Self {
        Self { delay, cancel }
    }

    /// Scheduler with the standard thinking delay.
    pub fn standard(cancel: CancelToken) -> Self {
        Self::new(Duration::from_millis(THINKING_DELAY_MS), cancel)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Wait out the delay, then run `task`. Returns `None` without running it
    /// if the token is cancelled before or during the wait.
    pub async fn after_delay<T, F>(&self, task: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            _ = self.cancel.cancelled() => None,
            _ = sleep(self.delay) => {
                if self.cancel.is_cancelled() {
                    None
                } else {
                    Some(task())
                }
            }
        }
    }
}
