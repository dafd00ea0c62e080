//! Per-field debounce for validation-as-you-type.
//!
//! Each key owns at most one pending job. Scheduling a job for a key that
//! already has one aborts the earlier job before it fires, so only the last
//! value typed within the quiescence window is validated. Keys are
//! independent; nothing orders jobs across keys.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::ScheduleError;

/// Quiescence window before a typed value is validated.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

struct PendingJob {
    ticket: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Timers {
    next_ticket: u64,
    pending: HashMap<String, PendingJob>,
}

/// Cancellable delayed jobs keyed by field name.
pub struct Debouncer {
    delay: Duration,
    timers: Arc<Mutex<Timers>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timers: Arc::new(Mutex::new(Timers::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `job` after the delay unless another job is scheduled for `key`
    /// first. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, key: impl Into<String>, job: F) -> Result<(), ScheduleError>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = Handle::try_current()?;
        let key = key.into();

        // Held across spawn + insert so the new task cannot observe the map
        // before its own entry is in place.
        let mut timers = self.timers.lock();

        if let Some(previous) = timers.pending.remove(&key) {
            previous.handle.abort();
            tracing::debug!(field = %key, "superseded pending validation");
        }

        timers.next_ticket += 1;
        let ticket = timers.next_ticket;

        let delay = self.delay;
        let shared = Arc::clone(&self.timers);
        let task_key = key.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut timers = shared.lock();
                if timers
                    .pending
                    .get(&task_key)
                    .is_some_and(|p| p.ticket == ticket)
                {
                    timers.pending.remove(&task_key);
                }
            }
            job();
        });

        timers.pending.insert(key, PendingJob { ticket, handle });
        Ok(())
    }

    /// Drop the pending job for `key`, if any. Returns whether one existed.
    pub fn cancel(&self, key: &str) -> bool {
        match self.timers.lock().pending.remove(key) {
            Some(job) => {
                job.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drop every pending job.
    pub fn cancel_all(&self) {
        let mut timers = self.timers.lock();
        for (_, job) in timers.pending.drain() {
            job.handle.abort();
        }
    }

    /// Number of jobs scheduled but not yet fired.
    pub fn pending(&self) -> usize {
        self.timers.lock().pending.len()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending())
            .finish()
    }
}
