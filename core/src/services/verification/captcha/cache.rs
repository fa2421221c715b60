//! In-memory captcha answer cache with periodic eviction
//!
//! Entries are keyed by captcha id and removed on successful verification, on
//! a lookup that finds them expired, or by the background sweep.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::entities::captcha::CaptchaEntry;
use crate::services::verification::clock::Clock;

/// Process-wide captcha cache
pub struct CaptchaCache {
    entries: Mutex<HashMap<String, CaptchaEntry>>,
    clock: Arc<dyn Clock>,
    sweep_interval: Duration,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl CaptchaCache {
    /// Create an empty cache. The sweep task is not running until `start`.
    pub fn new(clock: Arc<dyn Clock>, sweep_interval: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            sweep_interval,
            sweeper: Mutex::new(None),
        }
    }

    // A panic while holding the lock must not take the cache down with it.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, CaptchaEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert(&self, captcha_id: impl Into<String>, entry: CaptchaEntry) {
        self.entries().insert(captcha_id.into(), entry);
    }

    /// Check a submitted answer
    ///
    /// Unknown ids fail. Expired entries are removed and fail. A match
    /// consumes the entry; a mismatch leaves it for another attempt.
    pub fn verify(&self, captcha_id: &str, submitted: &str) -> bool {
        let now = self.clock.now();
        let mut entries = self.entries();

        let Some(entry) = entries.get(captcha_id) else {
            return false;
        };

        if entry.is_expired_at(now) {
            entries.remove(captcha_id);
            return false;
        }

        if entry.matches(submitted) {
            entries.remove(captcha_id);
            true
        } else {
            false
        }
    }

    /// Remove every expired entry, returning how many were dropped
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        debug!(
            removed = removed,
            remaining = entries.len(),
            event = "captcha_sweep",
            "Swept expired captchas"
        );
        removed
    }

    pub fn contains(&self, captcha_id: &str) -> bool {
        self.entries().contains_key(captcha_id)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Start the background sweep on the current tokio runtime
    ///
    /// Calling `start` while the sweep is running does nothing. The task
    /// holds a weak reference and ends once the cache is dropped.
    pub fn start(self: &Arc<Self>) {
        let mut sweeper = self.sweeper.lock().unwrap_or_else(|e| e.into_inner());
        if sweeper.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(error = %e, "Captcha sweep not started: no tokio runtime");
                return;
            }
        };

        let cache: Weak<Self> = Arc::downgrade(self);
        let period = self.sweep_interval;

        *sweeper = Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match cache.upgrade() {
                    Some(cache) => {
                        cache.sweep_expired();
                    }
                    None => break,
                }
            }
        }));

        info!(
            interval_seconds = period.as_secs(),
            "Captcha sweep started"
        );
    }

    /// Stop the background sweep
    pub fn stop(&self) {
        if let Some(handle) = self
            .sweeper
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            handle.abort();
            info!("Captcha sweep stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for CaptchaCache {
    fn drop(&mut self) {
        if let Some(handle) = self
            .sweeper
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            handle.abort();
        }
    }
}
