//! Request-rate throttle shared by every outgoing catalog request.
//!
//! The remote catalog enforces a per-caller request-rate ceiling. This module
//! provides a single gate that spaces out dispatches from all threads, so the
//! crate as a whole stays below that ceiling no matter how many callers fetch
//! concurrently.

use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Minimum spacing between two dispatched requests.
///
/// Kept with headroom below the service's published limit.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(35);

/// Process-wide gate enforcing a minimum interval between dispatches.
///
/// One instance is shared (via `Arc`) by everything that talks to the catalog
/// service. Constructing a fresh instance per test gives each test an
/// isolated timeline; nothing in this crate keeps hidden global state.
pub struct RequestThrottle {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    /// Creates a throttle with a custom minimum interval.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    /// Blocks until one interval has passed since the previous dispatch,
    /// then records and returns the new dispatch instant.
    ///
    /// The read-wait-record sequence runs as a single critical section:
    /// concurrent callers queue on the lock, so no two of them can observe
    /// the same stale timestamp and dispatch within one interval of each
    /// other. First caller to take the lock after a slot opens wins; there is
    /// no further fairness guarantee and no upper bound on the wait.
    pub fn acquire(&self) -> Instant {
        // A poisoned lock means another caller panicked mid-acquire; the
        // timestamp itself is still valid, so keep going.
        let mut last = self
            .last_dispatch
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if let Some(wait) = ready_at.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
        }

        let stamp = Instant::now();
        *last = Some(stamp);
        stamp
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::new(MIN_REQUEST_INTERVAL)
    }
}
