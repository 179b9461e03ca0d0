//! Core admission limiter implementation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::AdmissionConfig;
use crate::error::{Result, ServiceError};

use super::registry::WindowRegistry;

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The caller may proceed with the guarded work.
    Admitted,
    /// The current window for the key is saturated; the caller must not
    /// proceed. An expected outcome, not a fault.
    Rejected,
}

impl Decision {
    /// Whether the caller may proceed.
    pub fn is_admitted(self) -> bool {
        matches!(self, Decision::Admitted)
    }
}

/// Fixed-window admission limiter over per-key counting windows.
///
/// Each key gets up to `max_requests` admissions per window; the count
/// resets at fixed boundaries when the window rotates, rather than
/// decaying continuously. A burst of `max_requests` straddling a
/// boundary can therefore be followed immediately by another full burst,
/// up to roughly twice the nominal rate in the worst case. That is an
/// inherent property of fixed windows and is kept as-is here.
///
/// The limiter is thread-safe, performs no I/O, and never blocks beyond
/// the registry's per-key entry lock. Construct one at service start and
/// share it via `Arc` with everything that admits work.
pub struct AdmissionLimiter {
    /// Current window per key.
    registry: WindowRegistry,
    /// Maximum admissions per key per window.
    max_requests: u64,
    /// Length of each window.
    window_length: Duration,
    /// Time source for window bookkeeping.
    clock: Arc<dyn Clock>,
}

impl AdmissionLimiter {
    /// Create a limiter from validated configuration, on the system
    /// clock.
    pub fn new(config: &AdmissionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create a limiter reading time from `clock`.
    pub fn with_clock(config: &AdmissionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: WindowRegistry::new(),
            max_requests: config.max_requests,
            window_length: config.window_length(),
            clock,
        }
    }

    /// Decide whether one unit of work for `key` may proceed, recording
    /// the attempt either way.
    ///
    /// Rejected attempts still consume a counted slot: retrying a
    /// saturated key inside the same window stays rejected and does not
    /// earn back capacity. The decision is immediate and non-cancelable;
    /// rejection carries no retry hint (callers can derive one from
    /// [`window_length`](Self::window_length) and the window start).
    pub fn check_limit(&self, key: &str) -> Decision {
        let now = self.clock.now();
        let window = self.registry.current(key, now, self.window_length);

        let n = window.record();
        if n > self.max_requests {
            debug!(key, count = n, limit = self.max_requests, "rate limit exceeded");
            Decision::Rejected
        } else {
            trace!(key, count = n, limit = self.max_requests, "admitted");
            Decision::Admitted
        }
    }

    /// [`check_limit`](Self::check_limit), surfacing rejection through
    /// the service error channel for callers that propagate faults.
    pub fn try_admit(&self, key: &str) -> Result<()> {
        match self.check_limit(key) {
            Decision::Admitted => Ok(()),
            Decision::Rejected => Err(ServiceError::RateLimitExceeded),
        }
    }

    /// Maximum admissions per key per window.
    pub fn max_requests(&self) -> u64 {
        self.max_requests
    }

    /// Length of each window.
    pub fn window_length(&self) -> Duration {
        self.window_length
    }

    /// Number of keys currently tracked.
    pub fn key_count(&self) -> usize {
        self.registry.len()
    }

    /// Recorded admissions in the current window for `key`, if any.
    ///
    /// Returns `None` if the key has never been seen.
    pub fn current_count(&self, key: &str) -> Option<u64> {
        self.registry.get(key).map(|w| w.count())
    }
}

impl Default for AdmissionLimiter {
    fn default() -> Self {
        Self::new(&AdmissionConfig::default())
    }
}
