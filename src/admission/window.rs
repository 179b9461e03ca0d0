//! Per-key admission window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// A single fixed window of admissions for one key.
///
/// The start instant is fixed at creation; only the count moves, via
/// atomic increments. Once the registry replaces an expired window the
/// old one is superseded and no longer reachable for new callers, which
/// freezes its count apart from the in-flight stragglers described on
/// [`WindowRegistry::current`](super::WindowRegistry::current).
#[derive(Debug)]
pub struct Window {
    /// When this window opened.
    started_at: Instant,
    /// Admissions recorded since `started_at`.
    count: AtomicU64,
}

impl Window {
    /// Open a fresh window at `started_at` with a zero count.
    pub(crate) fn new(started_at: Instant) -> Self {
        Self {
            started_at,
            count: AtomicU64::new(0),
        }
    }

    /// Instant this window opened.
    ///
    /// Callers that need a retry hint can derive one from this and the
    /// configured window length; the limiter itself does not compute it.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Number of admissions recorded so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Whether this window is older than `length`.
    ///
    /// Strictly older: a window is still current at exactly `length` age.
    pub fn is_expired(&self, now: Instant, length: Duration) -> bool {
        now.saturating_duration_since(self.started_at) > length
    }

    /// Record one admission attempt and return the post-increment count.
    ///
    /// Increments are totally ordered; each concurrent caller observes a
    /// distinct, monotonically increasing value.
    pub fn record(&self) -> u64 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }
}
