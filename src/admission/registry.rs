//! Concurrent mapping from endpoint key to its current window.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, trace};

use super::window::Window;

/// Registry of the current [`Window`] for every key seen so far.
///
/// Keys are independent: each entry is synchronized on its own map shard,
/// so throughput scales with key cardinality and saturating one key never
/// serializes traffic for another. Entries are never removed; with one
/// key per guarded endpoint the map stays small for the life of the
/// process.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: DashMap<String, Arc<Window>>,
}

impl WindowRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Return the window that should receive the current admission,
    /// installing a fresh one if the key is new or the stored window has
    /// expired.
    ///
    /// Rotation is atomic per key: create and replace both run under the
    /// shard's entry lock, so of all callers that observe the same
    /// expired window exactly one installs the replacement and the rest
    /// return that same replacement. The increment that follows is NOT
    /// under that lock: a caller that fetched the old window just
    /// before rotation may still record into it afterwards. Those
    /// stragglers overcount the superseded window and undercount the
    /// fresh one, by at most one admission per in-flight caller at the
    /// boundary.
    pub fn current(&self, key: &str, now: Instant, window_length: Duration) -> Arc<Window> {
        // Fast path: live window, shared read guard only.
        if let Some(window) = self.windows.get(key) {
            if !window.is_expired(now, window_length) {
                return Arc::clone(&window);
            }
        }

        // Slow path: create or rotate under the entry lock. The expiry
        // check runs again because another caller may have won the
        // rotation between the guard drop above and the lock here.
        let window = self
            .windows
            .entry(key.to_owned())
            .and_modify(|window| {
                if window.is_expired(now, window_length) {
                    trace!(key, superseded_count = window.count(), "rotating expired window");
                    *window = Arc::new(Window::new(now));
                }
            })
            .or_insert_with(|| {
                debug!(key, "opening first window for key");
                Arc::new(Window::new(now))
            });

        Arc::clone(&window)
    }

    /// Current window for a key, without rotating. `None` if the key has
    /// never been seen.
    pub fn get(&self, key: &str) -> Option<Arc<Window>> {
        self.windows.get(key).map(|w| Arc::clone(&w))
    }

    /// Number of keys tracked.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether any key has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Drop all windows. Primarily useful for tests.
    pub fn clear(&self) {
        self.windows.clear();
    }
}
