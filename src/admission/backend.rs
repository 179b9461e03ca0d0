//! Admission control trait for abstracting over limiter implementations.

use super::limiter::{AdmissionLimiter, Decision};

/// Trait for admission-control implementations.
///
/// The request-handling layer holds an `Arc<dyn AdmissionControl>` so an
/// alternative limiter (a different algorithm, a no-op gate in tests)
/// can be swapped in without touching call sites. Implementations must
/// decide synchronously and must not block.
pub trait AdmissionControl: Send + Sync {
    /// Decide whether one unit of work for `key` may proceed.
    fn check_limit(&self, key: &str) -> Decision;
}

impl AdmissionControl for AdmissionLimiter {
    fn check_limit(&self, key: &str) -> Decision {
        AdmissionLimiter::check_limit(self, key)
    }
}
