//! Admission control logic and state management.

mod backend;
mod limiter;
mod registry;
mod window;

pub use backend::AdmissionControl;
pub use limiter::{AdmissionLimiter, Decision};
pub use registry::WindowRegistry;
pub use window::Window;
