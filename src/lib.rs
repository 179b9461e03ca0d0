//! Clinicgate - Admission Control for the Clinic REST API
//!
//! This crate implements the admission-control core that throttles
//! requests per endpoint key in front of the clinic's CRUD request
//! layer. It is a fixed-window counter: per-key windows of a fixed
//! length, rotated in place when they expire, with lock-free counting
//! inside a window. State is process-local and lost on restart.

pub mod admission;
pub mod clock;
pub mod config;
pub mod error;
