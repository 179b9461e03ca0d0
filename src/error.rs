//! Error types for the clinic gate service.

use thiserror::Error;

/// Faults surfaced by the service, each mapped to a client-visible
/// status code by [`ServiceError::status_code`].
///
/// `RateLimitExceeded` is an expected admission outcome rather than a
/// fault in spirit: the caller backs off, nothing escalates. It lives
/// here so the surrounding request layer can translate every condition
/// through one place.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A feature gate is switched off for the requested resource.
    #[error("{0}")]
    FeatureDisabled(String),

    /// A request payload failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The requested resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The admission window for the key is saturated.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything unclassified.
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Client-visible status code for this fault.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::FeatureDisabled(_) => 503,
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::RateLimitExceeded => 429,
            ServiceError::Config(_) | ServiceError::Io(_) | ServiceError::Internal(_) => 500,
        }
    }
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
