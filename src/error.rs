//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == QuickLru Error Enum ==
/// Errors raised while building a cache.
///
/// Lookups never fail: a missing key is reported as `None` or `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuickLruError {
    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for QuickLruError {
    fn from(err: serde_json::Error) -> Self {
        QuickLruError::InvalidConfig(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, QuickLruError>;
