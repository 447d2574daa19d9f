//! Error types for warden-diff

use std::fmt;

/// Result type for warden-diff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which input collection an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The first argument: state last reported by the provider
    Observed,
    /// The second argument: state the caller wants
    Desired,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Observed => write!(f, "observed"),
            Side::Desired => write!(f, "desired"),
        }
    }
}

/// Errors that can occur while computing a keyed difference
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Duplicate key '{key}' in {side} input")]
    DuplicateKey { side: Side, key: String },
}
