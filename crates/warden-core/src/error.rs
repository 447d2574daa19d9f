//! Error types for warden-core

use crate::plan::ImmutableViolation;
use std::fmt;
use std::path::PathBuf;
use warden_model::{ServiceSnapshot, ValidationIssue};

/// Result type for warden-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// The provider calls the engine can issue
///
/// Used to tag failures and cancellations with the call they happened at,
/// so the caller always knows how far an apply got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
    Create,
    Read,
    UpdateIdentity,
    UpdateScaling,
    Delete,
}

impl fmt::Display for RemoteCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteCall::Create => write!(f, "create"),
            RemoteCall::Read => write!(f, "read"),
            RemoteCall::UpdateIdentity => write!(f, "identity update"),
            RemoteCall::UpdateScaling => write!(f, "scaling update"),
            RemoteCall::Delete => write!(f, "delete"),
        }
    }
}

/// Errors that can occur in warden-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Manifest file not found at expected path
    #[error("Manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// Desired configuration failed standalone validation
    #[error("Configuration is invalid ({} issue(s))", .issues.len())]
    InvalidConfig { issues: Vec<ValidationIssue> },

    /// Desired configuration changes fields fixed at creation time
    ///
    /// Carries every violated field so the caller sees the full list at
    /// once. Nothing was sent to the provider.
    #[error("Plan would change {} immutable field(s); recreate the service instead", .violations.len())]
    ImmutableChange { violations: Vec<ImmutableViolation> },

    /// A cancellation request arrived before the named call was issued
    ///
    /// `applied` is the snapshot from the last call that did complete, if
    /// any; calls already in flight are never torn down mid-request.
    #[error("Reconciliation cancelled before the {pending} call")]
    Cancelled {
        pending: RemoteCall,
        applied: Option<ServiceSnapshot>,
    },

    /// A provider call failed
    ///
    /// `applied` carries the snapshot from the last call that succeeded in
    /// the same run, so the caller knows exactly which changes landed.
    #[error("Remote {call} call failed: {source}")]
    Remote {
        call: RemoteCall,
        applied: Option<ServiceSnapshot>,
        #[source]
        source: warden_client::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Keyed diff error from warden-diff
    #[error(transparent)]
    Diff(#[from] warden_diff::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
