//! Error types for warden-client

/// Result type for warden-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a provider backend can report
///
/// Backends map their native failures onto these three shapes so the engine
/// can reason about them uniformly: the service is gone, the provider said
/// no, or the request never got a verdict at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Service '{id}' not found")]
    ServiceNotFound { id: String },

    #[error("Provider rejected the request: {reason}")]
    Rejected { reason: String },

    #[error("Transport failure: {message}")]
    Transport { message: String },
}

impl Error {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ServiceNotFound { id: id.into() }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
