//! Error types for the CLI layer.

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the terminal.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A problem the user can fix directly (bad flags, refused confirmation).
    #[error("{message}")]
    User { message: String },

    // Transparent wrappers for underlying crate errors.
    #[error(transparent)]
    Core(#[from] warden_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl CliError {
    /// Create a user-facing error with a custom message.
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
