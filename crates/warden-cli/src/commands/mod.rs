//! Command implementations for the `warden` binary.

pub mod apply;
pub mod destroy;
pub mod plan;
pub mod validate;

pub use apply::run_apply;
pub use destroy::run_destroy;
pub use plan::run_plan;
pub use validate::run_validate;

use std::path::{Path, PathBuf};

/// Manifest location inside a workspace directory.
pub(crate) fn manifest_path(root: &Path) -> PathBuf {
    root.join("warden.toml")
}

/// State file location inside a workspace directory.
pub(crate) fn state_path(root: &Path) -> PathBuf {
    root.join("warden.state.toml")
}
