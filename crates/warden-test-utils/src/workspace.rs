//! [`TestWorkspace`] builder for CLI test scenarios.
//!
//! A warden invocation operates on a directory holding `warden.toml` and,
//! once something has been applied, `warden.state.toml`. This builder
//! stands up such a directory in a temp location and provides the path and
//! assertion helpers the CLI end-to-end tests lean on.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::sample_manifest_toml;

/// A temporary directory with helper methods for warden CLI scenarios.
///
/// # Example
///
/// ```rust,no_run
/// use warden_test_utils::workspace::TestWorkspace;
///
/// let workspace = TestWorkspace::new();
/// workspace.write_sample_manifest();
/// workspace.assert_file_exists("warden.toml");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestWorkspace: failed to create temp dir"),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the manifest file inside the workspace.
    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("warden.toml")
    }

    /// Path of the state file inside the workspace.
    pub fn state_path(&self) -> PathBuf {
        self.root().join("warden.state.toml")
    }

    /// Write arbitrary manifest content.
    pub fn write_manifest(&self, content: &str) {
        fs::write(self.manifest_path(), content)
            .expect("TestWorkspace: failed to write manifest");
    }

    /// Write the canonical sample manifest (see [`crate::config`]).
    pub fn write_sample_manifest(&self) {
        self.write_manifest(&sample_manifest_toml());
    }

    /// Read the state file content, panicking if it does not exist.
    pub fn read_state(&self) -> String {
        fs::read_to_string(self.state_path()).expect("TestWorkspace: state file missing")
    }

    /// Assert that `path` (relative to the workspace root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the workspace root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
