//! State file persistence
//!
//! The state file records what was last applied: the provider-assigned id,
//! the configuration as of the last successful call, and when that call
//! completed. It is the "observed" side of the next reconcile. Persistence
//! is TOML with file locking and atomic replace, so concurrent warden
//! invocations against the same directory cannot corrupt it.

use crate::error::Result;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use warden_model::{ServiceConfig, ServiceSnapshot};

/// Last-applied record for one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceState {
    /// Provider-assigned id
    pub id: String,
    /// When the last successful apply finished
    pub applied_at: DateTime<Utc>,
    /// Configuration as the provider reported it after that apply
    pub config: ServiceConfig,
}

/// On-disk record of the last applied state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    /// State format version for forward compatibility
    version: String,
    /// The managed service, absent before first apply and after destroy
    service: Option<ServiceState>,
}

impl StateFile {
    /// Create an empty state file
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            service: None,
        }
    }

    /// Load a state file with shared lock, or start empty if none exists
    pub fn load_or_new(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Load a state file from TOML with shared lock
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, locked, or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        file.lock_shared()?;

        // Read through the locked file handle to avoid TOCTOU race
        let mut content = String::new();
        use std::io::Read;
        (&file).read_to_string(&mut content)?;
        let state: StateFile = toml::from_str(&content)?;

        // Lock released when file is dropped
        Ok(state)
    }

    /// Save the state file atomically with exclusive lock
    ///
    /// Uses write-to-temp-then-rename with file locking so a crash or a
    /// concurrent writer never leaves a half-written state file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or locked.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        // Create or open the target file for locking
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        // Acquire exclusive lock (blocks if another process holds lock)
        lock_file.lock_exclusive()?;

        // Write to temporary file first
        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, &content)?;

        // Atomically rename to target
        fs::rename(&temp_path, path)?;

        // Lock released when lock_file is dropped
        Ok(())
    }

    /// The recorded service, if any
    pub fn service(&self) -> Option<&ServiceState> {
        self.service.as_ref()
    }

    /// Rebuild the observed snapshot from the recorded state
    pub fn snapshot(&self) -> Option<ServiceSnapshot> {
        self.service
            .as_ref()
            .map(|s| ServiceSnapshot::new(s.id.clone(), s.config.clone()))
    }

    /// Record a fresh snapshot, stamping the apply time as now
    pub fn record(&mut self, snapshot: &ServiceSnapshot) {
        self.service = Some(ServiceState {
            id: snapshot.id.clone(),
            applied_at: Utc::now(),
            config: snapshot.config.clone(),
        });
    }

    /// Forget the recorded service after a destroy
    pub fn clear(&mut self) {
        self.service = None;
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new()
    }
}
