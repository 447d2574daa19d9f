//! Manifest parsing for warden.toml files
//!
//! The manifest declares the desired configuration of one service. It is
//! the only input a user edits; everything else (state, snapshots) is
//! derived from provider responses.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use warden_model::ServiceConfig;

/// Desired-state manifest parsed from warden.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// The service this manifest manages
    pub service: ServiceConfig,
}

impl Manifest {
    /// Parse a manifest from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use warden_core::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [service]
    /// name = "analytics"
    /// cloud_provider = "aws"
    /// region = "us-east-2"
    /// tier = "production"
    /// idle_scaling = true
    /// min_total_memory_gb = 24
    /// max_total_memory_gb = 360
    /// idle_timeout_minutes = 5
    ///
    /// [[service.access_rules]]
    /// source = "10.0.0.0/8"
    /// description = "vpc"
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.service.name, "analytics");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Load and parse a manifest file
    ///
    /// # Errors
    ///
    /// Returns `ManifestNotFound` if the path does not exist, or a parse
    /// error if the content is not a valid manifest.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Validate the declared configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` with every issue found if the configuration
    /// is not internally coherent.
    pub fn validated(self) -> Result<Self> {
        let issues = self.service.validate();
        if issues.is_empty() {
            Ok(self)
        } else {
            Err(Error::InvalidConfig { issues })
        }
    }
}
