//! Shared test utilities for the service-warden workspace.
//!
//! Provides the fixtures the crate test suites have in common: an
//! instrumented provider backend that records, fails, or cancels on chosen
//! calls, canonical service configurations, and a temporary-directory
//! builder for CLI scenarios. Dev-dependency only, never published.

pub mod backend;
pub mod config;
pub mod workspace;

pub use backend::{BackendCall, RecordingBackend};
pub use config::{sample_config, sample_config_with_rules, sample_manifest_toml};
pub use workspace::TestWorkspace;
