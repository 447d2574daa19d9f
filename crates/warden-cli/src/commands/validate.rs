//! Validate command implementation.

use std::path::Path;

use colored::Colorize;
use warden_core::Manifest;

use crate::commands::manifest_path;
use crate::error::{CliError, Result};

/// Check the manifest for problems without touching any service.
pub fn run_validate(root: &Path) -> Result<()> {
    println!("{} Validating manifest...", "=>".blue().bold());

    let manifest = Manifest::load(&manifest_path(root))?;
    let issues = manifest.service.validate();

    if issues.is_empty() {
        println!(
            "{} Manifest for '{}' is valid.",
            "OK".green().bold(),
            manifest.service.name.cyan()
        );
        return Ok(());
    }

    println!(
        "{} Manifest has {} problem(s):",
        "INVALID".red().bold(),
        issues.len()
    );
    for issue in &issues {
        println!("   {} {}", "!".red(), issue);
    }

    Err(CliError::user("Manifest validation failed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::TestWorkspace;

    #[test]
    fn accepts_a_valid_manifest() {
        let workspace = TestWorkspace::new();
        workspace.write_sample_manifest();

        assert!(run_validate(workspace.root()).is_ok());
    }

    #[test]
    fn fails_when_manifest_is_missing() {
        let workspace = TestWorkspace::new();

        let err = run_validate(workspace.root()).unwrap_err();
        assert!(err.to_string().contains("warden.toml"));
    }

    #[test]
    fn fails_when_manifest_has_issues() {
        let workspace = TestWorkspace::new();
        workspace.write_manifest(
            r#"
[service]
name = ""
cloud_provider = "aws"
region = "us-east-2"
tier = "production"
idle_scaling = true
min_total_memory_gb = 720
max_total_memory_gb = 360
idle_timeout_minutes = 5
"#,
        );

        let err = run_validate(workspace.root()).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }
}
