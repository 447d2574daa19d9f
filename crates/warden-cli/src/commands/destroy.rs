//! Destroy command implementation.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use warden_client::{FleetBackend, MemoryBackend};
use warden_core::{Reconciler, StateFile};

use crate::commands::state_path;
use crate::error::{CliError, Result};

/// Tear down the recorded service and clear local state.
pub async fn run_destroy(root: &Path, yes: bool) -> Result<()> {
    let backend = MemoryBackend::new();

    if let Some(snapshot) = StateFile::load_or_new(&state_path(root))?.snapshot() {
        backend.seed(snapshot).await;
    }

    run_destroy_with_backend(root, Arc::new(backend), yes).await
}

/// Destroy against an explicit backend, for tests that inject failures.
pub async fn run_destroy_with_backend(
    root: &Path,
    backend: Arc<dyn FleetBackend>,
    yes: bool,
) -> Result<()> {
    println!("{} Destroying service...", "=>".blue().bold());

    let state_file = state_path(root);
    let mut state = StateFile::load_or_new(&state_file)?;

    let Some(service) = state.service() else {
        println!(
            "{} No service is recorded here. Nothing to destroy.",
            "OK".green().bold()
        );
        return Ok(());
    };

    if !yes {
        println!(
            "This would tear down service {} ({}).",
            service.id.cyan(),
            service.config.name
        );
        return Err(CliError::user(
            "Refusing to destroy without --yes; re-run with --yes to confirm",
        ));
    }

    let id = service.id.clone();
    let engine = Reconciler::new(backend);
    engine.destroy(&id).await?;

    state.clear();
    state.save(&state_file)?;

    println!("{} Destroyed service {}.", "OK".green().bold(), id.cyan());
    Ok(())
}
