//! Apply command implementation.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use warden_client::{FleetBackend, MemoryBackend};
use warden_core::{Manifest, ReconcileStatus, Reconciler, StateFile, plan_update};

use crate::commands::{manifest_path, state_path};
use crate::error::{CliError, Result};
use crate::render::plan_lines;

/// Converge the recorded service onto the manifest.
pub async fn run_apply(root: &Path, dry_run: bool) -> Result<()> {
    let backend = MemoryBackend::new();

    // Local mode: the in-memory provider starts from the recorded state,
    // so drift introduced by hand-editing the manifest is what gets applied.
    if let Some(snapshot) = StateFile::load_or_new(&state_path(root))?.snapshot() {
        backend.seed(snapshot).await;
    }

    run_apply_with_backend(root, Arc::new(backend), dry_run).await
}

/// Apply against an explicit backend. Split out so tests can inject
/// failing or recording backends behind the same command flow.
pub async fn run_apply_with_backend(
    root: &Path,
    backend: Arc<dyn FleetBackend>,
    dry_run: bool,
) -> Result<()> {
    println!("{} Applying manifest...", "=>".blue().bold());

    let manifest = Manifest::load(&manifest_path(root))?.validated()?;
    let state_file = state_path(root);
    let mut state = StateFile::load_or_new(&state_file)?;
    let observed = state.snapshot();

    match &observed {
        None => {
            println!("   {} create {}", "+".green(), manifest.service.name.cyan());
        }
        Some(snapshot) => {
            let plan = plan_update(&snapshot.config, &manifest.service)?;

            if plan.has_violations() {
                println!(
                    "{} Manifest conflicts with the existing service:",
                    "BLOCKED".red().bold()
                );
                for violation in &plan.violations {
                    println!("   {} {}", "!".red(), violation);
                }
                return Err(CliError::user("Apply blocked by immutable fields"));
            }

            if plan.is_noop() {
                println!(
                    "{} Service {} already matches the manifest.",
                    "OK".green().bold(),
                    snapshot.id.cyan()
                );
                return Ok(());
            }

            for line in plan_lines(&snapshot.config, &plan) {
                println!("   {line}");
            }
        }
    }

    if dry_run {
        println!("{} Dry run; nothing was applied.", "OK".green().bold());
        return Ok(());
    }

    let engine = Reconciler::new(backend);
    match engine.reconcile(observed.as_ref(), &manifest.service).await {
        Ok(outcome) => {
            state.record(&outcome.snapshot);
            state.save(&state_file)?;

            match outcome.status {
                ReconcileStatus::Created => println!(
                    "{} Created service {}.",
                    "OK".green().bold(),
                    outcome.snapshot.id.cyan()
                ),
                ReconcileStatus::Updated => println!(
                    "{} Service {} converged.",
                    "OK".green().bold(),
                    outcome.snapshot.id.cyan()
                ),
                ReconcileStatus::Unchanged => {
                    println!("{} No changes were needed.", "OK".green().bold())
                }
            }
            Ok(())
        }
        Err(err) => {
            // A partial failure leaves some updates applied. Record the last
            // snapshot the provider confirmed, so the state file matches the
            // service as it actually is now.
            if let warden_core::Error::Remote {
                applied: Some(snapshot),
                ..
            }
            | warden_core::Error::Cancelled {
                applied: Some(snapshot),
                ..
            } = &err
            {
                state.record(snapshot);
                state.save(&state_file)?;
                println!(
                    "{} Partial apply: state recorded up to the last successful call.",
                    "WARN".yellow().bold()
                );
            }
            Err(err.into())
        }
    }
}
