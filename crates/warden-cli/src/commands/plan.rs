//! Plan command implementation.

use std::path::Path;

use colored::Colorize;
use warden_core::{Manifest, StateFile, plan_update};

use crate::commands::{manifest_path, state_path};
use crate::error::{CliError, Result};
use crate::render::{plan_lines, render_config_diff};

/// Show what apply would change, without applying anything.
pub fn run_plan(root: &Path, diff: bool) -> Result<()> {
    println!("{} Planning changes...", "=>".blue().bold());

    let manifest = Manifest::load(&manifest_path(root))?.validated()?;
    let state = StateFile::load_or_new(&state_path(root))?;

    let Some(observed) = state.snapshot() else {
        let config = &manifest.service;
        println!(
            "{} No service recorded; apply would create:",
            "NEW".green().bold()
        );
        println!(
            "   {} {} ({} {}, {} tier)",
            "+".green(),
            config.name.cyan(),
            config.cloud_provider,
            config.region,
            config.tier
        );
        println!(
            "   {} {}-{} GB memory, {} access rule(s)",
            "+".green(),
            config.min_total_memory_gb,
            config.max_total_memory_gb,
            config.access_rules.len()
        );
        return Ok(());
    };

    let plan = plan_update(&observed.config, &manifest.service)?;

    if plan.has_violations() {
        println!(
            "{} Manifest conflicts with the existing service:",
            "BLOCKED".red().bold()
        );
        for violation in &plan.violations {
            println!("   {} {}", "!".red(), violation);
        }
        println!();
        println!(
            "These fields are fixed at creation. Run {} and apply again to recreate.",
            "warden destroy".cyan()
        );
        return Err(CliError::user("Plan blocked by immutable fields"));
    }

    if plan.is_noop() {
        println!(
            "{} Service {} matches the manifest. Nothing to do.",
            "OK".green().bold(),
            observed.id.cyan()
        );
        // Membership is keyed on source, so edited descriptions plan as no
        // change. Point that out rather than silently ignoring the edit.
        if !observed.config.same_access_rules(&manifest.service) {
            println!(
                "   {} access-rule descriptions differ, but description edits are never applied",
                "!".yellow()
            );
        }
        return Ok(());
    }

    println!("Planned changes for {}:", observed.id.cyan());
    for line in plan_lines(&observed.config, &plan) {
        println!("   {line}");
    }

    if diff {
        println!();
        print!("{}", render_config_diff(&observed.config, &manifest.service)?);
    }

    Ok(())
}
