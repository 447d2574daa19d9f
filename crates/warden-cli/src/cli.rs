//! Command-line argument definitions for the `warden` binary.

use clap::{Parser, Subcommand};

/// Service Warden - converge a managed service onto its manifest.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose diagnostic output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the manifest for problems without touching any service
    Validate,

    /// Show what apply would change, without applying anything
    Plan {
        /// Also print a line diff of the full configuration
        #[arg(long)]
        diff: bool,
    },

    /// Converge the recorded service onto the manifest
    Apply {
        /// Compute and print the plan, then stop before applying it
        #[arg(long)]
        dry_run: bool,
    },

    /// Tear down the recorded service and clear local state
    Destroy {
        /// Confirm the teardown; without this flag destroy refuses to run
        #[arg(long)]
        yes: bool,
    },
}
