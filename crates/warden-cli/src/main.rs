//! Service Warden CLI entry point.

mod cli;
mod commands;
mod error;
mod render;

use clap::Parser;
use colored::Colorize;

use crate::cli::{Cli, Commands};
use crate::error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    match cli.command {
        Some(command) => execute_command(command).await,
        None => {
            println!(
                "{} {}",
                "warden".green().bold(),
                "- converge managed services onto their manifests"
            );
            println!();
            println!("Run {} for available commands.", "warden --help".cyan());
            Ok(())
        }
    }
}

async fn execute_command(command: Commands) -> Result<()> {
    let root = std::env::current_dir()?;

    match command {
        Commands::Validate => commands::run_validate(&root),
        Commands::Plan { diff } => commands::run_plan(&root, diff),
        Commands::Apply { dry_run } => commands::run_apply(&root, dry_run).await,
        Commands::Destroy { yes } => commands::run_destroy(&root, yes).await,
    }
}
