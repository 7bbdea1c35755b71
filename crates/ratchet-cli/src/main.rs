//! ratchet CLI
//!
//! Keeps lint warning counts from growing, file by file and rule by rule.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded.
fn run() -> Result<bool> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<bool> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Check {
            files,
            overwrite,
            no_write,
            report,
            root,
        } => commands::run_check(&cwd, &files, overwrite, no_write, report.as_deref(), root),
        Commands::Stats { json, root } => commands::run_stats(&cwd, json, root).map(|()| true),
        Commands::Files { json, root } => commands::run_files(&cwd, json, root).map(|()| true),
        Commands::Suppress {
            rules,
            files,
            report,
            root,
        } => commands::run_suppress(&cwd, &rules, &files, report.as_deref(), root).map(|()| true),
    }
}
