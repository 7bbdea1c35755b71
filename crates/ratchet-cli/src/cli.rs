//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ratchet - Only let lint warning counts go down
#[derive(Parser, Debug)]
#[command(name = "ratchet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compare warning counts against the record and update it
    ///
    /// Examples:
    ///   ratchet check --report eslint.json      # Use a saved report
    ///   npx eslint -f json . | ratchet check --report -
    ///   ratchet check src/index.js              # Lint only one file
    ///   ratchet check --overwrite               # Start a fresh record
    Check {
        /// Files or directories to lint (default: the surface area)
        files: Vec<String>,

        /// Ignore the existing record file
        #[arg(long)]
        overwrite: bool,

        /// Compare without updating the record file
        #[arg(long)]
        no_write: bool,

        /// ESLint JSON report to read instead of running lint-command ("-" for stdin)
        #[arg(long, value_name = "PATH")]
        report: Option<String>,

        /// Project root (default: nearest enclosing project)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Show recorded warning counts per rule
    Stats {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Project root (default: nearest enclosing project)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Show recorded warning counts per file
    Files {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Project root (default: nearest enclosing project)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Insert eslint-disable-next-line comments above existing violations
    ///
    /// Examples:
    ///   ratchet suppress no-console --report eslint.json
    ///   ratchet suppress "no-console, semi" src
    Suppress {
        /// Comma-separated rules to suppress
        rules: String,

        /// Files or directories to lint (default: the surface area)
        files: Vec<String>,

        /// ESLint JSON report to read instead of running lint-command ("-" for stdin)
        #[arg(long, value_name = "PATH")]
        report: Option<String>,

        /// Project root (default: nearest enclosing project)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
}

/// Split a comma-separated rule list, tolerating quotes and spaces.
pub fn parse_rule_list(rules: &str) -> Vec<String> {
    rules
        .trim_matches('"')
        .split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(String::from)
        .collect()
}
