//! Command implementations for ratchet-cli

pub mod check;
pub mod files;
pub mod stats;
pub mod suppress;

pub use check::run_check;
pub use files::run_files;
pub use stats::run_stats;
pub use suppress::run_suppress;

use std::path::{Path, PathBuf};

use ratchet_core::{Config, LintCommand, LintRunner, ReportSource};
use ratchet_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// The explicit root, or the nearest project enclosing `cwd`.
///
/// An explicit root is canonicalized so record keys line up with the
/// absolute paths linters report.
pub fn resolve_root(root: Option<PathBuf>, cwd: &Path) -> PathBuf {
    match root {
        Some(root) => {
            let root = cwd.join(root);
            dunce::canonicalize(&root).unwrap_or(root)
        }
        None => ratchet_fs::find_project_root(cwd),
    }
}

/// Where the lint report comes from: `--report`, else `lint-command`.
///
/// A relative report path is taken from `cwd`.
pub fn lint_runner(report: Option<&str>, config: &Config, cwd: &Path) -> Result<Box<dyn LintRunner>> {
    match (report, &config.lint_command) {
        (Some("-"), _) => Ok(Box::new(ReportSource::Stdin)),
        (Some(path), _) => Ok(Box::new(ReportSource::File(cwd.join(path)))),
        (None, Some(argv)) => Ok(Box::new(LintCommand::new(argv.clone())?)),
        (None, None) => Err(CliError::user(
            "No lint report given. Pass --report <PATH> or set lint-command in your config.",
        )),
    }
}

/// Express paths given on the command line relative to the project root.
pub fn relative_to_root(files: &[String], cwd: &Path, root: &Path) -> Vec<String> {
    files
        .iter()
        .map(|file| NormalizedPath::relative_to(cwd.join(file), root).into_string())
        .collect()
}
