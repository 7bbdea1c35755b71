//! Suppress command implementation

use std::path::{Path, PathBuf};

use ratchet_core::{Config, suppress};

use super::{lint_runner, relative_to_root, resolve_root};
use crate::cli::parse_rule_list;
use crate::error::{CliError, Result};
use crate::output::print_success;

/// Run the suppress command
pub fn run_suppress(
    cwd: &Path,
    rules: &str,
    files: &[String],
    report: Option<&str>,
    root: Option<PathBuf>,
) -> Result<()> {
    let rules = parse_rule_list(rules);
    if rules.is_empty() {
        return Err(CliError::user("At least one rule is required."));
    }

    let root = resolve_root(root, cwd);
    let config = Config::load(&root)?;
    let runner = lint_runner(report, &config, cwd)?;

    let targets = if files.is_empty() {
        config.surface_area.clone()
    } else {
        relative_to_root(files, cwd, &root)
    };

    let outcome = suppress(&root, &rules, &targets, runner.as_ref())?;
    tracing::debug!(files = outcome.files.len(), lines = outcome.lines, "suppression done");

    print_success("Done!");
    Ok(())
}
