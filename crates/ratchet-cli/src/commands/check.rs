//! Check command implementation

use std::path::{Path, PathBuf};

use ratchet_core::{Config, RunOptions, run};

use super::{lint_runner, relative_to_root, resolve_root};
use crate::error::Result;
use crate::output::{print_findings, print_success};

/// Run the check command.
///
/// Returns whether the run passed.
pub fn run_check(
    cwd: &Path,
    files: &[String],
    overwrite: bool,
    no_write: bool,
    report: Option<&str>,
    root: Option<PathBuf>,
) -> Result<bool> {
    let root = resolve_root(root, cwd);
    let config = Config::load(&root)?;
    let runner = lint_runner(report, &config, cwd)?;

    let files = relative_to_root(files, cwd, &root);
    let options = RunOptions {
        write: !no_write,
        overwrite,
    };

    let outcome = run(&root, &config, options, runner.as_ref(), &files)?;

    print_findings(&outcome.notices);
    print_findings(&outcome.findings);
    if outcome.findings.is_empty() {
        print_success("Looking good!");
    }

    Ok(!outcome.has_error)
}
