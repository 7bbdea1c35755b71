//! Run orchestration
//!
//! ```text
//! lint report -> FileSet (tracked rules) --+
//!                                          v
//! record -> baseline FileSet --------> reconcile -> findings
//!                                          |
//!                     no error-level finding and write on
//!                                          v
//!               record (deleted files pruned, cleaned, sorted)
//! ```

use std::path::Path;

use serde::Serialize;

use crate::config::{Config, RunOptions};
use crate::guard::{Guard, evaluate_guards};
use crate::lint::{LintRunner, files_to_lint};
use crate::record::{Record, RecordStore};
use crate::rule_set::{RuleSet, RuleStats, check_tracked_rules, unconfigured_tracked_rules};
use crate::{FileSet, Finding, Result, finding};

/// Result of comparing a new FileSet against the baseline
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Guard findings first, then zero-count suggestions
    pub findings: Vec<Finding>,
    pub has_error: bool,
    /// Baseline updated with every file in the new FileSet
    pub combined: FileSet,
}

/// Compare `new` against the baseline `old` under `guards`.
///
/// `old` is `None` when no record exists yet. Pure: nothing is read from or
/// written to disk.
pub fn reconcile(
    old: Option<&FileSet>,
    new: &FileSet,
    tracked: &[String],
    guards: &[Guard],
) -> Reconciliation {
    let mut findings = evaluate_guards(guards, old, new);
    let combined = old.map_or_else(|| new.clone(), |old| old.combine(new));
    findings.extend(RuleSet::from_file_set(&combined, tracked).zero_count_findings());
    let has_error = finding::has_error(&findings);

    Reconciliation {
        findings,
        has_error,
        combined,
    }
}

/// Summary of a complete run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    /// Guard findings, zero-count suggestions, then tracked-rule warnings
    pub findings: Vec<Finding>,
    /// Warnings about the configuration and the stored record
    pub notices: Vec<Finding>,
    pub has_error: bool,
    pub record_written: bool,
    /// Paths handed to the linter
    pub linted: Vec<String>,
}

/// Lint, compare against the record at `root` and update it.
///
/// # Arguments
///
/// * `root` - Project root holding the record
/// * `config` - Validated tracking configuration
/// * `options` - Write/overwrite switches for this run
/// * `runner` - Produces the lint report
/// * `files` - Paths to lint; empty means the surface area
///
/// # Errors
///
/// Fatal conditions only: invalid guards, record version or configuration
/// mismatches, lint errors. Regressions are reported in the outcome.
pub fn run(
    root: &Path,
    config: &Config,
    options: RunOptions,
    runner: &dyn LintRunner,
    files: &[String],
) -> Result<RunOutcome> {
    let guards = config.guards()?;
    let config_hash = config.config_hash();
    let store = RecordStore::at_root(root);

    let mut notices = config.notices();
    let baseline = store.load_baseline(&config_hash, options.overwrite)?;
    notices.extend(baseline.notices.iter().cloned());

    let linted = files_to_lint(files, &config.surface_area, baseline.is_first_run());
    let report = runner.run(&linted, root)?;
    report.ensure_no_errors()?;

    let new = FileSet::from_lint_results(&report.results, &config.rules, root);

    let mut tracked = config.rules.clone();
    let mut tracked_rule_findings = Vec::new();
    if report.has_warning_rules() {
        let unconfigured = unconfigured_tracked_rules(&config.rules, &new);
        if !unconfigured.is_empty() {
            tracing::warn!(rules = ?unconfigured, "tracked rules are not configured as warnings");
            tracked_rule_findings = check_tracked_rules(&config.rules, &new);
            tracked.retain(|rule| !unconfigured.contains(rule));
        }
    }

    let reconciliation = reconcile(baseline.files(), &new, &tracked, &guards);

    let mut findings = reconciliation.findings;
    findings.extend(tracked_rule_findings);

    let record_written = if reconciliation.has_error {
        tracing::debug!("regressions found; record left untouched");
        false
    } else if options.write {
        let combined = reconciliation.combined.without_deleted_files(root);
        store.persist(&Record::new(config_hash, &combined))?;
        true
    } else {
        tracing::debug!("write disabled; record left untouched");
        false
    };

    Ok(RunOutcome {
        findings,
        notices,
        has_error: reconciliation.has_error,
        record_written,
        linted,
    })
}

/// Per-rule totals of the record at `root`, `None` without a record.
pub fn rule_stats(root: &Path, config: &Config) -> Result<Option<RuleStats>> {
    let stats = RecordStore::at_root(root)
        .read()?
        .map(|read| RuleStats::from_file_set(&read.record.files, &config.rules));
    Ok(stats)
}

/// The FileSet of the record at `root`, `None` without a record.
pub fn file_stats(root: &Path) -> Result<Option<FileSet>> {
    Ok(RecordStore::at_root(root).read()?.map(|read| read.record.files))
}
