//! Record reconciliation engine for ratchet
//!
//! ratchet keeps a per-file, per-rule count of lint warnings in a baseline
//! ("record") and fails whenever a run makes those counts grow. This crate
//! implements:
//!
//! - **FileSet model**: file -> rule -> count mappings built from lint reports
//! - **RuleSet aggregation**: per-rule totals for reporting
//! - **Guards**: the regression policies deciding pass/fail
//! - **Record store**: versioned, configuration-bound persistence that
//!   survives merge conflicts
//! - **Engine**: the end-to-end run over a project
//!
//! # Architecture
//!
//! ```text
//!                 ratchet-cli
//!                      |
//!                 ratchet-core
//!   (engine, guard, record, file_set, rule_set)
//!                      |
//!                  ratchet-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ratchet_core::{Config, RunOptions, ReportSource, run};
//!
//! let root = std::path::Path::new(".");
//! let config = Config::load(root)?;
//! let report = ReportSource::File("eslint-report.json".into());
//! let outcome = run(root, &config, RunOptions::default(), &report, &[])?;
//! if outcome.has_error {
//!     std::process::exit(1);
//! }
//! ```

pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod file_set;
pub mod finding;
pub mod guard;
pub mod lint;
pub mod record;
pub mod rule_set;
pub mod suppress;

pub use config::{Config, RunOptions};
pub use engine::{Reconciliation, RunOutcome, file_stats, reconcile, rule_stats, run};
pub use error::{Error, Result};
pub use file_set::{FileSet, RuleCounts};
pub use finding::{Finding, FindingLevel, has_error};
pub use guard::{Guard, GuardConfig};
pub use lint::{LintCommand, LintMessage, LintReport, LintResult, LintRunner, ReportSource};
pub use record::{
    Baseline, CURRENT_RECORD_VERSION, RECORD_FILE_NAME, Record, RecordFormat, RecordStore,
};
pub use rule_set::{RuleSet, RuleStat, RuleStats, check_tracked_rules};
pub use suppress::{SuppressOutcome, suppress};
