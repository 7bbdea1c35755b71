//! Lint report ingestion
//!
//! ratchet does not lint anything itself. An external linter produces an
//! ESLint-compatible JSON report:
//!
//! ```json
//! [
//!   {
//!     "filePath": "/project/src/index.js",
//!     "messages": [{ "ruleId": "no-console", "severity": 1, "line": 3 }],
//!     "warningRules": ["no-console", "eqeqeq"]
//!   }
//! ]
//! ```
//!
//! `warningRules` is optional and lists the rules configured as warnings for
//! that file, so tracked rules with no violations still show up at zero.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use ratchet_fs::{NormalizedPath, io};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// ESLint severity for warnings
pub const SEVERITY_WARNING: u8 = 1;
/// ESLint severity for errors
pub const SEVERITY_ERROR: u8 = 2;

fn default_severity() -> u8 {
    SEVERITY_WARNING
}

/// A single diagnostic reported for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    /// Rule that produced the message; `None` for parser diagnostics
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default = "default_severity")]
    pub severity: u8,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub message: String,
}

impl LintMessage {
    /// Warning-level message for `rule`.
    pub fn warning(rule: &str) -> Self {
        Self {
            rule_id: Some(rule.to_string()),
            severity: SEVERITY_WARNING,
            line: None,
            message: String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity >= SEVERITY_ERROR
    }
}

/// Lint output for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    pub file_path: PathBuf,
    #[serde(default)]
    pub messages: Vec<LintMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_rules: Option<Vec<String>>,
}

/// A complete lint run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintReport {
    pub results: Vec<LintResult>,
}

impl LintReport {
    pub fn new(results: Vec<LintResult>) -> Self {
        Self { results }
    }

    /// Parse an ESLint-compatible JSON report.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            Error::lint_execution(format!("Could not read the lint report: {}", e))
        })
    }

    /// Whether any result carries the rules configured as warnings.
    pub fn has_warning_rules(&self) -> bool {
        self.results.iter().any(|r| r.warning_rules.is_some())
    }

    /// Fail when the linter reported errors rather than warnings.
    ///
    /// Counting is only meaningful for warnings; errors must be fixed first.
    pub fn ensure_no_errors(&self) -> Result<()> {
        let offending: Vec<String> = self
            .results
            .iter()
            .flat_map(|result| {
                result.messages.iter().filter(|m| m.is_error()).map(move |m| {
                    format!(
                        "  {}:{} {} {}",
                        result.file_path.display(),
                        m.line.unwrap_or(0),
                        m.rule_id.as_deref().unwrap_or("(parse)"),
                        m.message
                    )
                    .trim_end()
                    .to_string()
                })
            })
            .collect();

        if offending.is_empty() {
            return Ok(());
        }

        Err(Error::lint_execution(format!(
            "There were some lint errors. Fix them and try again.\n{}",
            offending.join("\n")
        )))
    }
}

/// Produces a lint report for a set of targets.
pub trait LintRunner {
    /// Lint `targets` (paths relative to `root`).
    fn run(&self, targets: &[String], root: &Path) -> Result<LintReport>;
}

/// Reads a report that was produced ahead of time.
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// A JSON file on disk
    File(PathBuf),
    /// JSON piped on standard input
    Stdin,
}

impl LintRunner for ReportSource {
    fn run(&self, _targets: &[String], root: &Path) -> Result<LintReport> {
        let content = match self {
            Self::File(path) => io::read_text(&NormalizedPath::new(root.join(path)))?,
            Self::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };
        LintReport::from_json(&content)
    }
}

/// Spawns the configured linter and parses its stdout.
#[derive(Debug, Clone)]
pub struct LintCommand {
    argv: Vec<String>,
}

impl LintCommand {
    pub fn new(argv: Vec<String>) -> Result<Self> {
        if argv.is_empty() {
            return Err(Error::configuration(
                "lint-command is not configured. Add it to your config or pass --report.",
            ));
        }
        Ok(Self { argv })
    }
}

impl LintRunner for LintCommand {
    fn run(&self, targets: &[String], root: &Path) -> Result<LintReport> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| Error::configuration("lint-command is empty"))?;

        tracing::debug!(%program, ?args, ?targets, "running linter");
        let output = Command::new(program)
            .args(args)
            .args(targets)
            .current_dir(root)
            .output()
            .map_err(|e| Error::lint_execution(format!("Failed to run `{}`: {}", program, e)))?;

        // ESLint exits non-zero when it finds errors; the report tells us which.
        let stdout = String::from_utf8_lossy(&output.stdout);
        LintReport::from_json(&stdout).map_err(|e| {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.trim().is_empty() {
                e
            } else {
                Error::lint_execution(format!("{}\n{}", e, stderr.trim()))
            }
        })
    }
}

/// Decide which paths to lint.
///
/// An empty baseline needs the whole surface area so the first record is
/// complete. Without explicit files the surface area is linted as well.
pub fn files_to_lint(files: &[String], surface_area: &[String], starting_over: bool) -> Vec<String> {
    if starting_over {
        tracing::info!("Starting with an empty record, linting full surface area...");
        let mut targets = files.to_vec();
        targets.extend(surface_area.iter().cloned());
        return targets;
    }

    if files.is_empty() {
        tracing::info!("No files provided, linting full surface area...");
        return surface_area.to_vec();
    }

    files.to_vec()
}
