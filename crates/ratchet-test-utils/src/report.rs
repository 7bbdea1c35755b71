//! ESLint-compatible report fixtures.

use std::path::Path;

use serde_json::{Value, json};

/// One file of a lint report.
///
/// # Example
///
/// ```rust
/// use ratchet_test_utils::report::ReportEntry;
///
/// let entry = ReportEntry::new("src/index.js")
///     .warnings("no-console", 2)
///     .warning_rules(&["no-console", "eqeqeq"]);
/// ```
#[derive(Debug, Clone)]
pub struct ReportEntry {
    path: String,
    messages: Vec<Value>,
    warning_rules: Option<Vec<String>>,
}

impl ReportEntry {
    /// A file with no messages.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            messages: Vec::new(),
            warning_rules: None,
        }
    }

    /// Add `count` warnings of `rule` on consecutive lines.
    pub fn warnings(mut self, rule: &str, count: usize) -> Self {
        let start = self.messages.len() + 1;
        for line in start..start + count {
            self.messages.push(json!({
                "ruleId": rule,
                "severity": 1,
                "line": line,
                "message": format!("{} violation", rule),
            }));
        }
        self
    }

    /// Add a warning of `rule` on `line`.
    pub fn warning_at(mut self, rule: &str, line: usize) -> Self {
        self.messages.push(json!({
            "ruleId": rule,
            "severity": 1,
            "line": line,
            "message": format!("{} violation", rule),
        }));
        self
    }

    /// Add an error-level message of `rule`.
    pub fn error(mut self, rule: &str) -> Self {
        self.messages.push(json!({
            "ruleId": rule,
            "severity": 2,
            "line": self.messages.len() + 1,
            "message": format!("{} violation", rule),
        }));
        self
    }

    /// Rules the linter reports as configured warnings for this file.
    pub fn warning_rules(mut self, rules: &[&str]) -> Self {
        self.warning_rules = Some(rules.iter().map(|r| r.to_string()).collect());
        self
    }

    /// Path relative to the project root.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn to_json(&self, root: &Path) -> Value {
        let mut value = json!({
            "filePath": root.join(&self.path).to_string_lossy(),
            "messages": self.messages,
        });
        if let Some(rules) = &self.warning_rules {
            value["warningRules"] = json!(rules);
        }
        value
    }
}

/// Serialize `entries` as a report with absolute paths under `root`.
pub fn report_json(root: &Path, entries: &[ReportEntry]) -> String {
    let results: Vec<Value> = entries.iter().map(|entry| entry.to_json(root)).collect();
    serde_json::to_string_pretty(&results).unwrap()
}
