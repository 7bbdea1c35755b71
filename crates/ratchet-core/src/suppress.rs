//! Inline suppression of existing violations
//!
//! Inserts an `eslint-disable-next-line` comment, tagged with a FIXME marker,
//! above every reported violation of the selected rules. An existing
//! directive directly above the line is extended instead of duplicated.

use std::collections::BTreeMap;
use std::path::Path;

use ratchet_fs::{NormalizedPath, io};

use crate::lint::LintRunner;
use crate::Result;

/// Marker placed above every inserted directive
pub const SUPPRESS_MARKER: &str = "// FIXME: The next line was auto suppressed by ratchet";

const DISABLE_NEXT_LINE: &str = "// eslint-disable-next-line";

/// What a suppression pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressOutcome {
    /// Rewritten files, as reported by the linter
    pub files: Vec<String>,
    /// Number of lines that received a directive
    pub lines: usize,
}

/// Suppress every violation of `rules` in `targets`.
///
/// Messages of any severity are suppressed; lines are taken from the lint
/// report, so the report must be fresh.
pub fn suppress(
    root: &Path,
    rules: &[String],
    targets: &[String],
    runner: &dyn LintRunner,
) -> Result<SuppressOutcome> {
    let report = runner.run(targets, root)?;
    let mut outcome = SuppressOutcome::default();

    for result in &report.results {
        let by_line = violations_by_line(&result.messages, rules);
        if by_line.is_empty() {
            continue;
        }

        let path = if result.file_path.is_relative() {
            root.join(&result.file_path)
        } else {
            result.file_path.clone()
        };
        let path = NormalizedPath::new(path);

        let content = io::read_text(&path)?;
        let updated = insert_suppressions(&content, &by_line);
        if updated != content {
            io::write_text(&path, &updated)?;
            tracing::debug!(file = %path, lines = by_line.len(), "suppressed violations");
            outcome.files.push(result.file_path.display().to_string());
            outcome.lines += by_line.len();
        }
    }

    Ok(outcome)
}

/// Rules to suppress per 1-based line, in the order `rules` lists them.
fn violations_by_line(
    messages: &[crate::lint::LintMessage],
    rules: &[String],
) -> BTreeMap<usize, Vec<String>> {
    let mut by_line: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for rule in rules {
        for message in messages {
            let (Some(rule_id), Some(line)) = (message.rule_id.as_deref(), message.line) else {
                continue;
            };
            if rule_id != rule {
                continue;
            }
            let entry = by_line.entry(line as usize).or_default();
            if !entry.contains(rule) {
                entry.push(rule.clone());
            }
        }
    }
    by_line
}

/// Insert directives above the given 1-based lines of `content`.
///
/// Inserted lines reuse the line ending of the line they annotate, so CRLF
/// files stay CRLF.
pub fn insert_suppressions(content: &str, by_line: &BTreeMap<usize, Vec<String>>) -> String {
    let mut out: Vec<String> = Vec::new();

    for (index, line) in content.split('\n').enumerate() {
        if let Some(rules) = by_line.get(&(index + 1)) {
            let cr = if line.ends_with('\r') { "\r" } else { "" };
            let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
            let existing = out
                .last()
                .and_then(|previous| previous.trim_start().strip_prefix(DISABLE_NEXT_LINE))
                .map(parse_rule_list);

            match existing {
                Some(mut merged) => {
                    out.pop();
                    for rule in rules {
                        if !merged.contains(rule) {
                            merged.push(rule.clone());
                        }
                    }
                    let has_marker = out.last().is_some_and(|l| l.trim() == SUPPRESS_MARKER);
                    if !has_marker {
                        out.push(format!("{}{}{}", indent, SUPPRESS_MARKER, cr));
                    }
                    out.push(format!("{}{} {}{}", indent, DISABLE_NEXT_LINE, merged.join(", "), cr));
                }
                None => {
                    out.push(format!("{}{}{}", indent, SUPPRESS_MARKER, cr));
                    out.push(format!("{}{} {}{}", indent, DISABLE_NEXT_LINE, rules.join(", "), cr));
                }
            }
        }
        out.push(line.to_string());
    }

    out.join("\n")
}

fn parse_rule_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(String::from)
        .collect()
}
