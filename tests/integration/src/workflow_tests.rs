//! Multi-run workflows over one project
//!
//! Each test plays out a sequence of commits: warnings are added, fixed and
//! moved between files while the record tracks them.

use pretty_assertions::assert_eq;
use ratchet_core::{
    Config, FindingLevel, ReportSource, RunOptions, RunOutcome, file_stats, rule_stats, run,
};
use ratchet_test_utils::{ReportEntry, TestProject};
use serde_json::json;

struct Workflow {
    project: TestProject,
}

impl Workflow {
    fn new(rules: &[&str]) -> Self {
        let project = TestProject::new();
        project.write_config(rules);
        Self { project }
    }

    fn lint(&self, files: &[&str], entries: &[ReportEntry]) -> RunOutcome {
        let config = Config::load(self.project.root()).unwrap();
        let report = ReportSource::File(self.project.write_report(entries));
        let files: Vec<String> = files.iter().map(|f| f.to_string()).collect();
        run(self.project.root(), &config, RunOptions::default(), &report, &files).unwrap()
    }
}

#[test]
fn test_warnings_only_ratchet_down() {
    let flow = Workflow::new(&["no-console", "eqeqeq"]);

    let first = flow.lint(
        &[],
        &[
            ReportEntry::new("src/a.js").warnings("no-console", 3).warnings("eqeqeq", 1),
            ReportEntry::new("src/b.js").warnings("no-console", 2),
        ],
    );
    assert!(first.findings.is_empty());

    // Fix one warning in a.js
    let second = flow.lint(
        &["src/a.js"],
        &[ReportEntry::new("src/a.js").warnings("no-console", 2).warnings("eqeqeq", 1)],
    );
    assert!(!second.has_error);

    // Add one in b.js
    let third = flow.lint(
        &["src/b.js"],
        &[ReportEntry::new("src/b.js").warnings("no-console", 3)],
    );
    assert!(third.has_error);
    assert_eq!(third.findings[0].level, FindingLevel::Error);

    assert_eq!(
        flow.project.record_files(),
        json!({
            "src/a.js": { "eqeqeq": 1, "no-console": 2 },
            "src/b.js": { "no-console": 2 }
        })
    );
}

#[test]
fn test_moving_warnings_to_a_new_file_is_a_regression() {
    let flow = Workflow::new(&["no-console"]);
    flow.lint(&[], &[ReportEntry::new("old.js").warnings("no-console", 2)]);

    flow.project.remove_file("old.js");
    let outcome = flow.lint(&["new.js"], &[ReportEntry::new("new.js").warnings("no-console", 2)]);

    assert!(outcome.has_error);
    assert_eq!(
        outcome.findings[0].message,
        "Warnings of \"no-console\" have increased by +2 in new.js"
    );
}

#[test]
fn test_clearing_every_warning_empties_the_record() {
    let flow = Workflow::new(&["no-console"]);
    flow.lint(&[], &[ReportEntry::new("a.js").warnings("no-console", 2)]);

    let outcome = flow.lint(
        &[],
        &[ReportEntry::new("a.js").warning_rules(&["no-console"])],
    );

    assert!(!outcome.has_error);
    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(outcome.findings[0].level, FindingLevel::Info);
    assert_eq!(flow.project.record_files(), json!({}));

    // The empty record is still a baseline: only the given files are linted
    // and new warnings are a regression
    let next = flow.lint(&["a.js"], &[ReportEntry::new("a.js").warnings("no-console", 5)]);
    assert_eq!(next.linted, ["a.js"]);
    assert!(next.has_error);
    assert!(!next.record_written);
    assert_eq!(
        next.findings[0].message,
        "Warnings of \"no-console\" have increased by +5 in a.js"
    );
    assert_eq!(flow.project.record_files(), json!({}));
}

#[test]
fn test_stats_follow_the_record() {
    let flow = Workflow::new(&["no-console", "eqeqeq"]);
    flow.lint(
        &[],
        &[
            ReportEntry::new("a.js").warnings("no-console", 1),
            ReportEntry::new("b.js").warnings("no-console", 2).warnings("eqeqeq", 1),
        ],
    );
    let config = Config::load(flow.project.root()).unwrap();

    let stats = rule_stats(flow.project.root(), &config).unwrap().unwrap();
    assert_eq!(stats.get("no-console").unwrap().count, 3);
    assert_eq!(stats.get("eqeqeq").unwrap().files, ["b.js"]);

    let files = file_stats(flow.project.root()).unwrap().unwrap();
    assert_eq!(files.total("b.js"), 3);
}
