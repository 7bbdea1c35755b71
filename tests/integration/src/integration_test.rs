//! End-to-end integration test for the reconciliation flow
//!
//! Exercises: config discovery -> record store -> lint report -> guards ->
//! record write, including recovery paths for conflicted and legacy records.

use pretty_assertions::assert_eq;
use ratchet_core::{
    Config, Error, FindingLevel, RECORD_FILE_NAME, RecordStore, ReportSource, RunOptions, run,
};
use ratchet_test_utils::{ReportEntry, TestProject};
use serde_json::json;

fn run_report(project: &TestProject, entries: &[ReportEntry]) -> ratchet_core::Result<ratchet_core::RunOutcome> {
    let config = Config::load(project.root())?;
    let report = ReportSource::File(project.write_report(entries));
    run(project.root(), &config, RunOptions::default(), &report, &[])
}

#[test]
fn test_yaml_config_with_reduction_guard() {
    let project = TestProject::new();
    project.write_file(
        ".ratchet.yaml",
        "rules:\n  - no-console\n  - eqeqeq\nreduce-warnings-by: 0.25\nguards:\n  - warnings-reduced-by\n",
    );

    run_report(
        &project,
        &[ReportEntry::new("src/a.js")
            .warnings("no-console", 4)
            .warnings("eqeqeq", 8)],
    )
    .unwrap();

    let outcome = run_report(
        &project,
        &[ReportEntry::new("src/a.js")
            .warnings("no-console", 3)
            .warnings("eqeqeq", 7)],
    )
    .unwrap();

    assert!(outcome.has_error);
    let messages: Vec<&str> = outcome.findings.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "Warnings of \"eqeqeq\" in src/a.js must be reduced by at least 25% (from 8 to 6 or fewer), found 7"
        ]
    );
}

#[test]
fn test_conflicted_record_is_recovered_and_rewritten() {
    let project = TestProject::new();
    project.write_config(&["no-console"]);
    let hash = Config::with_rules(["no-console"]).config_hash();
    project.touch(&["a.js", "b.js"]);
    project.write_record(&format!(
        r#"{{
  "recordVersion": 1,
  "configHash": "{hash}",
  "files": {{
<<<<<<< HEAD
    "a.js": {{
      "no-console": 2
    }}
=======
    "b.js": {{
      "no-console": 3
    }}
>>>>>>> feature
  }}
}}
"#
    ));

    let outcome = run_report(&project, &[ReportEntry::new("a.js").warnings("no-console", 2)]).unwrap();

    assert!(!outcome.has_error);
    let warnings: Vec<_> = outcome
        .notices
        .iter()
        .filter(|n| n.level == FindingLevel::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("merge conflicts"));
    assert_eq!(
        project.record_files(),
        json!({
            "a.js": { "no-console": 2 },
            "b.js": { "no-console": 3 }
        })
    );
    assert!(!project.read_file(RECORD_FILE_NAME).contains("<<<<<<<"));
}

#[test]
fn test_legacy_record_is_migrated_on_write() {
    let project = TestProject::new();
    project.write_config(&["no-console"]);
    let hash = Config::with_rules(["no-console"]).config_hash();
    project.touch(&["a.js"]);
    project.write_record(&format!(
        r#"{{"version": "0.6.0", "hash": "{hash}", "files": {{"a.js": {{"no-console": 5}}}}}}"#
    ));

    let outcome = run_report(&project, &[ReportEntry::new("a.js").warnings("no-console", 4)]).unwrap();

    assert!(outcome.record_written);
    let record = project.read_record();
    assert_eq!(record["recordVersion"], json!(1));
    assert!(record.get("version").is_none());
    assert_eq!(record["files"], json!({ "a.js": { "no-console": 4 } }));
}

#[test]
fn test_unsupported_legacy_record_needs_overwrite() {
    let project = TestProject::new();
    project.write_config(&["no-console"]);
    project.write_record(r#"{"version": "0.2.0", "hash": "x", "files": {}}"#);

    let err = run_report(&project, &[ReportEntry::new("a.js")]).unwrap_err();
    assert!(matches!(err, Error::RecordVersionUnsupported));

    let config = Config::load(project.root()).unwrap();
    let report = ReportSource::File(project.write_report(&[ReportEntry::new("a.js").warnings("no-console", 1)]));
    let options = RunOptions {
        write: true,
        overwrite: true,
    };
    run(project.root(), &config, options, &report, &[]).unwrap();

    assert_eq!(project.read_record()["recordVersion"], json!(1));
}

#[test]
fn test_newer_record_version_is_fatal() {
    let project = TestProject::new();
    project.write_config(&["no-console"]);
    project.write_record(r#"{"recordVersion": 99, "configHash": "x", "files": {}}"#);

    let err = run_report(&project, &[ReportEntry::new("a.js")]).unwrap_err();

    assert!(matches!(err, Error::RecordVersionTooNew { found: 99, .. }));
    assert!(err.to_string().contains("Make sure to upgrade ratchet"));
}

#[test]
fn test_record_located_from_nested_directory() {
    let project = TestProject::new();
    project.write_config(&["no-console"]);
    project.write_file("packages/app/src/index.js", "");

    let store = RecordStore::locate(project.root().join("packages/app/src"));

    assert_eq!(store.path(), project.root().join(RECORD_FILE_NAME));
}

#[test]
fn test_invalid_record_is_fatal_and_preserved() {
    let project = TestProject::new();
    project.write_config(&["no-console"]);
    project.write_record("{ \"files\": ");

    let err = run_report(&project, &[ReportEntry::new("a.js")]).unwrap_err();

    assert!(matches!(err, Error::RecordParse { .. }));
    assert_eq!(project.read_file(RECORD_FILE_NAME), "{ \"files\": ");
}
