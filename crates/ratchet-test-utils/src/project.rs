//! [`TestProject`] builder for ratchet test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use crate::report::{ReportEntry, report_json};

/// Record file name, duplicated here to keep this crate free of ratchet-core
pub const RECORD_FILE: &str = ".ratchet.rec.json";

/// Report file written by [`TestProject::write_report`]
pub const REPORT_FILE: &str = "lint-report.json";

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use ratchet_test_utils::{ReportEntry, TestProject};
///
/// let project = TestProject::new();
/// project.write_config(&["no-console"]);
/// project.write_file("index.js", "console.log(1);\n");
/// project.write_report(&[ReportEntry::new("index.js").warnings("no-console", 1)]);
/// project.assert_file_exists("ratchet.toml");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    ///
    /// The root is canonicalized so it compares equal to discovered roots.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = dunce::canonicalize(temp_dir.path()).unwrap();
        Self { temp_dir, root }
    }

    /// Return the root path of the project.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keep the directory alive for the lifetime of the fixture.
    pub fn temp_dir(&self) -> &TempDir {
        &self.temp_dir
    }

    /// Write `ratchet.toml` tracking `rules`.
    pub fn write_config(&self, rules: &[&str]) {
        let rules = rules
            .iter()
            .map(|r| format!("\"{}\"", r))
            .collect::<Vec<_>>()
            .join(", ");
        self.write_file("ratchet.toml", &format!("rules = [{rules}]\n"));
    }

    /// Write `ratchet.toml` with raw content.
    pub fn write_config_toml(&self, content: &str) {
        self.write_file("ratchet.toml", content);
    }

    /// Write `content` to `path` (relative to the root), creating parents.
    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Create each of `paths` as an empty file.
    pub fn touch(&self, paths: &[&str]) {
        for path in paths {
            self.write_file(path, "");
        }
    }

    /// Remove `path` (relative to the root).
    pub fn remove_file(&self, path: &str) {
        fs::remove_file(self.root.join(path)).unwrap();
    }

    /// Read `path` (relative to the root).
    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root.join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Write the record file with raw content.
    pub fn write_record(&self, content: &str) {
        self.write_file(RECORD_FILE, content);
    }

    /// Parse the record file.
    pub fn read_record(&self) -> Value {
        serde_json::from_str(&self.read_file(RECORD_FILE)).unwrap()
    }

    /// The `files` object of the record.
    pub fn record_files(&self) -> Value {
        self.read_record()["files"].clone()
    }

    pub fn record_exists(&self) -> bool {
        self.root.join(RECORD_FILE).exists()
    }

    /// Write a lint report for `entries` and return its path.
    ///
    /// Every file named in the report is created when missing, so the record
    /// never prunes it as deleted.
    pub fn write_report(&self, entries: &[ReportEntry]) -> PathBuf {
        for entry in entries {
            if !self.root.join(entry.path()).exists() {
                self.write_file(entry.path(), "");
            }
        }
        let path = self.root.join(REPORT_FILE);
        fs::write(&path, report_json(&self.root, entries)).unwrap();
        path
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root.join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root.join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to the root) contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
