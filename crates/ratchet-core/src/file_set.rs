//! The file -> rule -> count model
//!
//! A [`FileSet`] maps a posix-normalized, project-relative file path to the
//! number of violations of each tracked rule in that file. A rule present
//! with a count of zero is tracked and clean; an absent rule is unknown for
//! that file.
//!
//! Every operation returns a new set and leaves its inputs untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use ratchet_fs::NormalizedPath;
use serde::{Deserialize, Serialize, Serializer};

use crate::lint::LintResult;

/// Violation counts per rule for a single file
pub type RuleCounts = BTreeMap<String, u64>;

/// Violation counts per file, keyed by normalized relative path
///
/// Keys are kept in ascending lexicographic order, which is also the order
/// they are persisted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, RuleCounts>")]
pub struct FileSet {
    files: BTreeMap<String, RuleCounts>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a FileSet from lint results, seeding each file with the rules
    /// its own result reports as configured warnings.
    ///
    /// See [`FileSet::from_lint_results_with`].
    pub fn from_lint_results(results: &[LintResult], tracked: &[String], root: &Path) -> Self {
        Self::from_lint_results_with(results, tracked, root, |result| {
            result.warning_rules.clone().unwrap_or_default()
        })
    }

    /// Build a FileSet from lint results.
    ///
    /// For each result the path is made relative to `root` and posix
    /// separated. The file's counts start at zero for every rule returned by
    /// `default_rules`, so tracked rules with no current violations remain
    /// visible. Each message with a rule id then increments its rule. Rules
    /// not in `tracked` are dropped last.
    pub fn from_lint_results_with<F>(
        results: &[LintResult],
        tracked: &[String],
        root: &Path,
        default_rules: F,
    ) -> Self
    where
        F: Fn(&LintResult) -> Vec<String>,
    {
        let tracked: BTreeSet<&str> = tracked.iter().map(String::as_str).collect();
        let mut files = BTreeMap::new();

        for result in results {
            let path = NormalizedPath::relative_to(&result.file_path, root);

            let mut counts: RuleCounts = default_rules(result)
                .into_iter()
                .map(|rule| (rule, 0))
                .collect();

            for rule_id in result.messages.iter().filter_map(|m| m.rule_id.as_deref()) {
                *counts.entry(rule_id.to_string()).or_insert(0) += 1;
            }

            counts.retain(|rule, _| tracked.contains(rule.as_str()));
            files.insert(path.into_string(), counts);
        }

        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Insert or replace the counts for a file.
    pub fn insert(&mut self, path: impl Into<NormalizedPath>, counts: RuleCounts) {
        self.files.insert(path.into().into_string(), counts);
    }

    pub fn get(&self, path: &str) -> Option<&RuleCounts> {
        self.files.get(path)
    }

    /// Count of `rule` in `path`, if the rule is known for that file.
    pub fn count(&self, path: &str, rule: &str) -> Option<u64> {
        self.files.get(path).and_then(|rules| rules.get(rule)).copied()
    }

    /// Sum of all rule counts for `path`.
    pub fn total(&self, path: &str) -> u64 {
        self.files
            .get(path)
            .map(|rules| rules.values().sum())
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleCounts)> {
        self.files.iter().map(|(path, rules)| (path.as_str(), rules))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Every `(file, rule, count)` triple.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.files.iter().flat_map(|(path, rules)| {
            rules
                .iter()
                .map(move |(rule, count)| (path.as_str(), rule.as_str(), *count))
        })
    }

    /// Right-biased merge keyed by file path.
    ///
    /// An entry in `newer` replaces the whole entry of the same file in
    /// `self`; rule counts are never merged. Files only in `self` are kept,
    /// which is how files skipped by a partial run stay recorded.
    pub fn combine(&self, newer: &FileSet) -> FileSet {
        let mut files = self.files.clone();
        for (path, rules) in &newer.files {
            files.insert(path.clone(), rules.clone());
        }
        Self { files }
    }

    /// Drop files that no longer exist under `root`.
    pub fn without_deleted_files(&self, root: &Path) -> FileSet {
        let files = self
            .files
            .iter()
            .filter(|(path, _)| {
                let exists = root.join(NormalizedPath::new(path.as_str()).to_native()).exists();
                if !exists {
                    tracing::debug!(file = %path, "dropping deleted file from record");
                }
                exists
            })
            .map(|(path, rules)| (path.clone(), rules.clone()))
            .collect();
        Self { files }
    }

    /// Drop files whose total count is zero, then drop zero-count rules from
    /// the files that remain.
    pub fn without_warningless_files(&self) -> FileSet {
        let files = self
            .files
            .iter()
            .filter(|(_, rules)| rules.values().any(|count| *count > 0))
            .map(|(path, rules)| {
                let rules = rules
                    .iter()
                    .filter(|(_, count)| **count > 0)
                    .map(|(rule, count)| (rule.clone(), *count))
                    .collect();
                (path.clone(), rules)
            })
            .collect();
        Self { files }
    }

    /// Canonical copy with file keys in ascending lexicographic order.
    ///
    /// Ordering is structural for this type, so this only exists to make the
    /// persistence pipeline explicit.
    pub fn sorted(&self) -> FileSet {
        self.clone()
    }
}

impl From<BTreeMap<String, RuleCounts>> for FileSet {
    fn from(raw: BTreeMap<String, RuleCounts>) -> Self {
        raw.into_iter().collect()
    }
}

impl FromIterator<(String, RuleCounts)> for FileSet {
    fn from_iter<I: IntoIterator<Item = (String, RuleCounts)>>(iter: I) -> Self {
        let mut set = FileSet::new();
        for (path, rules) in iter {
            set.insert(path, rules);
        }
        set
    }
}

impl Serialize for FileSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.files.serialize(serializer)
    }
}

/// Build a FileSet from literal `(file, [(rule, count)])` pairs.
///
/// Intended for tests and fixtures.
#[macro_export]
macro_rules! file_set {
    () => { $crate::FileSet::new() };
    ($($file:expr => { $($rule:expr => $count:expr),* $(,)? }),+ $(,)?) => {{
        let mut set = $crate::FileSet::new();
        $(
            let mut rules = $crate::RuleCounts::new();
            $( rules.insert(($rule).to_string(), $count); )*
            set.insert($file, rules);
        )+
        set
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::LintMessage;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn result(path: &str, rules: &[&str]) -> LintResult {
        LintResult {
            file_path: PathBuf::from(path),
            messages: rules.iter().map(|r| LintMessage::warning(r)).collect(),
            warning_rules: None,
        }
    }

    fn tracked(rules: &[&str]) -> Vec<String> {
        rules.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn counts_rule_violations_per_file() {
        let results = vec![
            result("/absolute/path/foo.js", &["rule1", "rule1", "rule1"]),
            result("/absolute/path/bar.js", &["rule1", "rule2", "rule3"]),
        ];

        let set = FileSet::from_lint_results(
            &results,
            &tracked(&["rule1", "rule2", "rule3"]),
            Path::new("/absolute/path"),
        );

        assert_eq!(
            set,
            file_set! {
                "foo.js" => { "rule1" => 3 },
                "bar.js" => { "rule1" => 1, "rule2" => 1, "rule3" => 1 },
            }
        );
    }

    #[test]
    fn drops_untracked_rules() {
        let results = vec![result("/p/a.js", &["rule1", "rule2"])];
        let set = FileSet::from_lint_results(&results, &tracked(&["rule1"]), Path::new("/p"));
        assert_eq!(set, file_set! { "a.js" => { "rule1" => 1 } });
    }

    #[test]
    fn seeds_configured_warning_rules_at_zero() {
        let results = vec![result("/p/a.js", &["rule1"]), result("/p/b.js", &[])];
        let set = FileSet::from_lint_results_with(
            &results,
            &tracked(&["rule1", "rule2"]),
            Path::new("/p"),
            |_| vec!["rule1".into(), "rule2".into(), "untracked".into()],
        );

        assert_eq!(
            set,
            file_set! {
                "a.js" => { "rule1" => 1, "rule2" => 0 },
                "b.js" => { "rule1" => 0, "rule2" => 0 },
            }
        );
    }

    #[test]
    fn messages_without_rule_id_are_ignored() {
        let mut parse_error = result("/p/a.js", &[]);
        parse_error.messages.push(LintMessage {
            rule_id: None,
            severity: 1,
            line: Some(1),
            message: "Parsing error".into(),
        });
        let set = FileSet::from_lint_results(&[parse_error], &tracked(&["rule1"]), Path::new("/p"));
        assert_eq!(set, file_set! { "a.js" => {} });
    }

    #[test]
    fn combine_prefers_newer_entries_without_merging_rules() {
        let old = file_set! {
            "foobar.js" => { "rule" => 10, "other" => 3 },
            "kept.js" => { "rule" => 1 },
        };
        let new = file_set! { "foobar.js" => { "rule" => 8 } };

        let combined = old.combine(&new);

        assert_eq!(
            combined,
            file_set! {
                "foobar.js" => { "rule" => 8 },
                "kept.js" => { "rule" => 1 },
            }
        );
    }

    #[test]
    fn warningless_cleanup_drops_zero_files_and_rules() {
        let set = file_set! {
            "clean.js" => { "rule1" => 0, "rule2" => 0 },
            "dirty.js" => { "rule1" => 2, "rule2" => 0 },
            "empty.js" => {},
        };

        assert_eq!(
            set.without_warningless_files(),
            file_set! { "dirty.js" => { "rule1" => 2 } }
        );
    }

    #[test]
    fn deleted_files_are_dropped() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("src")).unwrap();
        std::fs::write(temp.path().join("src").join("kept.js"), "").unwrap();

        let set = file_set! {
            "src/kept.js" => { "rule" => 1 },
            "src/gone.js" => { "rule" => 1 },
        };

        assert_eq!(
            set.without_deleted_files(temp.path()),
            file_set! { "src/kept.js" => { "rule" => 1 } }
        );
    }

    #[test]
    fn insert_normalizes_separators() {
        let mut set = FileSet::new();
        set.insert("src\\win\\a.js", RuleCounts::new());
        assert_eq!(set.paths().collect::<Vec<_>>(), ["src/win/a.js"]);
    }

    #[test]
    fn deserialized_keys_are_normalized() {
        let set: FileSet = serde_json::from_str(r#"{"src\\a.js": {"rule": 1}}"#).unwrap();
        assert_eq!(set.count("src/a.js", "rule"), Some(1));
    }

    #[test]
    fn sorted_keys_are_ascending() {
        let set = file_set! {
            "z/a/c" => { "rule" => 1 },
            "b/b/c" => { "rule" => 1 },
            "a/b/c" => { "rule" => 1 },
        };
        assert_eq!(set.sorted().paths().collect::<Vec<_>>(), ["a/b/c", "b/b/c", "z/a/c"]);
    }
}
