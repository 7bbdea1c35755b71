//! Per-rule aggregation of a FileSet
//!
//! Rule sets are derived for reporting and are never persisted. Rules that
//! appear in a FileSet but are no longer tracked are ignored, so removing a
//! rule from the configuration never corrupts the record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{FileSet, Finding};

/// Aggregate count and contributing files for one rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleStat {
    pub count: u64,
    pub files: Vec<String>,
}

/// Per-rule totals with the files that contribute to them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleStats(BTreeMap<String, RuleStat>);

impl RuleStats {
    /// Aggregate `file_set` over the tracked rules.
    ///
    /// Every tracked rule gets an entry, even with no violations. Files are
    /// listed in the FileSet's path order.
    pub fn from_file_set(file_set: &FileSet, tracked: &[String]) -> Self {
        let mut stats: BTreeMap<String, RuleStat> = tracked
            .iter()
            .map(|rule| (rule.clone(), RuleStat::default()))
            .collect();

        for (file, rule, count) in file_set.entries() {
            if let Some(stat) = stats.get_mut(rule) {
                stat.count += count;
                stat.files.push(file.to_string());
            }
        }

        Self(stats)
    }

    pub fn get(&self, rule: &str) -> Option<&RuleStat> {
        self.0.get(rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleStat)> {
        self.0.iter().map(|(rule, stat)| (rule.as_str(), stat))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Aggregate violation count per rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<String, u64>);

impl RuleSet {
    /// Aggregate `file_set` over the tracked rules.
    pub fn from_file_set(file_set: &FileSet, tracked: &[String]) -> Self {
        Self::from(&RuleStats::from_file_set(file_set, tracked))
    }

    pub fn get(&self, rule: &str) -> Option<u64> {
        self.0.get(rule).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(rule, count)| (rule.as_str(), *count))
    }

    /// Suggest promoting every rule with no remaining violations.
    ///
    /// These findings are informational and never block a run.
    pub fn zero_count_findings(&self) -> Vec<Finding> {
        self.iter()
            .filter(|(_, count)| *count == 0)
            .map(|(rule, _)| {
                Finding::info(format!(
                    "No \"{}\" warnings are being reported. You can turn it on as an error!",
                    rule
                ))
            })
            .collect()
    }
}

impl From<&RuleStats> for RuleSet {
    fn from(stats: &RuleStats) -> Self {
        Self(
            stats
                .iter()
                .map(|(rule, stat)| (rule.to_string(), stat.count))
                .collect(),
        )
    }
}

impl FromIterator<(String, u64)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Tracked rules that appear in no file of `new_file_set`.
///
/// When the linter reports which rules are configured as warnings, every
/// such rule is seeded at zero for each linted file, so a tracked rule that
/// never shows up is not configured as a warning at all. Returns nothing for
/// an empty FileSet.
pub fn unconfigured_tracked_rules(tracked: &[String], new_file_set: &FileSet) -> Vec<String> {
    if new_file_set.is_empty() {
        return Vec::new();
    }

    let seen: BTreeSet<&str> = new_file_set.entries().map(|(_, rule, _)| rule).collect();
    let mut reported = BTreeSet::new();
    tracked
        .iter()
        .filter(|rule| !seen.contains(rule.as_str()) && reported.insert(rule.as_str()))
        .cloned()
        .collect()
}

/// Warn about tracked rules that the linter does not report as warnings.
pub fn check_tracked_rules(tracked: &[String], new_file_set: &FileSet) -> Vec<Finding> {
    unconfigured_tracked_rules(tracked, new_file_set)
        .into_iter()
        .map(|rule| {
            Finding::warning(format!(
                "\"{}\" is specified in your config but is not configured as a warning.",
                rule
            ))
        })
        .collect()
}
