//! Regression policies over an (old, new) FileSet pair
//!
//! Guards form a closed set. [`Guard::select`] turns the configuration into
//! the ordered list of active guards once, at startup; evaluation is then a
//! pure function of the two FileSets.

use serde::{Deserialize, Serialize};

use crate::{Error, FileSet, Finding, Result};

/// Name of the always-on guard
pub const WARNINGS_INCREASED: &str = "warnings-increased";
/// Name of the optional reduction guard
pub const WARNINGS_REDUCED_BY: &str = "warnings-reduced-by";

/// Optional guard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GuardConfig {
    /// Optional guards to enable, in evaluation order
    #[serde(default)]
    pub guards: Vec<String>,
    /// Required reduction ratio in `(0, 1]`; `0` disables the guard
    #[serde(default, alias = "reduceWarningsBy", skip_serializing_if = "Option::is_none")]
    pub reduce_warnings_by: Option<f64>,
}

impl GuardConfig {
    /// Check the ratio and guard names.
    pub fn validate(&self) -> Result<()> {
        if let Some(ratio) = self.reduce_warnings_by {
            if !ratio.is_finite() {
                return Err(Error::configuration("reduceWarningsBy should be a number"));
            }
            if ratio < 0.0 {
                return Err(Error::configuration(
                    "reduceWarningsBy should never be negative",
                ));
            }
            if ratio > 1.0 {
                return Err(Error::configuration(
                    "reduceWarningsBy should never be greater than 1; this implies a percentage greater than 100",
                ));
            }
        }

        for name in &self.guards {
            match name.as_str() {
                WARNINGS_INCREASED => {}
                WARNINGS_REDUCED_BY if self.reduction_ratio().is_none() => {
                    return Err(Error::configuration(format!(
                        "The \"{}\" guard needs reduceWarningsBy set to a number greater than 0",
                        WARNINGS_REDUCED_BY
                    )));
                }
                WARNINGS_REDUCED_BY => {}
                other => {
                    return Err(Error::configuration(format!(
                        "Unknown guard \"{}\". Available guards: {}, {}",
                        other, WARNINGS_INCREASED, WARNINGS_REDUCED_BY
                    )));
                }
            }
        }

        Ok(())
    }

    /// The configured ratio, when it enables the reduction guard.
    pub fn reduction_ratio(&self) -> Option<f64> {
        self.reduce_warnings_by
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0 && *ratio <= 1.0)
    }
}

/// A regression policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guard {
    /// Any rule count that grows in a linted file is an error
    WarningsIncreased,
    /// Every linted file must shrink each rule by at least `ratio`
    WarningsReducedBy { ratio: f64 },
}

impl Guard {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WarningsIncreased => WARNINGS_INCREASED,
            Self::WarningsReducedBy { .. } => WARNINGS_REDUCED_BY,
        }
    }

    /// Whether the configuration turns this guard on.
    pub fn is_applicable(&self, config: &GuardConfig) -> bool {
        match self {
            Self::WarningsIncreased => true,
            Self::WarningsReducedBy { .. } => config.reduction_ratio().is_some(),
        }
    }

    /// The active guards for `config`, mandatory guard first.
    ///
    /// A positive `reduceWarningsBy` enables the reduction guard whether or
    /// not it is listed.
    pub fn select(config: &GuardConfig) -> Result<Vec<Guard>> {
        config.validate()?;

        let mut guards = vec![Guard::WarningsIncreased];
        if let Some(ratio) = config.reduction_ratio() {
            guards.push(Guard::WarningsReducedBy { ratio });
        }

        tracing::debug!(guards = ?guards.iter().map(Guard::name).collect::<Vec<_>>(), "selected guards");
        Ok(guards)
    }

    /// Compare `new` against the baseline `old`.
    ///
    /// Only files present in `new` are examined. `None` means no record
    /// exists yet, and a first run never regresses. An existing but empty
    /// baseline is compared like any other.
    pub fn evaluate(&self, old: Option<&FileSet>, new: &FileSet) -> Vec<Finding> {
        let Some(old) = old else {
            return Vec::new();
        };

        match self {
            Self::WarningsIncreased => warnings_increased(old, new),
            Self::WarningsReducedBy { ratio } => warnings_reduced_by(*ratio, old, new),
        }
    }
}

/// Evaluate `guards` in order and concatenate their findings.
pub fn evaluate_guards(guards: &[Guard], old: Option<&FileSet>, new: &FileSet) -> Vec<Finding> {
    guards
        .iter()
        .flat_map(|guard| guard.evaluate(old, new))
        .collect()
}

fn warnings_increased(old: &FileSet, new: &FileSet) -> Vec<Finding> {
    new.entries()
        .filter_map(|(file, rule, new_count)| {
            let old_count = old.count(file, rule).unwrap_or(0);
            (new_count > old_count).then(|| {
                Finding::error(format!(
                    "Warnings of \"{}\" have increased by +{} in {}",
                    rule,
                    new_count - old_count,
                    file
                ))
            })
        })
        .collect()
}

fn warnings_reduced_by(ratio: f64, old: &FileSet, new: &FileSet) -> Vec<Finding> {
    new.entries()
        .filter_map(|(file, rule, new_count)| {
            // Full elimination satisfies any ratio
            if new_count == 0 {
                return None;
            }
            let old_count = old.count(file, rule).unwrap_or(0);
            let allowed = max_allowed_count(ratio, old_count);
            if new_count < old_count && new_count <= allowed {
                return None;
            }
            Some(Finding::error(format!(
                "Warnings of \"{}\" in {} must be reduced by at least {}% (from {} to {} or fewer), found {}",
                rule,
                file,
                format_percent(ratio),
                old_count,
                allowed,
                new_count
            )))
        })
        .collect()
}

/// Largest count that still meets the required reduction.
///
/// `old - ceil(ratio * old)`; the small epsilon keeps products like
/// `0.1 * 30` from rounding up past the exact value.
fn max_allowed_count(ratio: f64, old_count: u64) -> u64 {
    let required = (ratio * old_count as f64 - 1e-9).ceil().max(0.0) as u64;
    old_count.saturating_sub(required)
}

fn format_percent(ratio: f64) -> String {
    let percent = (ratio * 10_000.0).round() / 100.0;
    format!("{}", percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_set;
    use rstest::rstest;

    fn reduced_by(ratio: f64) -> GuardConfig {
        GuardConfig {
            guards: vec![WARNINGS_REDUCED_BY.into()],
            reduce_warnings_by: Some(ratio),
        }
    }

    #[test]
    fn increase_is_reported_with_rule_delta_and_file() {
        let old = file_set! { "a.js" => { "r1" => 10 } };
        let new = file_set! { "a.js" => { "r1" => 12 } };

        let findings = Guard::WarningsIncreased.evaluate(Some(&old), &new);

        assert_eq!(
            findings,
            vec![Finding::error("Warnings of \"r1\" have increased by +2 in a.js")]
        );
    }

    #[test]
    fn each_increasing_rule_is_reported() {
        let old = file_set! {
            "foo.js" => { "rule1" => 10, "rule2" => 10 },
            "bar.js" => { "rule3" => 10 },
        };
        let new = file_set! {
            "foo.js" => { "rule1" => 12, "rule2" => 10 },
            "bar.js" => { "rule3" => 12 },
        };

        assert_eq!(Guard::WarningsIncreased.evaluate(Some(&old), &new).len(), 2);
    }

    #[test]
    fn new_file_with_warnings_is_an_increase() {
        let old = file_set! { "index.js" => { "rule" => 1 } };
        let new = file_set! { "bar.js" => { "rule" => 1 } };

        assert_eq!(Guard::WarningsIncreased.evaluate(Some(&old), &new).len(), 1);
    }

    #[test]
    fn first_run_never_regresses() {
        let new = file_set! { "bar.js" => { "rule" => 100 } };

        assert!(Guard::WarningsIncreased.evaluate(None, &new).is_empty());
        assert!(
            Guard::WarningsReducedBy { ratio: 0.5 }
                .evaluate(None, &new)
                .is_empty()
        );
    }

    #[test]
    fn empty_baseline_is_not_a_first_run() {
        let new = file_set! { "a.js" => { "r1" => 5 } };

        let findings = Guard::WarningsIncreased.evaluate(Some(&FileSet::new()), &new);

        assert_eq!(
            findings,
            vec![Finding::error("Warnings of \"r1\" have increased by +5 in a.js")]
        );
    }

    #[test]
    fn files_missing_from_new_are_not_examined() {
        let old = file_set! { "a.js" => { "r1" => 1 }, "b.js" => { "r1" => 1 } };
        let new = file_set! { "a.js" => { "r1" => 1 } };

        assert!(Guard::WarningsIncreased.evaluate(Some(&old), &new).is_empty());
    }

    #[rstest]
    #[case(4, true)]
    #[case(5, true)]
    #[case(6, false)]
    #[case(9, false)]
    #[case(10, false)]
    #[case(11, false)]
    #[case(0, true)]
    fn reduction_by_half_from_ten(#[case] new_count: u64, #[case] passes: bool) {
        let old = file_set! { "a.js" => { "r1" => 10 } };
        let new = file_set! { "a.js" => { "r1" => new_count } };

        let findings = Guard::WarningsReducedBy { ratio: 0.5 }.evaluate(Some(&old), &new);

        assert_eq!(findings.is_empty(), passes, "new count {}", new_count);
    }

    #[rstest]
    #[case(0.1, 30, 27)]
    #[case(0.5, 10, 5)]
    #[case(0.5, 3, 1)]
    #[case(1.0, 7, 0)]
    #[case(0.25, 1, 0)]
    fn max_allowed_uses_ceiling_of_required_reduction(
        #[case] ratio: f64,
        #[case] old: u64,
        #[case] expected: u64,
    ) {
        assert_eq!(max_allowed_count(ratio, old), expected);
    }

    #[test]
    fn reduction_message_names_threshold() {
        let old = file_set! { "a.js" => { "r1" => 10 } };
        let new = file_set! { "a.js" => { "r1" => 9 } };

        let findings = Guard::WarningsReducedBy { ratio: 0.5 }.evaluate(Some(&old), &new);

        assert_eq!(
            findings[0].message,
            "Warnings of \"r1\" in a.js must be reduced by at least 50% (from 10 to 5 or fewer), found 9"
        );
    }

    #[test]
    fn select_puts_mandatory_guard_first() {
        let guards = Guard::select(&reduced_by(0.5)).unwrap();
        assert_eq!(
            guards,
            vec![Guard::WarningsIncreased, Guard::WarningsReducedBy { ratio: 0.5 }]
        );
    }

    #[test]
    fn ratio_alone_enables_reduction_guard() {
        let config = GuardConfig {
            guards: Vec::new(),
            reduce_warnings_by: Some(0.2),
        };
        assert_eq!(Guard::select(&config).unwrap().len(), 2);
    }

    #[test]
    fn zero_ratio_disables_reduction_guard() {
        let config = GuardConfig {
            guards: Vec::new(),
            reduce_warnings_by: Some(0.0),
        };
        assert_eq!(Guard::select(&config).unwrap(), vec![Guard::WarningsIncreased]);
        assert!(!Guard::WarningsReducedBy { ratio: 0.5 }.is_applicable(&config));
    }

    #[test]
    fn listing_reduction_guard_without_ratio_is_rejected() {
        let config = GuardConfig {
            guards: vec![WARNINGS_REDUCED_BY.into()],
            reduce_warnings_by: None,
        };
        assert!(matches!(Guard::select(&config), Err(Error::Configuration { .. })));
    }

    #[rstest]
    #[case(-0.1, "reduceWarningsBy should never be negative")]
    #[case(
        1.5,
        "reduceWarningsBy should never be greater than 1; this implies a percentage greater than 100"
    )]
    #[case(f64::NAN, "reduceWarningsBy should be a number")]
    fn invalid_ratios_are_rejected(#[case] ratio: f64, #[case] message: &str) {
        let config = GuardConfig {
            guards: Vec::new(),
            reduce_warnings_by: Some(ratio),
        };
        assert_eq!(config.validate().unwrap_err().to_string(), message);
    }

    #[test]
    fn unknown_guard_is_rejected() {
        let config = GuardConfig {
            guards: vec!["warnings-vanished".into()],
            reduce_warnings_by: None,
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Unknown guard \"warnings-vanished\""));
    }

    #[test]
    fn guard_findings_concatenate_in_order() {
        let old = file_set! { "a.js" => { "r1" => 10 } };
        let new = file_set! { "a.js" => { "r1" => 12 } };
        let guards = Guard::select(&reduced_by(0.5)).unwrap();

        let findings = evaluate_guards(&guards, Some(&old), &new);

        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.contains("increased by +2"));
        assert!(findings[1].message.contains("must be reduced by at least 50%"));
    }
}
