//! Tracking configuration
//!
//! Read from the first of `ratchet.toml`, `.ratchet.toml`, `.ratchet.json`,
//! `.ratchet.yaml` or `.ratchet.yml` at the project root:
//!
//! ```toml
//! rules = ["no-console", "eqeqeq"]
//! surface-area = ["src"]
//! reduce-warnings-by = 0.1
//! guards = ["warnings-reduced-by"]
//! lint-command = ["npx", "eslint", "--format", "json"]
//! ```

use std::path::{Path, PathBuf};

use ratchet_fs::{ConfigStore, NormalizedPath, ProjectMarker, checksum::compute_set_checksum};
use serde::{Deserialize, Serialize};

use crate::guard::{Guard, GuardConfig};
use crate::{Error, Finding, Result};

fn default_surface_area() -> Vec<String> {
    vec![".".to_string()]
}

/// User configuration for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Rules whose warning counts are tracked
    #[serde(default)]
    pub rules: Vec<String>,

    /// Paths linted when no files are given
    #[serde(default = "default_surface_area", alias = "surfaceArea")]
    pub surface_area: Vec<String>,

    #[serde(flatten)]
    pub guard: GuardConfig,

    /// Argv of a linter printing an ESLint-compatible JSON report
    #[serde(default, alias = "lintCommand", skip_serializing_if = "Option::is_none")]
    pub lint_command: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            surface_area: default_surface_area(),
            guard: GuardConfig::default(),
            lint_command: None,
        }
    }
}

impl Config {
    /// Tracking `rules` with every other setting at its default.
    pub fn with_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Path of the configuration file in `root`, if any.
    pub fn find(root: &Path) -> Option<PathBuf> {
        ProjectMarker::CONFIG_FILES
            .iter()
            .find(|marker| marker.is_present_in(root))
            .map(|marker| root.join(marker.as_str()))
    }

    /// Load and validate the configuration in `root`.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] when no configuration file exists
    /// - [`Error::Fs`] when the file cannot be read or parsed
    /// - [`Error::Configuration`] when a value is invalid
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::find(root).ok_or_else(|| Error::ConfigNotFound {
            root: root.to_path_buf(),
        })?;
        tracing::debug!(path = %path.display(), "loading config");

        let config: Config = ConfigStore::new().load(&NormalizedPath::new(&path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.iter().any(|rule| rule.trim().is_empty()) {
            return Err(Error::configuration("Rule names must not be empty"));
        }
        if self.surface_area.is_empty() {
            return Err(Error::configuration(
                "surface-area must list at least one path",
            ));
        }
        self.guard.validate()
    }

    /// Order-insensitive digest of the tracked rules.
    ///
    /// Only `rules` is hashed; guards, surface area and the lint command can
    /// change without invalidating the record.
    pub fn config_hash(&self) -> String {
        compute_set_checksum(&self.rules)
    }

    /// Active guards, mandatory guard first.
    pub fn guards(&self) -> Result<Vec<Guard>> {
        Guard::select(&self.guard)
    }

    /// Advisory notices about a valid configuration.
    pub fn notices(&self) -> Vec<Finding> {
        if self.rules.is_empty() {
            tracing::warn!("no rules are tracked");
            return vec![Finding::warning(
                "No rules are being tracked. Add some rules to your ratchet config.",
            )];
        }
        Vec::new()
    }
}

/// Per-invocation switches
///
/// Neither is persisted nor part of the configuration hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Persist the updated record when nothing regressed
    pub write: bool,
    /// Discard the stored record and start over
    pub overwrite: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            write: true,
            overwrite: false,
        }
    }
}
