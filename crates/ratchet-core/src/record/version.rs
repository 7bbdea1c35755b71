//! Record layout versions
//!
//! Versioned records carry an integer `recordVersion`. Records written before
//! that field existed carry the release string of the producing build in
//! `version`; those from 0.4.1 onwards share today's layout and migrate on
//! the next write, anything older cannot be read.

use semver::Version;

use crate::{Error, Result};

/// Layout version written by this build
pub const CURRENT_RECORD_VERSION: u32 = 1;

/// Oldest legacy release whose records are still readable
pub const MIN_LEGACY_VERSION: Version = Version::new(0, 4, 1);

/// Version marker found on a stored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFormat {
    /// `recordVersion` is present
    Versioned(u32),
    /// `version` is a release at or above [`MIN_LEGACY_VERSION`]
    LegacyAcceptable(Version),
    /// `version` is older, unparseable or missing entirely
    LegacyUnsupported,
}

impl RecordFormat {
    /// Classify a record by whichever version marker it carries.
    ///
    /// `recordVersion` wins when both are present.
    pub fn detect(record_version: Option<u32>, legacy_version: Option<&str>) -> Self {
        if let Some(version) = record_version {
            return Self::Versioned(version);
        }

        match legacy_version.map(|v| Version::parse(v.trim_start_matches('v'))) {
            Some(Ok(version)) if version >= MIN_LEGACY_VERSION => Self::LegacyAcceptable(version),
            _ => Self::LegacyUnsupported,
        }
    }

    /// Position on the single upgrade path; all legacy layouts are `0`.
    pub fn ordinal(&self) -> u32 {
        match self {
            Self::Versioned(version) => *version,
            Self::LegacyAcceptable(_) | Self::LegacyUnsupported => 0,
        }
    }

    /// Whether a legacy record will be rewritten in the current layout.
    pub fn needs_migration(&self) -> bool {
        self.ordinal() < CURRENT_RECORD_VERSION
    }

    /// Reject layouts this build cannot interpret.
    pub fn check(&self) -> Result<()> {
        match self {
            Self::Versioned(found) if *found > CURRENT_RECORD_VERSION => {
                Err(Error::RecordVersionTooNew {
                    current: CURRENT_RECORD_VERSION,
                    found: *found,
                })
            }
            Self::Versioned(_) | Self::LegacyAcceptable(_) => Ok(()),
            Self::LegacyUnsupported => Err(Error::RecordVersionUnsupported),
        }
    }
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Versioned(version) => write!(f, "record version {}", version),
            Self::LegacyAcceptable(version) => write!(f, "legacy version {}", version),
            Self::LegacyUnsupported => write!(f, "unsupported legacy version"),
        }
    }
}
