//! Error types for ratchet-core

use std::path::PathBuf;

use crate::record::RECORD_FILE_NAME;

/// Result type for ratchet-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions that abort a run before any record is written.
///
/// Regressions are not errors: guards report them as error-level
/// [`Finding`](crate::Finding)s.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tracking configuration is malformed
    #[error("{message}")]
    Configuration { message: String },

    /// No configuration file was found at the project root
    #[error("No config file found in {root}.")]
    ConfigNotFound { root: PathBuf },

    /// The linter reported errors, or its output could not be read
    #[error("{message}")]
    LintExecution { message: String },

    /// The record is neither valid JSON nor a recoverable merge conflict
    #[error("{} is not valid JSON. Please fix and try again. ({source})", RECORD_FILE_NAME)]
    RecordParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The record was written by a newer build
    #[error(
        "You are using an older \"record version\" of ratchet ({current}) than what was used to create {} ({found}).\nMake sure to upgrade ratchet so you're on the same \"record version\" (or higher).",
        RECORD_FILE_NAME
    )]
    RecordVersionTooNew { current: u32, found: u32 },

    /// The record carries no usable version marker
    #[error(
        "Cannot determine the version of your record file or the version is too out-of-date.\nPlease use the --overwrite flag to re-generate your record file."
    )]
    RecordVersionUnsupported,

    /// The record was produced under a different tracking configuration
    #[error(
        "{} was created using a different configuration.\nPlease use the --overwrite flag to re-generate your record file.",
        RECORD_FILE_NAME
    )]
    ConfigMismatch { expected: String, found: String },

    #[error(transparent)]
    Fs(#[from] ratchet_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn lint_execution(message: impl Into<String>) -> Self {
        Self::LintExecution {
            message: message.into(),
        }
    }
}
