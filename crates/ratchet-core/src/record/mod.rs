//! The persisted baseline
//!
//! ```json
//! {
//!   "recordVersion": 1,
//!   "configHash": "sha256:...",
//!   "files": {
//!     "src/index.js": { "no-console": 2 }
//!   }
//! }
//! ```

mod store;
mod version;

pub use store::{Baseline, RecordRead, RecordStore};
pub use version::{CURRENT_RECORD_VERSION, MIN_LEGACY_VERSION, RecordFormat};

use serde::{Deserialize, Serialize};

use crate::FileSet;

/// File name of the record at the project root
pub const RECORD_FILE_NAME: &str = ".ratchet.rec.json";

/// A baseline in the current layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub record_version: u32,
    pub config_hash: String,
    pub files: FileSet,
}

impl Record {
    /// Wrap `files` for persistence.
    ///
    /// Warningless files and zero-count rules are dropped and keys sorted.
    pub fn new(config_hash: impl Into<String>, files: &FileSet) -> Self {
        Self {
            record_version: CURRENT_RECORD_VERSION,
            config_hash: config_hash.into(),
            files: files.without_warningless_files().sorted(),
        }
    }
}
