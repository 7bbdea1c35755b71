//! Reading, validating and writing the record file

use std::path::{Path, PathBuf};

use ratchet_fs::{NormalizedPath, find_project_root, io};
use serde::Deserialize;

use super::{CURRENT_RECORD_VERSION, RECORD_FILE_NAME, Record, RecordFormat};
use crate::{Error, FileSet, Finding, Result, conflict};

/// On-disk shape accepted on read, covering current and legacy layouts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    #[serde(default)]
    record_version: Option<u32>,
    #[serde(default)]
    config_hash: Option<String>,
    /// Legacy release string
    #[serde(default)]
    version: Option<String>,
    /// Legacy configuration hash
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    files: FileSet,
}

/// A record read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRead {
    /// The record migrated to the current layout in memory
    pub record: Record,
    /// The layout it was stored in
    pub format: RecordFormat,
    /// Recoverable problems met while reading
    pub notices: Vec<Finding>,
}

/// The prior state a run compares against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    /// `None` when starting over
    pub record: Option<Record>,
    pub notices: Vec<Finding>,
}

impl Baseline {
    /// The recorded FileSet, `None` when starting over.
    pub fn files(&self) -> Option<&FileSet> {
        self.record.as_ref().map(|record| &record.files)
    }

    /// Whether there is no record to compare against.
    ///
    /// A record whose FileSet is empty still counts: it is what remains once
    /// every warning has been fixed.
    pub fn is_first_run(&self) -> bool {
        self.record.is_none()
    }
}

/// Owns the record file of one project
///
/// The location is always explicit; nothing here consults the process
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Store for the record directly under `root`.
    pub fn at_root(root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join(RECORD_FILE_NAME),
        }
    }

    /// Store for the nearest project enclosing `start`.
    pub fn locate(start: impl AsRef<Path>) -> Self {
        let store = Self::at_root(find_project_root(start.as_ref()));
        tracing::debug!(path = %store.path.display(), "resolved record path");
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the record, if there is one.
    ///
    /// Text that is not valid JSON but carries merge-conflict markers is
    /// recovered by [`conflict::resolve`] and reported as a notice.
    ///
    /// # Errors
    ///
    /// - [`Error::RecordParse`] when the content is not a readable record
    /// - [`Error::RecordVersionTooNew`] / [`Error::RecordVersionUnsupported`]
    ///   when the layout cannot be interpreted
    pub fn read(&self) -> Result<Option<RecordRead>> {
        let Some(content) = io::read_text_if_exists(&NormalizedPath::new(&self.path))? else {
            tracing::debug!(path = %self.path.display(), "no record file");
            return Ok(None);
        };

        let mut notices = Vec::new();
        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(parse_error) if conflict::has_conflict(&content) => {
                let resolution = conflict::resolve(&content).map_err(|source| Error::RecordParse {
                    path: self.path.clone(),
                    source,
                })?;
                notices.push(conflict_notice(&resolution.collisions));
                tracing::warn!(
                    path = %self.path.display(),
                    collisions = resolution.collisions.len(),
                    %parse_error,
                    "recovered record from merge conflict"
                );
                resolution.value
            }
            Err(source) => {
                return Err(Error::RecordParse {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let stored: StoredRecord =
            serde_json::from_value(value).map_err(|source| Error::RecordParse {
                path: self.path.clone(),
                source,
            })?;

        let format = RecordFormat::detect(stored.record_version, stored.version.as_deref());
        format.check()?;

        if let RecordFormat::LegacyAcceptable(version) = &format {
            tracing::warn!(%version, "legacy record will be migrated on next write");
            notices.push(Finding::warning(format!(
                "{} was created by ratchet {}. It will be migrated to record version {} on the next write.",
                RECORD_FILE_NAME, version, CURRENT_RECORD_VERSION
            )));
        }

        let record = Record {
            record_version: format.ordinal(),
            config_hash: stored.config_hash.or(stored.hash).unwrap_or_default(),
            files: stored.files,
        };

        Ok(Some(RecordRead {
            record,
            format,
            notices,
        }))
    }

    /// Load the baseline for a run under `config_hash`.
    ///
    /// With `overwrite` the stored record is not read at all and the run
    /// starts over.
    ///
    /// # Errors
    ///
    /// Everything [`RecordStore::read`] returns, plus
    /// [`Error::ConfigMismatch`] when the record was produced under a
    /// different configuration and `overwrite` is off.
    pub fn load_baseline(&self, config_hash: &str, overwrite: bool) -> Result<Baseline> {
        if overwrite {
            let mut notices = Vec::new();
            if self.exists() {
                tracing::warn!(path = %self.path.display(), "overwriting record");
                notices.push(Finding::warning(format!(
                    "Overwriting the existing {} file...",
                    RECORD_FILE_NAME
                )));
            }
            return Ok(Baseline {
                record: None,
                notices,
            });
        }

        let Some(read) = self.read()? else {
            return Ok(Baseline::default());
        };

        if read.record.config_hash != config_hash {
            return Err(Error::ConfigMismatch {
                expected: config_hash.to_string(),
                found: read.record.config_hash,
            });
        }

        Ok(Baseline {
            record: Some(read.record),
            notices: read.notices,
        })
    }

    /// Replace the record file with `record`.
    ///
    /// Output is pretty-printed with two-space indentation and a trailing
    /// newline; key order is stable.
    pub fn persist(&self, record: &Record) -> Result<()> {
        let mut content = serde_json::to_string_pretty(record)?;
        content.push('\n');
        io::write_text(&NormalizedPath::new(&self.path), &content)?;
        tracing::debug!(
            path = %self.path.display(),
            files = record.files.len(),
            "wrote record"
        );
        Ok(())
    }
}

fn conflict_notice(collisions: &[String]) -> Finding {
    let mut message = format!(
        "{} had merge conflicts that were resolved automatically. Check the result before committing.",
        RECORD_FILE_NAME
    );
    if !collisions.is_empty() {
        message.push_str(&format!(
            " Conflicting entries took the incoming value: {}",
            collisions.join(", ")
        ));
    }
    Finding::warning(message)
}
