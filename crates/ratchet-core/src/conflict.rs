//! Best-effort recovery of a record left with merge-conflict markers
//!
//! This is a heuristic, not a merge algorithm. Both sides of every conflict
//! hunk are rebuilt as standalone JSON texts, parsed independently and
//! deep-merged with "theirs" winning on collisions. It only runs after the
//! record has already failed to parse as JSON, and every recovery is
//! reported as a warning along with the entries where the sides disagreed.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static OURS_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<{7,}").unwrap());
static PARENT_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|{7,}").unwrap());
static THEIRS_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^={7,}").unwrap());
static END_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>{7,}").unwrap());

/// Which part of a conflicted file the scanner is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Common,
    Ours,
    Theirs,
    Parent,
}

/// The two candidate texts reconstructed from a conflicted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictSides {
    /// Common lines plus our side of each hunk
    pub ours: String,
    /// Common lines plus their side of each hunk
    pub theirs: String,
}

/// A reconciled JSON value and where the two sides disagreed
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Value,
    /// Slash-separated key paths whose values differed; "theirs" was kept
    pub collisions: Vec<String>,
}

/// Whether `text` contains an unresolved merge conflict.
///
/// The start, separator and end markers must all be present. The parent
/// marker only appears with the `diff3` conflict style and is optional.
pub fn has_conflict(text: &str) -> bool {
    let mut ours = false;
    let mut theirs = false;
    let mut end = false;
    for line in text.lines() {
        ours |= OURS_MARKER.is_match(line);
        theirs |= THEIRS_MARKER.is_match(line);
        end |= END_MARKER.is_match(line);
    }
    ours && theirs && end
}

/// Split a conflicted file into its two sides.
///
/// Lines from the merge base (`|||||||` sections) are dropped.
pub fn split_sides(text: &str) -> ConflictSides {
    let mut state = ScanState::Common;
    let mut ours = Vec::new();
    let mut theirs = Vec::new();

    for line in text.lines() {
        if PARENT_MARKER.is_match(line) {
            state = ScanState::Parent;
        } else if OURS_MARKER.is_match(line) {
            state = ScanState::Ours;
        } else if THEIRS_MARKER.is_match(line) {
            state = ScanState::Theirs;
        } else if END_MARKER.is_match(line) {
            state = ScanState::Common;
        } else {
            if matches!(state, ScanState::Common | ScanState::Ours) {
                ours.push(line);
            }
            if matches!(state, ScanState::Common | ScanState::Theirs) {
                theirs.push(line);
            }
        }
    }

    ConflictSides {
        ours: ours.join("\n"),
        theirs: theirs.join("\n"),
    }
}

/// Parse both sides of a conflicted JSON file and deep-merge them.
pub fn resolve(text: &str) -> Result<Resolution, serde_json::Error> {
    let sides = split_sides(text);
    let mut value: Value = serde_json::from_str(&sides.ours)?;
    let theirs: Value = serde_json::from_str(&sides.theirs)?;

    let mut collisions = Vec::new();
    deep_merge(&mut value, theirs, &mut Vec::new(), &mut collisions);

    Ok(Resolution { value, collisions })
}

/// Merge `overlay` into `base`.
///
/// Objects merge key by key; anything else is replaced by the overlay.
/// Replacements of a differing value are recorded in `collisions`.
fn deep_merge(base: &mut Value, overlay: Value, path: &mut Vec<String>, collisions: &mut Vec<String>) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            merge_maps(base_map, overlay_map, path, collisions);
        }
        (base, overlay) => {
            if *base != overlay {
                collisions.push(path.join("/"));
            }
            *base = overlay;
        }
    }
}

fn merge_maps(
    base: &mut Map<String, Value>,
    overlay: Map<String, Value>,
    path: &mut Vec<String>,
    collisions: &mut Vec<String>,
) {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(existing) => {
                path.push(key);
                deep_merge(existing, value, path, collisions);
                path.pop();
            }
            None => {
                base.insert(key, value);
            }
        }
    }
}
