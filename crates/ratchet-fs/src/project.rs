//! Project boundary markers and root discovery.

use std::path::{Path, PathBuf};

/// Files and directories that mark the root of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectMarker {
    /// `ratchet.toml`
    RatchetToml,
    /// `.ratchet.toml`
    DotRatchetToml,
    /// `.ratchet.json`
    DotRatchetJson,
    /// `.ratchet.yaml`
    DotRatchetYaml,
    /// `.ratchet.yml`
    DotRatchetYml,
    /// `package.json`
    PackageJson,
    /// `.git` (directory, or file for worktrees)
    GitDir,
}

impl ProjectMarker {
    /// Configuration file markers, in lookup priority order.
    pub const CONFIG_FILES: [ProjectMarker; 5] = [
        Self::RatchetToml,
        Self::DotRatchetToml,
        Self::DotRatchetJson,
        Self::DotRatchetYaml,
        Self::DotRatchetYml,
    ];

    /// Every marker, checked in this order at each directory level.
    pub const ALL: [ProjectMarker; 7] = [
        Self::RatchetToml,
        Self::DotRatchetToml,
        Self::DotRatchetJson,
        Self::DotRatchetYaml,
        Self::DotRatchetYml,
        Self::PackageJson,
        Self::GitDir,
    ];

    /// Get the string representation of the marker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RatchetToml => "ratchet.toml",
            Self::DotRatchetToml => ".ratchet.toml",
            Self::DotRatchetJson => ".ratchet.json",
            Self::DotRatchetYaml => ".ratchet.yaml",
            Self::DotRatchetYml => ".ratchet.yml",
            Self::PackageJson => "package.json",
            Self::GitDir => ".git",
        }
    }

    /// Whether this marker is present directly inside `dir`.
    pub fn is_present_in(&self, dir: &Path) -> bool {
        dir.join(self.as_str()).exists()
    }
}

impl AsRef<Path> for ProjectMarker {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for ProjectMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Find the root of the nearest enclosing project.
///
/// Walks up from `start` and returns the first directory containing any
/// [`ProjectMarker`]. Falls back to `start` itself when no ancestor carries a
/// marker. The result never depends on the process working directory.
pub fn find_project_root(start: &Path) -> PathBuf {
    let start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    for dir in start.ancestors() {
        if let Some(marker) = ProjectMarker::ALL.iter().find(|m| m.is_present_in(dir)) {
            tracing::debug!(root = %dir.display(), %marker, "found project root");
            return dir.to_path_buf();
        }
    }

    tracing::debug!(root = %start.display(), "no project marker found; using start directory");
    start
}
