//! Normalized path handling for cross-platform compatibility

use std::path::{Component, Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Record keys are stored in this form so a record written on Windows reads
/// the same on Unix. Conversion to the platform-native form happens only at
/// I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: to_posix(&path_str),
        }
    }

    /// Express `path` relative to `root`.
    ///
    /// Relative inputs are taken as already relative to `root`. Absolute
    /// inputs outside `root` are expressed with leading `..` segments.
    pub fn relative_to(path: impl AsRef<Path>, root: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root = root.as_ref();

        if path.is_relative() {
            return Self::new(strip_cur_dir(path));
        }

        if let Ok(stripped) = path.strip_prefix(root) {
            return Self::new(stripped);
        }

        let path_parts: Vec<Component<'_>> = path.components().collect();
        let root_parts: Vec<Component<'_>> = root.components().collect();
        let shared = path_parts
            .iter()
            .zip(root_parts.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut relative = PathBuf::new();
        for _ in shared..root_parts.len() {
            relative.push("..");
        }
        for part in &path_parts[shared..] {
            relative.push(part.as_os_str());
        }
        Self::new(relative)
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Consume the path, returning the normalized string.
    pub fn into_string(self) -> String {
        self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(to_system(&self.inner))
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Convert every Windows separator to a forward slash.
pub fn to_posix(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert a posix-separated path to the separator of the running platform.
pub fn to_system(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '\\' {
        path.replace('/', "\\")
    } else {
        path.to_string()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
