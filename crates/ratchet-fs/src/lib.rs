//! Filesystem primitives for ratchet
//!
//! Provides separator-agnostic paths, project-root discovery, atomic writes
//! and format-agnostic configuration loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod project;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, to_posix, to_system};
pub use project::{ProjectMarker, find_project_root};
