//! Shared test utilities for the ratchet workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`project::TestProject`] builder for a project on disk
//! - [`report`]: ESLint-compatible JSON reports for driving a run

pub mod project;
pub mod report;

pub use project::TestProject;
pub use report::ReportEntry;
