//! crates/gp_io/src/lib.rs
//! File-facing layer of the grade planner.
//!
//! - `scenario`: read a scenario file into typed maps, target and params.
//! - `canonical_json`: sorted-key compact JSON and atomic file writes.
//!
//! Everything here returns `IoResult`; the core crates never touch the filesystem.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for gp_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON errors with a JSON Pointer to the offending value.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Scenario-level invariants (mutually exclusive keys, missing target, …).
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; report at root.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod scenario;

pub mod prelude {
    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::scenario::{load_scenario, parse_scenario, Overrides, Resolved, Scenario};
    pub use crate::{IoError, IoResult};
}
