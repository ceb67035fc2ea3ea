//! gp_core: core types, domains, ordering helpers, and numeric tolerances.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`gp_algo`, `gp_pipeline`, `gp_io`, `gp_cli`).
//!
//! - Item identifiers: `ItemId`, `CategoryId`
//! - Weight / completed-score maps and binary item classification
//! - Numeric tolerances shared by every stage
//! - Deterministic ordering helpers (requirement ↓, then `ItemId` ↑)
//! - Domains: `Policy`, `Params`, `LetterGrade`
//! - Weight-table builder from category totals and item counts
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod determinism;
pub mod entities;
pub mod grades;
pub mod ids;
pub mod numeric;
pub mod variables;
pub mod weights;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidToken,
        UnknownPolicy,
        UnknownGrade,
        NonFinite(&'static str),
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::UnknownPolicy => write!(f, "unknown allocation policy"),
                CoreError::UnknownGrade => write!(f, "unknown letter grade"),
                CoreError::NonFinite(k) => write!(f, "value is not finite: {k}"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub use entities::{CompletedScores, ItemClassifier, ItemKind, WeightMap};
pub use errors::CoreError;
pub use grades::LetterGrade;
pub use ids::{CategoryId, ItemId};
pub use variables::{Params, Policy};
