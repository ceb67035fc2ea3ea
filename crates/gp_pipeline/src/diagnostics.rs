//! Diagnostics shared by validation and the planning stages.
//!
//! A diagnostic is either an `Error` (the run is rejected before any
//! computation) or a `Warning` (collected and returned with the outcome).

use core::fmt;

use gp_core::ItemId;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DiagCode {
    /// Completed score for an item missing from the weight map.
    UnknownItem,
    /// Weights off 100, or remaining items with zero total weight.
    DegenerateInput,
    /// Binary rounding surplus with no regular item to absorb it.
    SurplusDiscarded,
    NonFinite,
    OutOfRange,
    NegativeWeight,
}

impl DiagCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagCode::UnknownItem => "UnknownItem",
            DiagCode::DegenerateInput => "DegenerateInput",
            DiagCode::SurplusDiscarded => "SurplusDiscarded",
            DiagCode::NonFinite => "NonFinite",
            DiagCode::OutOfRange => "OutOfRange",
            DiagCode::NegativeWeight => "NegativeWeight",
        }
    }
}

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the finding applies (kept small & deterministic).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Root,
    Item(ItemId),
    Param(&'static str),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Root => f.write_str("root"),
            EntityRef::Item(id) => write!(f, "item {id}"),
            EntityRef::Param(p) => write!(f, "param {p}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagCode,
    pub message: String,
    #[serde(rename = "where")]
    pub where_: EntityRef,
}

impl Diagnostic {
    pub fn error(code: DiagCode, where_: EntityRef, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, code, message: message.into(), where_ }
    }

    pub fn warning(code: DiagCode, where_: EntityRef, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, code, message: message.into(), where_ }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.where_, self.message)
    }
}

/// Stable order: severity, code, location, then message.
pub fn sort_stably(diags: &mut [Diagnostic]) {
    diags.sort_by(|a, b| {
        (a.severity, a.code, &a.where_, &a.message).cmp(&(b.severity, b.code, &b.where_, &b.message))
    });
}
