//! Report model: typed, serializable view of a planned run.
//! Field names are stable; values are raw `f64` (no display rounding).

use gp_core::{ItemId, ItemKind, LetterGrade};
use serde::Serialize;

use crate::accumulate::Standing;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Completed,
    /// A positive contribution is still required (binary: must pass).
    MustAchieve,
    /// Nothing is required (binary: may skip).
    MaySacrifice,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemLine {
    pub item_id: ItemId,
    pub kind: ItemKind,
    pub weight: f64,
    pub classification: Classification,
    /// Completed items only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_score: Option<f64>,
    /// Remaining items only, in percentage points of the final grade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_contribution: Option<f64>,
    /// Remaining items only, on the item's own 0–100 scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_score: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BinarySummary {
    pub needed: f64,
    pub covered: f64,
    pub surplus: f64,
    pub must_pass: usize,
    pub may_skip: usize,
    pub redistributed: f64,
    pub discarded: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Verification {
    pub projected_total: f64,
    pub target: f64,
    pub delta: f64,
    pub within_tolerance: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub target: f64,
    pub standing: Standing,
    pub deduction_allowed: f64,
    /// Completed work alone already reaches the target.
    pub target_secured: bool,
    pub items: Vec<ItemLine>,
    pub binary: BinarySummary,
    pub verification: Verification,
    pub projected_grade: LetterGrade,
}

impl Report {
    pub fn line(&self, id: &str) -> Option<&ItemLine> {
        self.items.iter().find(|l| l.item_id.as_str() == id)
    }

    pub fn count(&self, class: Classification) -> usize {
        self.items.iter().filter(|l| l.classification == class).count()
    }
}
