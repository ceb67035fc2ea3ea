//! Grading entities: weight and score maps, item kinds, and the prefix
//! classifier that separates binary (pass/fail) items from regular ones.
//!
//! Contract:
//! - Maps are `BTreeMap`s keyed by `ItemId`, so iteration is always in id order.
//! - Weights are percentages of the final grade; scores are in `[0, 100]`.
//! - Classification is a pure function of the id and the configured prefixes.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::numeric::FULL_SCALE;

/// `ItemId → weight` (percentage points of the final grade).
pub type WeightMap = BTreeMap<ItemId, f64>;

/// `ItemId → recorded score` in `[0, 100]`.
pub type CompletedScores = BTreeMap<ItemId, f64>;

/// Default prefix marking binary pass/fail items.
pub const DEFAULT_BINARY_PREFIX: &str = "attendance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    Regular,
    Binary,
}

/// Prefix-based item classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemClassifier {
    prefixes: Vec<String>,
}

impl ItemClassifier {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { prefixes: prefixes.into_iter().map(Into::into).collect() }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn classify(&self, id: &ItemId) -> ItemKind {
        if self.is_binary(id) {
            ItemKind::Binary
        } else {
            ItemKind::Regular
        }
    }

    #[inline]
    pub fn is_binary(&self, id: &ItemId) -> bool {
        self.prefixes.iter().any(|p| id.has_prefix(p))
    }
}

impl Default for ItemClassifier {
    fn default() -> Self {
        Self::new([DEFAULT_BINARY_PREFIX])
    }
}

/// Snap a raw binary score to pass (100) or fail (0). Threshold is 50, inclusive.
#[inline]
pub fn snap_binary_score(score: f64) -> f64 {
    if score >= FULL_SCALE / 2.0 {
        FULL_SCALE
    } else {
        0.0
    }
}

/// Sum of all weights in id order.
#[inline]
pub fn weight_total(weights: &WeightMap) -> f64 {
    weights.values().sum()
}
