// crates/gp_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Allocation layer: turns an allowed deduction into per-item minimum
//! contributions, then rounds binary items to whole passes.
//!
//! Contract:
//! - Inputs are validated upstream (finite, non-negative weights; deduction ≥ 0).
//! - Every requirement ends in `[0, weight]`.
//! - Policies differ only in how a deduction is spread; the surrounding
//!   stages are shared through the [`AllocationPolicy`] trait.
//!
//! Determinism:
//! - All maps are `BTreeMap` keyed by `ItemId`; worklists are built in id order.

use std::collections::{BTreeMap, BTreeSet};

pub use gp_core::{ids::ItemId, Policy, WeightMap};

pub mod binary_rounding;
pub mod equal_sacrifice;
pub mod proportional;

pub use binary_rounding::{round_binary_and_redistribute, BinaryRounding, Finalized};
pub use equal_sacrifice::EqualSacrifice;
pub use proportional::Proportional;

/// `ItemId → required contribution` in percentage points.
pub type Requirements = BTreeMap<ItemId, f64>;

// ----------------------------- Inputs -----------------------------

/// Items not yet graded, split by kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemainingItems {
    pub regular: WeightMap,
    pub binary: WeightMap,
}

impl RemainingItems {
    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.binary.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regular.len() + self.binary.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.regular.values().chain(self.binary.values()).sum()
    }

    /// All remaining items in id order.
    pub fn combined(&self) -> WeightMap {
        self.regular
            .iter()
            .chain(self.binary.iter())
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

// ----------------------------- Outputs -----------------------------

/// Result of spreading a deduction over a set of items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Allocation {
    pub requirements: Requirements,
    /// Items pushed to zero because they could not absorb their share.
    pub sacrificed: BTreeSet<ItemId>,
    /// Number of sacrifice rounds run (0 for single-pass policies).
    pub rounds: u32,
    /// Deduction left over once every item reached zero.
    pub unabsorbed: f64,
    /// Items were present but their total weight was zero.
    pub degenerate: bool,
}

// ----------------------------- Policy seam -----------------------------

pub trait AllocationPolicy {
    fn policy(&self) -> Policy;

    /// Spread `deduction` over `items`, starting from their full weights.
    fn allocate(&self, items: &WeightMap, deduction: f64) -> Allocation;

    /// Spread a rounding `surplus` over `current` requirements (all > 0),
    /// lowering them further. Returned requirements cover exactly the keys of
    /// `current`.
    fn redistribute(&self, current: &Requirements, surplus: f64) -> Allocation;
}

/// Static dispatch table for the configured policy.
pub fn policy_for(policy: Policy) -> &'static dyn AllocationPolicy {
    match policy {
        Policy::EqualSacrifice => &EqualSacrifice,
        Policy::Proportional => &Proportional,
    }
}
