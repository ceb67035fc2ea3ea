//! Determinism utilities: stable ordering for items and requirements.
//!
//! This module is **I/O-free**. It provides:
//! - A stable total order for item tokens
//! - The binary-rounding order: requirement descending, then `ItemId` ascending
//!
//! Float comparisons use `f64::total_cmp`, so NaN never panics a sort; inputs
//! are validated upstream and never carry NaN in practice.

use core::cmp::Ordering;

use crate::ids::{CategoryId, ItemId};

/* -------------------------------------------------------------------------- */
/*                               Stable Ordering                              */
/* -------------------------------------------------------------------------- */

/// Provide a **total**, stable order for values that must sort canonically.
pub trait StableOrd {
    fn stable_cmp(&self, other: &Self) -> Ordering;
}

impl StableOrd for ItemId {
    #[inline]
    fn stable_cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl StableOrd for CategoryId {
    #[inline]
    fn stable_cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

/* -------------------------------------------------------------------------- */
/*                          Requirement-driven order                          */
/* -------------------------------------------------------------------------- */

/// Compare `(id, requirement)` pairs: higher requirement first, ties by id.
#[inline]
pub fn cmp_requirement_desc(a: (&ItemId, f64), b: (&ItemId, f64)) -> Ordering {
    match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.stable_cmp(b.0),
        o => o,
    }
}

/// Sort `(id, requirement)` pairs **in place** into rounding order.
#[inline]
pub fn sort_by_requirement_desc(xs: &mut [(ItemId, f64)]) {
    xs.sort_by(|a, b| cmp_requirement_desc((&a.0, a.1), (&b.0, b.1)));
}

/* ---------------------------------- Tests --------------------------------- */
