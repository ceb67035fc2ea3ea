//! Equal deduction with sacrifice.
//!
//! Each round splits the outstanding budget evenly over the items still in
//! the worklist. An item whose allowance would go negative is sacrificed: its
//! requirement becomes 0, it leaves the worklist for good, and the part of
//! the share it could not absorb is carried into the next round.
//!
//! - The worklist is rebuilt every round; nothing is removed in place.
//! - The loop runs while `budget > CARRY_EPS` and the worklist is non-empty,
//!   so it terminates after at most `n + 1` rounds.
//! - Budget still outstanding when the worklist empties is `unabsorbed`.

use std::collections::BTreeSet;

use gp_core::numeric::CARRY_EPS;
use gp_core::{ItemId, Policy, WeightMap};

use crate::{Allocation, AllocationPolicy, Requirements};

#[derive(Clone, Copy, Debug, Default)]
pub struct EqualSacrifice;

impl AllocationPolicy for EqualSacrifice {
    fn policy(&self) -> Policy {
        Policy::EqualSacrifice
    }

    fn allocate(&self, items: &WeightMap, deduction: f64) -> Allocation {
        let start = items.iter().map(|(k, w)| (k.clone(), *w)).collect();
        sacrifice_rounds(start, deduction)
    }

    fn redistribute(&self, current: &Requirements, surplus: f64) -> Allocation {
        let start = current.iter().map(|(k, r)| (k.clone(), *r)).collect();
        sacrifice_rounds(start, surplus)
    }
}

/// Run the worklist loop from `(id, allowance)` pairs.
pub fn sacrifice_rounds(start: Vec<(ItemId, f64)>, budget: f64) -> Allocation {
    let mut out = Allocation::default();
    let mut sacrificed = BTreeSet::new();
    let mut pool = start;
    let mut budget = budget.max(0.0);

    while budget > CARRY_EPS && !pool.is_empty() {
        let share = budget / pool.len() as f64;
        let mut carry = 0.0;
        let mut next = Vec::with_capacity(pool.len());

        for (id, allowance) in pool {
            let reduced = allowance - share;
            if reduced < 0.0 {
                carry += -reduced;
                out.requirements.insert(id.clone(), 0.0);
                sacrificed.insert(id);
            } else {
                next.push((id, reduced));
            }
        }

        pool = next;
        budget = carry;
        out.rounds += 1;
    }

    if pool.is_empty() && budget > 0.0 {
        out.unabsorbed = budget;
    }
    for (id, allowance) in pool {
        out.requirements.insert(id, allowance);
    }
    out.sacrificed = sacrificed;
    out
}
