//! Binary rounding & surplus redistribution.
//!
//! Contract:
//! - `needed` is the sum of raw binary requirements.
//! - Binary items are ranked by raw requirement ↓, then `ItemId` ↑, and marked
//!   must-pass from the top until their cumulative weight covers `needed`
//!   (slack `FEASIBILITY_EPS`). With unit weights that is `ceil(needed)` items.
//! - Must-pass items require their full weight; the others require 0.
//! - `surplus = covered - needed`. Above `CARRY_EPS` it is handed to the
//!   policy as extra deduction over regular items whose requirement is > 0.
//!   With no such item the surplus is discarded.

use std::collections::BTreeSet;

use gp_core::determinism::sort_by_requirement_desc;
use gp_core::numeric::{CARRY_EPS, FEASIBILITY_EPS};
use gp_core::{ItemId, WeightMap};

use crate::{AllocationPolicy, Requirements};

/// Summary of how binary items were rounded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BinaryRounding {
    pub needed: f64,
    pub covered: f64,
    pub surplus: f64,
    pub must_pass: BTreeSet<ItemId>,
    pub may_skip: BTreeSet<ItemId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Finalized {
    pub requirements: Requirements,
    pub rounding: BinaryRounding,
    /// Surplus actually absorbed by regular items.
    pub redistributed: f64,
    /// Surplus that found no item to absorb it.
    pub discarded: f64,
}

pub fn round_binary_and_redistribute(
    policy: &dyn AllocationPolicy,
    requirements: &Requirements,
    binary: &WeightMap,
    regular: &WeightMap,
) -> Finalized {
    let mut out = Finalized { requirements: requirements.clone(), ..Finalized::default() };

    let mut ranked: Vec<(ItemId, f64)> = binary
        .keys()
        .map(|id| (id.clone(), requirements.get(id).copied().unwrap_or(0.0)))
        .collect();
    let needed: f64 = ranked.iter().map(|(_, r)| r).sum();
    sort_by_requirement_desc(&mut ranked);

    let mut covered = 0.0;
    for (id, _) in ranked {
        let w = binary.get(&id).copied().unwrap_or(0.0);
        if covered + FEASIBILITY_EPS < needed {
            covered += w;
            out.requirements.insert(id.clone(), w);
            out.rounding.must_pass.insert(id);
        } else {
            out.requirements.insert(id.clone(), 0.0);
            out.rounding.may_skip.insert(id);
        }
    }

    let surplus = (covered - needed).max(0.0);
    out.rounding.needed = needed;
    out.rounding.covered = covered;
    out.rounding.surplus = surplus;

    if surplus <= CARRY_EPS {
        return out;
    }

    let eligible: Requirements = regular
        .keys()
        .filter_map(|id| out.requirements.get(id).map(|r| (id.clone(), *r)))
        .filter(|(_, r)| *r > 0.0)
        .collect();
    if eligible.is_empty() {
        out.discarded = surplus;
        return out;
    }

    let lowered = policy.redistribute(&eligible, surplus);
    out.requirements.extend(lowered.requirements);
    out.discarded = lowered.unabsorbed;
    out.redistributed = surplus - lowered.unabsorbed;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EqualSacrifice, Proportional};

    fn id(s: &str) -> ItemId { s.parse().unwrap() }

    fn attendance(n: u32) -> WeightMap {
        (1..=n).map(|i| (id(&format!("attendance{i}")), 1.0)).collect()
    }

    fn raw(binary: &WeightMap, each: f64, regular: &[(&str, f64)]) -> Requirements {
        let mut r: Requirements = binary.keys().map(|k| (k.clone(), each)).collect();
        r.extend(regular.iter().map(|(k, v)| (id(k), *v)));
        r
    }

    #[test]
    fn ceil_of_needed_must_pass() {
        let binary = attendance(10);
        let regular: WeightMap = [(id("final"), 10.0)].into_iter().collect();
        let reqs = raw(&binary, 0.83, &[("final", 8.3)]);

        let f = round_binary_and_redistribute(&Proportional, &reqs, &binary, &regular);
        assert_eq!(f.rounding.must_pass.len(), 9);
        // Ties resolve by id: attendance9 sorts last.
        assert_eq!(f.rounding.may_skip.iter().map(ItemId::as_str).collect::<Vec<_>>(), ["attendance9"]);
        assert!((f.rounding.surplus - 0.7).abs() < 1e-9);
        assert!((f.requirements[&id("final")] - 7.6).abs() < 1e-9);
        assert!((f.redistributed - 0.7).abs() < 1e-9);
        assert_eq!(f.discarded, 0.0);
        assert_eq!(f.requirements[&id("attendance9")], 0.0);
        assert_eq!(f.requirements[&id("attendance10")], 1.0);
    }

    #[test]
    fn whole_needed_leaves_no_surplus() {
        let binary = attendance(4);
        let reqs = raw(&binary, 0.5, &[]);
        let f = round_binary_and_redistribute(&EqualSacrifice, &reqs, &binary, &WeightMap::new());
        assert_eq!(f.rounding.must_pass.len(), 2);
        assert_eq!(f.rounding.surplus, 0.0);
        assert_eq!(f.discarded, 0.0);
    }

    #[test]
    fn surplus_without_regular_items_is_discarded() {
        let binary = attendance(3);
        let reqs = raw(&binary, 0.5, &[]);
        let f = round_binary_and_redistribute(&EqualSacrifice, &reqs, &binary, &WeightMap::new());
        assert_eq!(f.rounding.must_pass.len(), 2);
        assert!((f.discarded - 0.5).abs() < 1e-12);
        assert_eq!(f.redistributed, 0.0);
    }

    #[test]
    fn higher_requirement_wins_over_id() {
        let binary = attendance(3);
        let mut reqs = raw(&binary, 0.2, &[]);
        reqs.insert(id("attendance3"), 0.6);
        let f = round_binary_and_redistribute(&EqualSacrifice, &reqs, &binary, &WeightMap::new());
        assert_eq!(f.rounding.must_pass.iter().map(ItemId::as_str).collect::<Vec<_>>(), ["attendance3"]);
    }

    #[test]
    fn zero_requirement_regular_items_are_not_eligible() {
        let binary = attendance(2);
        let regular: WeightMap = [(id("quiz1"), 1.0), (id("exam"), 20.0)].into_iter().collect();
        let reqs = raw(&binary, 0.75, &[("quiz1", 0.0), ("exam", 15.0)]);
        let f = round_binary_and_redistribute(&EqualSacrifice, &reqs, &binary, &regular);
        assert_eq!(f.requirements[&id("quiz1")], 0.0);
        assert!((f.requirements[&id("exam")] - 14.5).abs() < 1e-9);
    }
}
