//! Proportional allocation: every remaining item keeps the same fraction
//! `(T - d) / T` of its weight, `T` being the total remaining weight.

use gp_core::numeric::clamp_nan_lo;
use gp_core::{Policy, WeightMap};

use crate::{Allocation, AllocationPolicy, Requirements};

#[derive(Clone, Copy, Debug, Default)]
pub struct Proportional;

impl AllocationPolicy for Proportional {
    fn policy(&self) -> Policy {
        Policy::Proportional
    }

    fn allocate(&self, items: &WeightMap, deduction: f64) -> Allocation {
        let total: f64 = items.values().sum();
        let mut out = Allocation::default();

        if total <= 0.0 {
            out.degenerate = !items.is_empty();
            out.unabsorbed = deduction.max(0.0);
            out.requirements = items.keys().map(|k| (k.clone(), 0.0)).collect();
            return out;
        }

        let ratio = (total - deduction) / total;
        for (id, w) in items {
            out.requirements.insert(id.clone(), clamp_nan_lo(w * ratio, 0.0, *w));
        }
        if deduction > total {
            out.unabsorbed = deduction - total;
        }
        out
    }

    fn redistribute(&self, current: &Requirements, surplus: f64) -> Allocation {
        let total: f64 = current.values().sum();
        let mut out = Allocation::default();
        if total <= 0.0 {
            out.unabsorbed = surplus.max(0.0);
            out.requirements = current.clone();
            return out;
        }
        for (id, r) in current {
            let lowered = (r - surplus * r / total).max(0.0);
            if lowered == 0.0 {
                out.sacrificed.insert(id.clone());
            }
            out.requirements.insert(id.clone(), lowered);
        }
        if surplus > total {
            out.unabsorbed = surplus - total;
        }
        out
    }
}
