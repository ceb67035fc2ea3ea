//! Allocation stage: dispatch the allowed deduction to the configured policy,
//! then round binary items and redistribute the rounding surplus.

use gp_algo::{policy_for, round_binary_and_redistribute, Allocation, Finalized, RemainingItems};
use gp_core::Policy;
use tracing::debug;

/// Spread `deduction` over all remaining items under `policy`.
pub fn allocate(policy: Policy, remaining: &RemainingItems, deduction: f64) -> Allocation {
    let a = policy_for(policy).allocate(&remaining.combined(), deduction);
    debug!(
        %policy,
        items = remaining.len(),
        deduction,
        rounds = a.rounds,
        sacrificed = a.sacrificed.len(),
        "allocated deduction"
    );
    a
}

/// Round binary items to whole passes under the same policy.
pub fn finalize(policy: Policy, allocation: &Allocation, remaining: &RemainingItems) -> Finalized {
    let f = round_binary_and_redistribute(
        policy_for(policy),
        &allocation.requirements,
        &remaining.binary,
        &remaining.regular,
    );
    debug!(
        needed = f.rounding.needed,
        must_pass = f.rounding.must_pass.len(),
        may_skip = f.rounding.may_skip.len(),
        surplus = f.rounding.surplus,
        redistributed = f.redistributed,
        "rounded binary items"
    );
    f
}
