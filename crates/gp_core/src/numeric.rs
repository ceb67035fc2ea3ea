//! Numeric tolerances shared by every stage of the planner.
//!
//! All arithmetic is `f64` in percentage points of the final grade. The
//! constants below are the only place tolerances are defined; stages must
//! not introduce ad-hoc epsilons.

/// Feasibility comparison and binary coverage slack.
pub const FEASIBILITY_EPS: f64 = 1e-9;

/// Loop guard for carried deduction and surplus redistribution.
pub const CARRY_EPS: f64 = 1e-4;

/// Allowed gap between the projected total and the target.
pub const VERIFY_TOLERANCE: f64 = 0.01;

/// Allowed gap between the weight total and 100.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Full percentage scale.
pub const FULL_SCALE: f64 = 100.0;

/// Decimal places kept by the weight-table builder.
pub const WEIGHT_DECIMALS: i32 = 6;

/// Round to `decimals` places (half away from zero).
#[inline]
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let k = 10f64.powi(decimals);
    (x * k).round() / k
}

/// Clamp into `[lo, hi]`, mapping NaN to `lo`.
#[inline]
pub fn clamp_nan_lo(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        lo
    } else {
        x.max(lo).min(hi)
    }
}

/// True when `x` lies in `[0, 100]` and is finite.
#[inline]
pub fn is_percentage(x: f64) -> bool {
    x.is_finite() && (0.0..=FULL_SCALE).contains(&x)
}
