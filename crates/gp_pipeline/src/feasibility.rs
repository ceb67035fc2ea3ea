//! Feasibility check: can the target still be reached?

use gp_core::numeric::FEASIBILITY_EPS;
use gp_core::LetterGrade;
use serde::Serialize;

/// Terminal outcome when even perfect scores fall short.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Infeasibility {
    pub max_possible: f64,
    pub target: f64,
    pub shortfall: f64,
    pub best_reachable: LetterGrade,
}

/// Returns the allowed deduction, `max(0, max_possible − target)`.
pub fn check_feasible(max_possible: f64, target: f64) -> Result<f64, Infeasibility> {
    if max_possible < target - FEASIBILITY_EPS {
        return Err(Infeasibility {
            max_possible,
            target,
            shortfall: target - max_possible,
            best_reachable: LetterGrade::from_percentage(max_possible),
        });
    }
    Ok((max_possible - target).max(0.0))
}
