//! Loss accumulation over completed items.
//!
//! earned = w · s / 100, lost = w · (1 − s / 100). Unknown keys are skipped
//! with an `UnknownItem` warning.

use gp_core::numeric::FULL_SCALE;
use gp_core::{CompletedScores, WeightMap};
use serde::Serialize;

use crate::diagnostics::{DiagCode, Diagnostic, EntityRef};

/// Where the student stands before any remaining item is graded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Standing {
    pub current_score: f64,
    pub total_lost: f64,
    pub max_possible: f64,
}

pub fn accumulate_loss(weights: &WeightMap, completed: &CompletedScores) -> (Standing, Vec<Diagnostic>) {
    let mut warnings = Vec::new();
    let mut earned = 0.0;
    let mut lost = 0.0;

    for (id, score) in completed {
        let Some(w) = weights.get(id) else {
            warnings.push(Diagnostic::warning(
                DiagCode::UnknownItem,
                EntityRef::Item(id.clone()),
                format!("completed score for {id} has no weight; ignored"),
            ));
            continue;
        };
        let frac = score / FULL_SCALE;
        earned += w * frac;
        lost += w * (1.0 - frac);
    }

    let standing = Standing {
        current_score: earned,
        total_lost: lost,
        max_possible: FULL_SCALE - lost,
    };
    (standing, warnings)
}
