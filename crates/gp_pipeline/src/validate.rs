//! Structural & semantic validation before any computation.
//! Deterministic outputs; every finding is reported, not just the first.
//!
//! Errors (run rejected):
//! - weights that are non-finite or negative
//! - scores that are non-finite or outside [0, 100]
//! - a target that is non-finite or outside [0, 100]
//! - out-of-domain params
//! Warnings:
//! - weight total off 100 by more than `WEIGHT_SUM_TOLERANCE`

use gp_core::entities::weight_total;
use gp_core::numeric::{is_percentage, FULL_SCALE, WEIGHT_SUM_TOLERANCE};
use gp_core::Params;

use crate::diagnostics::{sort_stably, DiagCode, Diagnostic, EntityRef, Severity};
use crate::PlanInput;

/// Deterministic report: pass = (no Error); ordering of issues is stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.issues.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.issues.iter().filter(|d| d.severity == Severity::Warning)
    }
}

/// Top-level entry point.
pub fn validate(input: &PlanInput, params: &Params) -> ValidationReport {
    let mut issues = Vec::new();

    issues.extend(check_weights(input));
    issues.extend(check_scores(input));
    issues.extend(check_target(input.target));
    issues.extend(check_params(params));

    sort_stably(&mut issues);
    ValidationReport { pass: !issues.iter().any(Diagnostic::is_error), issues }
}

// ------------------------------------------------------------------------------------------------
// Helpers / checks
// ------------------------------------------------------------------------------------------------

fn check_weights(input: &PlanInput) -> Vec<Diagnostic> {
    let mut issues = Vec::new();
    let mut all_finite = true;

    for (id, w) in &input.weights {
        if !w.is_finite() {
            all_finite = false;
            issues.push(Diagnostic::error(
                DiagCode::NonFinite,
                EntityRef::Item(id.clone()),
                format!("weight {w} is not finite"),
            ));
        } else if *w < 0.0 {
            issues.push(Diagnostic::error(
                DiagCode::NegativeWeight,
                EntityRef::Item(id.clone()),
                format!("weight {w} is negative"),
            ));
        }
    }

    if all_finite {
        let total = weight_total(&input.weights);
        if (total - FULL_SCALE).abs() > WEIGHT_SUM_TOLERANCE {
            issues.push(Diagnostic::warning(
                DiagCode::DegenerateInput,
                EntityRef::Root,
                format!("weights sum to {total}, expected 100"),
            ));
        }
    }
    issues
}

fn check_scores(input: &PlanInput) -> Vec<Diagnostic> {
    input
        .completed
        .iter()
        .filter_map(|(id, s)| {
            if !s.is_finite() {
                Some(Diagnostic::error(
                    DiagCode::NonFinite,
                    EntityRef::Item(id.clone()),
                    format!("score {s} is not finite"),
                ))
            } else if !is_percentage(*s) {
                Some(Diagnostic::error(
                    DiagCode::OutOfRange,
                    EntityRef::Item(id.clone()),
                    format!("score {s} outside [0, 100]"),
                ))
            } else {
                None
            }
        })
        .collect()
}

fn check_target(target: f64) -> Option<Diagnostic> {
    if !target.is_finite() {
        Some(Diagnostic::error(
            DiagCode::NonFinite,
            EntityRef::Param("target"),
            format!("target {target} is not finite"),
        ))
    } else if !is_percentage(target) {
        Some(Diagnostic::error(
            DiagCode::OutOfRange,
            EntityRef::Param("target"),
            format!("target {target} outside [0, 100]"),
        ))
    } else {
        None
    }
}

fn check_params(params: &Params) -> Option<Diagnostic> {
    params.validate_domains().err().map(|e| {
        Diagnostic::error(DiagCode::OutOfRange, EntityRef::Param("binary_prefixes"), e.to_string())
    })
}
