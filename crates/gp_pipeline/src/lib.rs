//! gp_pipeline: deterministic planning pipeline
//! (validate → accumulate → feasibility → partition → allocate → finalize → project).
//!
//! This crate stays I/O-free: callers hand in a weight map, completed scores
//! and a target, and get back a typed outcome plus collected warnings.
//! Stage events are emitted through `tracing`; no subscriber is installed here.

#![forbid(unsafe_code)]

use core::fmt;

use gp_core::numeric::CARRY_EPS;
use gp_core::{entities::snap_binary_score, CompletedScores, ItemKind, Params, Policy, WeightMap};
use serde::Serialize;
use tracing::{debug, info, warn};

pub mod accumulate;
pub mod allocate;
pub mod diagnostics;
pub mod feasibility;
pub mod partition;
pub mod project;
pub mod report;
pub mod validate;

pub use accumulate::{accumulate_loss, Standing};
pub use allocate::{allocate, finalize};
pub use diagnostics::{DiagCode, Diagnostic, EntityRef, Severity};
pub use feasibility::{check_feasible, Infeasibility};
pub use gp_algo::{round_binary_and_redistribute, Allocation, Finalized, RemainingItems};
pub use partition::partition_remaining;
pub use project::project;
pub use report::{BinarySummary, Classification, ItemLine, Report, Verification};
pub use validate::{validate, ValidationReport};

// ---------------------------- Inputs / outputs ----------------------------

/// One planning request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanInput {
    pub weights: WeightMap,
    pub completed: CompletedScores,
    /// Target final percentage in [0, 100].
    pub target: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// Nothing left to grade; the report only carries completed items.
    AllComplete(Report),
    Infeasible(Infeasibility),
    Planned(Report),
}

impl PlanOutcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            PlanOutcome::AllComplete(r) | PlanOutcome::Planned(r) => Some(r),
            PlanOutcome::Infeasible(_) => None,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, PlanOutcome::Infeasible(_))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanRun {
    pub policy: Policy,
    pub outcome: PlanOutcome,
    pub warnings: Vec<Diagnostic>,
}

/// Single error surface for the pipeline: rejected input.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineError {
    Invalid(Vec<Diagnostic>),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Invalid(issues) => {
                write!(f, "invalid input ({} issue(s))", issues.len())?;
                for d in issues {
                    write!(f, "; {d}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PipelineError {}

// ---------------------------- Orchestration ----------------------------

/// Run the whole pipeline. Only invalid input is an `Err`; infeasibility is
/// an outcome.
pub fn plan(input: &PlanInput, params: &Params) -> Result<PlanRun, PipelineError> {
    let report = validate(input, params);
    if !report.pass {
        let errors: Vec<Diagnostic> = report.errors().cloned().collect();
        warn!(errors = errors.len(), "input rejected");
        return Err(PipelineError::Invalid(errors));
    }
    let mut warnings: Vec<Diagnostic> = report.warnings().cloned().collect();

    let classifier = params.classifier();
    let completed = snap_binary_scores(&input.completed, &classifier);

    let (standing, unknown) = accumulate_loss(&input.weights, &completed);
    warnings.extend(unknown);
    debug!(
        current = standing.current_score,
        lost = standing.total_lost,
        max_possible = standing.max_possible,
        "accumulated completed items"
    );

    let deduction = match check_feasible(standing.max_possible, input.target) {
        Ok(d) => d,
        Err(inf) => {
            info!(
                max_possible = inf.max_possible,
                target = inf.target,
                shortfall = inf.shortfall,
                "target unreachable"
            );
            return Ok(finish(params.policy, PlanOutcome::Infeasible(inf), warnings));
        }
    };

    let remaining = partition_remaining(&input.weights, &completed, &classifier);
    debug!(
        regular = remaining.regular.len(),
        binary = remaining.binary.len(),
        deduction,
        "partitioned remaining items"
    );

    if remaining.is_empty() {
        let r = project(
            &input.weights,
            &completed,
            &classifier,
            &Finalized::default(),
            &standing,
            input.target,
        );
        info!(projected = r.verification.projected_total, "all items complete");
        return Ok(finish(params.policy, PlanOutcome::AllComplete(r), warnings));
    }

    // Both policies leave every requirement at 0 here.
    if remaining.total_weight() <= 0.0 {
        warnings.push(Diagnostic::warning(
            DiagCode::DegenerateInput,
            EntityRef::Root,
            "remaining items have zero total weight; every requirement is 0",
        ));
    }

    let allocation = allocate(params.policy, &remaining, deduction);

    let finalized = finalize(params.policy, &allocation, &remaining);
    if finalized.discarded > CARRY_EPS {
        warnings.push(Diagnostic::warning(
            DiagCode::SurplusDiscarded,
            EntityRef::Root,
            format!(
                "binary rounding surplus {:.4} had no regular item to absorb it",
                finalized.discarded
            ),
        ));
    }

    let r = project(&input.weights, &completed, &classifier, &finalized, &standing, input.target);
    info!(
        policy = %params.policy,
        projected = r.verification.projected_total,
        within_tolerance = r.verification.within_tolerance,
        "plan complete"
    );
    Ok(finish(params.policy, PlanOutcome::Planned(r), warnings))
}

// ---------------------------- helpers ----------------------------

fn snap_binary_scores(completed: &CompletedScores, classifier: &gp_core::ItemClassifier) -> CompletedScores {
    completed
        .iter()
        .map(|(id, s)| match classifier.classify(id) {
            ItemKind::Binary => (id.clone(), snap_binary_score(*s)),
            ItemKind::Regular => (id.clone(), *s),
        })
        .collect()
}

fn finish(policy: Policy, outcome: PlanOutcome, mut warnings: Vec<Diagnostic>) -> PlanRun {
    diagnostics::sort_stably(&mut warnings);
    for w in &warnings {
        warn!(code = %w.code, at = %w.where_, "{}", w.message);
    }
    PlanRun { policy, outcome, warnings }
}
