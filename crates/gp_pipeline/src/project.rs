//! Result projection: per-item minimum scores, classification and the
//! verification total.
//!
//! - Items are emitted in `ItemId` order.
//! - Regular: `required_score = min(100, c / w · 100)`. A contribution at or
//!   below `FEASIBILITY_EPS` (1e-9) is may-sacrifice with score 0; this also
//!   covers `w = 0`, since `c ≤ w`.
//! - Binary: must-pass → 100, may-skip → 0.
//! - `projected_total = current_score + Σ c`; within tolerance when
//!   `|projected_total − target| < VERIFY_TOLERANCE`.

use gp_algo::Finalized;
use gp_core::numeric::{FEASIBILITY_EPS, FULL_SCALE, VERIFY_TOLERANCE};
use gp_core::{CompletedScores, ItemClassifier, ItemKind, LetterGrade, WeightMap};

use crate::accumulate::Standing;
use crate::report::{BinarySummary, Classification, ItemLine, Report, Verification};

pub fn project(
    weights: &WeightMap,
    completed: &CompletedScores,
    classifier: &ItemClassifier,
    finalized: &Finalized,
    standing: &Standing,
    target: f64,
) -> Report {
    let mut items = Vec::with_capacity(weights.len());
    let mut required_sum = 0.0;

    for (id, w) in weights {
        let kind = classifier.classify(id);

        if let Some(score) = completed.get(id) {
            items.push(ItemLine {
                item_id: id.clone(),
                kind,
                weight: *w,
                classification: Classification::Completed,
                recorded_score: Some(*score),
                required_contribution: None,
                required_score: None,
            });
            continue;
        }

        let c = finalized.requirements.get(id).copied().unwrap_or(0.0);
        required_sum += c;

        let (classification, score) = match kind {
            ItemKind::Binary if finalized.rounding.must_pass.contains(id) => {
                (Classification::MustAchieve, FULL_SCALE)
            }
            ItemKind::Binary => (Classification::MaySacrifice, 0.0),
            ItemKind::Regular if c <= FEASIBILITY_EPS => (Classification::MaySacrifice, 0.0),
            ItemKind::Regular => (Classification::MustAchieve, (c / w * FULL_SCALE).min(FULL_SCALE)),
        };

        items.push(ItemLine {
            item_id: id.clone(),
            kind,
            weight: *w,
            classification,
            recorded_score: None,
            required_contribution: Some(c),
            required_score: Some(score),
        });
    }

    let projected_total = standing.current_score + required_sum;
    let delta = projected_total - target;

    Report {
        target,
        standing: *standing,
        deduction_allowed: (standing.max_possible - target).max(0.0),
        target_secured: standing.current_score + FEASIBILITY_EPS >= target,
        items,
        binary: BinarySummary {
            needed: finalized.rounding.needed,
            covered: finalized.rounding.covered,
            surplus: finalized.rounding.surplus,
            must_pass: finalized.rounding.must_pass.len(),
            may_skip: finalized.rounding.may_skip.len(),
            redistributed: finalized.redistributed,
            discarded: finalized.discarded,
        },
        verification: Verification {
            projected_total,
            target,
            delta,
            within_tolerance: delta.abs() < VERIFY_TOLERANCE,
        },
        projected_grade: LetterGrade::from_percentage(projected_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::ItemId;

    fn id(s: &str) -> ItemId { s.parse().unwrap() }

    #[test]
    fn scores_and_classes() {
        let weights: WeightMap = [(id("done"), 50.0), (id("left"), 40.0), (id("skip"), 10.0)]
            .into_iter()
            .collect();
        let completed: CompletedScores = [(id("done"), 90.0)].into_iter().collect();
        let mut fin = Finalized::default();
        fin.requirements.insert(id("left"), 30.0);
        fin.requirements.insert(id("skip"), 0.0);
        let standing = Standing { current_score: 45.0, total_lost: 5.0, max_possible: 95.0 };

        let r = project(&weights, &completed, &ItemClassifier::default(), &fin, &standing, 75.0);

        let done = r.line("done").unwrap();
        assert_eq!(done.classification, Classification::Completed);
        assert_eq!(done.recorded_score, Some(90.0));
        assert_eq!(done.required_score, None);

        let left = r.line("left").unwrap();
        assert_eq!(left.classification, Classification::MustAchieve);
        assert_eq!(left.required_score, Some(75.0));

        let skip = r.line("skip").unwrap();
        assert_eq!(skip.classification, Classification::MaySacrifice);
        assert_eq!(skip.required_score, Some(0.0));

        assert_eq!(r.verification.projected_total, 75.0);
        assert!(r.verification.within_tolerance);
        assert_eq!(r.deduction_allowed, 20.0);
        assert!(!r.target_secured);
        assert_eq!(r.projected_grade, LetterGrade::C);
    }

    #[test]
    fn residue_below_feasibility_eps_is_sacrificed() {
        let weights: WeightMap = [(id("dust"), 20.0), (id("edge"), 20.0)].into_iter().collect();
        let mut fin = Finalized::default();
        fin.requirements.insert(id("dust"), 1e-12);
        fin.requirements.insert(id("edge"), 1e-6);
        let standing = Standing { current_score: 0.0, total_lost: 60.0, max_possible: 40.0 };

        let r = project(&weights, &CompletedScores::new(), &ItemClassifier::default(), &fin, &standing, 0.0);

        let dust = r.line("dust").unwrap();
        assert_eq!(dust.classification, Classification::MaySacrifice);
        assert_eq!(dust.required_score, Some(0.0));
        assert_eq!(dust.required_contribution, Some(1e-12));

        let edge = r.line("edge").unwrap();
        assert_eq!(edge.classification, Classification::MustAchieve);
        assert!(edge.required_score.unwrap() > 0.0);
    }
}
