//! Scenario files: the weight scheme, completed scores and target for one run.
//!
//! ```json
//! {
//!   "policy": "equal",
//!   "target": 93.0,
//!   "binary_prefixes": ["attendance"],
//!   "weights": { "exam1": 15.0 },
//!   "completed": { "exam1": 80.0 }
//! }
//! ```
//!
//! Contract:
//! - exactly one of `weights` / `categories`;
//! - at most one of `target` / `target_grade` (caller overrides may supply it);
//! - scores must lie in [0, 100]; binary scores are snapped to 0 or 100;
//! - unknown keys are rejected.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use gp_core::entities::snap_binary_score;
use gp_core::numeric::is_percentage;
use gp_core::weights::{build_weights, CategorySpec};
use gp_core::{CompletedScores, ItemId, LetterGrade, Params, Policy, WeightMap};
use serde::Deserialize;
use tracing::debug;

use crate::{IoError, IoResult};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioDoc {
    #[serde(default)]
    policy: Option<Policy>,
    #[serde(default)]
    target: Option<f64>,
    #[serde(default)]
    target_grade: Option<LetterGrade>,
    #[serde(default)]
    binary_prefixes: Option<Vec<String>>,
    #[serde(default)]
    weights: Option<BTreeMap<ItemId, f64>>,
    #[serde(default)]
    categories: Option<Vec<CategorySpec>>,
    #[serde(default)]
    completed: BTreeMap<ItemId, f64>,
}

/// A loaded scenario; target and policy may still come from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub weights: WeightMap,
    pub completed: CompletedScores,
    pub target: Option<f64>,
    pub policy: Option<Policy>,
    pub params: Params,
}

/// Caller-side values that win over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub policy: Option<Policy>,
    pub target: Option<f64>,
    pub grade: Option<LetterGrade>,
    /// Used when neither the caller nor the file names a policy.
    pub default_policy: Policy,
}

/// Fully resolved run inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub weights: WeightMap,
    pub completed: CompletedScores,
    pub target: f64,
    pub params: Params,
}

pub fn load_scenario(path: &Path) -> IoResult<Scenario> {
    let text = fs::read_to_string(path)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let s = parse_scenario(&text)?;
    debug!(
        path = %path.display(),
        items = s.weights.len(),
        completed = s.completed.len(),
        "loaded scenario"
    );
    Ok(s)
}

pub fn parse_scenario(text: &str) -> IoResult<Scenario> {
    let doc: ScenarioDoc = serde_json::from_str(text)?;

    let weights = match (doc.weights, doc.categories) {
        (Some(w), None) => w,
        (None, Some(cats)) => build_weights(&cats).map_err(|e| IoError::Json {
            pointer: "/categories".into(),
            msg: e.to_string(),
        })?,
        (Some(_), Some(_)) => {
            return Err(IoError::Invalid("`weights` and `categories` are mutually exclusive".into()))
        }
        (None, None) => return Err(IoError::Invalid("one of `weights` or `categories` is required".into())),
    };

    let target = match (doc.target, doc.target_grade) {
        (Some(_), Some(_)) => {
            return Err(IoError::Invalid("`target` and `target_grade` are mutually exclusive".into()))
        }
        (Some(t), None) => Some(t),
        (None, Some(g)) => Some(g.threshold()),
        (None, None) => None,
    };

    let mut params = Params::default();
    if let Some(prefixes) = doc.binary_prefixes {
        params.binary_prefixes = prefixes;
    }
    params.validate_domains().map_err(|e| IoError::Json {
        pointer: "/binary_prefixes".into(),
        msg: e.to_string(),
    })?;

    let classifier = params.classifier();
    let mut completed = CompletedScores::new();
    for (id, score) in doc.completed {
        if !is_percentage(score) {
            return Err(IoError::Json {
                pointer: format!("/completed/{id}"),
                msg: format!("score {score} outside [0, 100]"),
            });
        }
        let score = if classifier.is_binary(&id) { snap_binary_score(score) } else { score };
        completed.insert(id, score);
    }

    Ok(Scenario { weights, completed, target, policy: doc.policy, params })
}

impl Scenario {
    /// Apply caller overrides; a target must be known afterwards.
    pub fn resolve(self, ov: &Overrides) -> IoResult<Resolved> {
        let target = ov
            .target
            .or_else(|| ov.grade.map(LetterGrade::threshold))
            .or(self.target)
            .ok_or_else(|| IoError::Invalid("no target: set `target`, `target_grade`, --target or --grade".into()))?;

        let mut params = self.params;
        params.policy = ov.policy.or(self.policy).unwrap_or(ov.default_policy);

        Ok(Resolved { weights: self.weights, completed: self.completed, target, params })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId { s.parse().unwrap() }

    #[test]
    fn weights_form() {
        let s = parse_scenario(
            r#"{"policy":"proportional","target":90,"weights":{"a":60,"attendance1":40},"completed":{"attendance1":55}}"#,
        )
        .unwrap();
        assert_eq!(s.policy, Some(Policy::Proportional));
        assert_eq!(s.target, Some(90.0));
        assert_eq!(s.weights[&id("a")], 60.0);
        assert_eq!(s.completed[&id("attendance1")], 100.0);
    }

    #[test]
    fn categories_form_with_grade() {
        let s = parse_scenario(
            r#"{"target_grade":"B+","categories":[{"name":"exam","total":70,"count":2},{"name":"quiz","total":30,"count":3}]}"#,
        )
        .unwrap();
        assert_eq!(s.target, Some(87.0));
        assert_eq!(s.weights.len(), 5);
        assert_eq!(s.weights[&id("quiz3")], 10.0);
        assert!(s.completed.is_empty());
    }

    #[test]
    fn custom_prefixes_drive_snapping() {
        let s = parse_scenario(r#"{"target":50,"binary_prefixes":["lab"],"weights":{"lab1":100},"completed":{"lab1":20}}"#)
            .unwrap();
        assert_eq!(s.completed[&id("lab1")], 0.0);
        assert_eq!(s.params.binary_prefixes, vec!["lab".to_string()]);
    }

    #[test]
    fn shape_errors() {
        let both = parse_scenario(r#"{"target":1,"weights":{"a":100},"categories":[]}"#).unwrap_err();
        assert!(matches!(both, IoError::Invalid(_)));

        let neither = parse_scenario(r#"{"target":1}"#).unwrap_err();
        assert!(matches!(neither, IoError::Invalid(_)));

        let two_targets = parse_scenario(r#"{"target":1,"target_grade":"A","weights":{"a":100}}"#).unwrap_err();
        assert!(matches!(two_targets, IoError::Invalid(_)));

        let unknown = parse_scenario(r#"{"target":1,"weights":{"a":100},"extra":true}"#).unwrap_err();
        assert!(matches!(unknown, IoError::Json { .. }));

        let bad_grade = parse_scenario(r#"{"target_grade":"E","weights":{"a":100}}"#).unwrap_err();
        assert!(matches!(bad_grade, IoError::Json { .. }));
    }

    #[test]
    fn out_of_range_score_names_the_item() {
        match parse_scenario(r#"{"target":1,"weights":{"a":100},"completed":{"a":120}}"#) {
            Err(IoError::Json { pointer, .. }) => assert_eq!(pointer, "/completed/a"),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn overrides_win() {
        let s = parse_scenario(r#"{"policy":"equal","target":80,"weights":{"a":100}}"#).unwrap();
        let r = s
            .clone()
            .resolve(&Overrides { policy: Some(Policy::Proportional), grade: Some(LetterGrade::A), ..Overrides::default() })
            .unwrap();
        assert_eq!(r.target, 93.0);
        assert_eq!(r.params.policy, Policy::Proportional);

        let r = s.resolve(&Overrides { target: Some(70.0), grade: Some(LetterGrade::A), ..Overrides::default() }).unwrap();
        assert_eq!(r.target, 70.0);
        assert_eq!(r.params.policy, Policy::EqualSacrifice);
    }

    #[test]
    fn missing_target_is_invalid() {
        let s = parse_scenario(r#"{"weights":{"a":100}}"#).unwrap();
        let err = s.resolve(&Overrides { default_policy: Policy::Proportional, ..Overrides::default() }).unwrap_err();
        assert!(matches!(err, IoError::Invalid(_)));
    }
}
