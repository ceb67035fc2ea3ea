//! Split the not-yet-graded items into regular and binary.

use gp_algo::RemainingItems;
use gp_core::{CompletedScores, ItemClassifier, ItemKind, WeightMap};

pub fn partition_remaining(
    weights: &WeightMap,
    completed: &CompletedScores,
    classifier: &ItemClassifier,
) -> RemainingItems {
    let mut out = RemainingItems::default();
    for (id, w) in weights.iter().filter(|(id, _)| !completed.contains_key(*id)) {
        match classifier.classify(id) {
            ItemKind::Regular => out.regular.insert(id.clone(), *w),
            ItemKind::Binary => out.binary.insert(id.clone(), *w),
        };
    }
    out
}
