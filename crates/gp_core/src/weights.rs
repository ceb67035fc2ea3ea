//! Weight-table builder: expands category totals into per-item weights.
//!
//! Contract:
//! - `CategorySpec { name: "quiz", total: 10, count: 10 }` yields
//!   `quiz1..quiz10`, each weighted `round(total / count, 6)`.
//! - Categories with a zero total or zero count contribute nothing.
//! - Totals must be finite and non-negative; generated ids must be valid tokens.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::WeightMap;
use crate::errors::CoreError;
use crate::ids::{CategoryId, ItemId};
use crate::numeric::{round_to, WEIGHT_DECIMALS};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategorySpec {
    pub name: CategoryId,
    /// Percentage of the final grade carried by the whole category.
    pub total: f64,
    pub count: u32,
}

pub fn build_weights(categories: &[CategorySpec]) -> Result<WeightMap, CoreError> {
    let mut out = WeightMap::new();
    for cat in categories {
        if !cat.total.is_finite() {
            return Err(CoreError::NonFinite("category.total"));
        }
        if cat.total < 0.0 {
            return Err(CoreError::DomainOutOfRange("category.total"));
        }
        if cat.total == 0.0 || cat.count == 0 {
            continue;
        }
        let each = round_to(cat.total / f64::from(cat.count), WEIGHT_DECIMALS);
        for i in 1..=cat.count {
            let id: ItemId = format!("{}{}", cat.name, i).parse()?;
            // Later categories overwrite colliding ids, matching map insertion.
            out.insert(id, each);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::weight_total;

    fn cat(name: &str, total: f64, count: u32) -> CategorySpec {
        CategorySpec { name: name.parse().unwrap(), total, count }
    }

    #[test]
    fn expands_categories() {
        let w = build_weights(&[
            cat("exam", 50.0, 2),
            cat("homework", 30.0, 1),
            cat("quiz", 10.0, 10),
            cat("attendance", 10.0, 10),
        ])
        .unwrap();
        assert_eq!(w.len(), 23);
        assert_eq!(w[&"exam1".parse::<ItemId>().unwrap()], 25.0);
        assert_eq!(w[&"homework1".parse::<ItemId>().unwrap()], 30.0);
        assert_eq!(w[&"attendance10".parse::<ItemId>().unwrap()], 1.0);
        assert!((weight_total(&w) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rounds_to_six_places() {
        let w = build_weights(&[cat("lab", 100.0, 3)]).unwrap();
        assert_eq!(w[&"lab2".parse::<ItemId>().unwrap()], 33.333333);
    }

    #[test]
    fn skips_empty_categories() {
        let w = build_weights(&[cat("bonus", 0.0, 4), cat("quiz", 10.0, 0), cat("exam", 100.0, 1)])
            .unwrap();
        let keys: Vec<&str> = w.keys().map(ItemId::as_str).collect();
        assert_eq!(keys, vec!["exam1"]);
    }

    #[test]
    fn rejects_bad_totals() {
        assert_eq!(
            build_weights(&[cat("exam", -1.0, 1)]),
            Err(CoreError::DomainOutOfRange("category.total"))
        );
        assert_eq!(
            build_weights(&[cat("exam", f64::NAN, 1)]),
            Err(CoreError::NonFinite("category.total"))
        );
    }
}
