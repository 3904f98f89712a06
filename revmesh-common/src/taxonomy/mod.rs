//! Taxonomic classification of revs
//!
//! Free-form family tags resolve through a static two-level hierarchy
//! (Dimension → Subfamily → Family) into weighted memberships.
//!
//! The grouping is plain data ([`TaxonomyGrouping`]); [`TaxonomyIndex`] is
//! built from it once and then passed explicitly to [`compute_taxonomy`].

pub mod builtin;
pub mod grouping;
pub mod index;
pub mod rollup;

pub use grouping::{DimensionDef, SubfamilyDef, TaxonomyGrouping};
pub use index::TaxonomyIndex;
pub use rollup::{compute_taxonomy, compute_taxonomy_detailed, normalize_weights, RollupOutcome};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weighted subfamily and dimension memberships for one rev
///
/// Derived data: recomputed from the rev's families on every call and
/// stored alongside the rev for presentation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyView {
    #[serde(default)]
    pub families: Vec<String>,
    #[serde(default)]
    pub subfamilies: Vec<String>,
    /// Sums to 1.0, or empty
    #[serde(default)]
    pub subfamily_weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub dimensions: Vec<String>,
    /// Sums to 1.0, or empty
    #[serde(default)]
    pub dimension_weights: BTreeMap<String, f64>,
}

impl TaxonomyView {
    /// View for a family list that mapped to nothing
    pub fn unclassified(families: Vec<String>) -> Self {
        Self {
            families,
            ..Self::default()
        }
    }

    pub fn is_classified(&self) -> bool {
        !self.dimension_weights.is_empty()
    }

    /// Dimension with the largest weight; ties go to the smallest id
    pub fn primary_dimension(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (id, weight) in &self.dimension_weights {
            match best {
                Some((_, best_weight)) if *weight <= best_weight => {}
                _ => best = Some((id.as_str(), *weight)),
            }
        }
        best.map(|(id, _)| id)
    }
}
