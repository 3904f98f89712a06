//! Weight rollup: raw family tags → normalized subfamily and dimension weights
//!
//! Each distinct mapped family counts once toward its subfamily. Subfamily
//! counts are turned into shares of the mapped total, normalized, then summed
//! per parent dimension and normalized again.
//!
//! All maps are ordered so summation order, and therefore every floating
//! point result, depends only on the set of input families.

use super::index::TaxonomyIndex;
use super::TaxonomyView;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Result of a rollup plus the families the index could not place
#[derive(Debug, Clone, PartialEq)]
pub struct RollupOutcome {
    pub view: TaxonomyView,
    /// Input families with no subfamily, sorted
    pub unmapped: Vec<String>,
}

/// Scale positive weights so they sum to 1.0
///
/// Entries with a value ≤ 0 (or NaN) are dropped. Returns an empty map when
/// nothing positive remains.
pub fn normalize_weights(weights: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let positive: Vec<(&String, f64)> = weights
        .iter()
        .filter(|(_, v)| **v > 0.0)
        .map(|(k, v)| (k, *v))
        .collect();
    if positive.is_empty() {
        return BTreeMap::new();
    }

    let total: f64 = positive.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return BTreeMap::new();
    }

    positive
        .into_iter()
        .map(|(k, v)| (k.clone(), v / total))
        .collect()
}

/// Classify a rev's raw families, reporting unmapped ones
pub fn compute_taxonomy_detailed<S: AsRef<str>>(
    index: &TaxonomyIndex,
    raw_families: &[S],
) -> RollupOutcome {
    let unique: BTreeSet<&str> = raw_families.iter().map(|f| f.as_ref()).collect();
    let families: Vec<String> = unique.iter().map(|f| f.to_string()).collect();

    let mut subfamily_counts: BTreeMap<&str, u32> = BTreeMap::new();
    let mut unmapped = Vec::new();
    for family in &unique {
        match index.subfamily_of(family) {
            Some(subfamily_id) => *subfamily_counts.entry(subfamily_id).or_insert(0) += 1,
            None => unmapped.push(family.to_string()),
        }
    }

    let total_mapped: u32 = subfamily_counts.values().sum();
    if total_mapped == 0 {
        return RollupOutcome {
            view: TaxonomyView::unclassified(families),
            unmapped,
        };
    }

    let raw_subfamily_weights: BTreeMap<String, f64> = subfamily_counts
        .iter()
        .map(|(id, count)| (id.to_string(), f64::from(*count) / f64::from(total_mapped)))
        .collect();
    let subfamily_weights = normalize_weights(&raw_subfamily_weights);

    let mut raw_dimension_weights: BTreeMap<String, f64> = BTreeMap::new();
    for (subfamily_id, weight) in &subfamily_weights {
        // Validation guarantees every indexed subfamily has a parent
        if let Some(dimension_id) = index.dimension_of(subfamily_id) {
            *raw_dimension_weights
                .entry(dimension_id.to_string())
                .or_insert(0.0) += weight;
        }
    }
    let dimension_weights = normalize_weights(&raw_dimension_weights);

    RollupOutcome {
        view: TaxonomyView {
            families,
            subfamilies: subfamily_weights.keys().cloned().collect(),
            subfamily_weights,
            dimensions: dimension_weights.keys().cloned().collect(),
            dimension_weights,
        },
        unmapped,
    }
}

/// Classify a rev's raw families
///
/// Unmapped families are logged and otherwise ignored. A list with nothing
/// mapped yields a view with only `families` filled in.
pub fn compute_taxonomy<S: AsRef<str>>(index: &TaxonomyIndex, raw_families: &[S]) -> TaxonomyView {
    let outcome = compute_taxonomy_detailed(index, raw_families);
    if !outcome.unmapped.is_empty() {
        warn!("[taxonomy] Unmapped families encountered: {:?}", outcome.unmapped);
    }
    debug!(
        "[taxonomy] {} families → {} subfamilies, {} dimensions",
        outcome.view.families.len(),
        outcome.view.subfamilies.len(),
        outcome.view.dimensions.len()
    );
    outcome.view
}
