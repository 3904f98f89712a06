//! Family → Subfamily reverse index

use super::grouping::TaxonomyGrouping;
use crate::lookup::{Reassignment, ReverseIndex};
use crate::Result;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Read-only lookup tables derived from a validated [`TaxonomyGrouping`]
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    family_to_subfamily: ReverseIndex<String>,
    subfamily_to_dimension: HashMap<String, String>,
    subfamily_ids: Vec<String>,
    dimension_ids: Vec<String>,
}

impl TaxonomyIndex {
    /// Validate the grouping and build the lookup tables
    ///
    /// Subfamilies are walked in declaration order. A family declared under
    /// several subfamilies belongs to the last one; every such overwrite is
    /// logged and kept in [`TaxonomyIndex::reassignments`].
    pub fn build(grouping: &TaxonomyGrouping) -> Result<Self> {
        grouping.validate()?;

        let mut family_to_subfamily = ReverseIndex::new();
        let mut subfamily_to_dimension = HashMap::with_capacity(grouping.subfamilies.len());

        for subfamily in &grouping.subfamilies {
            subfamily_to_dimension.insert(subfamily.id.clone(), subfamily.dimension_id.clone());
            for family in &subfamily.families {
                family_to_subfamily.insert(family, &subfamily.id);
            }
        }

        for moved in family_to_subfamily.reassignments() {
            warn!(
                "[taxonomy] Family '{}' declared under '{}' and '{}'; '{}' wins",
                moved.member, moved.previous, moved.winner, moved.winner
            );
        }
        debug!(
            "[taxonomy] Indexed {} families into {} subfamilies across {} dimensions",
            family_to_subfamily.len(),
            grouping.subfamilies.len(),
            grouping.dimensions.len()
        );

        Ok(Self {
            family_to_subfamily,
            subfamily_to_dimension,
            subfamily_ids: grouping.subfamilies.iter().map(|s| s.id.clone()).collect(),
            dimension_ids: grouping.dimensions.iter().map(|d| d.id.clone()).collect(),
        })
    }

    /// Subfamily owning `family` (exact match)
    pub fn subfamily_of(&self, family: &str) -> Option<&str> {
        self.family_to_subfamily.get(family).map(String::as_str)
    }

    /// Parent dimension of a subfamily
    pub fn dimension_of(&self, subfamily_id: &str) -> Option<&str> {
        self.subfamily_to_dimension
            .get(subfamily_id)
            .map(String::as_str)
    }

    pub fn subfamily_ids(&self) -> &[String] {
        &self.subfamily_ids
    }

    pub fn dimension_ids(&self) -> &[String] {
        &self.dimension_ids
    }

    /// Number of distinct family strings
    pub fn family_count(&self) -> usize {
        self.family_to_subfamily.len()
    }

    /// Families that moved to a later-declared subfamily during build
    pub fn reassignments(&self) -> &[Reassignment<String>] {
        self.family_to_subfamily.reassignments()
    }
}
