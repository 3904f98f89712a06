//! Classifier: both indices built together from one configuration
//!
//! Construction is the only step that can fail. Once built, a `Classifier`
//! is immutable and can be shared by reference across any number of threads.

use crate::relation::{self, RelationGroups, RelationIndex, RelationType};
use crate::taxonomy::{self, RollupOutcome, TaxonomyGrouping, TaxonomyIndex, TaxonomyView};
use crate::Result;
use serde_json::Value;
use tracing::info;

/// Configuration model: taxonomy tables plus relation groups
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifierConfig {
    pub grouping: TaxonomyGrouping,
    pub relations: RelationGroups,
}

impl ClassifierConfig {
    /// Compiled-in tables
    pub fn builtin() -> Self {
        Self {
            grouping: TaxonomyGrouping::builtin(),
            relations: RelationGroups::builtin(),
        }
    }
}

/// Built taxonomy and relation indices
#[derive(Debug, Clone)]
pub struct Classifier {
    taxonomy: TaxonomyIndex,
    relations: RelationIndex,
}

impl Classifier {
    /// Validate `config` and build both indices
    pub fn build(config: &ClassifierConfig) -> Result<Self> {
        let taxonomy = TaxonomyIndex::build(&config.grouping)?;
        let relations = RelationIndex::build(&config.relations)?;

        info!(
            "[classifier] Ready: {} families, {} flavors ({} family and {} flavor reassignments)",
            taxonomy.family_count(),
            relations.len(),
            taxonomy.reassignments().len(),
            relations.reassignments().len()
        );

        Ok(Self {
            taxonomy,
            relations,
        })
    }

    /// Classifier over the compiled-in tables
    pub fn builtin() -> Result<Self> {
        Self::build(&ClassifierConfig::builtin())
    }

    pub fn taxonomy(&self) -> &TaxonomyIndex {
        &self.taxonomy
    }

    pub fn relations(&self) -> &RelationIndex {
        &self.relations
    }

    pub fn compute_taxonomy<S: AsRef<str>>(&self, raw_families: &[S]) -> TaxonomyView {
        taxonomy::compute_taxonomy(&self.taxonomy, raw_families)
    }

    pub fn compute_taxonomy_detailed<S: AsRef<str>>(&self, raw_families: &[S]) -> RollupOutcome {
        taxonomy::compute_taxonomy_detailed(&self.taxonomy, raw_families)
    }

    pub fn canonicalize_flavor(&self, raw: Option<&str>) -> RelationType {
        relation::canonicalize_flavor(&self.relations, raw)
    }

    pub fn canonicalize_flavor_value(&self, raw: &Value) -> RelationType {
        relation::canonicalize_flavor_value(&self.relations, raw)
    }
}
