//! Relation classification
//!
//! Raw relationship descriptors ("flavors") on rev links are free-form
//! strings. They resolve many-to-one into a closed set of eleven canonical
//! [`RelationType`] values through the relation grouping table.

pub mod classify;
pub mod groups;

pub use classify::{canonicalize_flavor, canonicalize_flavor_value, RelationIndex};
pub use groups::{RelationGroup, RelationGroups};

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical relationship kind between two revs
///
/// Closed set. Adding a kind is a code change, not a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    /// Foundational truth the source depends on
    Axiom,
    /// Supporting prerequisite insight
    Lemma,
    /// Consequence or follow-through
    Corollary,
    /// Structural dependency, not strictly a lemma
    Prerequisite,
    /// Strengthens, extends, contributes to
    Supports,
    /// Evidence, evaluation, justification
    Validates,
    /// Constrains, sets rules for, shapes behavior
    Governs,
    /// Conceptual or structural similarity
    Parallel,
    /// Challenges or opposes
    Contradicts,
    /// Soft influence, directional but weak
    Informs,
    /// Fallback bucket for anything broad or soft
    Related,
}

impl RelationType {
    /// All kinds in declaration order
    pub const ALL: [RelationType; 11] = [
        RelationType::Axiom,
        RelationType::Lemma,
        RelationType::Corollary,
        RelationType::Prerequisite,
        RelationType::Supports,
        RelationType::Validates,
        RelationType::Governs,
        RelationType::Parallel,
        RelationType::Contradicts,
        RelationType::Informs,
        RelationType::Related,
    ];

    /// Kind returned for anything the grouping table does not recognize
    pub const FALLBACK: RelationType = RelationType::Related;

    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::Axiom => "axiom",
            RelationType::Lemma => "lemma",
            RelationType::Corollary => "corollary",
            RelationType::Prerequisite => "prerequisite",
            RelationType::Supports => "supports",
            RelationType::Validates => "validates",
            RelationType::Governs => "governs",
            RelationType::Parallel => "parallel",
            RelationType::Contradicts => "contradicts",
            RelationType::Informs => "informs",
            RelationType::Related => "related",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown relation type: {}", s)))
    }
}
