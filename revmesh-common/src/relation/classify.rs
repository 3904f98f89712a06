//! Flavor → RelationType index and canonicalization

use super::{RelationGroups, RelationType};
use crate::lookup::{validate_member, Reassignment, ReverseIndex};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Reverse lookup from raw flavor to canonical kind
///
/// Built once from a [`RelationGroups`] table and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RelationIndex {
    flavor_to_type: ReverseIndex<RelationType>,
}

impl RelationIndex {
    /// Validate the grouping table and build the reverse lookup
    ///
    /// Groups are walked in declaration order; a flavor listed under several
    /// kinds ends up with the one declared last. Such overwrites are kept in
    /// [`RelationIndex::reassignments`] and logged.
    pub fn build(groups: &RelationGroups) -> Result<Self> {
        let mut seen = HashSet::new();
        for group in &groups.groups {
            if !seen.insert(group.kind) {
                return Err(Error::DuplicateGroup {
                    kind: "relation type",
                    id: group.kind.to_string(),
                });
            }
            for flavor in &group.flavors {
                validate_member(group.kind.as_str(), flavor)?;
            }
        }

        let mut flavor_to_type = ReverseIndex::new();
        for group in &groups.groups {
            for flavor in &group.flavors {
                flavor_to_type.insert(flavor, &group.kind);
            }
        }

        for moved in flavor_to_type.reassignments() {
            warn!(
                "[relation] Flavor '{}' declared under '{}' and '{}'; '{}' wins",
                moved.member, moved.previous, moved.winner, moved.winner
            );
        }
        debug!(
            "[relation] Indexed {} flavors across {} kinds",
            flavor_to_type.len(),
            groups.groups.len()
        );

        Ok(Self { flavor_to_type })
    }

    /// Exact lookup, no trimming
    pub fn get(&self, flavor: &str) -> Option<RelationType> {
        self.flavor_to_type.get(flavor).copied()
    }

    pub fn len(&self) -> usize {
        self.flavor_to_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flavor_to_type.is_empty()
    }

    /// Flavors that moved to a later-declared kind during build
    pub fn reassignments(&self) -> &[Reassignment<RelationType>] {
        self.flavor_to_type.reassignments()
    }
}

/// Resolve a raw flavor to its canonical kind
///
/// Matching is exact after trimming surrounding whitespace; case is
/// significant. Missing, empty and unknown flavors resolve to
/// [`RelationType::Related`].
pub fn canonicalize_flavor(index: &RelationIndex, raw: Option<&str>) -> RelationType {
    let Some(raw) = raw else {
        return RelationType::FALLBACK;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return RelationType::FALLBACK;
    }
    index.get(trimmed).unwrap_or(RelationType::FALLBACK)
}

/// Same as [`canonicalize_flavor`] for an undecoded JSON value
///
/// Anything that is not a JSON string resolves to the fallback.
pub fn canonicalize_flavor_value(index: &RelationIndex, raw: &Value) -> RelationType {
    canonicalize_flavor(index, raw.as_str())
}
