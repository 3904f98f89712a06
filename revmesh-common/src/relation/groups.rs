//! Relation grouping table: RelationType → flavors
//!
//! Declaration order matters. When a flavor is listed under more than one
//! kind, the kind declared later wins (see [`super::RelationIndex`]).

use super::RelationType;
use serde::{Deserialize, Serialize};

/// One kind and the raw flavors that resolve to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationGroup {
    pub kind: RelationType,
    #[serde(default)]
    pub flavors: Vec<String>,
}

/// Ordered relation grouping table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelationGroups {
    #[serde(default, rename = "relations")]
    pub groups: Vec<RelationGroup>,
}

/// Authored flavor groups, in declaration order
///
/// "echoed_in" is listed under both `parallel` and `related`; it resolves to
/// `related`. Pending confirmation from the configuration owner whether the
/// second entry is an intentional override.
const BUILTIN_GROUPS: &[(RelationType, &[&str])] = &[
    // Proof / logic
    (RelationType::Axiom, &["axiom"]),
    (RelationType::Lemma, &["lemma"]),
    (RelationType::Corollary, &["corollary"]),
    // Dependencies / lineage
    (
        RelationType::Prerequisite,
        &[
            "prerequisite",
            "prerequisite_for",
            "requires",
            "foundation",
            "foundational_precondition",
            "rooted_in",
            "origin",
            "ancestral_root",
            "lineage_root",
            "ancestral_precedent",
            "existential_lineage",
        ],
    ),
    // Support / construction
    (
        RelationType::Supports,
        &[
            "supports",
            "supported_by",
            "builds_on",
            "extends",
            "generalizes",
            "feeds",
            "contributes_to",
            "utilizes",
            "uses",
            "enabled_by",
            "enables",
            "tightens",
            "integrates",
            "applies_to",
        ],
    ),
    // Validation / evidence
    (
        RelationType::Validates,
        &["validates", "validation_of", "evidence", "evaluates_against"],
    ),
    // Governance / constraint
    (
        RelationType::Governs,
        &[
            "governs",
            "governed_by",
            "constrains",
            "guarded_by",
            "approved_by",
        ],
    ),
    // Similarity / affinity
    (
        RelationType::Parallel,
        &[
            "parallel",
            "resonates_with",
            "aligned_with",
            "aligns_with",
            "mirrors",
            "echoed_in",
            "shares_foundation_with",
            "structural_affinity",
            "conceptual_affinity",
            "civilizational_parallel",
            "co_emergent_with",
            "sibling",
            "civilizational_parallel",
        ],
    ),
    // Tension
    (RelationType::Contradicts, &["contradicts"]),
    // Soft directional influence
    (
        RelationType::Informs,
        &["informs", "informed_by", "influences"],
    ),
    // Everything else soft / broad
    (
        RelationType::Related,
        &[
            "related_to",
            "participates_in",
            "insight_birth",
            "implicit",
            "influenced_by",
            "echoed_in",
            "aims_at",
            "lines_up_with",
        ],
    ),
];

impl RelationGroups {
    /// Compiled-in relation grouping
    pub fn builtin() -> Self {
        Self {
            groups: BUILTIN_GROUPS
                .iter()
                .map(|(kind, flavors)| RelationGroup {
                    kind: *kind,
                    flavors: flavors.iter().map(|f| f.to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Build from `(kind, flavors)` pairs, keeping their order
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (RelationType, &'a [&'a str])>,
    {
        Self {
            groups: pairs
                .into_iter()
                .map(|(kind, flavors)| RelationGroup {
                    kind,
                    flavors: flavors.iter().map(|f| f.to_string()).collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_declares_every_kind_once_in_order() {
        let groups = RelationGroups::builtin();
        let kinds: Vec<RelationType> = groups.groups.iter().map(|g| g.kind).collect();
        assert_eq!(kinds, RelationType::ALL.to_vec());
    }

    #[test]
    fn test_builtin_keeps_authored_duplicates() {
        let groups = RelationGroups::builtin();
        let echoed: Vec<RelationType> = groups
            .groups
            .iter()
            .filter(|g| g.flavors.iter().any(|f| f == "echoed_in"))
            .map(|g| g.kind)
            .collect();
        assert_eq!(echoed, vec![RelationType::Parallel, RelationType::Related]);

        let parallel = &groups.groups[7];
        let count = parallel
            .flavors
            .iter()
            .filter(|f| f.as_str() == "civilizational_parallel")
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_related_group_has_no_bare_related_flavor() {
        let groups = RelationGroups::builtin();
        let related = groups.groups.last().unwrap();
        assert_eq!(related.kind, RelationType::Related);
        assert!(!related.flavors.iter().any(|f| f == "related"));
    }
}
