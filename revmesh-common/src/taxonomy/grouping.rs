//! Taxonomy configuration model: Dimension → Subfamily → Family
//!
//! Two tables describe the same hierarchy from opposite ends. Subfamilies
//! claim a parent dimension; dimensions list their subfamilies. Both views
//! must agree, which [`TaxonomyGrouping::validate`] enforces before any index
//! is built.

use crate::lookup::validate_member;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Mid-level grouping of free-form family tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubfamilyDef {
    pub id: String,
    #[serde(rename = "dimension")]
    pub dimension_id: String,
    #[serde(default)]
    pub families: Vec<String>,
}

impl SubfamilyDef {
    pub fn new(id: &str, dimension_id: &str, families: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            dimension_id: dimension_id.to_string(),
            families: families.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Top-level semantic axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionDef {
    pub id: String,
    #[serde(rename = "subfamilies", default)]
    pub subfamily_ids: Vec<String>,
}

impl DimensionDef {
    pub fn new(id: &str, subfamily_ids: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            subfamily_ids: subfamily_ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered taxonomy tables
///
/// Subfamily order is the tie-break order for families declared more than
/// once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxonomyGrouping {
    #[serde(default)]
    pub subfamilies: Vec<SubfamilyDef>,
    #[serde(default)]
    pub dimensions: Vec<DimensionDef>,
}

impl TaxonomyGrouping {
    /// Build a grouping whose dimension table is derived from subfamily claims
    pub fn from_subfamilies(subfamilies: Vec<SubfamilyDef>) -> Self {
        let dimensions = Self::derive_dimensions(&subfamilies);
        Self {
            subfamilies,
            dimensions,
        }
    }

    /// Rebuild the dimension table from subfamily parent claims
    ///
    /// Dimensions appear in the order their first subfamily is declared.
    pub fn derive_dimensions(subfamilies: &[SubfamilyDef]) -> Vec<DimensionDef> {
        let mut dimensions: Vec<DimensionDef> = Vec::new();
        let mut position: HashMap<&str, usize> = HashMap::new();

        for subfamily in subfamilies {
            let slot = *position
                .entry(subfamily.dimension_id.as_str())
                .or_insert_with(|| {
                    dimensions.push(DimensionDef {
                        id: subfamily.dimension_id.clone(),
                        subfamily_ids: Vec::new(),
                    });
                    dimensions.len() - 1
                });
            dimensions[slot].subfamily_ids.push(subfamily.id.clone());
        }

        dimensions
    }

    /// Check the tables for defects that would leave dangling references
    ///
    /// Fails on duplicate ids, unusable member strings, subfamilies pointing
    /// at undeclared dimensions, and any disagreement between a dimension's
    /// subfamily list and the subfamilies' own parent claims.
    pub fn validate(&self) -> Result<()> {
        let mut subfamily_parent: HashMap<&str, &str> = HashMap::new();
        for subfamily in &self.subfamilies {
            validate_member("subfamily table", &subfamily.id)?;
            if subfamily_parent
                .insert(subfamily.id.as_str(), subfamily.dimension_id.as_str())
                .is_some()
            {
                return Err(Error::DuplicateGroup {
                    kind: "subfamily",
                    id: subfamily.id.clone(),
                });
            }
            for family in &subfamily.families {
                validate_member(&subfamily.id, family)?;
            }
        }

        let mut dimension_ids: HashSet<&str> = HashSet::new();
        for dimension in &self.dimensions {
            validate_member("dimension table", &dimension.id)?;
            if !dimension_ids.insert(dimension.id.as_str()) {
                return Err(Error::DuplicateGroup {
                    kind: "dimension",
                    id: dimension.id.clone(),
                });
            }
        }

        for subfamily in &self.subfamilies {
            if !dimension_ids.contains(subfamily.dimension_id.as_str()) {
                return Err(Error::DanglingDimension {
                    subfamily: subfamily.id.clone(),
                    dimension: subfamily.dimension_id.clone(),
                });
            }
        }

        let mut listed: HashSet<&str> = HashSet::new();
        for dimension in &self.dimensions {
            for subfamily_id in &dimension.subfamily_ids {
                match subfamily_parent.get(subfamily_id.as_str()) {
                    None => {
                        return Err(Error::HierarchyMismatch(format!(
                            "dimension '{}' lists undeclared subfamily '{}'",
                            dimension.id, subfamily_id
                        )));
                    }
                    Some(parent) if *parent != dimension.id => {
                        return Err(Error::HierarchyMismatch(format!(
                            "dimension '{}' lists subfamily '{}', which belongs to '{}'",
                            dimension.id, subfamily_id, parent
                        )));
                    }
                    Some(_) => {
                        listed.insert(subfamily_id.as_str());
                    }
                }
            }
        }

        for subfamily in &self.subfamilies {
            if !listed.contains(subfamily.id.as_str()) {
                return Err(Error::HierarchyMismatch(format!(
                    "subfamily '{}' is not listed by its dimension '{}'",
                    subfamily.id, subfamily.dimension_id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> TaxonomyGrouping {
        TaxonomyGrouping {
            subfamilies: vec![
                SubfamilyDef::new("warm", "color", &["red", "orange"]),
                SubfamilyDef::new("cool", "color", &["blue"]),
                SubfamilyDef::new("loud", "sound", &["drum"]),
            ],
            dimensions: vec![
                DimensionDef::new("color", &["warm", "cool"]),
                DimensionDef::new("sound", &["loud"]),
            ],
        }
    }

    #[test]
    fn test_consistent_fixture_validates() {
        assert!(fixture().validate().is_ok());
    }

    #[test]
    fn test_dangling_dimension() {
        let mut grouping = fixture();
        grouping.subfamilies[2].dimension_id = "smell".to_string();

        match grouping.validate() {
            Err(Error::DanglingDimension {
                subfamily,
                dimension,
            }) => {
                assert_eq!(subfamily, "loud");
                assert_eq!(dimension, "smell");
            }
            other => panic!("expected DanglingDimension, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_lists_foreign_subfamily() {
        let mut grouping = fixture();
        grouping.dimensions[1].subfamily_ids.push("cool".to_string());
        assert!(matches!(
            grouping.validate(),
            Err(Error::HierarchyMismatch(_))
        ));
    }

    #[test]
    fn test_dimension_lists_undeclared_subfamily() {
        let mut grouping = fixture();
        grouping.dimensions[0].subfamily_ids.push("pastel".to_string());
        assert!(matches!(
            grouping.validate(),
            Err(Error::HierarchyMismatch(_))
        ));
    }

    #[test]
    fn test_subfamily_missing_from_its_dimension() {
        let mut grouping = fixture();
        grouping.dimensions[0].subfamily_ids.retain(|s| s != "cool");
        assert!(matches!(
            grouping.validate(),
            Err(Error::HierarchyMismatch(_))
        ));
    }

    #[test]
    fn test_duplicate_subfamily_id() {
        let mut grouping = fixture();
        grouping
            .subfamilies
            .push(SubfamilyDef::new("warm", "color", &["yellow"]));
        assert!(matches!(
            grouping.validate(),
            Err(Error::DuplicateGroup { kind: "subfamily", .. })
        ));
    }

    #[test]
    fn test_duplicate_dimension_id() {
        let mut grouping = fixture();
        grouping.dimensions.push(DimensionDef::new("sound", &[]));
        assert!(matches!(
            grouping.validate(),
            Err(Error::DuplicateGroup { kind: "dimension", .. })
        ));
    }

    #[test]
    fn test_blank_family_rejected() {
        let mut grouping = fixture();
        grouping.subfamilies[1].families.push("  ".to_string());
        assert!(matches!(
            grouping.validate(),
            Err(Error::InvalidMember { .. })
        ));
    }

    #[test]
    fn test_family_in_two_subfamilies_is_allowed() {
        let mut grouping = fixture();
        grouping.subfamilies[1].families.push("red".to_string());
        assert!(grouping.validate().is_ok());
    }

    #[test]
    fn test_derive_dimensions_matches_authored_table() {
        let grouping = fixture();
        let derived = TaxonomyGrouping::derive_dimensions(&grouping.subfamilies);
        assert_eq!(derived, grouping.dimensions);

        let rebuilt = TaxonomyGrouping::from_subfamilies(grouping.subfamilies.clone());
        assert_eq!(rebuilt, grouping);
    }
}
