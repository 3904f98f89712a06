//! Rev (content item) model
//!
//! Mirrors the stored document shape: camelCase JSON, a typed set of known
//! metadata fields, and an open `extra` map that carries any other metadata
//! keys through unchanged. Known fields are type-checked when a document is
//! decoded, so downstream code never sees a malformed taxonomy or lemma block.

use crate::relation::RelationType;
use crate::taxonomy::TaxonomyView;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state of a rev
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevStatus {
    Draft,
    Active,
    Integrated,
    Archived,
    Emerging,
    Complete,
}

/// Typed edge from one rev to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevLink {
    pub target_id: String,
    #[serde(rename = "type")]
    pub kind: RelationType,
    /// Raw descriptor the canonical kind was derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Link as authored, before canonicalization
///
/// `type` holds the raw flavor and may be any JSON value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRevLink {
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(rename = "type", default)]
    pub raw_type: Value,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub current: f64,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_rate: Option<f64>,
}

/// Lemma role metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LemmaMetadata {
    pub is_lemma: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub lemma_for: Vec<String>,
    #[serde(default)]
    pub dependent_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Rev metadata: known fields plus an open extension map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<Activation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperedges: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage_rank: Option<f64>,
    /// Raw family tags awaiting classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub families: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<TaxonomyView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<LemmaMetadata>,
    /// Metadata keys without a typed field
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RevMetadata {
    /// Family tags ready for classification: trimmed, blanks dropped
    pub fn clean_families(&self) -> Vec<String> {
        self.families
            .iter()
            .flatten()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevHistoryEntry {
    pub version: String,
    pub timestamp: String,
    pub summary: String,
    pub snapshot: Value,
}

/// Stored rev with canonical links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rev {
    pub id: String,
    pub title: String,
    pub user_id: String,
    pub status: RevStatus,
    pub version: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axiom: Option<String>,
    #[serde(default)]
    pub archetypes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<RevLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graph_embedding: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fused_embedding: Vec<f64>,
    #[serde(default)]
    pub history: Vec<RevHistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RevMetadata>,
}

/// Rev as found in a seed file, links not yet canonicalized
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRev {
    pub id: String,
    pub title: String,
    pub user_id: String,
    pub status: RevStatus,
    pub version: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub seed_event: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    pub body: String,
    #[serde(default)]
    pub axiom: Option<String>,
    #[serde(default)]
    pub archetypes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<RawRevLink>,
    #[serde(default)]
    pub embedding: Vec<f64>,
    #[serde(default)]
    pub graph_embedding: Vec<f64>,
    #[serde(default)]
    pub fused_embedding: Vec<f64>,
    #[serde(default)]
    pub history: Vec<RevHistoryEntry>,
    #[serde(default)]
    pub metadata: Option<RevMetadata>,
}

/// One entry of a lemma metadata file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LemmaEntry {
    pub rev_id: String,
    #[serde(default)]
    pub families: Option<Vec<String>>,
    #[serde(default)]
    pub lineage_rank: Option<f64>,
    #[serde(default)]
    pub lemma: Option<LemmaMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_rev() -> Value {
        json!({
            "id": "rev-1",
            "title": "First",
            "userId": "u1",
            "status": "active",
            "version": "1.0",
            "createdAt": "2025-01-01T00:00:00Z",
            "body": "text",
        })
    }

    #[test]
    fn test_minimal_rev_decodes_with_defaults() {
        let rev: Rev = serde_json::from_value(minimal_rev()).unwrap();
        assert_eq!(rev.status, RevStatus::Active);
        assert!(rev.links.is_empty());
        assert!(rev.metadata.is_none());
        assert!(rev.updated_at.is_none());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut value = minimal_rev();
        value["status"] = json!("deleted");
        assert!(serde_json::from_value::<Rev>(value).is_err());
    }

    #[test]
    fn test_metadata_extra_keys_survive_round_trip() {
        let metadata: RevMetadata = serde_json::from_value(json!({
            "lineageRank": 3,
            "customScore": 0.9,
            "notes": {"a": 1},
        }))
        .unwrap();

        assert_eq!(metadata.lineage_rank, Some(3.0));
        assert_eq!(metadata.extra["customScore"], json!(0.9));
        assert_eq!(metadata.extra["notes"], json!({"a": 1}));

        let back = serde_json::to_value(&metadata).unwrap();
        assert_eq!(back["customScore"], json!(0.9));
        assert_eq!(back["lineageRank"], json!(3.0));
        assert!(back.get("taxonomy").is_none());
    }

    #[test]
    fn test_malformed_known_metadata_field_rejected() {
        let result = serde_json::from_value::<RevMetadata>(json!({
            "taxonomy": {"subfamilyWeights": {"x": "heavy"}},
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<RevMetadata>(json!({"families": "one-string"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_clean_families() {
        let metadata = RevMetadata {
            families: Some(vec![
                " liberation ".to_string(),
                "".to_string(),
                "   ".to_string(),
                "regulation".to_string(),
            ]),
            ..RevMetadata::default()
        };
        assert_eq!(metadata.clean_families(), vec!["liberation", "regulation"]);
        assert!(RevMetadata::default().clean_families().is_empty());
    }

    #[test]
    fn test_raw_link_accepts_any_type_value() {
        let link: RawRevLink =
            serde_json::from_value(json!({"targetId": "rev-2", "type": 12})).unwrap();
        assert_eq!(link.raw_type, json!(12));

        let link: RawRevLink = serde_json::from_value(json!({"targetId": "rev-2"})).unwrap();
        assert_eq!(link.raw_type, Value::Null);
    }

    #[test]
    fn test_link_serializes_type_field() {
        let link = RevLink {
            target_id: "rev-2".to_string(),
            kind: RelationType::Parallel,
            flavor: Some("mirrors".to_string()),
            note: None,
            confidence: None,
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value, json!({"targetId": "rev-2", "type": "parallel", "flavor": "mirrors"}));
    }
}
