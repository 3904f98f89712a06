//! Seeding: raw revs → stored revs
//!
//! For every rev, in order:
//! 1. Canonicalize links (raw `type` becomes `flavor`, canonical kind becomes `type`)
//! 2. Merge lemma metadata entries, when a lemma file is supplied
//! 3. Classify `metadata.families` into `metadata.taxonomy`
//!
//! Classification is independent per rev, so step 3 runs on a rayon pool
//! whose workers share one [`Classifier`].

use rayon::prelude::*;
use revmesh_common::rev::{LemmaEntry, RawRev, RawRevLink, Rev, RevLink, RevMetadata};
use revmesh_common::Classifier;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Progress is logged every this many classified revs
const PROGRESS_INTERVAL: usize = 25;

/// Counters gathered during a seed run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub total_revs: usize,
    pub links: usize,
    /// Links whose flavor was not in the relation grouping
    pub unrecognized_flavors: BTreeMap<String, usize>,
    /// Links dropped for lacking a target id
    pub dropped_links: usize,
    pub lemma_entries_applied: usize,
    /// Lemma entries whose revId matched no rev
    pub lemma_entries_unknown: Vec<String>,
    pub taxonomy_updated: usize,
    pub skipped_no_families: usize,
    /// Unmapped family → number of revs carrying it
    pub unmapped_families: BTreeMap<String, usize>,
}

/// Seeded revs plus run summary
#[derive(Debug, Clone)]
pub struct SeedOutcome {
    pub revs: Vec<Rev>,
    pub summary: SeedSummary,
}

/// Per-rev classification result merged into the summary afterwards
#[derive(Debug, Default)]
struct TaxonomyTally {
    updated: usize,
    skipped: usize,
    unmapped: BTreeMap<String, usize>,
}

impl TaxonomyTally {
    fn merge(&mut self, other: TaxonomyTally) {
        self.updated += other.updated;
        self.skipped += other.skipped;
        for (family, count) in other.unmapped {
            *self.unmapped.entry(family).or_insert(0) += count;
        }
    }
}

/// Canonicalize one rev's links
///
/// Links without a target id are dropped and counted.
pub fn canonicalize_links(
    classifier: &Classifier,
    rev_id: &str,
    raw_links: Vec<RawRevLink>,
    summary: &mut SeedSummary,
) -> Vec<RevLink> {
    let mut links = Vec::with_capacity(raw_links.len());

    for raw in raw_links {
        let Some(target_id) = raw.target_id else {
            warn!("[seed] Rev '{}' has a link without targetId; dropping it", rev_id);
            summary.dropped_links += 1;
            continue;
        };

        let kind = classifier.canonicalize_flavor_value(&raw.raw_type);
        let flavor = raw.raw_type.as_str().map(str::to_string);

        let recognized = flavor
            .as_deref()
            .map(|f| classifier.relations().get(f.trim()).is_some())
            .unwrap_or(false);
        if !recognized {
            let label = flavor.clone().unwrap_or_else(|| raw.raw_type.to_string());
            *summary.unrecognized_flavors.entry(label).or_insert(0) += 1;
        }

        summary.links += 1;
        links.push(RevLink {
            target_id,
            kind,
            flavor,
            note: raw.note,
            confidence: raw.confidence,
        });
    }

    links
}

/// Convert a raw rev into its stored form with canonical links
pub fn normalize_rev(classifier: &Classifier, raw: RawRev, summary: &mut SeedSummary) -> Rev {
    let links = canonicalize_links(classifier, &raw.id, raw.links, summary);

    Rev {
        id: raw.id,
        title: raw.title,
        user_id: raw.user_id,
        status: raw.status,
        version: raw.version,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        seed_event: raw.seed_event,
        purpose: raw.purpose,
        body: raw.body,
        axiom: raw.axiom,
        archetypes: raw.archetypes,
        tags: raw.tags,
        links,
        embedding: raw.embedding,
        graph_embedding: raw.graph_embedding,
        fused_embedding: raw.fused_embedding,
        history: raw.history,
        metadata: raw.metadata,
    }
}

/// Merge lemma metadata entries into matching revs
///
/// `families` always replaces the rev's family list (missing means empty);
/// `lineageRank` and `lemma` are set only when the entry carries them.
pub fn merge_lemmas(revs: &mut [Rev], entries: &[LemmaEntry], summary: &mut SeedSummary) {
    let positions: HashMap<String, usize> = revs
        .iter()
        .enumerate()
        .map(|(i, rev)| (rev.id.clone(), i))
        .collect();

    for entry in entries {
        let Some(&position) = positions.get(&entry.rev_id) else {
            summary.lemma_entries_unknown.push(entry.rev_id.clone());
            continue;
        };

        let metadata = revs[position]
            .metadata
            .get_or_insert_with(RevMetadata::default);
        metadata.families = Some(entry.families.clone().unwrap_or_default());
        if let Some(rank) = entry.lineage_rank {
            metadata.lineage_rank = Some(rank);
        }
        if let Some(lemma) = &entry.lemma {
            metadata.lemma = Some(lemma.clone());
        }
        summary.lemma_entries_applied += 1;
    }

    if !summary.lemma_entries_unknown.is_empty() {
        warn!(
            "[seed] Lemma entries with revIds not present in revs: {:?}",
            summary.lemma_entries_unknown
        );
    }
}

/// Classify one rev's families into its taxonomy
///
/// Returns false (and leaves the rev untouched) when it has no families.
/// On success the legacy `families` field moves into `taxonomy.families`.
fn apply_taxonomy(
    classifier: &Classifier,
    rev: &mut Rev,
    tally: &mut TaxonomyTally,
    progress: &AtomicUsize,
) -> bool {
    let Some(metadata) = rev.metadata.as_mut() else {
        tally.skipped += 1;
        return false;
    };

    let families = metadata.clean_families();
    if families.is_empty() {
        tally.skipped += 1;
        return false;
    }

    let outcome = classifier.compute_taxonomy_detailed(&families);
    if !outcome.unmapped.is_empty() {
        warn!(
            "[taxonomy] Rev '{}' has unmapped families: {:?}",
            rev.id, outcome.unmapped
        );
        for family in outcome.unmapped {
            *tally.unmapped.entry(family).or_insert(0) += 1;
        }
    }

    let mut view = outcome.view;
    view.families = families;
    metadata.taxonomy = Some(view);
    metadata.families = None;

    tally.updated += 1;
    let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
    if done % PROGRESS_INTERVAL == 0 {
        info!("[taxonomy] Updated {} revs so far…", done);
    }
    true
}

fn apply_taxonomy_batch(
    classifier: &Classifier,
    revs: &mut [Rev],
    progress: &AtomicUsize,
) -> TaxonomyTally {
    let mut tally = TaxonomyTally::default();
    for rev in revs {
        apply_taxonomy(classifier, rev, &mut tally, progress);
    }
    tally
}

/// Classify every rev, splitting the work across `jobs` threads
///
/// Each worker owns a disjoint chunk of revs; the classifier is shared
/// read-only. Returns (updated, skipped, unmapped family counts).
pub fn apply_taxonomy_all(
    classifier: &Classifier,
    revs: &mut [Rev],
    jobs: usize,
) -> (usize, usize, BTreeMap<String, usize>) {
    let jobs = jobs.max(1);
    let progress = AtomicUsize::new(0);

    let tally = if jobs == 1 || revs.len() < 2 {
        apply_taxonomy_batch(classifier, revs, &progress)
    } else {
        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => {
                let chunk_size = revs.len().div_ceil(jobs);
                debug!("[taxonomy] Classifying {} revs on {} workers", revs.len(), jobs);
                pool.install(|| {
                    revs.par_chunks_mut(chunk_size)
                        .map(|chunk| apply_taxonomy_batch(classifier, chunk, &progress))
                        .reduce(TaxonomyTally::default, |mut acc, part| {
                            acc.merge(part);
                            acc
                        })
                })
            }
            Err(e) => {
                warn!("[taxonomy] Failed to start worker pool ({}); classifying sequentially", e);
                apply_taxonomy_batch(classifier, revs, &progress)
            }
        }
    };

    (tally.updated, tally.skipped, tally.unmapped)
}

/// Run the full seed pipeline
pub fn seed_revs(
    classifier: &Classifier,
    raw_revs: Vec<RawRev>,
    lemmas: Option<&[LemmaEntry]>,
    jobs: usize,
) -> SeedOutcome {
    let mut summary = SeedSummary {
        total_revs: raw_revs.len(),
        ..SeedSummary::default()
    };
    info!("[seed] Loaded {} revs", raw_revs.len());

    let mut revs: Vec<Rev> = raw_revs
        .into_iter()
        .map(|raw| normalize_rev(classifier, raw, &mut summary))
        .collect();
    info!(
        "[seed] Canonicalized {} links ({} with unrecognized flavors, {} dropped)",
        summary.links,
        summary.unrecognized_flavors.values().sum::<usize>(),
        summary.dropped_links
    );

    if let Some(entries) = lemmas {
        info!("[seed] Applying {} lemma metadata entries", entries.len());
        merge_lemmas(&mut revs, entries, &mut summary);
    }

    let (updated, skipped, unmapped) = apply_taxonomy_all(classifier, &mut revs, jobs);
    summary.taxonomy_updated = updated;
    summary.skipped_no_families = skipped;
    summary.unmapped_families = unmapped;

    info!("[taxonomy] Done.");
    info!("[taxonomy] Updated revs: {}", summary.taxonomy_updated);
    info!("[taxonomy] Skipped (no families): {}", summary.skipped_no_families);
    if !summary.unmapped_families.is_empty() {
        warn!(
            "[taxonomy] {} distinct unmapped families across all revs",
            summary.unmapped_families.len()
        );
    }

    SeedOutcome { revs, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmesh_common::rev::LemmaMetadata;
    use revmesh_common::RelationType;
    use serde_json::{json, Value};

    fn raw_rev(id: &str, links: Value, metadata: Value) -> RawRev {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Rev {}", id),
            "userId": "u1",
            "status": "active",
            "version": "1.0",
            "createdAt": "2025-01-01T00:00:00Z",
            "body": "body",
            "links": links,
            "metadata": metadata,
        }))
        .unwrap()
    }

    fn classifier() -> Classifier {
        Classifier::builtin().unwrap()
    }

    #[test]
    fn test_links_keep_original_flavor() {
        let classifier = classifier();
        let mut summary = SeedSummary::default();
        let rev = normalize_rev(
            &classifier,
            raw_rev(
                "a",
                json!([
                    {"targetId": "b", "type": "requires"},
                    {"targetId": "c", "type": " mirrors ", "note": "n", "confidence": 0.4},
                    {"targetId": "d", "type": "invented_relation"},
                    {"targetId": "e", "type": 7},
                    {"type": "requires"},
                ]),
                Value::Null,
            ),
            &mut summary,
        );

        let kinds: Vec<RelationType> = rev.links.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RelationType::Prerequisite,
                RelationType::Parallel,
                RelationType::Related,
                RelationType::Related,
            ]
        );
        assert_eq!(rev.links[0].flavor.as_deref(), Some("requires"));
        assert_eq!(rev.links[1].flavor.as_deref(), Some(" mirrors "));
        assert_eq!(rev.links[1].note.as_deref(), Some("n"));
        assert_eq!(rev.links[3].flavor, None);

        assert_eq!(summary.links, 4);
        assert_eq!(summary.dropped_links, 1);
        assert_eq!(summary.unrecognized_flavors["invented_relation"], 1);
        assert_eq!(summary.unrecognized_flavors["7"], 1);
    }

    #[test]
    fn test_taxonomy_moves_families_into_view() {
        let classifier = classifier();
        let mut summary = SeedSummary::default();
        let mut revs = vec![normalize_rev(
            &classifier,
            raw_rev(
                "a",
                json!([]),
                json!({"families": ["liberation", "escalation-core", "liberation"], "custom": true}),
            ),
            &mut summary,
        )];

        let (updated, skipped, unmapped) = apply_taxonomy_all(&classifier, &mut revs, 1);
        assert_eq!((updated, skipped), (1, 0));
        assert!(unmapped.is_empty());

        let metadata = revs[0].metadata.as_ref().unwrap();
        assert!(metadata.families.is_none());
        assert_eq!(metadata.extra["custom"], json!(true));

        let taxonomy = metadata.taxonomy.as_ref().unwrap();
        assert_eq!(taxonomy.families, vec!["liberation", "escalation-core", "liberation"]);
        assert_eq!(taxonomy.subfamilies, vec!["escalation-chain", "protest-patterns"]);
        assert_eq!(taxonomy.dimensions, vec!["emotional-architecture"]);
    }

    #[test]
    fn test_revs_without_families_are_skipped() {
        let classifier = classifier();
        let mut summary = SeedSummary::default();
        let mut revs: Vec<Rev> = [
            raw_rev("none", json!([]), Value::Null),
            raw_rev("empty", json!([]), json!({"families": []})),
            raw_rev("blank", json!([]), json!({"families": ["  "]})),
        ]
        .into_iter()
        .map(|raw| normalize_rev(&classifier, raw, &mut summary))
        .collect();

        let (updated, skipped, _) = apply_taxonomy_all(&classifier, &mut revs, 1);
        assert_eq!((updated, skipped), (0, 3));
        assert!(revs[0].metadata.is_none());
        assert!(revs[1].metadata.as_ref().unwrap().taxonomy.is_none());
    }

    #[test]
    fn test_unmapped_families_are_tallied_per_rev() {
        let classifier = classifier();
        let mut summary = SeedSummary::default();
        let mut revs: Vec<Rev> = [
            raw_rev("a", json!([]), json!({"families": ["mystery", "liberation"]})),
            raw_rev("b", json!([]), json!({"families": ["mystery"]})),
        ]
        .into_iter()
        .map(|raw| normalize_rev(&classifier, raw, &mut summary))
        .collect();

        let (updated, _, unmapped) = apply_taxonomy_all(&classifier, &mut revs, 1);
        assert_eq!(updated, 2);
        assert_eq!(unmapped["mystery"], 2);

        let only_unmapped = revs[1].metadata.as_ref().unwrap().taxonomy.as_ref().unwrap();
        assert_eq!(only_unmapped.families, vec!["mystery"]);
        assert!(only_unmapped.dimensions.is_empty());
    }

    #[test]
    fn test_merge_lemmas() {
        let classifier = classifier();
        let mut summary = SeedSummary::default();
        let mut revs = vec![
            normalize_rev(&classifier, raw_rev("a", json!([]), Value::Null), &mut summary),
            normalize_rev(
                &classifier,
                raw_rev("b", json!([]), json!({"families": ["old"], "lineageRank": 9})),
                &mut summary,
            ),
        ];
        let entries = vec![
            LemmaEntry {
                rev_id: "a".to_string(),
                families: Some(vec!["liberation".to_string()]),
                lineage_rank: Some(2.0),
                lemma: Some(LemmaMetadata {
                    is_lemma: true,
                    roles: vec!["anchor".to_string()],
                    lemma_for: vec!["b".to_string()],
                    dependent_on: vec![],
                    confidence: None,
                }),
            },
            LemmaEntry {
                rev_id: "b".to_string(),
                families: None,
                lineage_rank: None,
                lemma: None,
            },
            LemmaEntry {
                rev_id: "ghost".to_string(),
                families: None,
                lineage_rank: None,
                lemma: None,
            },
        ];

        merge_lemmas(&mut revs, &entries, &mut summary);

        let a = revs[0].metadata.as_ref().unwrap();
        assert_eq!(a.families, Some(vec!["liberation".to_string()]));
        assert_eq!(a.lineage_rank, Some(2.0));
        assert!(a.lemma.as_ref().unwrap().is_lemma);

        let b = revs[1].metadata.as_ref().unwrap();
        assert_eq!(b.families, Some(vec![]));
        assert_eq!(b.lineage_rank, Some(9.0));

        assert_eq!(summary.lemma_entries_applied, 2);
        assert_eq!(summary.lemma_entries_unknown, vec!["ghost"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let classifier = classifier();
        let families = [
            json!(["liberation"]),
            json!(["cognitive-style", "grammar-and-axioms"]),
            json!([]),
            json!(["mesh-dynamics", "devotion", "unknown-tag"]),
            json!(["unknown-tag"]),
            json!(["cosmology", "geometry"]),
            json!(["embodiment"]),
        ];
        let raws: Vec<RawRev> = families
            .iter()
            .enumerate()
            .map(|(i, f)| raw_rev(&format!("r{}", i), json!([]), json!({ "families": f })))
            .collect();

        let sequential = seed_revs(&classifier, raws.clone(), None, 1);
        let parallel = seed_revs(&classifier, raws, None, 3);

        assert_eq!(sequential.revs, parallel.revs);
        assert_eq!(sequential.summary, parallel.summary);
        assert_eq!(sequential.summary.taxonomy_updated, 6);
        assert_eq!(sequential.summary.skipped_no_families, 1);
        assert_eq!(sequential.summary.unmapped_families["unknown-tag"], 2);
    }
}
