//! Diagnostic reports over seed and lemma files
//!
//! Every check returns a plain report struct. Reports render as text through
//! `Display` and as JSON through `Serialize`. None of them fail on findings.

use revmesh_common::config::GroupingSource;
use revmesh_common::lookup::Reassignment;
use revmesh_common::rev::RawRevLink;
use revmesh_common::{Classifier, RelationType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Minimal view of a rev: only what the link and lemma checks read
///
/// Decoding this instead of a full rev keeps the checks usable on files
/// whose other fields are still broken.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevOutline {
    pub id: String,
    #[serde(default)]
    pub links: Vec<RawRevLink>,
}

/// Minimal view of a lemma metadata entry
///
/// Only `revId` is required. `families`, `lemmaFor` and `dependentOn` are
/// read when they are arrays; anything else counts as empty, and non-string
/// elements are skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LemmaOutline {
    pub rev_id: String,
    #[serde(default)]
    pub families: Value,
    #[serde(default)]
    pub lemma: Option<Value>,
}

fn string_list(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

impl LemmaOutline {
    pub fn families(&self) -> Vec<&str> {
        string_list(Some(&self.families))
    }

    pub fn lemma_for(&self) -> Vec<&str> {
        string_list(self.lemma.as_ref().and_then(|l| l.get("lemmaFor")))
    }

    pub fn dependent_on(&self) -> Vec<&str> {
        string_list(self.lemma.as_ref().and_then(|l| l.get("dependentOn")))
    }
}

/// Ids in first-appearance order, duplicates dropped
fn unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

fn raw_type_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "<missing>".to_string(),
        other => other.to_string(),
    }
}

// ========================================
// check-links
// ========================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    pub rev_count: usize,
    pub link_count: usize,
    /// Raw link type → number of links using it
    pub link_types: BTreeMap<String, usize>,
    /// Missing target id → referencing rev id, once per dangling link
    pub missing_targets: BTreeMap<String, Vec<String>>,
    /// Revs with links that carry no targetId
    pub untargeted: Vec<String>,
}

pub fn check_links(revs: &[RevOutline]) -> LinkReport {
    let known: HashSet<&str> = revs.iter().map(|r| r.id.as_str()).collect();
    let mut report = LinkReport {
        rev_count: revs.len(),
        ..LinkReport::default()
    };

    for rev in revs {
        for link in &rev.links {
            report.link_count += 1;
            *report
                .link_types
                .entry(raw_type_label(&link.raw_type))
                .or_insert(0) += 1;

            match &link.target_id {
                Some(target) if !known.contains(target.as_str()) => {
                    report
                        .missing_targets
                        .entry(target.clone())
                        .or_default()
                        .push(rev.id.clone());
                }
                Some(_) => {}
                None => report.untargeted.push(rev.id.clone()),
            }
        }
    }

    report
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Revs: {}  Links: {}", self.rev_count, self.link_count)?;
        writeln!(f, "Distinct link types ({}):", self.link_types.len())?;
        for (kind, count) in &self.link_types {
            writeln!(f, "  {:<32} {}", kind, count)?;
        }
        if self.missing_targets.is_empty() {
            writeln!(f, "All link targets exist.")?;
        } else {
            writeln!(f, "Missing link targets ({}):", self.missing_targets.len())?;
            for (target, sources) in &self.missing_targets {
                writeln!(f, "  {} <- {}", target, sources.join(", "))?;
            }
        }
        if !self.untargeted.is_empty() {
            writeln!(f, "Links without targetId in: {}", self.untargeted.join(", "))?;
        }
        Ok(())
    }
}

// ========================================
// check-families
// ========================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyReport {
    pub entry_count: usize,
    /// Family → number of occurrences across all entries
    pub families: BTreeMap<String, usize>,
    /// Families the active grouping does not map
    pub unmapped: Vec<String>,
}

pub fn check_families(classifier: &Classifier, entries: &[LemmaOutline]) -> FamilyReport {
    let mut report = FamilyReport {
        entry_count: entries.len(),
        ..FamilyReport::default()
    };

    for entry in entries {
        for family in entry.families() {
            let family = family.trim();
            if family.is_empty() {
                continue;
            }
            *report.families.entry(family.to_string()).or_insert(0) += 1;
        }
    }

    report.unmapped = report
        .families
        .keys()
        .filter(|family| classifier.taxonomy().subfamily_of(family.as_str()).is_none())
        .cloned()
        .collect();

    report
}

impl fmt::Display for FamilyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Lemma entries: {}  Distinct families: {}",
            self.entry_count,
            self.families.len()
        )?;
        for (family, count) in &self.families {
            writeln!(f, "  {:<40} {}", family, count)?;
        }
        if self.unmapped.is_empty() {
            writeln!(f, "Every family maps to a subfamily.")?;
        } else {
            writeln!(f, "Unmapped families ({}):", self.unmapped.len())?;
            for family in &self.unmapped {
                writeln!(f, "  {}", family)?;
            }
        }
        Ok(())
    }
}

// ========================================
// check-lemmas
// ========================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LemmaReport {
    pub rev_count: usize,
    pub entry_count: usize,
    /// Rev ids with no lemma metadata entry
    pub revs_without_entry: Vec<String>,
    /// Distinct entry revIds that match no rev
    pub entries_without_rev: Vec<String>,
    /// Missing lemmaFor target → revIds of the entries naming it
    pub missing_lemma_for: BTreeMap<String, Vec<String>>,
    /// Missing dependentOn target → revIds of the entries naming it
    pub missing_dependent_on: BTreeMap<String, Vec<String>>,
}

pub fn check_lemmas(revs: &[RevOutline], entries: &[LemmaOutline]) -> LemmaReport {
    let rev_ids = unique_ids(revs.iter().map(|r| r.id.as_str()));
    let entry_ids = unique_ids(entries.iter().map(|e| e.rev_id.as_str()));
    let known_revs: HashSet<&str> = rev_ids.iter().copied().collect();
    let known_entries: HashSet<&str> = entry_ids.iter().copied().collect();

    let mut report = LemmaReport {
        rev_count: revs.len(),
        entry_count: entries.len(),
        ..LemmaReport::default()
    };

    report.revs_without_entry = rev_ids
        .iter()
        .filter(|id| !known_entries.contains(*id))
        .map(|id| id.to_string())
        .collect();
    report.entries_without_rev = entry_ids
        .iter()
        .filter(|id| !known_revs.contains(*id))
        .map(|id| id.to_string())
        .collect();

    for entry in entries {
        for target in entry.lemma_for() {
            if !known_revs.contains(target) {
                report
                    .missing_lemma_for
                    .entry(target.to_string())
                    .or_default()
                    .push(entry.rev_id.clone());
            }
        }
        for target in entry.dependent_on() {
            if !known_revs.contains(target) {
                report
                    .missing_dependent_on
                    .entry(target.to_string())
                    .or_default()
                    .push(entry.rev_id.clone());
            }
        }
    }

    report
}

impl LemmaReport {
    pub fn is_clean(&self) -> bool {
        self.revs_without_entry.is_empty()
            && self.entries_without_rev.is_empty()
            && self.missing_lemma_for.is_empty()
            && self.missing_dependent_on.is_empty()
    }
}

fn write_id_list(f: &mut fmt::Formatter<'_>, title: &str, ids: &[String]) -> fmt::Result {
    if !ids.is_empty() {
        writeln!(f, "{} ({}):", title, ids.len())?;
        for id in ids {
            writeln!(f, "  {}", id)?;
        }
    }
    Ok(())
}

fn write_id_map(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    map: &BTreeMap<String, Vec<String>>,
) -> fmt::Result {
    if !map.is_empty() {
        writeln!(f, "{}:", title)?;
        for (target, sources) in map {
            writeln!(f, "  {} <- {}", target, sources.join(", "))?;
        }
    }
    Ok(())
}

impl fmt::Display for LemmaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Revs: {}  Lemma entries: {}", self.rev_count, self.entry_count)?;
        if self.is_clean() {
            return writeln!(f, "Lemma metadata is consistent with the rev set.");
        }
        write_id_list(f, "Revs without lemma entry", &self.revs_without_entry)?;
        write_id_list(f, "Lemma entries for unknown revs", &self.entries_without_rev)?;
        write_id_map(f, "lemmaFor targets missing", &self.missing_lemma_for)?;
        write_id_map(f, "dependentOn targets missing", &self.missing_dependent_on)
    }
}

// ========================================
// grouping
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingReport {
    /// Grouping file path, or None for the compiled-in tables
    pub source: Option<String>,
    pub dimension_count: usize,
    pub subfamily_count: usize,
    pub family_count: usize,
    pub flavor_count: usize,
    pub family_reassignments: Vec<Reassignment<String>>,
    pub flavor_reassignments: Vec<Reassignment<RelationType>>,
}

pub fn grouping_report(source: &GroupingSource, classifier: &Classifier) -> GroupingReport {
    let taxonomy = classifier.taxonomy();
    let relations = classifier.relations();

    GroupingReport {
        source: source.path().map(|p| p.display().to_string()),
        dimension_count: taxonomy.dimension_ids().len(),
        subfamily_count: taxonomy.subfamily_ids().len(),
        family_count: taxonomy.family_count(),
        flavor_count: relations.len(),
        family_reassignments: taxonomy.reassignments().to_vec(),
        flavor_reassignments: relations.reassignments().to_vec(),
    }
}

impl fmt::Display for GroupingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grouping: {}",
            self.source.as_deref().unwrap_or("compiled-in tables")
        )?;
        writeln!(
            f,
            "  {} dimensions, {} subfamilies, {} families, {} flavors",
            self.dimension_count, self.subfamily_count, self.family_count, self.flavor_count
        )?;

        writeln!(f, "Family reassignments ({}):", self.family_reassignments.len())?;
        for r in &self.family_reassignments {
            writeln!(f, "  {:<40} {} -> {}", r.member, r.previous, r.winner)?;
        }
        writeln!(f, "Flavor reassignments ({}):", self.flavor_reassignments.len())?;
        for r in &self.flavor_reassignments {
            writeln!(f, "  {:<40} {} -> {}", r.member, r.previous, r.winner)?;
        }
        Ok(())
    }
}
