//! End-to-end runs of the ingest commands over JSON fixtures on disk

use clap::Parser;
use revmesh_common::config::TomlConfig;
use revmesh_common::rev::Rev;
use revmesh_common::RelationType;
use revmesh_ingest::{run, Cli};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn raw_revs() -> Value {
    json!([
        {
            "id": "rev-a",
            "title": "Escalation",
            "userId": "u1",
            "status": "active",
            "version": "1.0",
            "createdAt": "2025-01-01T00:00:00Z",
            "body": "a",
            "links": [
                {"targetId": "rev-b", "type": "requires"},
                {"targetId": "rev-b", "type": "echoed_in", "note": "see b"}
            ],
            "metadata": {"families": ["liberation", " escalation-core "], "source": "import"}
        },
        {
            "id": "rev-b",
            "title": "Mesh",
            "userId": "u1",
            "status": "draft",
            "version": "0.1",
            "createdAt": "2025-01-02T00:00:00Z",
            "body": "b",
            "links": [{"targetId": "rev-a", "type": "mystery_kind"}]
        },
        {
            "id": "rev-c",
            "title": "Loose",
            "userId": "u2",
            "status": "emerging",
            "version": "0.1",
            "createdAt": "2025-01-03T00:00:00Z",
            "body": "c"
        }
    ])
}

fn lemma_entries() -> Value {
    json!([
        {
            "revId": "rev-b",
            "families": ["mesh-dynamics"],
            "lineageRank": 1,
            "lemma": {"isLemma": true, "roles": ["root"], "lemmaFor": ["rev-a"], "dependentOn": []}
        },
        {"revId": "rev-unknown", "families": ["liberation"]}
    ])
}

fn run_args(args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["revmesh-ingest"];
    argv.extend_from_slice(args);
    run(Cli::try_parse_from(argv)?, &TomlConfig::default())
}

fn read_revs(path: &Path) -> Vec<Rev> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_seed_writes_normalized_revs() {
    let dir = TempDir::new().unwrap();
    let revs = write_json(&dir, "revs.json", &raw_revs());
    let lemmas = write_json(&dir, "lemmas.json", &lemma_entries());
    let out = dir.path().join("seeded.json");

    run_args(&[
        "seed",
        "--revs",
        revs.to_str().unwrap(),
        "--lemmas",
        lemmas.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--jobs",
        "2",
    ])
    .unwrap();

    let seeded = read_revs(&out);
    assert_eq!(seeded.len(), 3);

    let a = &seeded[0];
    assert_eq!(a.links[0].kind, RelationType::Prerequisite);
    assert_eq!(a.links[0].flavor.as_deref(), Some("requires"));
    assert_eq!(a.links[1].kind, RelationType::Related);
    assert_eq!(a.links[1].note.as_deref(), Some("see b"));

    let a_meta = a.metadata.as_ref().unwrap();
    assert!(a_meta.families.is_none());
    assert_eq!(a_meta.extra["source"], json!("import"));
    let a_view = a_meta.taxonomy.as_ref().unwrap();
    assert_eq!(a_view.families, vec!["liberation", "escalation-core"]);
    assert_eq!(a_view.dimensions, vec!["emotional-architecture"]);

    let b = &seeded[1];
    assert_eq!(b.links[0].kind, RelationType::Related);
    assert_eq!(b.links[0].flavor.as_deref(), Some("mystery_kind"));
    let b_meta = b.metadata.as_ref().unwrap();
    assert_eq!(b_meta.lineage_rank, Some(1.0));
    assert!(b_meta.lemma.as_ref().unwrap().is_lemma);
    assert_eq!(b_meta.taxonomy.as_ref().unwrap().families, vec!["mesh-dynamics"]);

    let c = &seeded[2];
    assert!(c.metadata.is_none());
}

#[test]
fn test_seed_output_uses_camel_case_and_type_field() {
    let dir = TempDir::new().unwrap();
    let revs = write_json(&dir, "revs.json", &raw_revs());
    let out = dir.path().join("seeded.json");

    run_args(&["seed", "--revs", revs.to_str().unwrap(), "--out", out.to_str().unwrap()]).unwrap();

    let value: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let first = &value[0];
    assert_eq!(first["userId"], json!("u1"));
    assert_eq!(first["links"][0]["type"], json!("prerequisite"));
    assert_eq!(first["links"][0]["targetId"], json!("rev-b"));
    let taxonomy = &first["metadata"]["taxonomy"];
    assert!(taxonomy["subfamilyWeights"].is_object());
    assert!(taxonomy["dimensionWeights"]["emotional-architecture"].is_number());
}

#[test]
fn test_seed_rejects_non_array_input() {
    let dir = TempDir::new().unwrap();
    let revs = write_json(&dir, "revs.json", &json!({"revs": raw_revs()}));

    let err = run_args(&["seed", "--revs", revs.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("top-level JSON array"));
}

#[test]
fn test_seed_with_fixture_grouping() {
    let dir = TempDir::new().unwrap();
    let grouping = dir.path().join("grouping.toml");
    std::fs::write(
        &grouping,
        r#"
        [[subfamilies]]
        id = "freedom"
        dimension = "motion"
        families = ["liberation"]

        [[relations]]
        kind = "governs"
        flavors = ["requires"]
        "#,
    )
    .unwrap();
    let revs = write_json(&dir, "revs.json", &raw_revs());
    let out = dir.path().join("seeded.json");

    run_args(&[
        "--grouping",
        grouping.to_str().unwrap(),
        "seed",
        "--revs",
        revs.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ])
    .unwrap();

    let seeded = read_revs(&out);
    assert_eq!(seeded[0].links[0].kind, RelationType::Governs);
    let view = seeded[0].metadata.as_ref().unwrap().taxonomy.as_ref().unwrap();
    assert_eq!(view.subfamilies, vec!["freedom"]);
    assert_eq!(view.dimensions, vec!["motion"]);
}

#[test]
fn test_inconsistent_grouping_aborts_seed() {
    let dir = TempDir::new().unwrap();
    let grouping = dir.path().join("grouping.toml");
    std::fs::write(
        &grouping,
        r#"
        [[subfamilies]]
        id = "freedom"
        dimension = "motion"
        families = ["liberation"]

        [[dimensions]]
        id = "stillness"
        subfamilies = ["freedom"]
        "#,
    )
    .unwrap();
    let revs = write_json(&dir, "revs.json", &raw_revs());
    let out = dir.path().join("seeded.json");

    let result = run_args(&[
        "--grouping",
        grouping.to_str().unwrap(),
        "seed",
        "--revs",
        revs.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(result.is_err());
    assert!(!out.exists());
}

#[test]
fn test_checks_run_without_failing_on_findings() {
    let dir = TempDir::new().unwrap();
    let revs = write_json(&dir, "revs.json", &raw_revs());
    let lemmas = write_json(&dir, "lemmas.json", &lemma_entries());

    run_args(&["check-links", "--revs", revs.to_str().unwrap()]).unwrap();
    run_args(&["check-families", "--lemmas", lemmas.to_str().unwrap()]).unwrap();
    run_args(&[
        "--json",
        "check-lemmas",
        "--revs",
        revs.to_str().unwrap(),
        "--lemmas",
        lemmas.to_str().unwrap(),
    ])
    .unwrap();
    run_args(&["grouping"]).unwrap();
}

#[test]
fn test_lemma_checks_tolerate_incomplete_entries() {
    let dir = TempDir::new().unwrap();
    let revs = write_json(&dir, "revs.json", &raw_revs());
    let lemmas = write_json(
        &dir,
        "lemmas.json",
        &json!([
            {"revId": "rev-a", "families": ["liberation"], "lemma": {"lemmaFor": ["rev-x"]}},
            {"revId": "rev-b", "families": "mesh-dynamics"}
        ]),
    );

    run_args(&["check-families", "--lemmas", lemmas.to_str().unwrap()]).unwrap();
    run_args(&[
        "check-lemmas",
        "--revs",
        revs.to_str().unwrap(),
        "--lemmas",
        lemmas.to_str().unwrap(),
    ])
    .unwrap();
}
