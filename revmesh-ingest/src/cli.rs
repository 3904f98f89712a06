//! Command-line surface for revmesh-ingest

use crate::checks::{self, LemmaOutline, RevOutline};
use crate::io::{read_json_array, write_json};
use crate::seed::seed_revs;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use revmesh_common::config::{
    load_classifier_config, resolve_grouping_source, GroupingSource, TomlConfig,
};
use revmesh_common::rev::{LemmaEntry, RawRev};
use revmesh_common::Classifier;
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for revmesh-ingest
#[derive(Parser, Debug)]
#[command(name = "revmesh-ingest")]
#[command(about = "Seed and check RevMesh rev files")]
#[command(version)]
pub struct Cli {
    /// Grouping file (TOML or JSON) overriding the compiled-in tables
    #[arg(long, global = true)]
    pub grouping: Option<PathBuf>,

    /// Bootstrap config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Canonicalize links, merge lemma metadata and classify families
    Seed {
        /// JSON array of raw revs
        #[arg(long)]
        revs: PathBuf,

        /// JSON array of lemma metadata entries
        #[arg(long)]
        lemmas: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Worker threads for classification
        #[arg(long, default_value_t = 1)]
        jobs: usize,
    },

    /// Report raw link types and dangling link targets
    CheckLinks {
        #[arg(long)]
        revs: PathBuf,
    },

    /// Count families across lemma entries and list unmapped ones
    CheckFamilies {
        #[arg(long)]
        lemmas: PathBuf,
    },

    /// Cross-check lemma entries against the rev set
    CheckLemmas {
        #[arg(long)]
        revs: PathBuf,

        #[arg(long)]
        lemmas: PathBuf,
    },

    /// Validate the active grouping and list reassigned members
    Grouping,
}

/// Resolve the grouping source and build the classifier from it
pub fn build_classifier(
    cli: &Cli,
    toml_config: &TomlConfig,
) -> Result<(GroupingSource, Classifier)> {
    let source = resolve_grouping_source(cli.grouping.as_deref(), toml_config);
    match source.path() {
        Some(path) => info!("Using grouping file: {}", path.display()),
        None => info!("Using compiled-in grouping"),
    }

    let config = load_classifier_config(&source).context("Failed to load grouping")?;
    let classifier = Classifier::build(&config).context("Grouping is inconsistent")?;
    Ok((source, classifier))
}

fn print_report<R: Display + Serialize>(report: &R, json: bool) -> Result<()> {
    if json {
        write_json(report, None)
    } else {
        print!("{}", report);
        Ok(())
    }
}

/// Execute the parsed command
pub fn run(cli: Cli, toml_config: &TomlConfig) -> Result<()> {
    match &cli.command {
        Command::Seed {
            revs,
            lemmas,
            out,
            jobs,
        } => {
            let (_, classifier) = build_classifier(&cli, toml_config)?;
            let raw_revs: Vec<RawRev> = read_json_array(revs)?;
            let lemma_entries: Option<Vec<LemmaEntry>> =
                lemmas.as_deref().map(read_json_array::<LemmaEntry>).transpose()?;

            let outcome = seed_revs(&classifier, raw_revs, lemma_entries.as_deref(), *jobs);
            write_json(&outcome.revs, out.as_deref())?;
            if let Some(path) = out {
                info!("Wrote {} revs to {}", outcome.revs.len(), path.display());
            }
            Ok(())
        }
        Command::CheckLinks { revs } => {
            let revs: Vec<RevOutline> = read_json_array(revs)?;
            print_report(&checks::check_links(&revs), cli.json)
        }
        Command::CheckFamilies { lemmas } => {
            let (_, classifier) = build_classifier(&cli, toml_config)?;
            let entries: Vec<LemmaOutline> = read_json_array(lemmas)?;
            print_report(&checks::check_families(&classifier, &entries), cli.json)
        }
        Command::CheckLemmas { revs, lemmas } => {
            let revs: Vec<RevOutline> = read_json_array(revs)?;
            let entries: Vec<LemmaOutline> = read_json_array(lemmas)?;
            print_report(&checks::check_lemmas(&revs, &entries), cli.json)
        }
        Command::Grouping => {
            let (source, classifier) = build_classifier(&cli, toml_config)?;
            print_report(&checks::grouping_report(&source, &classifier), cli.json)
        }
    }
}
