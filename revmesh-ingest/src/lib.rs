//! # RevMesh Ingest
//!
//! Batch tooling around the classification core:
//! - `seed`: canonicalize links, merge lemma metadata, classify families
//! - `check-*`: diagnostics over rev and lemma files
//! - `grouping`: inspect the active grouping tables

pub mod checks;
pub mod cli;
pub mod io;
pub mod seed;

pub use cli::{run, Cli, Command};
