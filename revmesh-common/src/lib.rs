//! # RevMesh Common Library
//!
//! Shared code for the RevMesh knowledge graph tools including:
//! - Taxonomy configuration (Dimension → Subfamily → Family)
//! - Index building over the static grouping tables
//! - Weight rollup from raw family tags to weighted memberships
//! - Relation flavor classification into canonical relation kinds
//! - Content item ("rev") model used at the ingestion boundary
//! - Configuration loading

pub mod classifier;
pub mod config;
pub mod error;
pub mod lookup;
pub mod relation;
pub mod rev;
pub mod taxonomy;

pub use classifier::{Classifier, ClassifierConfig};
pub use error::{Error, Result};
pub use relation::RelationType;
pub use taxonomy::TaxonomyView;
