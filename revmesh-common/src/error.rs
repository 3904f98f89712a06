//! Common error types for RevMesh

use thiserror::Error;

/// Common result type for RevMesh operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across RevMesh crates
///
/// Configuration model defects are fatal at construction time. Unmapped
/// families and reassigned members are diagnostics and never show up here.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Subfamily points at a dimension that is not declared
    #[error("Subfamily '{subfamily}' references unknown dimension '{dimension}'")]
    DanglingDimension { subfamily: String, dimension: String },

    /// Dimension list and subfamily parent claims disagree
    #[error("Hierarchy mismatch: {0}")]
    HierarchyMismatch(String),

    /// Same group id declared twice in one table
    #[error("Duplicate {kind} '{id}'")]
    DuplicateGroup { kind: &'static str, id: String },

    /// Member string that cannot be used as an exact lookup key
    #[error("Invalid member {member:?} in group '{group}'")]
    InvalidMember { group: String, member: String },

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
