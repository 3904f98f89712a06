//! Configuration loading and grouping source resolution
//!
//! The taxonomy and relation tables are compiled in. A grouping file can
//! replace them; where that file comes from is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `REVMESH_GROUPING` environment variable
//! 3. `grouping_file` in the TOML bootstrap config
//! 4. Compiled-in tables (fallback)
//!
//! A grouping file that fails to parse or validate is fatal. It is never
//! partially applied.

use crate::relation::{RelationGroup, RelationGroups};
use crate::taxonomy::{DimensionDef, SubfamilyDef, TaxonomyGrouping};
use crate::{ClassifierConfig, Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming a grouping file
pub const GROUPING_ENV_VAR: &str = "REVMESH_GROUPING";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Grouping file replacing the compiled-in tables (optional)
    #[serde(default)]
    pub grouping_file: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Get the bootstrap config path for the platform, if one exists
///
/// Linux tries `~/.config/revmesh/config.toml`, then
/// `/etc/revmesh/config.toml`. Other platforms use the user config dir only.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("revmesh").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/revmesh/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Parse bootstrap TOML text
pub fn parse_toml_config(text: &str) -> Result<TomlConfig> {
    Ok(toml::from_str(text)?)
}

/// Load the bootstrap config
///
/// An explicit path must exist. Without one, the platform default is used
/// when present; a missing default file yields [`TomlConfig::default`].
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                debug!("No bootstrap config found; using defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    let config = parse_toml_config(&text)?;
    info!("Loaded bootstrap config from {}", path.display());
    Ok(config)
}

/// Where the active grouping comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingSource {
    CliArgument(PathBuf),
    Environment(PathBuf),
    ConfigFile(PathBuf),
    Builtin,
}

impl GroupingSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            GroupingSource::CliArgument(p)
            | GroupingSource::Environment(p)
            | GroupingSource::ConfigFile(p) => Some(p.as_path()),
            GroupingSource::Builtin => None,
        }
    }
}

/// Resolve the grouping source by priority
pub fn resolve_grouping_source(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> GroupingSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return GroupingSource::CliArgument(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(GROUPING_ENV_VAR) {
        if !path.trim().is_empty() {
            return GroupingSource::Environment(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.grouping_file {
        return GroupingSource::ConfigFile(path.clone());
    }

    // Priority 4: compiled-in tables
    GroupingSource::Builtin
}

/// On-disk grouping layout
///
/// Every table is optional. Omitted taxonomy tables keep the compiled-in
/// taxonomy, an omitted `dimensions` table is derived from subfamily claims,
/// and omitted `relations` keep the compiled-in relation groups.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GroupingFile {
    #[serde(default)]
    pub subfamilies: Option<Vec<SubfamilyDef>>,
    #[serde(default)]
    pub dimensions: Option<Vec<DimensionDef>>,
    #[serde(default)]
    pub relations: Option<Vec<RelationGroup>>,
}

impl GroupingFile {
    pub fn into_config(self) -> Result<ClassifierConfig> {
        let grouping = match (self.subfamilies, self.dimensions) {
            (Some(subfamilies), Some(dimensions)) => TaxonomyGrouping {
                subfamilies,
                dimensions,
            },
            (Some(subfamilies), None) => TaxonomyGrouping::from_subfamilies(subfamilies),
            (None, Some(_)) => {
                return Err(Error::Config(
                    "Grouping file declares dimensions without subfamilies".to_string(),
                ));
            }
            (None, None) => TaxonomyGrouping::builtin(),
        };

        let relations = match self.relations {
            Some(groups) => RelationGroups { groups },
            None => RelationGroups::builtin(),
        };

        Ok(ClassifierConfig {
            grouping,
            relations,
        })
    }
}

/// Parse grouping file contents; `extension` selects TOML or JSON
pub fn parse_grouping(text: &str, extension: &str) -> Result<ClassifierConfig> {
    let file: GroupingFile = match extension {
        "toml" => toml::from_str(text)?,
        "json" => serde_json::from_str(text)?,
        other => {
            return Err(Error::Config(format!(
                "Unsupported grouping file format: '{}' (expected .toml or .json)",
                other
            )));
        }
    };
    file.into_config()
}

/// Read a grouping file from disk
pub fn load_grouping_file(path: &Path) -> Result<ClassifierConfig> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read grouping {}: {}", path.display(), e)))?;
    parse_grouping(&text, &extension)
}

/// Load the configuration model named by `source`
pub fn load_classifier_config(source: &GroupingSource) -> Result<ClassifierConfig> {
    match source.path() {
        Some(path) => {
            info!("Loading grouping from {} ({:?})", path.display(), source);
            load_grouping_file(path)
        }
        None => Ok(ClassifierConfig::builtin()),
    }
}
