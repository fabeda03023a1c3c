//! Configuration handling for the lookup tool.
//!
//! Settings live in a YAML file. The path defaults to `configs.yaml` in the
//! working directory and can be moved with the `DDO_MONSTERS_CONFIG`
//! environment variable. The console reloads the file for every query, so
//! edits take effect without restarting.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Environment variable naming the configuration file.
pub const ENV_CONFIG_PATH: &str = "DDO_MONSTERS_CONFIG";

/// Used when `ENV_CONFIG_PATH` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "configs.yaml";

const DEFAULT_MONSTER_SECTION: &str = "Monsters";
const DEFAULT_CONTENT_SECTION: &str = "mw-content-text";

/// Column names the table derives itself; configured keywords may not reuse them.
pub const RESERVED_COLUMNS: [&str; 3] = ["Name", "Lawfulness", "Goodness"];

/// On-disk shape of the configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    base_url: String,
    quest_listing_url: String,
    level: String,
    #[serde(default)]
    monster_section: Option<String>,
    #[serde(default)]
    content_section: Option<String>,
    columns: Vec<String>,
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: Url,
    quest_listing_url: Url,
    level: String,
    monster_section: String,
    content_section: String,
    columns: Vec<String>,
}

impl Config {
    /// Build a config explicitly, applying the same validation as the loaders.
    pub fn new(
        base_url: &str,
        quest_listing_url: &str,
        level: impl Into<String>,
        columns: Vec<String>,
    ) -> Result<Self, ConfigError> {
        Self::validate(RawConfig {
            base_url: base_url.to_string(),
            quest_listing_url: quest_listing_url.to_string(),
            level: level.into(),
            monster_section: None,
            content_section: None,
            columns,
        })
    }

    /// Load from the path named by `DDO_MONSTERS_CONFIG`, or `configs.yaml`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_path(Self::path_from_env())
    }

    /// Resolve the configuration path without reading it.
    pub fn path_from_env() -> PathBuf {
        env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        let base_url = parse_url("base_url", &raw.base_url)?;
        let quest_listing_url = parse_url("quest_listing_url", &raw.quest_listing_url)?;
        let level = non_blank("level", raw.level)?;
        let monster_section = non_blank(
            "monster_section",
            raw.monster_section
                .unwrap_or_else(|| DEFAULT_MONSTER_SECTION.to_string()),
        )?;
        let content_section = non_blank(
            "content_section",
            raw.content_section
                .unwrap_or_else(|| DEFAULT_CONTENT_SECTION.to_string()),
        )?;

        if raw.columns.is_empty() {
            return Err(ConfigError::invalid("columns", "at least one column is required"));
        }
        let mut seen = HashSet::new();
        for column in &raw.columns {
            if column.trim().is_empty() {
                return Err(ConfigError::invalid("columns", "column names must not be blank"));
            }
            if RESERVED_COLUMNS.contains(&column.as_str()) {
                return Err(ConfigError::invalid(
                    "columns",
                    format!("'{}' is derived by the table and cannot be configured", column),
                ));
            }
            if !seen.insert(column.as_str()) {
                return Err(ConfigError::invalid(
                    "columns",
                    format!("'{}' is listed more than once", column),
                ));
            }
        }

        Ok(Self {
            base_url,
            quest_listing_url,
            level,
            monster_section,
            content_section,
            columns: raw.columns,
        })
    }

    /// Base for resolving relative links found on wiki pages.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
    /// Page listing every quest, grouped by level sections.
    pub fn quest_listing_url(&self) -> &Url {
        &self.quest_listing_url
    }
    /// Section id of the quest-listing table to harvest.
    pub fn level(&self) -> &str {
        &self.level
    }
    pub fn monster_section(&self) -> &str {
        &self.monster_section
    }
    pub fn content_section(&self) -> &str {
        &self.content_section
    }
    /// Field keywords, in configured order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::invalid(field, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::invalid(field, "must be a hierarchical url such as https://..."));
    }
    Ok(url)
}

fn non_blank(field: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not find {}; make sure that it exists", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
