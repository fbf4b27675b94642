use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::document::{Border, BorderLine};
use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::table::RaggedRows;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub profile: Profile,
    pub lists: ListsConfig,
    pub tables: TablesConfig,
    pub page: PageConfig,
}

/// How ordered list items are numbered in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// Print the source ordinal as text
    #[default]
    Literal,
    /// Let the document number items, restarting where lists break
    Native,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListsConfig {
    pub numbering: Numbering,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    pub border: BorderLine,
    pub border_weight: f32,
    pub border_color: String,
    pub ragged_rows: RaggedRows,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            border: BorderLine::Single,
            border_weight: 0.5,
            border_color: "000000".to_string(),
            ragged_rows: RaggedRows::Pad,
        }
    }
}

impl TablesConfig {
    pub fn border(&self) -> Border {
        Border {
            line: self.border,
            weight: self.border_weight,
            color: self.border_color.trim_start_matches('#').to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

impl Config {
    /// The configuration shipped with the binary.
    pub fn compiled_default() -> Self {
        // build.rs already checked that this parses as TOML
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
