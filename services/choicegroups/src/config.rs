use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use crate::discriminators::{BinaryChoiceWhitelist, OverlapPolicy, SelectionConfig};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    #[serde(default = "default_choice_names_path")]
    pub choice_names_path: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub selection: SelectionSection,
    #[serde(default)]
    pub binary_choices: BinaryChoiceWhitelist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionSection {
    #[serde(default = "default_false")]
    pub strict_overlap: bool,
    /// Largest discriminator universe per base name; 0 disables the check
    #[serde(default = "default_max_universe")]
    pub max_universe: usize,
}

impl Default for SelectionSection {
    fn default() -> Self {
        Self {
            strict_overlap: default_false(),
            max_universe: default_max_universe(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .context("Failed to parse config TOML")?;
        Ok(config)
    }

    pub fn selection_config(&self) -> SelectionConfig {
        SelectionConfig {
            binary_choices: self.binary_choices.clone(),
            overlap: if self.selection.strict_overlap {
                OverlapPolicy::Strict
            } else {
                OverlapPolicy::Lenient
            },
            max_universe: match self.selection.max_universe {
                0 => None,
                limit => Some(limit),
            },
        }
    }
}

fn default_catalog_path() -> String {
    "data/catalog.jsonl".to_string()
}

fn default_choice_names_path() -> String {
    "config/choice_names.tsv".to_string()
}

fn default_output_dir() -> String {
    "data/choices".to_string()
}

fn default_false() -> bool {
    false
}

fn default_max_universe() -> usize {
    64
}
