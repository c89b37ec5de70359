use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::parser::ParseOptions;
use crate::session::Mode;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub parse: ParseConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_sample_source")]
    pub sample_source: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            sample_source: default_sample_source(),
        }
    }
}

fn default_sample_source() -> String {
    "rm_chicken_250829.csv".to_string()
}

/// Unset switches fall back to the mode's defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ParseConfig {
    #[serde(default)]
    pub require_item_and_platform: Option<bool>,
    #[serde(default)]
    pub strip_non_numeric_price: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₩".to_string()
}

impl Config {
    /// Parse options for `mode` with any explicit overrides applied.
    pub fn parse_options(&self, mode: Mode) -> ParseOptions {
        let base = mode.parse_options();
        ParseOptions {
            require_item_and_platform: self
                .parse
                .require_item_and_platform
                .unwrap_or(base.require_item_and_platform),
            strip_non_numeric_price: self
                .parse
                .strip_non_numeric_price
                .unwrap_or(base.strip_non_numeric_price),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.display.currency_symbol.is_empty() {
        anyhow::bail!("display.currency_symbol must not be empty");
    }
    if config.ingest.sample_source.trim().is_empty() {
        anyhow::bail!("ingest.sample_source must not be empty");
    }

    Ok(config)
}
