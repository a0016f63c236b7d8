//! Reader configuration
//!
//! Loaded from YAML, optionally located and overridden through environment
//! variables:
//! - `BINSEXPR_CONFIG`: path of a YAML config file
//! - `BINSEXPR_MAX_DEPTH`: nesting limit, overriding the file

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CONFIG_ENV: &str = "BINSEXPR_CONFIG";
pub const MAX_DEPTH_ENV: &str = "BINSEXPR_MAX_DEPTH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Filename attached to every location the reader produces
    pub filename: String,
    /// Maximum number of open lists and S-expr comments; unlimited if unset
    pub max_depth: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            filename: "<input>".to_string(),
            max_depth: None,
        }
    }
}

impl ReaderConfig {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse reader config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading reader configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!(
            "Loaded reader config (filename {}, max_depth {:?})",
            config.filename, config.max_depth
        );
        Ok(config)
    }

    /// Load from `BINSEXPR_CONFIG` if set, else defaults; then apply
    /// `BINSEXPR_MAX_DEPTH`.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        if let Ok(depth) = std::env::var(MAX_DEPTH_ENV) {
            let depth = depth
                .trim()
                .parse()
                .with_context(|| format!("Invalid {MAX_DEPTH_ENV} value {depth:?}"))?;
            info!("Overriding max_depth from {MAX_DEPTH_ENV}: {depth}");
            config.max_depth = Some(depth);
        }
        Ok(config)
    }
}
