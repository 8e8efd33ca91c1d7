//! Deck configuration: engine defaults and file handling.
//!
//! Mirrors the page-level knobs an author can turn without touching per
//! element attributes. Loaded from TOML; every field has a default so a
//! partial file (or none at all) works.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::animate::{CounterConfig, EntranceConfig, RevealDefaults};

/// Top-level configuration for a deck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub counter: CounterConfig,
    pub reveal: RevealDefaults,
    pub entrance: EntranceConfig,
    /// Page document opened when the CLI names none.
    pub page_path: Option<PathBuf>,
    /// Form-state store location, overriding the user state directory.
    pub state_path: Option<PathBuf>,
}

impl DeckConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            toml::from_str(&content).context("Failed to parse configuration TOML")?;
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.counter.duration_ms == 0 {
            anyhow::bail!("Counter duration must be positive");
        }
        if self.counter.trigger_offset < 0.0 {
            anyhow::bail!("Counter trigger offset cannot be negative");
        }
        if self.reveal.duration_ms == 0 {
            anyhow::bail!("Reveal duration must be positive");
        }
        if !(0.0..=1.0).contains(&self.reveal.start_pct) {
            anyhow::bail!("Reveal start position must be between 0% and 100%");
        }
        if self.entrance.item_duration_ms == 0 {
            anyhow::bail!("Entrance item duration must be positive");
        }
        if self.entrance.min_cols == 0 {
            anyhow::bail!("Entrance minimum width must be positive");
        }
        Ok(())
    }
}
