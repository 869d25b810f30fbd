//! Processing configuration loaded from `~/.config/tariffscan/config.toml`.
//!
//! Every field has a default matching the CMA tariff layout, so an absent or
//! partial file is valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Geometry tolerances for row assembly and column matching, in PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum vertical distance from a row's first glyph.
    pub row_tolerance: f32,
    /// Maximum distance between an amount and its column header.
    pub column_tolerance: f32,
    /// Period text must sit this far left of the first column.
    pub period_margin: f32,
    /// A lone period marker right of this x belongs to the detention table.
    pub detention_only_min_x: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 5.0,
            column_tolerance: 10.0,
            period_margin: 30.0,
            detention_only_min_x: 150.0,
        }
    }
}

/// Options for the line segmenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Lines containing any of these are footers or notices and are dropped.
    pub boilerplate: Vec<String>,
    /// Clear the demurrage/detention split state when a container opens.
    ///
    /// Off by default: a container inherits the split state left by the
    /// previous one until its own DEMURRAGE/DETENTION header appears.
    pub reset_split_on_container: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            boilerplate: [
                "NOR :",
                "NOR:",
                "Our General Conditions",
                "Powered by TCPDF",
                "(Special container:",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            reset_split_on_container: false,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub segment: SegmentConfig,
}

impl Config {
    /// Load from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tariffscan")
        .join("config.toml")
}
