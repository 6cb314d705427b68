/// Generation settings — defaults, RON loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::essay::DEFAULT_INDENT;

/// Theme used when the caller supplies none.
pub const DEFAULT_THEME: &str = "年轻人买房";
/// Essay length target used when the caller supplies none.
pub const DEFAULT_ESSAY_NUM: i64 = 500;
/// Upper bound on template samples per section before giving up.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Share of the essay length given to each padded section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionRatios {
    pub beginning: f64,
    pub body: f64,
    pub ending: f64,
}

impl Default for SectionRatios {
    fn default() -> Self {
        Self {
            beginning: 0.15,
            body: 0.7,
            ending: 0.15,
        }
    }
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub theme: String,
    pub essay_num: i64,
    /// Template samples allowed per section before the section is reported
    /// as diverging.
    pub max_iterations: u32,
    pub section_ratios: SectionRatios,
    /// Prefix for the beginning, body and ending lines of rendered text.
    pub indent: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            essay_num: DEFAULT_ESSAY_NUM,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            section_ratios: SectionRatios::default(),
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl GenerationConfig {
    /// Load settings from a RON file. Missing fields keep their defaults.
    pub fn load_from_ron(path: &Path) -> Result<GenerationConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<GenerationConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
