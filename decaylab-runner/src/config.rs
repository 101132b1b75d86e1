//! TOML run files: one `[simulation]` table plus an optional `[report]` table.
//!
//! ```toml
//! [simulation]
//! seed = 30
//! initial_investment = 200.0
//! days = 100
//! variations = [0.02, -0.03, -0.04, 0.05]
//! engine = "mt19937"
//!
//! [report]
//! format = "table"
//! days = "sampled"
//! ```

use std::path::{Path, PathBuf};

use decaylab_core::{SimError, SimulationConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reporting::ReportOptions;

/// Errors from loading a run file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse run file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] SimError),
}

/// A complete run: what to simulate and how to report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub report: ReportOptions,
}

impl RunConfig {
    /// Parse and validate a run file's contents.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(content)?;
        config.simulation.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }
}

impl From<SimulationConfig> for RunConfig {
    fn from(simulation: SimulationConfig) -> Self {
        Self {
            simulation,
            report: ReportOptions::default(),
        }
    }
}
