//! Serializable run configuration.
//!
//! ```toml
//! [input]
//! trades_path = "trades.csv"
//!
//! [calculation]
//! confidence_level = 0.95
//! sweep_levels = [0.9, 0.95, 0.99]
//!
//! [output]
//! dir = "results"
//! ```
//!
//! `sweep_levels` and the whole `[output]` table are optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use varlab_core::validation::validate_confidence_level;
use varlab_core::VarError;

/// Errors from loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {source}")]
    Invalid {
        field: &'static str,
        #[source]
        source: VarError,
    },
}

/// Configuration for one portfolio VaR run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub input: InputConfig,
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Trade file. Relative paths in a config file resolve against the
    /// directory containing that file.
    pub trades_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationConfig {
    pub confidence_level: f64,

    /// Additional confidence levels for a sweep. Empty means no sweep.
    #[serde(default)]
    pub sweep_levels: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Directory for `report.json` and `contributions.csv`. None skips export.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl RunConfig {
    /// Build a config directly from a trade file and a confidence level.
    pub fn new(trades_path: impl Into<PathBuf>, confidence_level: f64) -> Self {
        Self {
            input: InputConfig {
                trades_path: trades_path.into(),
            },
            calculation: CalculationConfig {
                confidence_level,
                sweep_levels: Vec::new(),
            },
            output: OutputConfig::default(),
        }
    }

    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every confidence level against `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_confidence_level(self.calculation.confidence_level).map_err(|source| {
            ConfigError::Invalid {
                field: "calculation.confidence_level",
                source,
            }
        })?;
        for &level in &self.calculation.sweep_levels {
            validate_confidence_level(level).map_err(|source| ConfigError::Invalid {
                field: "calculation.sweep_levels",
                source,
            })?;
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        if self.input.trades_path.is_relative() {
            self.input.trades_path = base.join(&self.input.trades_path);
        }
        if let Some(dir) = self.output.dir.as_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}
