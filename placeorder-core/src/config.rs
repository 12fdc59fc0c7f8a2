//! Form configuration: take-profit limits, currencies, per-field mask options.
//!
//! Loaded from TOML; every table and key is optional and falls back to the
//! defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mask::MaskOptions;

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rules the tranche engine and validator work against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeProfitLimits {
    /// Maximum number of profit targets.
    pub max_rows: usize,
    /// Profit distance between consecutive added rows, and the first row's profit.
    pub profit_step: f64,
    /// Smallest accepted profit per row, in percent.
    pub min_profit: f64,
    /// Upper bound on the summed profit of all rows, in percent.
    pub max_profit_sum: f64,
    /// Allocations must add up to this.
    pub allocation_total: f64,
}

impl Default for TakeProfitLimits {
    fn default() -> Self {
        Self {
            max_rows: 5,
            profit_step: 2.0,
            min_profit: 0.01,
            max_profit_sum: 500.0,
            allocation_total: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub base: String,
    pub quote: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base: "BTC".into(),
            quote: "USDT".into(),
        }
    }
}

/// Mask options for every numeric field of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub price: MaskOptions,
    pub amount: MaskOptions,
    pub total: MaskOptions,
    pub profit: MaskOptions,
    pub allocation: MaskOptions,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            price: MaskOptions::default().with_min(0.0).with_decimal_scale(2),
            amount: MaskOptions::default().with_min(0.0).with_decimal_scale(6),
            total: MaskOptions::default().with_min(0.0).with_decimal_scale(2),
            profit: MaskOptions::default()
                .with_min(0.0)
                .with_decimal_scale(2)
                .with_suffix("%"),
            allocation: MaskOptions::default()
                .with_min(0.0)
                .with_max(100.0)
                .with_decimal_scale(2)
                .with_suffix("%"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub take_profit: TakeProfitLimits,
    pub currency: CurrencyConfig,
    pub fields: FieldsConfig,
}

impl FormConfig {
    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.check()?;
        Ok(config)
    }

    /// `<config_dir>/placeorder/config.toml`, or `./config.toml` when the
    /// platform has no config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("placeorder"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let tp = &self.take_profit;
        if tp.max_rows == 0 {
            return Err(ConfigError::Invalid("take_profit.max_rows must be at least 1".into()));
        }
        if !(tp.profit_step > 0.0) {
            return Err(ConfigError::Invalid("take_profit.profit_step must be positive".into()));
        }
        if !(tp.allocation_total > 0.0) {
            return Err(ConfigError::Invalid(
                "take_profit.allocation_total must be positive".into(),
            ));
        }
        Ok(())
    }
}
