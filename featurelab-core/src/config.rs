//! Feature pipeline parameters.
//!
//! One explicit value per pipeline run; nothing is read from process-wide
//! state, so concurrent per-ticker runs can each carry their own settings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::rsi::DEFAULT_EPSILON_GUARD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: usize,
        value: usize,
    },

    #[error("{field} contains {value} more than once")]
    DuplicateValue { field: &'static str, value: usize },

    #[error("macd_fast ({fast}) must be shorter than macd_slow ({slow})")]
    FastNotBelowSlow { fast: usize, slow: usize },

    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Window sizes, spans, offsets and guards for every feature stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Rolling-mean windows; one `ma_{k}` column each.
    pub ma_windows: Vec<usize>,
    /// Window of the return standard deviation (`volatility_{k}`).
    pub volatility_window: usize,
    /// Price lags; one `lag_{n}` column each.
    pub lag_offsets: Vec<usize>,
    pub rsi_window: usize,
    /// Added to the average loss before dividing.
    pub rsi_epsilon: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_window: usize,
    pub bollinger_multiplier: f64,
    /// Rows ahead the target price is taken from.
    pub target_horizon: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            ma_windows: vec![7, 21],
            volatility_window: 21,
            lag_offsets: vec![1, 2, 3, 7, 14],
            rsi_window: 14,
            rsi_epsilon: DEFAULT_EPSILON_GUARD,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_window: 20,
            bollinger_multiplier: 2.0,
            target_horizon: 1,
        }
    }
}

impl FeatureConfig {
    /// Parse from TOML. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for &w in &self.ma_windows {
            at_least("ma_windows", w, 1)?;
        }
        unique("ma_windows", &self.ma_windows)?;
        // Sample std needs two observations.
        at_least("volatility_window", self.volatility_window, 2)?;
        for &n in &self.lag_offsets {
            at_least("lag_offsets", n, 1)?;
        }
        unique("lag_offsets", &self.lag_offsets)?;
        at_least("rsi_window", self.rsi_window, 1)?;
        positive("rsi_epsilon", self.rsi_epsilon)?;
        at_least("macd_fast", self.macd_fast, 1)?;
        at_least("macd_slow", self.macd_slow, 1)?;
        at_least("macd_signal", self.macd_signal, 1)?;
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::FastNotBelowSlow {
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }
        at_least("bollinger_window", self.bollinger_window, 2)?;
        positive("bollinger_multiplier", self.bollinger_multiplier)?;
        at_least("target_horizon", self.target_horizon, 1)?;
        Ok(())
    }

    /// Deterministic BLAKE3 hash of this configuration.
    ///
    /// Two runs with equal configs share the hash, which the export manifest
    /// records next to each output file.
    pub fn config_hash(&self) -> Result<String, ConfigError> {
        let json = serde_json::to_vec(self)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }
}

fn at_least(field: &'static str, value: usize, min: usize) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::TooSmall { field, min, value });
    }
    Ok(())
}

fn unique(field: &'static str, values: &[usize]) -> Result<(), ConfigError> {
    for (i, v) in values.iter().enumerate() {
        if values[..i].contains(v) {
            return Err(ConfigError::DuplicateValue { field, value: *v });
        }
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}
