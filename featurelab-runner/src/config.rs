//! Serializable run configuration.
//!
//! A `RunConfig` says where prices come from, which tickers to build, the date
//! window, and where and how to write the feature tables. The `[features]`
//! table is passed through to the core pipeline unchanged.
//!
//! ```toml
//! input = "data/prices.csv"
//! tickers = ["AAPL", "MSFT"]
//! start = "2020-01-01"
//! end = "2025-01-01"
//! output_dir = "output"
//! format = "parquet"
//!
//! [features]
//! ma_windows = [7, 21]
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use featurelab_core::FeatureConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TICKERS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no tickers configured")]
    NoTickers,

    #[error("ticker '{0}' listed more than once")]
    DuplicateTicker(String),

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("no input file configured and synthetic data is disabled")]
    NoInput,

    #[error("feature config: {0}")]
    Features(#[from] featurelab_core::ConfigError),

    #[error("unknown output format '{0}' (expected csv or parquet)")]
    UnknownFormat(String),
}

/// File format of the per-ticker feature tables.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Wide price CSV (`date,AAPL,MSFT,...`).
    pub input: Option<PathBuf>,

    /// Generate synthetic prices when `input` is unset or missing.
    pub synthetic: bool,

    pub tickers: Vec<String>,

    /// Inclusive start of the date window.
    pub start: Option<NaiveDate>,

    /// Inclusive end of the date window.
    pub end: Option<NaiveDate>,

    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub features: FeatureConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: None,
            synthetic: false,
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
            start: NaiveDate::from_ymd_opt(2020, 1, 1),
            end: NaiveDate::from_ymd_opt(2025, 1, 1),
            output_dir: PathBuf::from("output"),
            format: OutputFormat::Csv,
            features: FeatureConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::NoTickers);
        }
        let mut seen = HashSet::new();
        for ticker in &self.tickers {
            if !seen.insert(ticker.as_str()) {
                return Err(ConfigError::DuplicateTicker(ticker.clone()));
            }
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(ConfigError::InvalidDateRange { start, end });
            }
        }
        if self.input.is_none() && !self.synthetic {
            return Err(ConfigError::NoInput);
        }
        self.features.validate()?;
        Ok(())
    }
}
