//! Price frame resolution for the runner.
//!
//! Given a `RunConfig`, produces the price frame every ticker is cut from.
//! Fallback policy:
//! 1. If `input` is set and the file exists → read the wide CSV
//! 2. Otherwise, if `synthetic` is enabled → generate a synthetic frame (tagged)
//! 3. Otherwise → fail with a clear error
//!
//! The loaded frame is then clipped to the configured date window.

use std::path::PathBuf;

use chrono::NaiveDate;
use featurelab_core::data::{synthetic_frame, DataError, PriceFrame};
use featurelab_core::PriceSeries;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::RunConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file {0} not found (set synthetic = true for synthetic data)")]
    InputNotFound(PathBuf),

    #[error("no input file configured and synthetic data is disabled")]
    NoInput,

    #[error("synthetic data needs both a start and an end date")]
    SyntheticNeedsRange,

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Where the prices of a run came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Csv,
    Synthetic,
}

#[derive(Debug)]
pub struct LoadedFrame {
    pub frame: PriceFrame,
    pub source: DataSource,
}

pub fn load_frame(config: &RunConfig) -> Result<LoadedFrame, LoadError> {
    let (frame, source) = match &config.input {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "reading price CSV");
            (PriceFrame::from_csv_path(path)?, DataSource::Csv)
        }
        Some(path) if !config.synthetic => return Err(LoadError::InputNotFound(path.clone())),
        None if !config.synthetic => return Err(LoadError::NoInput),
        _ => {
            let (start, end) = synthetic_range(config.start, config.end)?;
            warn!(
                tickers = config.tickers.len(),
                "generating synthetic prices; output is tagged as synthetic"
            );
            (
                synthetic_frame(&config.tickers, start, end)?,
                DataSource::Synthetic,
            )
        }
    };

    let frame = frame.clip(config.start, config.end);
    info!(
        rows = frame.len(),
        tickers = frame.tickers().len(),
        source = ?source,
        "price frame ready"
    );
    Ok(LoadedFrame { frame, source })
}

fn synthetic_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), LoadError> {
    match (start, end) {
        (Some(s), Some(e)) => Ok((s, e)),
        _ => Err(LoadError::SyntheticNeedsRange),
    }
}

/// Deterministic BLAKE3 hash over a series' dates and prices.
pub fn series_hash(series: &PriceSeries) -> String {
    let mut hasher = blake3::Hasher::new();
    for point in series.iter() {
        hasher.update(point.date.to_string().as_bytes());
        hasher.update(&point.price.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
