//! Feature table export: CSV, Parquet, and the run manifest.
//!
//! Each ticker gets one file `{ticker}.{csv|parquet}` in the output directory.
//! A `manifest.json` beside them records what was built: schema version,
//! feature config hash, row counts, date ranges and failures. Manifests with
//! an unknown (newer) schema version are rejected on load.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use featurelab_core::data::{write_parquet, DataError};
use featurelab_core::FeatureTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::OutputFormat;
use crate::data_loader::DataSource;

pub const SCHEMA_VERSION: u32 = 1;
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("parquet export: {0}")]
    Parquet(#[from] DataError),

    #[error("manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version {found} (max supported: {max})")]
    UnsupportedSchema { found: u32, max: u32 },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Render a feature table as CSV: a `date` column followed by every feature
/// column in table order. Undefined cells are written empty.
pub fn table_to_csv(table: &FeatureTable) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["date"];
    header.extend(table.column_names());
    wtr.write_record(&header)?;

    for i in 0..table.len() {
        let mut record = vec![table.dates()[i].to_string()];
        record.extend(table.columns().iter().map(|c| {
            let v = c.values[i];
            if v.is_nan() {
                String::new()
            } else {
                v.to_string()
            }
        }));
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Write one ticker's table into `dir`. Returns the path written.
pub fn write_table(
    table: &FeatureTable,
    dir: &Path,
    ticker: &str,
    format: OutputFormat,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    let path = dir.join(format!("{ticker}.{}", format.extension()));
    match format {
        OutputFormat::Csv => {
            let csv = table_to_csv(table)?;
            std::fs::write(&path, csv).map_err(io_err(&path))?;
        }
        OutputFormat::Parquet => write_parquet(table, &path)?,
    }
    Ok(path)
}

// ─── Manifest ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickerEntry {
    pub ticker: String,
    /// File name relative to the output directory.
    pub file: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// BLAKE3 of the input prices.
    pub dataset_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickerFailure {
    pub ticker: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub config_hash: String,
    pub source: DataSource,
    pub format: OutputFormat,
    pub columns: Vec<String>,
    pub tickers: Vec<TickerEntry>,
    #[serde(default)]
    pub failures: Vec<TickerFailure>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

pub fn write_manifest(manifest: &RunManifest, dir: &Path) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    let path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, json).map_err(io_err(&path))?;
    Ok(path)
}

/// Load `manifest.json` from an output directory, rejecting unknown schema versions.
pub fn load_manifest(dir: &Path) -> Result<RunManifest, ExportError> {
    let path = dir.join(MANIFEST_FILE);
    let json = std::fs::read_to_string(&path).map_err(io_err(&path))?;
    let manifest: RunManifest = serde_json::from_str(&json)?;
    if manifest.schema_version > SCHEMA_VERSION {
        return Err(ExportError::UnsupportedSchema {
            found: manifest.schema_version,
            max: SCHEMA_VERSION,
        });
    }
    Ok(manifest)
}
