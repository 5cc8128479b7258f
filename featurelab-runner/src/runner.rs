//! End-to-end run: load prices, build every ticker, write tables and manifest.

use std::path::PathBuf;

use chrono::Utc;
use featurelab_core::{FeatureError, FeaturePipeline};
use thiserror::Error;
use tracing::info;

use crate::batch::{run_batch, BatchResult};
use crate::config::{ConfigError, RunConfig};
use crate::data_loader::{load_frame, LoadError, LoadedFrame};
use crate::export::{
    write_manifest, write_table, ExportError, RunManifest, TickerEntry, TickerFailure,
    SCHEMA_VERSION,
};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("pipeline error: {0}")]
    Feature(#[from] FeatureError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error("every ticker failed ({0} requested)")]
    AllTickersFailed(usize),
}

#[derive(Debug)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: RunManifest,
}

/// Run a full build from a `RunConfig`.
///
/// This is the high-level entry point used by the CLI. For a frame that is
/// already loaded, use `run_on_frame()` instead.
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    config.validate()?;
    let loaded = load_frame(config)?;
    run_on_frame(config, &loaded)
}

pub fn run_on_frame(config: &RunConfig, loaded: &LoadedFrame) -> Result<RunSummary, RunError> {
    let pipeline = FeaturePipeline::new(&config.features).map_err(FeatureError::from)?;
    let batch = run_batch(&loaded.frame, &config.tickers, &pipeline);
    if batch.success_count() == 0 {
        return Err(RunError::AllTickersFailed(config.tickers.len()));
    }

    let tickers = write_tables(config, &batch)?;
    let failures = batch
        .failed()
        .map(|(ticker, e)| TickerFailure {
            ticker: ticker.to_string(),
            error: e.to_string(),
        })
        .collect();

    let manifest = RunManifest {
        schema_version: SCHEMA_VERSION,
        created_at: Utc::now(),
        config_hash: config
            .features
            .config_hash()
            .map_err(FeatureError::from)?,
        source: loaded.source,
        format: config.format,
        columns: pipeline.columns(),
        tickers,
        failures,
    };
    let manifest_path = write_manifest(&manifest, &config.output_dir)?;

    info!(
        succeeded = batch.success_count(),
        failed = batch.failure_count(),
        output_dir = %config.output_dir.display(),
        "run complete"
    );

    Ok(RunSummary {
        output_dir: config.output_dir.clone(),
        manifest_path,
        manifest,
    })
}

fn write_tables(config: &RunConfig, batch: &BatchResult) -> Result<Vec<TickerEntry>, ExportError> {
    batch
        .succeeded()
        .map(|built| {
            let path = write_table(&built.table, &config.output_dir, &built.ticker, config.format)?;
            Ok(TickerEntry {
                ticker: built.ticker.clone(),
                file: path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                rows_in: built.rows_in,
                rows_out: built.table.len(),
                first_date: built.table.dates().first().copied(),
                last_date: built.table.dates().last().copied(),
                dataset_hash: built.dataset_hash.clone(),
            })
        })
        .collect()
}
