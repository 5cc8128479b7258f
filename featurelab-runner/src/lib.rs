//! FeatureLab Runner: multi-ticker builds, export, and run manifests.
//!
//! This crate builds on `featurelab-core` to provide:
//! - Run configuration loaded from TOML
//! - Price frame loading with CSV/synthetic fallback
//! - Parallel per-ticker pipeline runs
//! - CSV and Parquet export plus a JSON run manifest

pub mod batch;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use batch::{build_ticker, run_batch, BatchResult, TickerError, TickerOutcome, TickerTable};
pub use config::{ConfigError, OutputFormat, RunConfig, DEFAULT_TICKERS};
pub use data_loader::{load_frame, series_hash, DataSource, LoadError, LoadedFrame};
pub use export::{
    load_manifest, table_to_csv, write_manifest, write_table, ExportError, RunManifest,
    TickerEntry, TickerFailure, SCHEMA_VERSION,
};
pub use runner::{run, run_on_frame, RunError, RunSummary};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
        assert_send::<OutputFormat>();
        assert_sync::<OutputFormat>();
    }

    #[test]
    fn batch_types_are_send() {
        assert_send::<TickerOutcome>();
        assert_send::<TickerTable>();
        assert_sync::<TickerTable>();
        assert_send::<TickerError>();
    }

    #[test]
    fn manifest_is_send_sync() {
        assert_send::<RunManifest>();
        assert_sync::<RunManifest>();
    }
}
