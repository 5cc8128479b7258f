//! FeatureLab Core: price series in, supervised-learning feature table out.
//!
//! This crate contains the feature-engineering pipeline:
//! - Domain types (price series, column-oriented feature tables)
//! - Windowed-statistics kernels (rolling mean/std, EMA, RSI, Bollinger)
//! - Feature stages applied in a fixed order, each returning a new table
//! - Completion filter that drops rows with undefined values
//! - Explicit pipeline configuration (no global state)
//! - Price frame loading, synthetic data, and Parquet export

pub mod config;
pub mod data;
pub mod domain;
pub mod features;
pub mod indicators;
pub mod pipeline;

pub use config::{ConfigError, FeatureConfig};
pub use domain::{FeatureTable, PricePoint, PriceSeries, SeriesError, TableError, PRICE_COLUMN};
pub use pipeline::{build_feature_dataset, FeatureError, FeaturePipeline};
