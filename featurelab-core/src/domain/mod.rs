//! Domain types for FeatureLab

pub mod series;
pub mod table;

pub use series::{PricePoint, PriceSeries, SeriesError};
pub use table::{FeatureColumn, FeatureTable, TableError, TableSummary, PRICE_COLUMN};
