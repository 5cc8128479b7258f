//! Price input and table output: CSV frames, synthetic data, Parquet export.

pub mod frame;
pub mod parquet;
pub mod synthetic;

pub use frame::PriceFrame;
pub use parquet::{table_to_dataframe, write_parquet};
pub use synthetic::synthetic_frame;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::SeriesError;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("first CSV column must be 'date'")]
    MissingDateColumn,

    #[error("row {row}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: invalid price '{value}' for {ticker}")]
    InvalidPrice {
        row: usize,
        ticker: String,
        value: String,
    },

    #[error("row {row}: date {date} is not after the previous row")]
    UnsortedDates { row: usize, date: NaiveDate },

    #[error("ticker '{0}' appears more than once")]
    DuplicateTicker(String),

    #[error("ticker '{0}' not found in price data")]
    UnknownTicker(String),

    #[error("invalid price series for {ticker}: {source}")]
    Series {
        ticker: String,
        #[source]
        source: SeriesError,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("parquet I/O error: {0}")]
    Parquet(String),
}
