//! Feature stages: the ordered transformations from price to feature table.
//!
//! Each stage reads columns already present in a `FeatureTable` and returns a
//! new table with its own columns appended. Stages never remove rows; the
//! completion filter at the end of the pipeline is the only step that does.
//!
//! # Look-ahead contamination guard
//! No feature value at row t may depend on prices from row t+1 or later. The
//! target stage is the single, deliberate exception: it reads ahead by its
//! horizon and reports that through [`FeatureStage::horizon`].

pub mod bollinger;
pub mod completion;
pub mod lags;
pub mod macd;
pub mod moving_average;
pub mod returns;
pub mod rsi;
pub mod target;
pub mod volatility;

pub use bollinger::BollingerWidthStage;
pub use completion::drop_incomplete;
pub use lags::LagStage;
pub use macd::MacdStage;
pub use moving_average::MovingAverageStage;
pub use returns::ReturnStage;
pub use rsi::RsiStage;
pub use target::TargetStage;
pub use volatility::VolatilityStage;

use crate::domain::{FeatureTable, TableError};

pub trait FeatureStage: Send + Sync {
    /// Short name used in logs (e.g., "returns", "macd").
    fn name(&self) -> &str;

    /// Columns this stage appends, in order.
    fn columns(&self) -> Vec<String>;

    /// Index of the first row at which every column of this stage is defined.
    fn warmup(&self) -> usize;

    /// Number of trailing rows this stage leaves undefined.
    fn horizon(&self) -> usize {
        0
    }

    /// Return a copy of `table` with this stage's columns appended.
    ///
    /// Fails only when a required input column is missing or one of the
    /// output names is already taken.
    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError>;
}

/// Test fixture: a table holding only the price column over consecutive days.
#[cfg(test)]
pub(crate) fn price_table(prices: &[f64]) -> FeatureTable {
    use crate::domain::PriceSeries;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates = (0..prices.len())
        .map(|i| base + chrono::Duration::days(i as i64))
        .collect();
    FeatureTable::from_series(&PriceSeries::from_parts(dates, prices.to_vec()).unwrap())
}
