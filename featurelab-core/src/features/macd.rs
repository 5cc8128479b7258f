//! MACD line and signal line.
//!
//! macd = EMA(price, fast) - EMA(price, slow)
//! macd_signal = EMA(macd, signal)
//!
//! All EMAs seed on the first observation, so both columns are defined from
//! row 0.

use super::FeatureStage;
use crate::domain::{FeatureTable, TableError, PRICE_COLUMN};
use crate::indicators::ewm_mean;

pub const MACD_COLUMN: &str = "macd";
pub const MACD_SIGNAL_COLUMN: &str = "macd_signal";

#[derive(Debug, Clone)]
pub struct MacdStage {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl MacdStage {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD spans must be >= 1");
        assert!(fast < slow, "MACD fast span must be shorter than slow span");
        Self { fast, slow, signal }
    }
}

impl FeatureStage for MacdStage {
    fn name(&self) -> &str {
        "macd"
    }

    fn columns(&self) -> Vec<String> {
        vec![MACD_COLUMN.to_string(), MACD_SIGNAL_COLUMN.to_string()]
    }

    fn warmup(&self) -> usize {
        0
    }

    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError> {
        let price = table.require(PRICE_COLUMN)?;
        let fast = ewm_mean(price, self.fast);
        let slow = ewm_mean(price, self.slow);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ewm_mean(&macd, self.signal);
        table.with_columns([
            (MACD_COLUMN.to_string(), macd),
            (MACD_SIGNAL_COLUMN.to_string(), signal),
        ])
    }
}
