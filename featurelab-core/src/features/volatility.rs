//! Rolling sample standard deviation of daily returns (`volatility_{k}`).
//!
//! Reads the `daily_return` column, so it must run after `ReturnStage`.
//! Returns start at row 1, so k returns are first available at row k.

use super::returns::RETURN_COLUMN;
use super::FeatureStage;
use crate::domain::{FeatureTable, TableError};
use crate::indicators::rolling_std;

#[derive(Debug, Clone)]
pub struct VolatilityStage {
    window: usize,
    name: String,
}

impl VolatilityStage {
    pub fn new(window: usize) -> Self {
        assert!(window >= 2, "volatility window must be >= 2");
        Self {
            window,
            name: format!("volatility_{window}"),
        }
    }
}

impl FeatureStage for VolatilityStage {
    fn name(&self) -> &str {
        "volatility"
    }

    fn columns(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn warmup(&self) -> usize {
        self.window
    }

    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError> {
        let returns = table.require(RETURN_COLUMN)?;
        table.with_column(self.name.clone(), rolling_std(returns, self.window))
    }
}
