//! Past prices as current-row features: `lag_{n}[i] = price[i - n]`.

use super::FeatureStage;
use crate::domain::{FeatureTable, TableError, PRICE_COLUMN};
use crate::indicators::lag;

#[derive(Debug, Clone)]
pub struct LagStage {
    offsets: Vec<usize>,
}

impl LagStage {
    pub fn new(offsets: Vec<usize>) -> Self {
        assert!(offsets.iter().all(|&n| n >= 1), "lag offsets must be >= 1");
        Self { offsets }
    }
}

impl FeatureStage for LagStage {
    fn name(&self) -> &str {
        "lags"
    }

    fn columns(&self) -> Vec<String> {
        self.offsets.iter().map(|n| format!("lag_{n}")).collect()
    }

    fn warmup(&self) -> usize {
        self.offsets.iter().copied().max().unwrap_or(0)
    }

    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError> {
        let price = table.require(PRICE_COLUMN)?;
        let added = self
            .columns()
            .into_iter()
            .zip(&self.offsets)
            .map(|(name, &n)| (name, lag(price, n)));
        table.with_columns(added)
    }
}
