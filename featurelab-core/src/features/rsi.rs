//! Momentum oscillator (`rsi_{k}`), bounded to [0, 100].

use super::FeatureStage;
use crate::domain::{FeatureTable, TableError, PRICE_COLUMN};
use crate::indicators::rsi;

#[derive(Debug, Clone)]
pub struct RsiStage {
    window: usize,
    epsilon: f64,
    name: String,
}

impl RsiStage {
    pub fn new(window: usize, epsilon: f64) -> Self {
        assert!(window >= 1, "RSI window must be >= 1");
        Self {
            window,
            epsilon,
            name: format!("rsi_{window}"),
        }
    }
}

impl FeatureStage for RsiStage {
    fn name(&self) -> &str {
        "rsi"
    }

    fn columns(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn warmup(&self) -> usize {
        self.window - 1
    }

    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError> {
        let price = table.require(PRICE_COLUMN)?;
        table.with_column(self.name.clone(), rsi(price, self.window, self.epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::price_table;

    #[test]
    fn rsi_14_warmup_and_range() {
        let prices: Vec<f64> = (0..40)
            .map(|i| 100.0 + 5.0 * (i as f64 * 0.9).sin())
            .collect();
        let stage = RsiStage::new(14, 1e-10);
        let table = stage.apply(&price_table(&prices)).unwrap();
        let col = table.column("rsi_14").unwrap();

        assert_eq!(stage.warmup(), 13);
        assert!(col[..13].iter().all(|v| v.is_nan()));
        for &v in &col[13..] {
            assert!(v > 0.0 && v < 100.0, "RSI out of range: {v}");
        }
    }
}
