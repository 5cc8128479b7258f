//! Bollinger band width (`bb_width`).
//!
//! upper - lower = 2 * multiplier * std, kept as its own named feature.

use super::FeatureStage;
use crate::domain::{FeatureTable, TableError, PRICE_COLUMN};
use crate::indicators::BollingerBands;

pub const BB_WIDTH_COLUMN: &str = "bb_width";

#[derive(Debug, Clone)]
pub struct BollingerWidthStage {
    window: usize,
    multiplier: f64,
}

impl BollingerWidthStage {
    pub fn new(window: usize, multiplier: f64) -> Self {
        assert!(window >= 2, "Bollinger window must be >= 2");
        Self { window, multiplier }
    }
}

impl FeatureStage for BollingerWidthStage {
    fn name(&self) -> &str {
        "bollinger"
    }

    fn columns(&self) -> Vec<String> {
        vec![BB_WIDTH_COLUMN.to_string()]
    }

    fn warmup(&self) -> usize {
        self.window - 1
    }

    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError> {
        let price = table.require(PRICE_COLUMN)?;
        let bands = BollingerBands::compute(price, self.window, self.multiplier);
        table.with_column(BB_WIDTH_COLUMN, bands.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::price_table;
    use crate::indicators::{assert_approx, rolling_std, DEFAULT_EPSILON};

    #[test]
    fn width_is_four_sample_std() {
        let prices: Vec<f64> = (0..25).map(|i| 50.0 + (i % 5) as f64).collect();
        let table = BollingerWidthStage::new(20, 2.0)
            .apply(&price_table(&prices))
            .unwrap();
        let width = table.column(BB_WIDTH_COLUMN).unwrap();
        let std = rolling_std(&prices, 20);

        assert!(width[..19].iter().all(|v| v.is_nan()));
        for i in 19..25 {
            assert_approx(width[i], 4.0 * std[i], DEFAULT_EPSILON);
        }
    }
}
