//! Supervised label: the price `horizon` rows ahead (`target_next_close`).

use super::FeatureStage;
use crate::domain::{FeatureTable, TableError, PRICE_COLUMN};
use crate::indicators::lead;

pub const TARGET_COLUMN: &str = "target_next_close";

#[derive(Debug, Clone)]
pub struct TargetStage {
    horizon: usize,
}

impl TargetStage {
    pub fn new(horizon: usize) -> Self {
        assert!(horizon >= 1, "target horizon must be >= 1");
        Self { horizon }
    }
}

impl Default for TargetStage {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FeatureStage for TargetStage {
    fn name(&self) -> &str {
        "target"
    }

    fn columns(&self) -> Vec<String> {
        vec![TARGET_COLUMN.to_string()]
    }

    fn warmup(&self) -> usize {
        0
    }

    fn horizon(&self) -> usize {
        self.horizon
    }

    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError> {
        let price = table.require(PRICE_COLUMN)?;
        table.with_column(TARGET_COLUMN, lead(price, self.horizon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::price_table;

    #[test]
    fn next_close_with_single_trailing_nan() {
        let prices = [100.0, 102.0, 101.0, 105.0];
        let table = TargetStage::default().apply(&price_table(&prices)).unwrap();
        let target = table.column(TARGET_COLUMN).unwrap();

        assert_eq!(target.iter().filter(|v| v.is_nan()).count(), 1);
        assert!(target[3].is_nan());
        for i in 0..3 {
            assert_eq!(target[i], prices[i + 1]);
        }
    }

    #[test]
    fn single_row_target_undefined() {
        let table = TargetStage::default().apply(&price_table(&[100.0])).unwrap();
        assert!(table.column(TARGET_COLUMN).unwrap()[0].is_nan());
    }
}
