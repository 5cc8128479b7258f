//! Short- and medium-window rolling means of the price (`ma_{k}`).

use super::FeatureStage;
use crate::domain::{FeatureTable, TableError, PRICE_COLUMN};
use crate::indicators::rolling_mean;

#[derive(Debug, Clone)]
pub struct MovingAverageStage {
    windows: Vec<usize>,
}

impl MovingAverageStage {
    pub fn new(windows: Vec<usize>) -> Self {
        assert!(
            windows.iter().all(|&w| w >= 1),
            "moving average windows must be >= 1"
        );
        Self { windows }
    }
}

impl FeatureStage for MovingAverageStage {
    fn name(&self) -> &str {
        "moving_average"
    }

    fn columns(&self) -> Vec<String> {
        self.windows.iter().map(|w| format!("ma_{w}")).collect()
    }

    fn warmup(&self) -> usize {
        self.windows
            .iter()
            .map(|w| w.saturating_sub(1))
            .max()
            .unwrap_or(0)
    }

    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError> {
        let price = table.require(PRICE_COLUMN)?;
        let added = self
            .columns()
            .into_iter()
            .zip(&self.windows)
            .map(|(name, &w)| (name, rolling_mean(price, w)));
        table.with_columns(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::price_table;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ma_7_over_thirty_points() {
        let mut prices = vec![10.0, 11.0, 12.0, 9.0, 10.0, 10.0, 11.0, 12.0, 13.0, 14.0];
        prices.extend((15..=34).map(f64::from));
        assert_eq!(prices.len(), 30);

        let table = MovingAverageStage::new(vec![7, 21])
            .apply(&price_table(&prices))
            .unwrap();
        let ma_7 = table.column("ma_7").unwrap();
        for v in &ma_7[..6] {
            assert!(v.is_nan());
        }
        let expected = prices[..7].iter().sum::<f64>() / 7.0;
        assert_approx(ma_7[6], expected, DEFAULT_EPSILON);
        assert_eq!(ma_7.iter().filter(|v| !v.is_nan()).count(), 30 - 7 + 1);

        let ma_21 = table.column("ma_21").unwrap();
        assert!(ma_21[19].is_nan());
        assert!(!ma_21[20].is_nan());
    }

    #[test]
    fn columns_follow_window_order() {
        let stage = MovingAverageStage::new(vec![21, 7]);
        assert_eq!(stage.columns(), vec!["ma_21", "ma_7"]);
        assert_eq!(stage.warmup(), 20);
    }

    #[test]
    fn no_windows_adds_nothing() {
        let stage = MovingAverageStage::new(vec![]);
        let table = stage.apply(&price_table(&[1.0, 2.0])).unwrap();
        assert_eq!(table.width(), 1);
        assert_eq!(stage.warmup(), 0);
    }
}
