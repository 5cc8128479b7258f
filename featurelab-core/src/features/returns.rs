//! Day-over-day percentage change of the price.

use super::FeatureStage;
use crate::domain::{FeatureTable, TableError, PRICE_COLUMN};
use crate::indicators::pct_change;

pub const RETURN_COLUMN: &str = "daily_return";

#[derive(Debug, Clone, Default)]
pub struct ReturnStage;

impl FeatureStage for ReturnStage {
    fn name(&self) -> &str {
        "returns"
    }

    fn columns(&self) -> Vec<String> {
        vec![RETURN_COLUMN.to_string()]
    }

    fn warmup(&self) -> usize {
        1
    }

    fn apply(&self, table: &FeatureTable) -> Result<FeatureTable, TableError> {
        let price = table.require(PRICE_COLUMN)?;
        table.with_column(RETURN_COLUMN, pct_change(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::price_table;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn two_point_return() {
        let table = ReturnStage.apply(&price_table(&[100.0, 102.0])).unwrap();
        let ret = table.column(RETURN_COLUMN).unwrap();
        assert!(ret[0].is_nan());
        assert_approx(ret[1], 0.02, DEFAULT_EPSILON);
    }

    #[test]
    fn missing_price_column_errors() {
        let table = FeatureTable::from_columns(vec![], vec![]).unwrap();
        assert_eq!(
            ReturnStage.apply(&table).unwrap_err(),
            TableError::MissingColumn(PRICE_COLUMN.into())
        );
    }
}
