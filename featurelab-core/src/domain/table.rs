//! FeatureTable: date-indexed, column-oriented numeric table.
//!
//! Columns only ever accumulate: every mutation returns a new table and leaves
//! the receiver untouched, so a caller can keep any intermediate table around.
//! Undefined values are `f64::NAN`.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::series::PriceSeries;

/// Name of the input price column every pipeline table starts with.
pub const PRICE_COLUMN: &str = "adj_close";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("column '{column}' has {actual} values, table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// A named numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureTable {
    dates: Vec<NaiveDate>,
    columns: Vec<FeatureColumn>,
}

impl FeatureTable {
    /// Seed a table with the price column of `series`.
    pub fn from_series(series: &PriceSeries) -> Self {
        Self {
            dates: series.dates().to_vec(),
            columns: vec![FeatureColumn {
                name: PRICE_COLUMN.to_string(),
                values: series.prices().to_vec(),
            }],
        }
    }

    /// Build a table from an index and a list of (name, values) columns.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, TableError> {
        let mut table = Self {
            dates,
            columns: Vec::with_capacity(columns.len()),
        };
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Like [`column`](Self::column), but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<&[f64], TableError> {
        self.column(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Return a copy of this table with `columns` appended, in order.
    pub fn with_columns(
        &self,
        columns: impl IntoIterator<Item = (String, Vec<f64>)>,
    ) -> Result<Self, TableError> {
        let mut next = self.clone();
        for (name, values) in columns {
            next.push_column(name, values)?;
        }
        Ok(next)
    }

    pub fn with_column(&self, name: impl Into<String>, values: Vec<f64>) -> Result<Self, TableError> {
        self.with_columns([(name.into(), values)])
    }

    fn push_column(&mut self, name: String, values: Vec<f64>) -> Result<(), TableError> {
        if values.len() != self.dates.len() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.dates.len(),
                actual: values.len(),
            });
        }
        if self.column(&name).is_some() {
            return Err(TableError::DuplicateColumn(name));
        }
        self.columns.push(FeatureColumn { name, values });
        Ok(())
    }

    /// All values of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<(NaiveDate, Vec<f64>)> {
        let date = *self.dates.get(index)?;
        Some((date, self.columns.iter().map(|c| c.values[index]).collect()))
    }

    /// True when row `index` has a NaN in any column.
    pub fn row_has_nan(&self, index: usize) -> bool {
        self.columns.iter().any(|c| c.values[index].is_nan())
    }

    /// Return a copy keeping only the rows for which `keep(index)` is true.
    pub fn retain_rows(&self, mut keep: impl FnMut(usize) -> bool) -> Self {
        let kept: Vec<usize> = (0..self.len()).filter(|&i| keep(i)).collect();
        Self {
            dates: kept.iter().map(|&i| self.dates[i]).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| FeatureColumn {
                    name: c.name.clone(),
                    values: kept.iter().map(|&i| c.values[i]).collect(),
                })
                .collect(),
        }
    }

    /// Count of NaN values per column, in column order.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.values.iter().filter(|v| v.is_nan()).count()))
            .collect()
    }

    /// Bit-level equality, NaN included.
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        self.dates == other.dates
            && self.columns.len() == other.columns.len()
            && self.columns.iter().zip(&other.columns).all(|(a, b)| {
                a.name == b.name
                    && a.values.len() == b.values.len()
                    && a.values
                        .iter()
                        .zip(&b.values)
                        .all(|(x, y)| x.to_bits() == y.to_bits())
            })
    }

    /// Shape, leading rows, and missing-value counts.
    pub fn summary(&self, head: usize) -> TableSummary {
        TableSummary {
            rows: self.len(),
            columns: self.column_names().iter().map(|s| s.to_string()).collect(),
            head: (0..head.min(self.len())).filter_map(|i| self.row(i)).collect(),
            missing: self.missing_counts(),
        }
    }
}

/// Human-readable overview of a table, printed by `featurelab inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub head: Vec<(NaiveDate, Vec<f64>)>,
    pub missing: Vec<(String, usize)>,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "shape: ({}, {})", self.rows, self.columns.len())?;
        writeln!(f)?;
        write!(f, "{:<12}", "date")?;
        for name in &self.columns {
            write!(f, " {name:>18}")?;
        }
        writeln!(f)?;
        for (date, values) in &self.head {
            write!(f, "{:<12}", date.to_string())?;
            for v in values {
                write!(f, " {v:>18.6}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(f, "missing values per column:")?;
        for (name, count) in &self.missing {
            writeln!(f, "  {name:<20} {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample() -> FeatureTable {
        let series =
            PriceSeries::from_parts(vec![day(2), day(3), day(4)], vec![10.0, 11.0, 12.0]).unwrap();
        FeatureTable::from_series(&series)
    }

    #[test]
    fn from_series_has_price_column() {
        let table = sample();
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names(), vec![PRICE_COLUMN]);
        assert_eq!(table.require(PRICE_COLUMN).unwrap(), &[10.0, 11.0, 12.0]);
    }

    #[test]
    fn with_column_leaves_input_untouched() {
        let table = sample();
        let next = table.with_column("x", vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(table.width(), 1);
        assert_eq!(next.width(), 2);
        assert_eq!(next.column("x").unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_duplicate_and_misaligned_columns() {
        let table = sample();
        assert_eq!(
            table.with_column(PRICE_COLUMN, vec![0.0; 3]).unwrap_err(),
            TableError::DuplicateColumn(PRICE_COLUMN.into())
        );
        assert!(matches!(
            table.with_column("short", vec![0.0; 2]),
            Err(TableError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn require_missing_column_errors() {
        assert_eq!(
            sample().require("nope").unwrap_err(),
            TableError::MissingColumn("nope".into())
        );
    }

    #[test]
    fn retain_rows_preserves_order() {
        let table = sample()
            .with_column("x", vec![f64::NAN, 2.0, 3.0])
            .unwrap();
        let kept = table.retain_rows(|i| !table.row_has_nan(i));
        assert_eq!(kept.dates(), &[day(3), day(4)]);
        assert_eq!(kept.column("x").unwrap(), &[2.0, 3.0]);
        assert_eq!(kept.row(0), Some((day(3), vec![11.0, 2.0])));
    }

    #[test]
    fn bitwise_eq_treats_nan_as_equal() {
        let a = sample().with_column("x", vec![f64::NAN, 1.0, 2.0]).unwrap();
        let b = sample().with_column("x", vec![f64::NAN, 1.0, 2.0]).unwrap();
        assert!(a.bitwise_eq(&b));
        let c = sample().with_column("x", vec![0.0, 1.0, 2.0]).unwrap();
        assert!(!a.bitwise_eq(&c));
    }

    #[test]
    fn summary_counts_missing() {
        let table = sample().with_column("x", vec![f64::NAN, f64::NAN, 1.0]).unwrap();
        let summary = table.summary(2);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.head.len(), 2);
        assert_eq!(
            summary.missing,
            vec![(PRICE_COLUMN.to_string(), 0), ("x".to_string(), 2)]
        );
        let rendered = summary.to_string();
        assert!(rendered.starts_with("shape: (3, 2)"));
    }
}
