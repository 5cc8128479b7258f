//! FeatureTable → Polars DataFrame → Parquet.
//!
//! The frame carries a `date` column (Polars `Date`) followed by every feature
//! column as `Float64`, in table order.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;

use super::DataError;
use crate::domain::FeatureTable;

/// Convert a feature table to a Polars DataFrame.
pub fn table_to_dataframe(table: &FeatureTable) -> Result<DataFrame, DataError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| DataError::Validation("invalid epoch date".into()))?;
    let days: Vec<i32> = table
        .dates()
        .iter()
        .map(|d| (*d - epoch).num_days() as i32)
        .collect();

    let mut columns = Vec::with_capacity(table.width() + 1);
    columns.push(
        Column::new("date".into(), days)
            .cast(&DataType::Date)
            .map_err(|e| DataError::Parquet(format!("date cast: {e}")))?,
    );
    for col in table.columns() {
        columns.push(Column::new(col.name.as_str().into(), col.values.clone()));
    }

    DataFrame::new(columns).map_err(|e| DataError::Parquet(format!("dataframe creation: {e}")))
}

/// Write a feature table to a Parquet file.
///
/// Writes go to `{path}.tmp` first and are renamed into place.
pub fn write_parquet(table: &FeatureTable, path: &Path) -> Result<(), DataError> {
    let mut df = table_to_dataframe(table)?;
    let tmp_path = path.with_extension("parquet.tmp");

    let file = fs::File::create(&tmp_path)
        .map_err(|e| DataError::Parquet(format!("create file: {e}")))?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .map_err(|e| DataError::Parquet(format!("write parquet: {e}")))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::Parquet(format!("atomic rename failed: {e}"))
    })
}
