//! Completion filter: keep only rows where every column is defined.
//!
//! Runs after all stages. Dropping rows any earlier would shorten the history
//! that later windows see.

use tracing::debug;

use crate::domain::FeatureTable;

pub fn drop_incomplete(table: &FeatureTable) -> FeatureTable {
    let complete = table.retain_rows(|i| !table.row_has_nan(i));
    debug!(
        rows_in = table.len(),
        rows_out = complete.len(),
        "dropped incomplete rows"
    );
    complete
}
