//! Group-by aggregation of runtimes per (Director, Genre).

use crate::dataset::{Dataset, columns};
use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Replace the dataset with one row per distinct (Director, Genre) pair and
/// the summed Runtime of that pair. All other columns are discarded.
///
/// Rows missing Director or Genre belong to no group. Missing runtimes are
/// ignored by the sum. Groups are ordered by Director, then Genre.
pub fn aggregate_runtime(dataset: Dataset) -> Result<Dataset> {
    let rows_before = dataset.height();

    let df = dataset
        .into_frame()
        .lazy()
        .filter(
            col(columns::DIRECTOR)
                .is_not_null()
                .and(col(columns::GENRE).is_not_null()),
        )
        .group_by([col(columns::DIRECTOR), col(columns::GENRE)])
        .agg([col(columns::RUNTIME).sum()])
        .sort(
            [columns::DIRECTOR, columns::GENRE],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    debug!(
        "Aggregated {} rows into {} (Director, Genre) groups",
        rows_before,
        df.height()
    );

    Ok(Dataset::from(df))
}
