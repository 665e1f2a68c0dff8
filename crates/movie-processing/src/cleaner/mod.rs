//! Data cleaning.
//!
//! This module provides:
//! - Removal of rows that exactly duplicate an earlier row
//! - Forward-fill of missing values within each column
//!
//! Filling can turn two distinct rows into copies of each other, so the
//! duplicate pass runs again after filling. This keeps [`clean`] idempotent.

use crate::dataset::Dataset;
use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Remove exact duplicate rows, then forward-fill every column.
///
/// The first occurrence of a duplicated row is kept and row order is
/// preserved. A value missing in the first row of a column stays missing.
///
/// A third pass removes rows that only became duplicates through filling.
/// The result can therefore have fewer rows than a plain dedup-then-fill,
/// and running `clean` twice yields the same table as running it once.
pub fn clean(dataset: Dataset) -> Result<Dataset> {
    let df = remove_duplicates(dataset.into_frame())?;
    let df = forward_fill(df)?;
    let df = remove_duplicates(df)?;
    Ok(Dataset::from(df))
}

/// Drop rows identical (across all columns) to an earlier row.
pub fn remove_duplicates(df: DataFrame) -> Result<DataFrame> {
    let before = df.height();
    if df.width() == 0 {
        return Ok(df);
    }

    let df = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;

    let removed = before - df.height();
    if removed > 0 {
        let pct = (removed as f64 / before as f64) * 100.0;
        debug!("Removed {} duplicate rows ({:.1}%)", removed, pct);
    } else {
        debug!("No duplicate rows found");
    }

    Ok(df)
}

/// Replace each missing value with the nearest preceding non-missing value.
pub fn forward_fill(mut df: DataFrame) -> Result<DataFrame> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for col_name in column_names {
        let column = df.column(&col_name)?;
        let missing = column.null_count();
        if missing == 0 {
            continue;
        }

        let filled = column
            .as_materialized_series()
            .fill_null(FillNullStrategy::Forward(None))?;
        let remaining = filled.null_count();
        df.replace(&col_name, filled)?;

        debug!(
            "Forward fill '{}': {} values",
            col_name,
            missing - remaining
        );
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_remove_duplicates_keeps_first_and_order() {
        let df = df![
            "Director" => ["B", "A", "B", "C", "A"],
            "Runtime" => [90, 100, 90, 80, 101],
        ]
        .unwrap();

        let df = remove_duplicates(df).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(
            strings(&df, "Director"),
            vec![
                Some("B".to_string()),
                Some("A".to_string()),
                Some("C".to_string()),
                Some("A".to_string())
            ]
        );
    }

    #[test]
    fn test_forward_fill_leaves_leading_nulls() {
        let df = df![
            "Certificate" => [None, Some("PG"), None, None, Some("R")],
            "Gross" => [Some(1.0), None, Some(3.0), None, None],
        ]
        .unwrap();

        let df = forward_fill(df).unwrap();

        assert_eq!(
            strings(&df, "Certificate"),
            vec![
                None,
                Some("PG".to_string()),
                Some("PG".to_string()),
                Some("PG".to_string()),
                Some("R".to_string())
            ]
        );
        let gross: Vec<Option<f64>> = df.column("Gross").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(gross, vec![Some(1.0), Some(1.0), Some(3.0), Some(3.0), Some(3.0)]);
    }

    #[test]
    fn test_clean_collapses_rows_duplicated_by_filling() {
        let dataset = Dataset::from(
            df![
                "Director" => [Some("A"), None, Some("B")],
                "Genre" => [Some("Drama"), Some("Drama"), Some("Drama")],
            ]
            .unwrap(),
        );

        let cleaned = clean(dataset).unwrap();
        assert_eq!(cleaned.height(), 2);
        assert_eq!(cleaned.null_count(), 0);
        assert_eq!(
            strings(cleaned.frame(), "Director"),
            vec![Some("A".to_string()), Some("B".to_string())]
        );
    }

    #[test]
    fn test_clean_is_idempotent() {
        let dataset = Dataset::from(
            df![
                "Director" => [Some("A"), Some("A"), None, Some("B")],
                "Rating" => [Some(7.0), Some(7.0), Some(8.0), None],
            ]
            .unwrap(),
        );

        let once = clean(dataset).unwrap();
        let twice = clean(once.clone()).unwrap();
        assert!(once.frame().equals_missing(twice.frame()));
    }

    #[test]
    fn test_clean_empty_frame() {
        let cleaned = clean(Dataset::from(DataFrame::empty())).unwrap();
        assert_eq!(cleaned.height(), 0);
    }
}
