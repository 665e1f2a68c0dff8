//! Row ordering.

use crate::dataset::Dataset;
use crate::error::Result;
use polars::prelude::*;

/// Reorder rows by `by`. Stable; missing values go last in either direction.
///
/// The caller checks that `by` exists.
pub fn sort_rows(dataset: Dataset, by: &str, ascending: bool) -> Result<Dataset> {
    let df = dataset.into_frame().sort(
        [by],
        SortMultipleOptions::default()
            .with_order_descending(!ascending)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?;
    Ok(Dataset::from(df))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(dataset: &Dataset) -> Vec<Option<f64>> {
        dataset
            .frame()
            .column("IMDB_Rating")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_descending_with_nulls_last() {
        let dataset = Dataset::from(
            df![
                "IMDB_Rating" => [Some(7.5), None, Some(9.3), Some(8.1)],
            ]
            .unwrap(),
        );

        let sorted = sort_rows(dataset, "IMDB_Rating", false).unwrap();
        assert_eq!(ratings(&sorted), vec![Some(9.3), Some(8.1), Some(7.5), None]);
    }

    #[test]
    fn test_ascending_is_stable() {
        let dataset = Dataset::from(
            df![
                "IMDB_Rating" => [8.0, 7.0, 8.0],
                "Title" => ["first", "second", "third"],
            ]
            .unwrap(),
        );

        let sorted = sort_rows(dataset, "IMDB_Rating", true).unwrap();
        let titles: Vec<&str> = sorted
            .frame()
            .column("Title")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(titles, vec!["second", "first", "third"]);
    }
}
