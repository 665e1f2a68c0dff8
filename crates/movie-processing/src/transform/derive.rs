//! Derived feature columns.

use crate::dataset::{Dataset, columns};
use crate::error::Result;
use polars::prelude::*;

/// Add `Popularity = No_of_Votes * IMDB_Rating` as a Float64 column.
///
/// The caller checks that both inputs exist. A missing input yields a
/// missing Popularity for that row.
pub fn derive_popularity(dataset: Dataset) -> Result<Dataset> {
    let df = dataset
        .into_frame()
        .lazy()
        .with_column(
            (col(columns::NO_OF_VOTES).cast(DataType::Float64)
                * col(columns::IMDB_RATING).cast(DataType::Float64))
            .alias(columns::POPULARITY),
        )
        .collect()?;
    Ok(Dataset::from(df))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popularity_is_product() {
        let dataset = Dataset::from(
            df![
                "No_of_Votes" => [Some(1000), Some(2000), None],
                "IMDB_Rating" => [Some(7.0), Some(9.0), Some(8.0)],
            ]
            .unwrap(),
        );

        let derived = derive_popularity(dataset).unwrap();
        assert_eq!(derived.width(), 3);

        let popularity: Vec<Option<f64>> = derived
            .frame()
            .column("Popularity")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(popularity, vec![Some(7000.0), Some(18000.0), None]);
    }
}
