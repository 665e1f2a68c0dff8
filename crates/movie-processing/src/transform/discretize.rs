//! Rating buckets.

use crate::dataset::{Dataset, columns};
use crate::error::Result;
use polars::prelude::*;

/// Right-closed bucket edges and labels: (0,5], (5,8], (8,10].
pub const RATING_BINS: [(f64, f64, &str); 3] = [
    (0.0, 5.0, "Low"),
    (5.0, 8.0, "Medium"),
    (8.0, 10.0, "High"),
];

/// Label for a single rating, or `None` outside (0, 10].
pub fn rating_label(rating: f64) -> Option<&'static str> {
    RATING_BINS
        .iter()
        .find(|(low, high, _)| rating > *low && rating <= *high)
        .map(|(_, _, label)| *label)
}

/// Add `IMDB_Rating_Discretized` holding the bucket label of each rating.
///
/// The caller checks that IMDB_Rating exists.
pub fn discretize_ratings(dataset: Dataset) -> Result<Dataset> {
    let mut df = dataset.into_frame();

    let ratings = df
        .column(columns::IMDB_RATING)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let labels: Vec<Option<&str>> = ratings
        .f64()?
        .into_iter()
        .map(|rating| rating.and_then(rating_label))
        .collect();

    df.with_column(Series::new(columns::IMDB_RATING_DISCRETIZED.into(), labels))?;
    Ok(Dataset::from(df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rating_label_edges() {
        assert_eq!(rating_label(0.0), None);
        assert_eq!(rating_label(0.1), Some("Low"));
        assert_eq!(rating_label(5.0), Some("Low"));
        assert_eq!(rating_label(5.01), Some("Medium"));
        assert_eq!(rating_label(8.0), Some("Medium"));
        assert_eq!(rating_label(10.0), Some("High"));
        assert_eq!(rating_label(10.5), None);
        assert_eq!(rating_label(-1.0), None);
    }

    #[test]
    fn test_discretize_ratings() {
        let dataset = Dataset::from(
            df![
                "IMDB_Rating" => [Some(4.0), Some(6.5), Some(9.0), None, Some(0.0)],
            ]
            .unwrap(),
        );

        let result = discretize_ratings(dataset).unwrap();
        let labels: Vec<Option<&str>> = result
            .frame()
            .column("IMDB_Rating_Discretized")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(labels, vec![Some("Low"), Some("Medium"), Some("High"), None, None]);
    }
}
