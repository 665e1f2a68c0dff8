//! The table abstraction passed between pipeline stages.
//!
//! [`Dataset`] owns a polars [`DataFrame`]. Stages take a `Dataset` by value
//! and return the transformed one, so destructive reshapes (aggregation in
//! particular) are visible at every call site.

use polars::prelude::*;

/// Column names the pipeline knows about.
pub mod columns {
    pub const GENRE: &str = "Genre";
    pub const RUNTIME: &str = "Runtime";
    pub const YEAR: &str = "Year";
    pub const DIRECTOR: &str = "Director";
    pub const IMDB_RATING: &str = "IMDB_Rating";
    pub const NO_OF_VOTES: &str = "No_of_Votes";
    pub const GROSS: &str = "Gross";
    pub const CERTIFICATE: &str = "Certificate";

    /// Added by feature derivation.
    pub const POPULARITY: &str = "Popularity";
    /// Added by rating discretization.
    pub const IMDB_RATING_DISCRETIZED: &str = "IMDB_Rating_Discretized";
    /// Prefix of the one-hot columns produced from [`CERTIFICATE`].
    pub const CERTIFICATE_PREFIX: &str = "Certificate";
}

/// An ordered collection of film records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Borrow the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consume the dataset and return the underlying frame.
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame
            .get_column_names()
            .iter()
            .any(|col| col.as_str() == name)
    }

    /// The subset of `required` that is absent, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Total number of missing cells.
    pub fn null_count(&self) -> usize {
        self.frame
            .get_columns()
            .iter()
            .map(|col| col.null_count())
            .sum()
    }
}

impl From<DataFrame> for Dataset {
    fn from(frame: DataFrame) -> Self {
        Self { frame }
    }
}

impl From<Dataset> for DataFrame {
    fn from(dataset: Dataset) -> Self {
        dataset.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_preserves_request_order() {
        let dataset = Dataset::from(
            df![
                "Genre" => ["Drama"],
                "Runtime" => [120],
            ]
            .unwrap(),
        );

        assert!(dataset.has_column(columns::GENRE));
        assert_eq!(
            dataset.missing_columns(&[columns::YEAR, columns::GENRE, columns::DIRECTOR]),
            vec!["Year".to_string(), "Director".to_string()]
        );
        assert!(dataset.missing_columns(&[]).is_empty());
    }

    #[test]
    fn test_shape_and_null_count() {
        let dataset = Dataset::from(
            df![
                "a" => [Some(1.0), None, Some(3.0)],
                "b" => [Some("x"), Some("y"), None],
            ]
            .unwrap(),
        );

        assert_eq!(dataset.shape(), (3, 2));
        assert_eq!(dataset.null_count(), 2);
        assert_eq!(dataset.column_names(), vec!["a", "b"]);
    }
}
