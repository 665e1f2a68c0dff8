//! Categorical encoding.
//!
//! - [`one_hot`] expands Certificate into Boolean indicator columns
//! - [`LabelEncoder`] replaces Genre strings with integer codes

mod label;
mod one_hot;

pub use label::LabelEncoder;
pub use one_hot::one_hot;

use crate::dataset::{Dataset, columns};
use crate::error::Result;
use tracing::debug;

/// Expand Certificate into `Certificate_<value>` columns (appended, original
/// removed), then label-encode Genre when present.
///
/// Returns the encoded dataset and the fitted Genre encoder, if Genre was
/// encoded. The caller checks that Certificate exists.
pub fn encode_categoricals(dataset: Dataset) -> Result<(Dataset, Option<LabelEncoder>)> {
    let mut df = dataset.into_frame();

    let certificate = df
        .column(columns::CERTIFICATE)?
        .as_materialized_series()
        .clone();
    let indicators = one_hot(&certificate, columns::CERTIFICATE_PREFIX)?;
    let indicator_count = indicators.len();

    df = df.drop(columns::CERTIFICATE)?;
    for indicator in indicators {
        df.with_column(indicator)?;
    }
    debug!(
        "One-hot encoded '{}' into {} columns",
        columns::CERTIFICATE,
        indicator_count
    );

    let genre = df
        .column(columns::GENRE)
        .ok()
        .map(|col| col.as_materialized_series().clone());

    let genre_encoder = if let Some(genre) = genre {
        let mut encoder = LabelEncoder::new(columns::GENRE);
        let encoded = encoder.fit_transform_series(&genre)?;
        df.replace(columns::GENRE, encoded)?;
        debug!(
            "Label encoded '{}' into {} classes",
            columns::GENRE,
            encoder.len()
        );
        Some(encoder)
    } else {
        debug!("No '{}' column to label encode", columns::GENRE);
        None
    };

    Ok((Dataset::from(df), genre_encoder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use polars::prelude::*;

    #[test]
    fn test_encode_categoricals() {
        let dataset = Dataset::from(
            df![
                "Genre" => ["Drama", "Crime", "Drama"],
                "Certificate" => ["PG", "R", "PG"],
                "Runtime" => [100, 120, 90],
            ]
            .unwrap(),
        );

        let (encoded, encoder) = encode_categoricals(dataset).unwrap();

        assert_eq!(
            encoded.column_names(),
            vec!["Genre", "Runtime", "Certificate_PG", "Certificate_R"]
        );
        let genre: Vec<Option<i64>> = encoded
            .frame()
            .column("Genre")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(genre, vec![Some(0), Some(1), Some(0)]);

        let encoder = encoder.unwrap();
        assert_eq!(encoder.inverse_transform(1), Some("Crime"));
    }

    #[test]
    fn test_encode_without_genre_only_expands_certificate() {
        let dataset = Dataset::from(df!["Certificate" => ["U", "A"]].unwrap());

        let (encoded, encoder) = encode_categoricals(dataset).unwrap();
        assert!(encoder.is_none());
        assert_eq!(encoded.column_names(), vec!["Certificate_A", "Certificate_U"]);
    }
}
