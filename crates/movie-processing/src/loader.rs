//! CSV loading with best-effort numeric coercion.

use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::utils::{numeric_ratio, parse_numeric_string};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Options controlling how the input table is read.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Convert numeric-looking string columns to Float64.
    pub coerce_numeric_strings: bool,
    /// Share of non-null values that must parse before a column is converted.
    pub numeric_coercion_threshold: f64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            coerce_numeric_strings: true,
            numeric_coercion_threshold: 0.9,
        }
    }
}

/// Load a comma-separated file with a header row.
///
/// Column types are inferred from the whole file, so a stray token late in
/// a numeric column turns the column into a string column instead of
/// aborting the load; numeric coercion then recovers it.
///
/// # Errors
///
/// Returns [`PipelineError::DataLoad`] if the path does not exist or the
/// content cannot be parsed as a delimited table.
pub fn load_csv(path: impl AsRef<Path>, options: LoadOptions) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::data_load(path, "file not found"));
    }

    info!("Loading dataset from: {}", path.display());

    let df = CsvReadOptions::default()
        .with_infer_schema_length(None)
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| PipelineError::data_load(path, e.to_string()))?;

    let df = if options.coerce_numeric_strings {
        coerce_numeric_columns(df, options.numeric_coercion_threshold)
            .map_err(|e| PipelineError::data_load(path, e.to_string()))?
    } else {
        df
    };

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(Dataset::from(df))
}

/// Convert String columns whose values are mostly numeric to Float64.
///
/// Values that do not parse become missing.
pub fn coerce_numeric_columns(mut df: DataFrame, threshold: f64) -> PolarsResult<DataFrame> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for col_name in &column_names {
        let series = df.column(col_name)?.as_materialized_series();
        if series.dtype() != &DataType::String {
            continue;
        }

        let ratio = numeric_ratio(series);
        if ratio == 0.0 || ratio < threshold {
            continue;
        }

        let values: Vec<Option<f64>> = series
            .str()?
            .into_iter()
            .map(|value| value.and_then(parse_numeric_string))
            .collect();
        let converted = Series::new(col_name.as_str().into(), values);

        df.replace(col_name, converted)?;
        debug!(
            "Converted '{}' from String to Float64 ({:.0}% parseable)",
            col_name,
            ratio * 100.0
        );
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_data_load_error() {
        let result = load_csv("definitely/not/here.csv", LoadOptions::default());
        let error = result.unwrap_err();
        assert!(error.is_data_load());
        assert!(error.to_string().contains("not/here.csv"));
    }

    #[test]
    fn test_coerce_numeric_columns() {
        let df = df![
            "Runtime" => [Some("142 min"), Some("175 min"), None],
            "Gross" => [Some("28,341,469"), Some("134,966,411"), Some("oops")],
            "Genre" => [Some("Drama"), Some("Crime"), Some("Action")],
        ]
        .unwrap();

        let df = coerce_numeric_columns(df, 0.6).unwrap();

        let runtime = df.column("Runtime").unwrap().f64().unwrap();
        assert_eq!(runtime.get(0), Some(142.0));
        assert_eq!(runtime.get(2), None);

        let gross = df.column("Gross").unwrap().f64().unwrap();
        assert_eq!(gross.get(1), Some(134966411.0));
        assert_eq!(gross.get(2), None);

        assert_eq!(df.column("Genre").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_coercion_respects_threshold() {
        let df = df![
            "Gross" => [Some("1,000"), Some("n/a"), Some("unknown")],
        ]
        .unwrap();

        let df = coerce_numeric_columns(df, 0.9).unwrap();
        assert_eq!(df.column("Gross").unwrap().dtype(), &DataType::String);
    }
}
