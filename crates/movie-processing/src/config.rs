//! Configuration types for the movie processing pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the fixed batch run: read `imdb_top_1000.csv`,
//! no filtering, sort by `IMDB_Rating` descending, clip `Gross` and
//! `IMDB_Rating`, write `processed_data.csv`.

use crate::dataset::columns;
use crate::filter::FilterCriteria;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default input file read by the batch run.
pub const DEFAULT_INPUT_PATH: &str = "imdb_top_1000.csv";

/// Default output file written by the batch run.
pub const DEFAULT_OUTPUT_PATH: &str = "processed_data.csv";

/// Serialization format for the processed dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Whitespace-aligned text table
    Txt,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "txt" => Ok(Self::Txt),
            other => Err(format!("unsupported output format '{}'", other)),
        }
    }
}

/// Configuration for the processing pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use movie_processing::config::{OutputFormat, PipelineConfig};
///
/// let config = PipelineConfig::builder()
///     .output_path("top_dramas.txt")
///     .output_format(OutputFormat::Txt)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Delimited input file.
    /// Default: "imdb_top_1000.csv"
    pub input_path: PathBuf,

    /// Destination of the processed dataset.
    /// Default: "processed_data.csv"
    pub output_path: PathBuf,

    /// Format used when writing the processed dataset.
    /// Default: Csv
    pub output_format: OutputFormat,

    /// Row predicates applied by the filtering stage.
    /// Default: no predicates (pass-through)
    pub filter: FilterCriteria,

    /// Column the sorting stage orders by.
    /// Default: "IMDB_Rating"
    pub sort_by: String,

    /// Sort direction.
    /// Default: false (descending)
    pub sort_ascending: bool,

    /// Whether the loader converts numeric-looking string columns
    /// (e.g. "142 min", "28,341,469") to Float64.
    /// Default: true
    pub coerce_numeric_strings: bool,

    /// Minimum share (0.0 - 1.0) of non-null values that must parse as
    /// numbers before a string column is converted.
    /// Default: 0.9
    pub numeric_coercion_threshold: f64,

    /// Columns whose values are clipped to the IQR fences.
    /// Default: ["Gross", "IMDB_Rating"]
    pub outlier_columns: Vec<String>,

    /// Multiplier applied to the IQR when computing the fences.
    /// Default: 1.5
    pub iqr_multiplier: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            output_format: OutputFormat::default(),
            filter: FilterCriteria::default(),
            sort_by: columns::IMDB_RATING.to_string(),
            sort_ascending: false,
            coerce_numeric_strings: true,
            numeric_coercion_threshold: 0.9,
            outlier_columns: default_outlier_columns(),
            iqr_multiplier: 1.5,
        }
    }
}

fn default_outlier_columns() -> Vec<String> {
    vec![columns::GROSS.to_string(), columns::IMDB_RATING.to_string()]
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.numeric_coercion_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "numeric_coercion_threshold".to_string(),
                value: self.numeric_coercion_threshold,
            });
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        if self.sort_by.trim().is_empty() {
            return Err(ConfigValidationError::EmptySortColumn);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid IQR multiplier: {0} (must be finite and non-negative)")]
    InvalidIqrMultiplier(f64),

    #[error("Sort column must not be empty")]
    EmptySortColumn,
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    output_format: Option<OutputFormat>,
    filter: Option<FilterCriteria>,
    sort_by: Option<String>,
    sort_ascending: Option<bool>,
    coerce_numeric_strings: Option<bool>,
    numeric_coercion_threshold: Option<f64>,
    outlier_columns: Option<Vec<String>>,
    iqr_multiplier: Option<f64>,
}

impl PipelineConfigBuilder {
    /// Set the delimited input file.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the destination of the processed dataset.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Set the predicates applied by the filtering stage of [`start`].
    ///
    /// [`start`]: crate::DataProcessor::start
    pub fn filter(mut self, filter: FilterCriteria) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the sort column and direction.
    pub fn sort(mut self, by: impl Into<String>, ascending: bool) -> Self {
        self.sort_by = Some(by.into());
        self.sort_ascending = Some(ascending);
        self
    }

    /// Enable or disable numeric-string coercion on load.
    pub fn coerce_numeric_strings(mut self, enable: bool) -> Self {
        self.coerce_numeric_strings = Some(enable);
        self
    }

    /// Set the share of parseable values required for coercion.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.9 = 90%)
    pub fn numeric_coercion_threshold(mut self, threshold: f64) -> Self {
        self.numeric_coercion_threshold = Some(threshold);
        self
    }

    /// Set the columns clipped by the outlier stage.
    pub fn outlier_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outlier_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            input_path: self
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
            output_path: self
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            output_format: self.output_format.unwrap_or_default(),
            filter: self.filter.unwrap_or_default(),
            sort_by: self
                .sort_by
                .unwrap_or_else(|| columns::IMDB_RATING.to_string()),
            sort_ascending: self.sort_ascending.unwrap_or(false),
            coerce_numeric_strings: self.coerce_numeric_strings.unwrap_or(true),
            numeric_coercion_threshold: self.numeric_coercion_threshold.unwrap_or(0.9),
            outlier_columns: self.outlier_columns.unwrap_or_else(default_outlier_columns),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(1.5),
        };

        config.validate()?;
        Ok(config)
    }
}
