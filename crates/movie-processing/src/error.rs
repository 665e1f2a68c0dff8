//! Custom error types for the movie processing pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Only two
//! classes of failure stop a run: the input cannot be loaded, or an active
//! filter references a column the dataset does not have. Every other stage
//! reports missing columns and skips itself instead of failing.
//!
//! Errors are serializable so the CLI can emit them alongside JSON reports.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the processing pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input file is missing or could not be parsed as a delimited table.
    #[error("Failed to load dataset from '{path}': {reason}")]
    DataLoad { path: String, reason: String },

    /// A stage that cannot degrade gracefully references absent columns.
    #[error("Stage '{stage}' requires missing column(s): {}", .columns.join(", "))]
    ColumnMissing { stage: String, columns: Vec<String> },

    /// A value was not seen while fitting an encoder.
    #[error("Unknown category '{value}' for column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    /// Build a load error for `path`.
    pub fn data_load(path: impl AsRef<std::path::Path>, reason: impl Into<String>) -> Self {
        PipelineError::DataLoad {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PipelineError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for callers that branch on the failure kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DataLoad { .. } => "DATA_LOAD_ERROR",
            Self::ColumnMissing { .. } => "COLUMN_MISSING",
            Self::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the input could not be loaded.
    pub fn is_data_load(&self) -> bool {
        match self {
            Self::DataLoad { .. } => true,
            Self::WithContext { source, .. } => source.is_data_load(),
            _ => false,
        }
    }

    /// Check if this error is a missing-column precondition failure.
    pub fn is_column_missing(&self) -> bool {
        match self {
            Self::ColumnMissing { .. } => true,
            Self::WithContext { source, .. } => source.is_column_missing(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for PipelineError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PipelineError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PipelineError::Polars(e).with_context(context))
    }
}
