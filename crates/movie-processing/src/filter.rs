//! Row filtering.
//!
//! [`FilterCriteria`] holds up to four independent predicates. Each one is
//! applied only when supplied, in the order genre, runtime, year, director,
//! and the surviving rows are their intersection.

use crate::dataset::{Dataset, columns};
use crate::error::{PipelineError, Result};
use crate::pipeline::Stage;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optional row predicates for the filtering stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Keep rows whose Genre contains this text (case-insensitive).
    pub genre: Option<String>,
    /// Keep rows whose Runtime is strictly greater than this.
    pub min_duration: Option<f64>,
    /// Keep rows whose Year is strictly greater than this.
    pub min_year: Option<f64>,
    /// Keep rows whose Director contains this text (case-insensitive).
    pub director: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn min_duration(mut self, minutes: f64) -> Self {
        self.min_duration = Some(minutes);
        self
    }

    pub fn min_year(mut self, year: f64) -> Self {
        self.min_year = Some(year);
        self
    }

    pub fn director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.active_genre().is_none()
            && self.min_duration.is_none()
            && self.min_year.is_none()
            && self.active_director().is_none()
    }

    /// Columns referenced by the active predicates.
    pub fn required_columns(&self) -> Vec<&'static str> {
        let mut required = Vec::new();
        if self.active_genre().is_some() {
            required.push(columns::GENRE);
        }
        if self.min_duration.is_some() {
            required.push(columns::RUNTIME);
        }
        if self.min_year.is_some() {
            required.push(columns::YEAR);
        }
        if self.active_director().is_some() {
            required.push(columns::DIRECTOR);
        }
        required
    }

    fn active_genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|s| !s.is_empty())
    }

    fn active_director(&self) -> Option<&str> {
        self.director.as_deref().filter(|s| !s.is_empty())
    }
}

/// Apply `criteria` to `dataset`.
///
/// # Errors
///
/// Returns [`PipelineError::ColumnMissing`] when an active predicate
/// references a column the dataset does not have. No rows are removed in
/// that case.
pub fn filter(dataset: Dataset, criteria: &FilterCriteria) -> Result<Dataset> {
    let missing = dataset.missing_columns(&criteria.required_columns());
    if !missing.is_empty() {
        return Err(PipelineError::ColumnMissing {
            stage: Stage::Filtering.display_name().to_string(),
            columns: missing,
        });
    }

    let mut df = dataset.into_frame();

    if let Some(genre) = criteria.active_genre() {
        df = keep_rows(&df, contains_mask(&df, columns::GENRE, genre)?, "genre")?;
    }
    if let Some(minutes) = criteria.min_duration {
        df = keep_rows(&df, greater_than_mask(&df, columns::RUNTIME, minutes)?, "min_duration")?;
    }
    if let Some(year) = criteria.min_year {
        df = keep_rows(&df, greater_than_mask(&df, columns::YEAR, year)?, "min_year")?;
    }
    if let Some(director) = criteria.active_director() {
        df = keep_rows(&df, contains_mask(&df, columns::DIRECTOR, director)?, "director")?;
    }

    Ok(Dataset::from(df))
}

fn keep_rows(df: &DataFrame, mask: BooleanChunked, predicate: &str) -> Result<DataFrame> {
    let filtered = df.filter(&mask)?;
    debug!(
        "Filter '{}' kept {} of {} rows",
        predicate,
        filtered.height(),
        df.height()
    );
    Ok(filtered)
}

/// Case-insensitive substring match. Missing values never match.
fn contains_mask(df: &DataFrame, column: &str, needle: &str) -> Result<BooleanChunked> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let needle = needle.to_lowercase();

    let mask_values: Vec<bool> = series
        .str()?
        .into_iter()
        .map(|value| value.is_some_and(|v| v.to_lowercase().contains(&needle)))
        .collect();

    Ok(BooleanChunked::from_slice("mask".into(), &mask_values))
}

/// Strictly-greater comparison. Missing or non-numeric values never match.
fn greater_than_mask(df: &DataFrame, column: &str, threshold: f64) -> Result<BooleanChunked> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;

    let mask_values: Vec<bool> = series
        .f64()?
        .into_iter()
        .map(|value| value.is_some_and(|v| v > threshold))
        .collect();

    Ok(BooleanChunked::from_slice("mask".into(), &mask_values))
}
