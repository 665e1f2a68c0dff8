//! Label encoding with an explicit fit / transform / invert contract.

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps each distinct string of one column to an integer code.
///
/// Codes are assigned in first-seen order starting at 0. The encoder is
/// refit from scratch by [`fit`](Self::fit); [`inverse_transform`](Self::inverse_transform)
/// stays valid for as long as the encoder lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelEncoder {
    column: String,
    classes: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, i64>,
}

impl LabelEncoder {
    /// Create an unfitted encoder for `column`.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            classes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Name of the encoded column.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Distinct values, indexed by code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Learn the code table from `values`. Missing values are ignored.
    pub fn fit<'a, I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        self.classes.clear();
        self.index.clear();
        for value in values.into_iter().flatten() {
            if !self.index.contains_key(value) {
                self.index.insert(value.to_string(), self.classes.len() as i64);
                self.classes.push(value.to_string());
            }
        }
        self
    }

    /// Code of a single value, if it was seen while fitting.
    pub fn code(&self, value: &str) -> Option<i64> {
        self.index.get(value).copied()
    }

    /// Encode `values`. Missing values stay missing.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnknownCategory`] for a value not seen by `fit`.
    pub fn transform<'a, I>(&self, values: I) -> Result<Vec<Option<i64>>>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        values
            .into_iter()
            .map(|value| match value {
                None => Ok(None),
                Some(v) => self.code(v).map(Some).ok_or_else(|| {
                    PipelineError::UnknownCategory {
                        column: self.column.clone(),
                        value: v.to_string(),
                    }
                }),
            })
            .collect()
    }

    /// Original value for `code`.
    pub fn inverse_transform(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(String::as_str)
    }

    /// Fit on `series` and return the Int64 encoded series under the same name.
    pub fn fit_transform_series(&mut self, series: &Series) -> Result<Series> {
        let as_str = series.cast(&DataType::String)?;
        let ca = as_str.str()?;
        self.fit(ca.into_iter());
        let codes = self.transform(ca.into_iter())?;
        Ok(Series::new(series.name().clone(), codes))
    }

    /// Decode an Int64 series back to strings.
    pub fn inverse_transform_series(&self, series: &Series) -> Result<Series> {
        let as_int = series.cast(&DataType::Int64)?;
        let decoded: Vec<Option<String>> = as_int
            .i64()?
            .into_iter()
            .map(|code| {
                code.and_then(|c| self.inverse_transform(c))
                    .map(str::to_string)
            })
            .collect();
        Ok(Series::new(series.name().clone(), decoded))
    }

    /// Restore the lookup table after deserialization.
    pub fn rebuild_index(&mut self) {
        self.index = self
            .classes
            .iter()
            .enumerate()
            .map(|(code, class)| (class.clone(), code as i64))
            .collect();
    }
}
