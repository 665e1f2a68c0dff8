//! Outlier handling module.
//!
//! Clips numeric columns to their Tukey fences `[Q1 - k*IQR, Q3 + k*IQR]`.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::utils::{is_numeric_dtype, quantile_sorted, sorted_f64_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Quartiles and fences computed for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute the bounds from ascending values. `None` when there are no values.
    pub fn from_sorted(values: &[f64], multiplier: f64) -> Option<Self> {
        let q1 = quantile_sorted(values, 0.25)?;
        let q3 = quantile_sorted(values, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Both fences are finite and ordered.
    pub fn is_usable(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower <= self.upper
    }

    /// Pull `value` onto the nearest fence. NaN passes through unchanged.
    pub fn clip(&self, value: f64) -> f64 {
        if value < self.lower {
            self.lower
        } else if value > self.upper {
            self.upper
        } else {
            value
        }
    }
}

/// Clip every listed column that exists to its IQR fences.
///
/// Absent and non-numeric columns are skipped silently, as are columns without
/// finite values. Infinities do not enter the quartiles but are clipped like
/// any other outlier. Clipped columns become Float64 and
/// missing values stay missing. Returns the bounds used per column.
pub fn clip_outliers(
    dataset: Dataset,
    target_columns: &[String],
    multiplier: f64,
) -> Result<(Dataset, Vec<(String, IqrBounds)>)> {
    let mut df = dataset.into_frame();
    let mut applied = Vec::new();

    for name in target_columns {
        let Ok(column) = df.column(name) else {
            continue;
        };
        let series = column.as_materialized_series().clone();
        if !is_numeric_dtype(series.dtype()) {
            debug!("Column '{}' is not numeric, leaving it unclipped", name);
            continue;
        }

        let values: Vec<f64> = sorted_f64_values(&series)?
            .into_iter()
            .filter(|v| v.is_finite())
            .collect();
        let Some(bounds) = IqrBounds::from_sorted(&values, multiplier) else {
            debug!("Column '{}' has no finite values to clip", name);
            continue;
        };
        if !bounds.is_usable() {
            debug!(
                "Column '{}' has unusable fences [{}, {}], leaving it unclipped",
                name, bounds.lower, bounds.upper
            );
            continue;
        }

        let outliers = values.iter().filter(|v| !bounds.contains(**v)).count();

        let float_series = series.cast(&DataType::Float64)?;
        let clipped = float_series
            .f64()?
            .apply(|v| v.map(|val| bounds.clip(val)));

        if let Err(e) = df.replace(name, clipped.into_series()) {
            warn!("Failed to clip outliers in {}: {}", name, e);
            continue;
        }

        debug!(
            "Clipped {} outliers in {} to [{:.4}, {:.4}]",
            outliers, name, bounds.lower, bounds.upper
        );
        applied.push((name.clone(), bounds));
    }

    Ok((Dataset::from(df), applied))
}
