//! Shared utilities for the movie processing pipeline.
//!
//! This module contains helper functions used across multiple stages:
//! dtype checks, numeric string parsing, quantiles and cell rendering.

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 5] = [',', '$', '%', '€', '£'];

/// A number optionally followed by a unit word, e.g. `142 min`.
static MEASUREMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*[A-Za-z]*$")
        .expect("Invalid regex: measurement")
});

/// Clean a string for numeric parsing by removing formatting characters.
///
/// # Example
///
/// ```rust,ignore
/// use movie_processing::utils::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
/// assert_eq!(clean_numeric_string("  42%  "), "42");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a numeric value (f64).
///
/// Handles currency symbols, percentages, thousands separators and a
/// trailing unit word (`"142 min"` parses as 142).
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(value) = cleaned.parse::<f64>() {
        return Some(value);
    }
    MEASUREMENT_PATTERN
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .and_then(|number| number.as_str().parse::<f64>().ok())
}

/// Count the non-null values of a String series and how many of them parse as numbers.
///
/// Returns `(numeric_count, total_count)`. Non-string series count as (0, 0).
pub fn count_numeric_values(series: &Series) -> (usize, usize) {
    let mut numeric_count = 0;
    let mut total_count = 0;

    if let Ok(str_series) = series.str() {
        for val in str_series.into_iter().flatten() {
            if val.trim().is_empty() {
                continue;
            }
            total_count += 1;
            if parse_numeric_string(val).is_some() {
                numeric_count += 1;
            }
        }
    }

    (numeric_count, total_count)
}

/// Get the ratio of numeric-parseable values in a String series.
pub fn numeric_ratio(series: &Series) -> f64 {
    let (numeric_count, total_count) = count_numeric_values(series);
    if total_count == 0 {
        0.0
    } else {
        numeric_count as f64 / total_count as f64
    }
}

// =============================================================================
// Statistics Utilities
// =============================================================================

/// Quantile of an ascending slice using linear interpolation between order statistics.
///
/// Returns `None` for an empty slice.
pub fn quantile_sorted(values: &[f64], quantile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(values[lower]);
    }
    let weight = pos - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * weight)
}

/// Collect the non-null values of a series as f64, sorted ascending.
pub fn sorted_f64_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    let mut values: Vec<f64> = float_series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();
    values.sort_by(|a, b| a.total_cmp(b));
    Ok(values)
}

// =============================================================================
// Rendering Utilities
// =============================================================================

/// Render a single cell for the text table output.
pub fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "NaN".to_string(),
        AnyValue::Boolean(true) => "True".to_string(),
        AnyValue::Boolean(false) => "False".to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) if v.is_nan() => "NaN".to_string(),
        AnyValue::Float32(v) if v.is_nan() => "NaN".to_string(),
        other => format!("{}", other),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_clean_numeric_string() {
        assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
        assert_eq!(clean_numeric_string("  42%  "), "42");
        assert_eq!(clean_numeric_string("€100"), "100");
    }

    #[test]
    fn test_parse_numeric_string() {
        assert_eq!(parse_numeric_string("42"), Some(42.0));
        assert_eq!(parse_numeric_string("28,341,469"), Some(28341469.0));
        assert_eq!(parse_numeric_string("142 min"), Some(142.0));
        assert_eq!(parse_numeric_string("-100"), Some(-100.0));
        assert_eq!(parse_numeric_string(""), None);
        assert_eq!(parse_numeric_string("PG"), None);
        assert_eq!(parse_numeric_string("Drama"), None);
    }

    #[test]
    fn test_numeric_ratio() {
        let series = Series::new("runtime".into(), &[Some("142 min"), Some("98 min"), None, Some("n/a")]);
        let ratio = numeric_ratio(&series);
        assert!((ratio - 2.0 / 3.0).abs() < 1e-9);

        let numbers = Series::new("n".into(), &[1.0, 2.0]);
        assert_eq!(numeric_ratio(&numbers), 0.0);
    }

    #[test]
    fn test_quantile_sorted_linear_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&values, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&values, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&values, 0.75), Some(3.25));
        assert_eq!(quantile_sorted(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_sorted_f64_values_skips_nulls() {
        let series = Series::new("x".into(), &[Some(3), None, Some(1), Some(2)]);
        assert_eq!(sorted_f64_values(&series).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&AnyValue::Null), "NaN");
        assert_eq!(cell_text(&AnyValue::Boolean(true)), "True");
        assert_eq!(cell_text(&AnyValue::String("Drama")), "Drama");
        assert_eq!(cell_text(&AnyValue::Int64(120)), "120");
    }
}
