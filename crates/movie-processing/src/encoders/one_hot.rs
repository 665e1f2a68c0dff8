//! One-hot expansion of a categorical column.

use crate::error::Result;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Build one Boolean indicator column per distinct non-missing value.
///
/// Columns are named `<prefix>_<value>` and ordered by value. A missing
/// input value is false in every indicator.
pub fn one_hot(series: &Series, prefix: &str) -> Result<Vec<Series>> {
    let as_str = series.cast(&DataType::String)?;
    let ca = as_str.str()?;

    let categories: BTreeSet<&str> = ca.into_iter().flatten().collect();

    let indicators = categories
        .into_iter()
        .map(|category| {
            let mask: Vec<bool> = ca
                .into_iter()
                .map(|value| value == Some(category))
                .collect();
            Series::new(format!("{}_{}", prefix, category).into(), mask)
        })
        .collect();

    Ok(indicators)
}
