//! Reshaping and feature stages: aggregation, sorting, derived columns and
//! rating buckets.

mod aggregate;
mod derive;
mod discretize;
mod sort;

pub use aggregate::aggregate_runtime;
pub use derive::derive_popularity;
pub use discretize::{RATING_BINS, discretize_ratings, rating_label};
pub use sort::sort_rows;
