//! Pipeline module.
//!
//! This module provides the `DataProcessor`, the stage runner and the
//! outlier clipping stage.

pub mod outliers;
mod processor;
pub mod progress;

pub use outliers::{IqrBounds, clip_outliers};
pub use processor::{DataProcessor, DataProcessorBuilder};
pub use progress::{ClosureProgressReporter, ProgressReporter, Stage};
