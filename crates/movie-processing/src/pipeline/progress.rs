//! Stage identifiers and progress reporting for the processing pipeline.
//!
//! Every stage run produces a [`StageOutcome`]; reporters registered on the
//! [`DataProcessor`](super::DataProcessor) receive each one as it happens.
//!
//! # Example
//!
//! ```rust,ignore
//! use movie_processing::DataProcessor;
//!
//! let summary = DataProcessor::builder()
//!     .on_progress(|outcome| {
//!         println!("[{}] {}", outcome.stage.display_name(), outcome.message);
//!     })
//!     .load()?
//!     .start()?;
//! ```

use crate::types::StageOutcome;
use serde::{Deserialize, Serialize};

/// Stages of the processing pipeline, in the order the batch run uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Reading the input table
    Loading,
    /// Removing duplicates and forward-filling gaps
    Cleaning,
    /// Keeping rows that match the filter criteria
    Filtering,
    /// Summing Runtime per (Director, Genre)
    Aggregation,
    /// Ordering rows by a column
    Sorting,
    /// Adding the Popularity column
    FeatureDerivation,
    /// One-hot and label encoding
    Encoding,
    /// Bucketing ratings
    Discretization,
    /// Clipping values to the IQR fences
    OutlierClipping,
    /// Writing the result file
    Writing,
}

impl Stage {
    /// Every stage, in pipeline order.
    pub const ALL: [Stage; 10] = [
        Stage::Loading,
        Stage::Cleaning,
        Stage::Filtering,
        Stage::Aggregation,
        Stage::Sorting,
        Stage::FeatureDerivation,
        Stage::Encoding,
        Stage::Discretization,
        Stage::OutlierClipping,
        Stage::Writing,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::Cleaning => "Cleaning",
            Self::Filtering => "Filtering",
            Self::Aggregation => "Aggregation",
            Self::Sorting => "Sorting",
            Self::FeatureDerivation => "Feature Derivation",
            Self::Encoding => "Encoding",
            Self::Discretization => "Discretization",
            Self::OutlierClipping => "Outlier Clipping",
            Self::Writing => "Writing",
        }
    }

    /// Whether a skip of this stage is worth a warning.
    ///
    /// The discretizer skips silently.
    pub fn warns_on_skip(&self) -> bool {
        !matches!(self, Self::Discretization)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Trait for receiving stage outcomes while the pipeline runs.
///
/// Implementations must be `Send + Sync` so a processor can be moved to a
/// worker thread together with its reporter.
pub trait ProgressReporter: Send + Sync {
    /// Called once per stage run, after the stage finished or was skipped.
    fn report(&self, outcome: &StageOutcome);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(&StageOutcome) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(&StageOutcome) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(&StageOutcome) + Send + Sync,
{
    fn report(&self, outcome: &StageOutcome) {
        (self.callback)(outcome);
    }
}

static_assertions::assert_impl_all!(Stage: Send, Sync);
static_assertions::assert_impl_all!(StageOutcome: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_stage_display_name() {
        assert_eq!(Stage::FeatureDerivation.display_name(), "Feature Derivation");
        assert_eq!(Stage::OutlierClipping.to_string(), "Outlier Clipping");
        assert_eq!(Stage::Filtering.display_name(), "Filtering");
    }

    #[test]
    fn test_only_discretization_is_silent() {
        let silent: Vec<Stage> = Stage::ALL
            .into_iter()
            .filter(|s| !s.warns_on_skip())
            .collect();
        assert_eq!(silent, vec![Stage::Discretization]);
    }

    #[test]
    fn test_stage_json_values() {
        let stage_expectations = [
            (Stage::Loading, "\"loading\""),
            (Stage::FeatureDerivation, "\"feature_derivation\""),
            (Stage::OutlierClipping, "\"outlier_clipping\""),
            (Stage::Writing, "\"writing\""),
        ];

        for (stage, expected_json) in stage_expectations {
            let json = serde_json::to_string(&stage).expect("Should serialize");
            assert_eq!(json, expected_json, "Stage::{:?} should serialize to {}", stage, expected_json);
        }
    }

    #[test]
    fn test_closure_progress_reporter() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = ClosureProgressReporter::new(move |_outcome| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(&StageOutcome::applied(Stage::Cleaning, (2, 2), (1, 2), "Test"));
        reporter.report(&StageOutcome::skipped(Stage::Sorting, (1, 2), vec!["IMDB_Rating".into()]));

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_progress_reporter_across_threads() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = Arc::new(ClosureProgressReporter::new(move |_outcome| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let reporter_clone = reporter.clone();
        let handle = std::thread::spawn(move || {
            reporter_clone.report(&StageOutcome::applied(
                Stage::Encoding,
                (1, 1),
                (1, 2),
                "Test from background thread",
            ));
        });

        handle.join().expect("Thread should not panic");
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
