//! The `DataProcessor`: owns one dataset and runs the stages over it.
//!
//! Every stage goes through a single runner, which checks the
//! stage's required columns first. Missing columns produce a diagnostic and
//! a `Skipped` outcome instead of an error; filtering is the only stage that
//! fails on missing columns. A stage that errors leaves the dataset as it
//! was.

use crate::cleaner;
use crate::config::{OutputFormat, PipelineConfig};
use crate::dataset::{Dataset, columns};
use crate::encoders::{LabelEncoder, encode_categoricals};
use crate::error::{PipelineError, Result};
use crate::filter::{self, FilterCriteria};
use crate::loader::{LoadOptions, load_csv};
use crate::pipeline::outliers::clip_outliers;
use crate::pipeline::progress::{ClosureProgressReporter, ProgressReporter, Stage};
use crate::reporting::{RunSummary, write_dataset};
use crate::transform;
use crate::types::StageOutcome;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs the movie processing stages over a single owned [`Dataset`].
pub struct DataProcessor {
    dataset: Dataset,
    config: PipelineConfig,
    input_file: Option<PathBuf>,
    genre_encoder: Option<LabelEncoder>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    outcomes: Vec<StageOutcome>,
}

// Ensure DataProcessor can be moved to a worker thread
static_assertions::assert_impl_all!(DataProcessor: Send);

impl DataProcessor {
    /// Create a new processor builder.
    pub fn builder() -> DataProcessorBuilder {
        DataProcessorBuilder::default()
    }

    /// Load `path` with the default configuration.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let config = PipelineConfig {
            input_path: path.into(),
            ..PipelineConfig::default()
        };
        Self::builder().config(config).load()
    }

    /// Wrap an already loaded dataset with the default configuration.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            config: PipelineConfig::default(),
            input_file: None,
            genre_encoder: None,
            progress_reporter: None,
            outcomes: Vec::new(),
        }
    }

    pub fn data(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The Genre encoder fitted by the last encoding run, if any.
    pub fn genre_encoder(&self) -> Option<&LabelEncoder> {
        self.genre_encoder.as_ref()
    }

    /// Outcomes of every stage run so far, oldest first.
    pub fn outcomes(&self) -> &[StageOutcome] {
        &self.outcomes
    }

    // ========================================================================
    // Stages
    // ========================================================================

    /// Remove duplicate rows and forward-fill missing values.
    pub fn clean_data(&mut self) -> Result<bool> {
        self.run_stage(Stage::Cleaning, &[], |dataset| {
            Ok((cleaner::clean(dataset)?, ()))
        })
        .map(|applied| applied.is_some())
    }

    /// Keep only rows matching every active predicate in `criteria`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ColumnMissing`] when an active predicate
    /// references an absent column. The dataset is left unchanged.
    pub fn filter_data(&mut self, criteria: &FilterCriteria) -> Result<bool> {
        if criteria.is_empty() {
            debug!("No filter criteria supplied, keeping all rows");
        }
        self.run_stage(Stage::Filtering, &[], |dataset| {
            Ok((filter::filter(dataset, criteria)?, ()))
        })
        .map(|applied| applied.is_some())
    }

    /// Collapse the dataset to summed Runtime per (Director, Genre).
    pub fn normalize_data(&mut self) -> Result<bool> {
        self.run_stage(
            Stage::Aggregation,
            &[columns::DIRECTOR, columns::GENRE, columns::RUNTIME],
            |dataset| Ok((transform::aggregate_runtime(dataset)?, ())),
        )
        .map(|applied| applied.is_some())
    }

    /// Sort rows by `by`. Skipped with a warning when `by` is absent.
    pub fn sort_data(&mut self, by: &str, ascending: bool) -> Result<bool> {
        self.run_stage(Stage::Sorting, &[by], |dataset| {
            Ok((transform::sort_rows(dataset, by, ascending)?, ()))
        })
        .map(|applied| applied.is_some())
    }

    /// Add the Popularity column.
    pub fn create_new_columns(&mut self) -> Result<bool> {
        self.run_stage(
            Stage::FeatureDerivation,
            &[columns::NO_OF_VOTES, columns::IMDB_RATING],
            |dataset| Ok((transform::derive_popularity(dataset)?, ())),
        )
        .map(|applied| applied.is_some())
    }

    /// One-hot encode Certificate and label-encode Genre.
    ///
    /// Without a Certificate column neither encoding runs.
    pub fn encode_categorical_variables(&mut self) -> Result<bool> {
        let encoder = self.run_stage(Stage::Encoding, &[columns::CERTIFICATE], encode_categoricals)?;
        match encoder {
            Some(encoder) => {
                self.genre_encoder = encoder;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Add the rating bucket column. Skipped silently without IMDB_Rating.
    pub fn discretize_ratings(&mut self) -> Result<bool> {
        self.run_stage(Stage::Discretization, &[columns::IMDB_RATING], |dataset| {
            Ok((transform::discretize_ratings(dataset)?, ()))
        })
        .map(|applied| applied.is_some())
    }

    /// Clip the configured columns to their IQR fences.
    pub fn treat_outliers(&mut self) -> Result<bool> {
        let targets = self.config.outlier_columns.clone();
        let multiplier = self.config.iqr_multiplier;
        let clipped = self.run_stage(Stage::OutlierClipping, &[], |dataset| {
            clip_outliers(dataset, &targets, multiplier)
        })?;

        if let Some(bounds) = clipped {
            for (name, b) in &bounds {
                debug!("{} fences: [{:.4}, {:.4}]", name, b.lower, b.upper);
            }
            if bounds.is_empty() {
                debug!("No outlier target columns present");
            }
        }
        Ok(true)
    }

    /// Write the dataset to `path` as `format_name` (`"csv"` or `"txt"`).
    ///
    /// Returns `Ok(false)` without writing anything for any other format.
    pub fn save_results(&mut self, path: impl AsRef<Path>, format_name: &str) -> Result<bool> {
        let path = path.as_ref();
        let format = match format_name.parse::<OutputFormat>() {
            Ok(format) => format,
            Err(reason) => {
                debug!("Not saving results: {}", reason);
                return Ok(false);
            }
        };

        let shape = self.dataset.shape();
        write_dataset(self.dataset.frame(), path, format)?;
        self.record(StageOutcome::applied(
            Stage::Writing,
            shape,
            shape,
            format!("Wrote {} as {}", path.display(), format),
        ));
        Ok(true)
    }

    /// Run the full batch pipeline with the configured parameters and write
    /// the result.
    pub fn start(&mut self) -> Result<RunSummary> {
        let started = Instant::now();
        let shape_before = self.dataset.shape();
        info!("Starting processing pipeline...");

        let output_path = self.config.output_path.clone();
        let output_format = self.config.output_format;

        let written = match self.run_all_stages() {
            Ok(written) => written,
            Err(e) => {
                error!("Pipeline error: {}", e);
                return Err(e);
            }
        };

        let summary = RunSummary::new(
            self.input_file.as_ref().map(|p| p.display().to_string()),
            written.then(|| output_path.display().to_string()),
            output_format.as_str(),
            shape_before,
            self.dataset.shape(),
            self.dataset.column_names(),
            started.elapsed(),
            self.outcomes.clone(),
        );

        info!(
            "Pipeline completed in {} ms: {} stages applied, {} skipped",
            summary.duration_ms,
            summary.applied_stages(),
            summary.skipped_stages()
        );
        Ok(summary)
    }

    /// Stages of the batch run in their fixed order, ending with the write.
    fn run_all_stages(&mut self) -> Result<bool> {
        let criteria = self.config.filter.clone();
        let sort_by = self.config.sort_by.clone();
        let sort_ascending = self.config.sort_ascending;

        self.clean_data()?;
        self.filter_data(&criteria)?;
        self.normalize_data()?;
        self.sort_data(&sort_by, sort_ascending)?;
        self.create_new_columns()?;
        self.encode_categorical_variables()?;
        self.discretize_ratings()?;
        self.treat_outliers()?;

        let output_path = self.config.output_path.clone();
        let output_format = self.config.output_format;
        self.save_results(&output_path, output_format.as_str())
    }

    // ========================================================================
    // Stage runner
    // ========================================================================

    /// Run `op` over a copy of the dataset if every `required` column exists.
    ///
    /// Returns `Ok(None)` when the stage was skipped, otherwise the extra
    /// value produced by `op`. The dataset is only replaced when `op`
    /// succeeds.
    fn run_stage<T, F>(&mut self, stage: Stage, required: &[&str], op: F) -> Result<Option<T>>
    where
        F: FnOnce(Dataset) -> Result<(Dataset, T)>,
    {
        let before = self.dataset.shape();
        let missing = self.dataset.missing_columns(required);
        if !missing.is_empty() {
            let outcome = StageOutcome::skipped(stage, before, missing);
            if stage.warns_on_skip() {
                warn!("{}", outcome.message);
            } else {
                debug!("{}", outcome.message);
            }
            self.record(outcome);
            return Ok(None);
        }

        debug!("Running stage: {}", stage);
        let (dataset, extra) = match op(self.dataset.clone()) {
            Ok(result) => result,
            Err(e) => {
                warn!("{} failed: {}", stage, e);
                return Err(e);
            }
        };

        let after = dataset.shape();
        self.dataset = dataset;

        let message = format!(
            "{}: {} rows x {} columns -> {} rows x {} columns",
            stage, before.0, before.1, after.0, after.1
        );
        info!("{}", message);
        self.record(StageOutcome::applied(stage, before, after, message));
        Ok(Some(extra))
    }

    fn record(&mut self, outcome: StageOutcome) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(&outcome);
        }
        self.outcomes.push(outcome);
    }
}

/// Builder for [`DataProcessor`].
///
/// # Example
///
/// ```rust,ignore
/// use movie_processing::{DataProcessor, PipelineConfig};
///
/// let mut processor = DataProcessor::builder()
///     .config(PipelineConfig::builder().input_path("movies.csv").build()?)
///     .on_progress(|outcome| println!("{}", outcome.message))
///     .load()?;
/// ```
#[derive(Default)]
pub struct DataProcessorBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(DataProcessorBuilder: Send);

impl DataProcessorBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter that receives every stage outcome.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&StageOutcome) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Load the configured input file and build the processor.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] for an invalid configuration
    /// and [`PipelineError::DataLoad`] when the input cannot be read.
    pub fn load(self) -> Result<DataProcessor> {
        let config = self.config.clone().unwrap_or_default();
        config
            .validate()
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;

        let options = LoadOptions {
            coerce_numeric_strings: config.coerce_numeric_strings,
            numeric_coercion_threshold: config.numeric_coercion_threshold,
        };
        let dataset = match load_csv(&config.input_path, options) {
            Ok(dataset) => dataset,
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };

        let input_file = config.input_path.clone();
        let mut processor = self.build(dataset.into_frame())?;
        processor.input_file = Some(input_file);
        let shape = processor.dataset.shape();
        processor.record(StageOutcome::applied(
            Stage::Loading,
            (0, 0),
            shape,
            format!("Loaded {} rows x {} columns", shape.0, shape.1),
        ));
        Ok(processor)
    }

    /// Build a processor over an in-memory table.
    pub fn build(self, df: DataFrame) -> Result<DataProcessor> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;

        Ok(DataProcessor {
            dataset: Dataset::from(df),
            config,
            input_file: None,
            genre_encoder: None,
            progress_reporter: self.progress_reporter,
            outcomes: Vec::new(),
        })
    }
}
