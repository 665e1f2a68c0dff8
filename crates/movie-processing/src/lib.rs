//! Movie Dataset Processing Library
//!
//! A batch transform for film record tables built with Rust and Polars.
//!
//! # Overview
//!
//! The [`DataProcessor`] owns one [`Dataset`] and runs these stages over it:
//!
//! - **Cleaning**: exact duplicate removal and forward-fill of gaps
//! - **Filtering**: genre, runtime, year and director predicates
//! - **Aggregation**: summed Runtime per (Director, Genre)
//! - **Sorting**: stable, missing values last
//! - **Feature Derivation**: `Popularity = No_of_Votes * IMDB_Rating`
//! - **Encoding**: one-hot Certificate, label-encoded Genre
//! - **Discretization**: Low / Medium / High rating buckets
//! - **Outlier Clipping**: IQR fences on Gross and IMDB_Rating
//!
//! A stage whose input columns are absent reports the missing columns and
//! is skipped. Only a load failure or a filter on an absent column stops a
//! run.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use movie_processing::{DataProcessor, FilterCriteria, PipelineConfig};
//!
//! // Option 1: the fixed batch run
//! let summary = DataProcessor::from_path("imdb_top_1000.csv")?.start()?;
//! println!("Wrote {:?}", summary.output_file);
//!
//! // Option 2: individual stages
//! let mut processor = DataProcessor::builder()
//!     .config(PipelineConfig::builder().input_path("movies.csv").build()?)
//!     .on_progress(|outcome| println!("{}", outcome.message))
//!     .load()?;
//!
//! processor.clean_data()?;
//! processor.filter_data(&FilterCriteria::new().genre("drama").min_year(2005.0))?;
//! processor.sort_data("IMDB_Rating", false)?;
//! processor.save_results("dramas.txt", "txt")?;
//! ```

pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod encoders;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod transform;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, OutputFormat, PipelineConfig, PipelineConfigBuilder,
};
pub use dataset::Dataset;
pub use encoders::{LabelEncoder, encode_categoricals, one_hot};
pub use error::{PipelineError, Result as PipelineResult, ResultExt};
pub use filter::FilterCriteria;
pub use loader::{LoadOptions, load_csv};
pub use pipeline::{
    ClosureProgressReporter, DataProcessor, DataProcessorBuilder, IqrBounds, ProgressReporter,
    Stage,
};
pub use reporting::{RunSummary, write_dataset};
pub use types::{StageOutcome, StageStatus};
