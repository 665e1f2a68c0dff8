//! Output module.
//!
//! Writes the processed dataset to disk and builds the run summary.
//!
//! # Example
//!
//! ```rust,ignore
//! use movie_processing::config::OutputFormat;
//! use movie_processing::reporting::write_dataset;
//!
//! write_dataset(dataset.frame(), "processed_data.txt", OutputFormat::Txt)?;
//! ```

mod summary;
mod writer;

pub use summary::RunSummary;
pub use writer::{render_text_table, write_dataset};
