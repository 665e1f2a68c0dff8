//! Run summary emitted after the batch pipeline.

use crate::types::{StageOutcome, StageStatus};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary of one `start()` run, suitable for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Timestamp when the summary was generated
    pub generated_at: String,
    pub input_file: Option<String>,
    /// `None` when nothing was written
    pub output_file: Option<String>,
    pub output_format: String,
    pub shape_before: (usize, usize),
    pub shape_after: (usize, usize),
    pub columns: Vec<String>,
    pub duration_ms: u64,
    pub stages: Vec<StageOutcome>,
}

impl RunSummary {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input_file: Option<String>,
        output_file: Option<String>,
        output_format: impl Into<String>,
        shape_before: (usize, usize),
        shape_after: (usize, usize),
        columns: Vec<String>,
        duration: Duration,
        stages: Vec<StageOutcome>,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file,
            output_file,
            output_format: output_format.into(),
            shape_before,
            shape_after,
            columns,
            duration_ms: duration.as_millis() as u64,
            stages,
        }
    }

    pub fn applied_stages(&self) -> usize {
        self.stages
            .iter()
            .filter(|s| s.status == StageStatus::Applied)
            .count()
    }

    pub fn skipped_stages(&self) -> usize {
        self.stages
            .iter()
            .filter(|s| s.status == StageStatus::Skipped)
            .count()
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
