use crate::pipeline::Stage;
use serde::{Deserialize, Serialize};

/// Whether a stage changed the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Applied,
    Skipped,
}

/// Record of one stage run, reported to progress listeners and kept in the
/// run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: Stage,
    pub status: StageStatus,
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    /// Required columns that were absent when the stage was skipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_columns: Vec<String>,
    pub message: String,
}

impl StageOutcome {
    pub fn applied(
        stage: Stage,
        before: (usize, usize),
        after: (usize, usize),
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            status: StageStatus::Applied,
            rows_before: before.0,
            rows_after: after.0,
            columns_before: before.1,
            columns_after: after.1,
            missing_columns: Vec::new(),
            message: message.into(),
        }
    }

    pub fn skipped(stage: Stage, shape: (usize, usize), missing_columns: Vec<String>) -> Self {
        let message = format!(
            "{} skipped: missing column(s) {}",
            stage.display_name(),
            missing_columns.join(", ")
        );
        Self {
            stage,
            status: StageStatus::Skipped,
            rows_before: shape.0,
            rows_after: shape.0,
            columns_before: shape.1,
            columns_after: shape.1,
            missing_columns,
            message,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.status == StageStatus::Applied
    }

    pub fn is_skipped(&self) -> bool {
        self.status == StageStatus::Skipped
    }

    /// Rows removed by the stage (zero when rows were added).
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}
