//! Background job records.
//!
//! Jobs are server-tracked units of asynchronous work. The client observes
//! their lifecycle through polling; it never drives a transition itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::JobId;

/// Kind of background work a job performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    BulkDelete,
    ExcelUpload,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::BulkDelete => "BULK_DELETE",
            JobType::ExcelUpload => "EXCEL_UPLOAD",
        }
    }
}

/// Job execution status.
///
/// Observed transitions are `PENDING → IN_PROGRESS → {COMPLETED | FAILED |
/// CANCELLED}`. Terminal states are immutable once reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Pending or in-progress: the states that keep the poller polling.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::InProgress)
    }
}

/// A background job record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub status: JobStatus,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub processed_items: u64,
    #[serde(default)]
    pub successful_items: u64,
    #[serde(default)]
    pub failed_items: u64,
    /// Completion percentage, 0–100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub successful_results: Vec<serde_json::Value>,
    #[serde(default)]
    pub failed_results: Vec<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Job {
    /// Whether this job was created within `window` of `now`.
    ///
    /// The visible job list only retains the last 24 hours; older records
    /// are filtered out client-side, not deleted server-side.
    pub fn created_within(&self, window: chrono::Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) < window
    }
}
