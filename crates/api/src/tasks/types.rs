//! Task resource types

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A scheduled or running task.
///
/// The wire format uses snake_case field names; timestamps are RFC 3339.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub code_id: String,
    #[serde(default)]
    pub code_name: String,
    #[serde(default)]
    pub status: String,
    /// Status detail, e.g. "Cancelled via API."
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds the task may run before the scheduler kills it
    #[serde(default)]
    pub timeout: Option<i64>,
    #[serde(default)]
    pub payload: String,
    #[serde(default)]
    pub schedule_id: String,
    #[serde(default)]
    pub cluster: String,
}

/// List envelope for task queries.
#[derive(Debug, Deserialize)]
pub(crate) struct TaskList {
    #[serde(default)]
    pub(crate) tasks: Vec<Task>,
}
