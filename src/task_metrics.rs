//! Per-task time accounting.

use serde::Serialize;

use crate::record::RawTask;
use crate::units::{is_completed, ms_to_hours, LaunchRule};

/// Normalized view of one task. Hours are unrounded; rounding only happens
/// when projects are aggregated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetric {
    pub id: String,
    pub name: String,
    pub status: String,
    pub status_type: String,
    pub hours_spent: f64,
    pub hours_estimated: f64,
    pub hours_remaining: f64,
    pub is_completed: bool,
    pub is_launch: bool,
    pub due_date: Option<String>,
}

impl TaskMetric {
    pub fn from_raw(task: &RawTask, launch: &LaunchRule) -> Self {
        let hours_spent = ms_to_hours(task.time_spent);
        let hours_estimated = ms_to_hours(task.time_estimate);
        let is_completed = is_completed(&task.status);

        // Tasks without an estimate never count as remaining work.
        let hours_remaining = if !is_completed && hours_estimated > 0.0 {
            (hours_estimated - hours_spent).max(0.0)
        } else {
            0.0
        };

        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            status: task.status.status.clone(),
            status_type: task.status.kind.clone(),
            hours_spent,
            hours_estimated,
            hours_remaining,
            is_completed,
            is_launch: launch.is_launch(task),
            due_date: task.due_date.clone(),
        }
    }

    /// Due date as epoch milliseconds, if present and numeric.
    pub fn due_timestamp(&self) -> Option<i64> {
        self.due_date
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
    }
}
