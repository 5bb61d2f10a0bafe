//! Project rollups over task metrics.
//!
//! A project is one upstream list. Its hour totals are rounded to a tenth,
//! its percent complete to a whole number, and its status is derived from
//! launch detection and logged work.

use serde::{Deserialize, Serialize};

use crate::record::RawTask;
use crate::task_metrics::TaskMetric;
use crate::units::{round_tenth, LaunchRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }

    /// Not started and in-progress projects are both "active".
    pub fn is_active(self) -> bool {
        self != ProjectStatus::Completed
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetric {
    pub id: String,
    pub name: String,
    pub hours_spent: f64,
    pub hours_estimated: f64,
    pub hours_remaining: f64,
    pub percent_complete: u8,
    pub task_count: usize,
    pub completed_task_count: usize,
    pub tasks: Vec<TaskMetric>,
    pub status: ProjectStatus,
    pub is_launched: bool,
}

impl ProjectMetric {
    /// Build a project rollup from its tasks, in upstream order.
    pub fn build(
        id: impl Into<String>,
        name: impl Into<String>,
        tasks: &[RawTask],
        launch: &LaunchRule,
    ) -> Self {
        let tasks: Vec<TaskMetric> = tasks
            .iter()
            .map(|task| TaskMetric::from_raw(task, launch))
            .collect();
        Self::from_tasks(id, name, tasks)
    }

    pub fn from_tasks(id: impl Into<String>, name: impl Into<String>, tasks: Vec<TaskMetric>) -> Self {
        let hours_spent: f64 = tasks.iter().map(|task| task.hours_spent).sum();
        let hours_estimated: f64 = tasks.iter().map(|task| task.hours_estimated).sum();
        let hours_remaining: f64 = tasks.iter().map(|task| task.hours_remaining).sum();

        let task_count = tasks.len();
        let completed_task_count = tasks.iter().filter(|task| task.is_completed).count();

        let is_launched = tasks.iter().any(|task| task.is_launch && task.is_completed);
        let status = classify_status(is_launched, hours_spent, &tasks);
        let percent_complete =
            percent_complete(task_count, completed_task_count, hours_spent, hours_estimated);

        Self {
            id: id.into(),
            name: name.into(),
            hours_spent: round_tenth(hours_spent),
            hours_estimated: round_tenth(hours_estimated),
            hours_remaining: round_tenth(hours_remaining),
            percent_complete,
            task_count,
            completed_task_count,
            tasks,
            status,
            is_launched,
        }
    }
}

/// Launch wins, then "nothing logged and nothing closed", else in progress.
/// Uses the unrounded spent hours.
fn classify_status(is_launched: bool, hours_spent: f64, tasks: &[TaskMetric]) -> ProjectStatus {
    if is_launched {
        return ProjectStatus::Completed;
    }
    if hours_spent == 0.0 && tasks.iter().all(|task| !task.is_completed) {
        return ProjectStatus::NotStarted;
    }
    ProjectStatus::InProgress
}

/// Task-count completeness overrides hours, then hours ratio, then the
/// completed-task ratio.
fn percent_complete(
    task_count: usize,
    completed_task_count: usize,
    hours_spent: f64,
    hours_estimated: f64,
) -> u8 {
    let percent = if task_count > 0 && completed_task_count == task_count {
        100.0
    } else if hours_estimated > 0.0 {
        (hours_spent / hours_estimated * 100.0).min(100.0)
    } else if task_count > 0 {
        completed_task_count as f64 / task_count as f64 * 100.0
    } else {
        0.0
    };
    percent.round().clamp(0.0, 100.0) as u8
}
