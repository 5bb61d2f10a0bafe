//! Weekly time buckets.
//!
//! A [`WeeklySource`] fills one [`WeekWindow`] at a time. Two sources exist:
//!
//! - [`EntryAccurate`] partitions logged time entries by their start
//!   timestamp and attributes them to projects through a [`TaskIndex`].
//! - [`SnapshotDegraded`] only knows current project totals, so it puts all
//!   of them in the current week and leaves older weeks empty. It restates
//!   the present; it is not history.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::project::ProjectMetric;
use crate::record::RawTimeEntry;
use crate::source::ProjectTasks;
use crate::units::{round_tenth, MS_PER_HOUR};
use crate::week::WeekWindow;

pub const UNATTRIBUTED_ID: &str = "unattributed";
pub const UNATTRIBUTED_NAME: &str = "Unattributed";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWeekHours {
    pub task_id: String,
    pub task_name: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWeekHours {
    pub project_id: String,
    pub project_name: String,
    pub hours: f64,
    /// Empty for snapshot buckets.
    pub tasks: Vec<TaskWeekHours>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub week_label: String,
    pub total_hours: f64,
    /// Only projects with hours > 0.
    pub projects: Vec<ProjectWeekHours>,
}

impl WeeklyBucket {
    fn empty(window: &WeekWindow) -> Self {
        Self {
            week_start: window.week_start,
            week_end: window.week_end,
            week_label: window.label.clone(),
            total_hours: 0.0,
            projects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketMode {
    EntryAccurate,
    SnapshotDegraded,
}

pub trait WeeklySource {
    fn mode(&self) -> BucketMode;

    fn bucket(&self, window: &WeekWindow) -> WeeklyBucket;
}

/// Fill every window, oldest first.
pub fn weekly_buckets(source: &dyn WeeklySource, windows: &[WeekWindow]) -> Vec<WeeklyBucket> {
    let mut buckets: Vec<WeeklyBucket> = windows.iter().map(|window| source.bucket(window)).collect();
    buckets.sort_by_key(|bucket| bucket.week_start);
    debug!(
        mode = ?source.mode(),
        weeks = buckets.len(),
        "filled weekly buckets"
    );
    buckets
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// Task id to owning project, built from the loaded project task sets.
#[derive(Debug, Clone, Default)]
pub struct TaskIndex {
    by_task: HashMap<String, ProjectRef>,
}

impl TaskIndex {
    pub fn from_projects(projects: &[ProjectTasks]) -> Self {
        let mut by_task = HashMap::new();
        for project in projects {
            for task in &project.tasks {
                by_task.entry(task.id.clone()).or_insert_with(|| ProjectRef {
                    id: project.id.clone(),
                    name: project.name.clone(),
                });
            }
        }
        Self { by_task }
    }

    pub fn project_for(&self, task_id: &str) -> Option<&ProjectRef> {
        self.by_task.get(task_id)
    }

    pub fn len(&self) -> usize {
        self.by_task.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_task.is_empty()
    }
}

/// Buckets built from logged time entries.
pub struct EntryAccurate<'a> {
    entries: &'a [RawTimeEntry],
    index: &'a TaskIndex,
}

impl<'a> EntryAccurate<'a> {
    pub fn new(entries: &'a [RawTimeEntry], index: &'a TaskIndex) -> Self {
        Self { entries, index }
    }
}

struct ProjectTally<'e> {
    id: &'e str,
    name: &'e str,
    ms: i64,
    tasks: Vec<(&'e str, &'e str, i64)>,
}

impl WeeklySource for EntryAccurate<'_> {
    fn mode(&self) -> BucketMode {
        BucketMode::EntryAccurate
    }

    fn bucket(&self, window: &WeekWindow) -> WeeklyBucket {
        let mut tallies: Vec<ProjectTally<'_>> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut unattributed = 0usize;

        for entry in self.entries.iter().filter(|entry| window.contains(entry.start)) {
            let owner = entry.task_id().and_then(|task_id| self.index.project_for(task_id));
            let (project_id, project_name) = match owner {
                Some(project) => (project.id.as_str(), project.name.as_str()),
                None => {
                    unattributed += 1;
                    (UNATTRIBUTED_ID, UNATTRIBUTED_NAME)
                }
            };

            let position = *positions.entry(project_id).or_insert_with(|| {
                tallies.push(ProjectTally {
                    id: project_id,
                    name: project_name,
                    ms: 0,
                    tasks: Vec::new(),
                });
                tallies.len() - 1
            });
            let tally = &mut tallies[position];
            let logged = entry.logged_ms();
            tally.ms = tally.ms.saturating_add(logged);

            if let Some(task) = entry.task.as_ref() {
                match tally.tasks.iter_mut().find(|(id, _, _)| *id == task.id) {
                    Some((_, _, ms)) => *ms = ms.saturating_add(logged),
                    None => tally.tasks.push((task.id.as_str(), task.name.as_str(), logged)),
                }
            }
        }

        if unattributed > 0 {
            warn!(
                week = %window.label,
                entries = unattributed,
                "time entries without a known project"
            );
        }

        let total_ms = tallies
            .iter()
            .fold(0i64, |total, tally| total.saturating_add(tally.ms));
        let projects = tallies
            .into_iter()
            .filter(|tally| tally.ms > 0)
            .map(|tally| ProjectWeekHours {
                project_id: tally.id.to_string(),
                project_name: tally.name.to_string(),
                hours: round_tenth(tally.ms as f64 / MS_PER_HOUR),
                tasks: tally
                    .tasks
                    .into_iter()
                    .filter(|(_, _, ms)| *ms > 0)
                    .map(|(id, name, ms)| TaskWeekHours {
                        task_id: id.to_string(),
                        task_name: name.to_string(),
                        hours: round_tenth(ms as f64 / MS_PER_HOUR),
                    })
                    .collect(),
            })
            .collect();

        WeeklyBucket {
            total_hours: round_tenth(total_ms as f64 / MS_PER_HOUR),
            projects,
            ..WeeklyBucket::empty(window)
        }
    }
}

/// Buckets built from current project totals only.
pub struct SnapshotDegraded<'a> {
    projects: &'a [ProjectMetric],
}

impl<'a> SnapshotDegraded<'a> {
    pub fn new(projects: &'a [ProjectMetric]) -> Self {
        Self { projects }
    }
}

impl WeeklySource for SnapshotDegraded<'_> {
    fn mode(&self) -> BucketMode {
        BucketMode::SnapshotDegraded
    }

    fn bucket(&self, window: &WeekWindow) -> WeeklyBucket {
        if !window.is_current {
            return WeeklyBucket::empty(window);
        }

        let total: f64 = self.projects.iter().map(|project| project.hours_spent).sum();
        let projects = self
            .projects
            .iter()
            .filter(|project| project.hours_spent > 0.0)
            .map(|project| ProjectWeekHours {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                hours: project.hours_spent,
                tasks: Vec::new(),
            })
            .collect();

        WeeklyBucket {
            total_hours: round_tenth(total),
            projects,
            ..WeeklyBucket::empty(window)
        }
    }
}
