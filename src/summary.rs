//! Dashboard summary across all projects.

use serde::Serialize;
use tracing::debug;

use crate::project::{ProjectMetric, ProjectStatus};
use crate::source::ProjectTasks;
use crate::units::{round_tenth, LaunchRule};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Sorted by hours remaining, most first.
    pub projects: Vec<ProjectMetric>,
    pub total_hours_spent: f64,
    pub total_hours_estimated: f64,
    pub total_hours_remaining: f64,
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
}

impl DashboardSummary {
    /// Aggregate every project, in input order, then summarize.
    pub fn build(projects: &[ProjectTasks], launch: &LaunchRule) -> Self {
        let metrics = projects
            .iter()
            .map(|project| ProjectMetric::build(&project.id, &project.name, &project.tasks, launch))
            .collect();
        Self::from_projects(metrics)
    }

    /// Summarize already-built project metrics.
    ///
    /// Totals add the per-project values that were rounded at the project
    /// level and round the sums again.
    pub fn from_projects(mut projects: Vec<ProjectMetric>) -> Self {
        let total_hours_spent: f64 = projects.iter().map(|project| project.hours_spent).sum();
        let total_hours_estimated: f64 =
            projects.iter().map(|project| project.hours_estimated).sum();
        let total_hours_remaining: f64 =
            projects.iter().map(|project| project.hours_remaining).sum();

        let total_projects = projects.len();
        let completed_projects = projects
            .iter()
            .filter(|project| project.status == ProjectStatus::Completed)
            .count();

        // Stable: ties keep input order.
        projects.sort_by(|a, b| b.hours_remaining.total_cmp(&a.hours_remaining));

        debug!(
            projects = total_projects,
            completed = completed_projects,
            "built dashboard summary"
        );

        Self {
            projects,
            total_hours_spent: round_tenth(total_hours_spent),
            total_hours_estimated: round_tenth(total_hours_estimated),
            total_hours_remaining: round_tenth(total_hours_remaining),
            total_projects,
            active_projects: total_projects - completed_projects,
            completed_projects,
        }
    }

    pub fn projects_with_status(
        &self,
        status: ProjectStatus,
    ) -> impl Iterator<Item = &ProjectMetric> + '_ {
        self.projects
            .iter()
            .filter(move |project| project.status == status)
    }

    pub fn active(&self) -> impl Iterator<Item = &ProjectMetric> + '_ {
        self.projects
            .iter()
            .filter(|project| project.status.is_active())
    }

    pub fn find_project(&self, query: &str) -> Option<&ProjectMetric> {
        let query = query.trim();
        self.projects
            .iter()
            .find(|project| project.id == query)
            .or_else(|| {
                let lowered = query.to_lowercase();
                self.projects
                    .iter()
                    .find(|project| project.name.to_lowercase() == lowered)
            })
    }
}

/// Whole weeks of team capacity needed to burn down the remaining hours.
pub fn weeks_to_completion(hours_remaining: f64, team_size: u32, hours_per_week: f64) -> u32 {
    let capacity = f64::from(team_size) * hours_per_week;
    if hours_remaining <= 0.0 || capacity <= 0.0 {
        return 0;
    }
    (hours_remaining / capacity).ceil() as u32
}
