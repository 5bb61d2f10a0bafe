//! taskpulse summary command implementation
//!
//! Dashboard view: every project sorted by remaining hours, global totals,
//! status counts and a completion forecast for the configured team.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::cli::{Clock, Context};
use crate::due::{describe_due, next_due, DateStyle, DueDatePolicy};
use crate::error::{Error, Result};
use crate::output::{emit_success, hours, HumanOutput};
use crate::project::{ProjectMetric, ProjectStatus};
use crate::summary::{weeks_to_completion, DashboardSummary};

/// Options for the summary command
pub struct SummaryOptions {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusFilter {
    All,
    Active,
    Only(ProjectStatus),
}

impl StatusFilter {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Only(ProjectStatus::Completed)),
            "not-started" => Ok(StatusFilter::Only(ProjectStatus::NotStarted)),
            "in-progress" => Ok(StatusFilter::Only(ProjectStatus::InProgress)),
            other => Err(Error::InvalidArgument(format!(
                "invalid status '{other}' (expected all|active|completed|not-started|in-progress)"
            ))),
        }
    }

    fn select<'a>(self, summary: &'a DashboardSummary) -> Vec<&'a ProjectMetric> {
        match self {
            StatusFilter::All => summary.projects.iter().collect(),
            StatusFilter::Active => summary.active().collect(),
            StatusFilter::Only(status) => summary.projects_with_status(status).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReport<'a> {
    status_filter: String,
    projects: Vec<&'a ProjectMetric>,
    total_hours_spent: f64,
    total_hours_estimated: f64,
    total_hours_remaining: f64,
    total_projects: usize,
    active_projects: usize,
    completed_projects: usize,
    not_started_projects: usize,
    in_progress_projects: usize,
    team_size: u32,
    hours_per_week: f64,
    weeks_to_completion: u32,
}

pub fn run(ctx: &Context, options: SummaryOptions) -> Result<()> {
    let filter = StatusFilter::parse(&options.status)?;
    let summary = DashboardSummary::build(&ctx.projects, &ctx.launch);

    let team = &ctx.config.team;
    let report = SummaryReport {
        status_filter: options.status.trim().to_string(),
        projects: filter.select(&summary),
        total_hours_spent: summary.total_hours_spent,
        total_hours_estimated: summary.total_hours_estimated,
        total_hours_remaining: summary.total_hours_remaining,
        total_projects: summary.total_projects,
        active_projects: summary.active_projects,
        completed_projects: summary.completed_projects,
        not_started_projects: summary.projects_with_status(ProjectStatus::NotStarted).count(),
        in_progress_projects: summary.projects_with_status(ProjectStatus::InProgress).count(),
        team_size: team.size,
        hours_per_week: team.hours_per_week,
        weeks_to_completion: weeks_to_completion(
            summary.total_hours_remaining,
            team.size,
            team.hours_per_week,
        ),
    };

    let human = match &ctx.clock {
        Clock::Local => render(&report, &Local::now()),
        Clock::Fixed(now) => render(&report, now),
    };
    emit_success(ctx.output, "summary", &report, Some(&human))
}

fn render<Tz>(report: &SummaryReport<'_>, now: &DateTime<Tz>) -> HumanOutput
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut human = HumanOutput::new("Project dashboard");
    human.push_summary("Hours spent", hours(report.total_hours_spent));
    human.push_summary("Hours estimated", hours(report.total_hours_estimated));
    human.push_summary("Hours remaining", hours(report.total_hours_remaining));
    human.push_summary(
        "Projects",
        format!(
            "{} ({} active: {} not started, {} in progress; {} completed)",
            report.total_projects,
            report.active_projects,
            report.not_started_projects,
            report.in_progress_projects,
            report.completed_projects
        ),
    );
    human.push_summary(
        "Weeks to completion",
        format!(
            "{} (team of {} at {}h/week)",
            report.weeks_to_completion, report.team_size, report.hours_per_week
        ),
    );

    for project in &report.projects {
        let due = next_due(&project.tasks, DueDatePolicy::EarliestDue)
            .map(|due| describe_due(due.timestamp, now, DateStyle::Short).label)
            .unwrap_or_else(|| "-".to_string());
        human.push_detail(format!(
            "{} [{}] {}% | {} spent / {} est / {} left | tasks {}/{} | next due {}",
            project.name,
            project.status,
            project.percent_complete,
            hours(project.hours_spent),
            hours(project.hours_estimated),
            hours(project.hours_remaining),
            project.completed_task_count,
            project.task_count,
            due
        ));
    }

    if report.projects.is_empty() {
        human.push_warning("no projects match the status filter");
    }
    human
}
