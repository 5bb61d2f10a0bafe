//! taskpulse due command implementation

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use super::project::DueView;
use crate::cli::{Clock, Context};
use crate::due::{DateStyle, DueDatePolicy};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::summary::DashboardSummary;

/// Options for the due command
pub struct DueOptions {
    pub policy: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDue {
    project_id: String,
    project_name: String,
    due: Option<DueView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DueReport {
    policy: DueDatePolicy,
    projects: Vec<ProjectDue>,
}

pub fn run(ctx: &Context, options: DueOptions) -> Result<()> {
    let policy: DueDatePolicy = options.policy.parse()?;
    let summary = DashboardSummary::build(&ctx.projects, &ctx.launch);

    let report = match &ctx.clock {
        Clock::Local => build_report(&summary, policy, &Local::now()),
        Clock::Fixed(now) => build_report(&summary, policy, now),
    };

    let mut human = HumanOutput::new(match policy {
        DueDatePolicy::EarliestDue => "Next due dates (earliest open deadline)",
        DueDatePolicy::LaunchPriority => "Next due dates (launch first, else latest deadline)",
    });
    let overdue = report
        .projects
        .iter()
        .filter(|project| project.due.as_ref().is_some_and(|due| due.label.is_overdue))
        .count();
    human.push_summary("Projects", report.projects.len().to_string());
    human.push_summary("Overdue", overdue.to_string());
    for project in &report.projects {
        match &project.due {
            Some(due) => human.push_detail(format!(
                "{}: {} ({})",
                project.project_name, due.label.label, due.next.task_name
            )),
            None => human.push_detail(format!("{}: -", project.project_name)),
        }
    }

    emit_success(ctx.output, "due", &report, Some(&human))
}

fn build_report<Tz>(
    summary: &DashboardSummary,
    policy: DueDatePolicy,
    now: &DateTime<Tz>,
) -> DueReport
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let style = match policy {
        DueDatePolicy::EarliestDue => DateStyle::Short,
        DueDatePolicy::LaunchPriority => DateStyle::WithYear,
    };
    let projects = summary
        .projects
        .iter()
        .map(|project| ProjectDue {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            due: DueView::resolve(&project.tasks, policy, now, style),
        })
        .collect();
    DueReport { policy, projects }
}
