//! taskpulse project command implementation

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::cli::{Clock, Context};
use crate::due::{describe_due, next_due, DateStyle, DueDatePolicy, DueLabel, NextDue};
use crate::error::{Error, Result};
use crate::output::{emit_success, hours, HumanOutput};
use crate::project::ProjectMetric;
use crate::summary::DashboardSummary;
use crate::task_metrics::TaskMetric;

/// Options for the project command
pub struct ProjectOptions {
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DueView {
    #[serde(flatten)]
    pub next: NextDue,
    #[serde(flatten)]
    pub label: DueLabel,
}

impl DueView {
    pub(crate) fn resolve<Tz>(
        tasks: &[TaskMetric],
        policy: DueDatePolicy,
        now: &DateTime<Tz>,
        style: DateStyle,
    ) -> Option<Self>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        next_due(tasks, policy).map(|next| {
            let label = describe_due(next.timestamp, now, style);
            DueView { next, label }
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDetail<'a> {
    project: &'a ProjectMetric,
    earliest_due: Option<DueView>,
    launch_due: Option<DueView>,
}

pub fn run(ctx: &Context, options: ProjectOptions) -> Result<()> {
    let summary = DashboardSummary::build(&ctx.projects, &ctx.launch);
    let project = summary
        .find_project(&options.query)
        .ok_or_else(|| Error::ProjectNotFound(options.query.clone()))?;

    let detail = match &ctx.clock {
        Clock::Local => build_detail(project, &Local::now()),
        Clock::Fixed(now) => build_detail(project, now),
    };
    let human = render(&detail);
    emit_success(ctx.output, "project", &detail, Some(&human))
}

fn build_detail<'a, Tz>(project: &'a ProjectMetric, now: &DateTime<Tz>) -> ProjectDetail<'a>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ProjectDetail {
        project,
        earliest_due: DueView::resolve(
            &project.tasks,
            DueDatePolicy::EarliestDue,
            now,
            DateStyle::Short,
        ),
        launch_due: DueView::resolve(
            &project.tasks,
            DueDatePolicy::LaunchPriority,
            now,
            DateStyle::WithYear,
        ),
    }
}

fn render(detail: &ProjectDetail<'_>) -> HumanOutput {
    let project = detail.project;
    let mut human = HumanOutput::new(format!("{} ({})", project.name, project.id));
    human.push_summary("Status", project.status.label());
    human.push_summary("Launched", if project.is_launched { "yes" } else { "no" });
    human.push_summary("Complete", format!("{}%", project.percent_complete));
    human.push_summary("Hours spent", hours(project.hours_spent));
    human.push_summary("Hours estimated", hours(project.hours_estimated));
    human.push_summary("Hours remaining", hours(project.hours_remaining));
    human.push_summary(
        "Tasks",
        format!("{}/{} completed", project.completed_task_count, project.task_count),
    );
    human.push_summary(
        "Earliest due",
        detail
            .earliest_due
            .as_ref()
            .map(|due| format!("{} - {}", due.label.label, due.next.task_name))
            .unwrap_or_else(|| "-".to_string()),
    );
    human.push_summary(
        "Launch due",
        detail
            .launch_due
            .as_ref()
            .map(|due| format!("{} - {}", due.label.label, due.next.task_name))
            .unwrap_or_else(|| "-".to_string()),
    );

    for task in &project.tasks {
        let marker = if task.is_completed { "x" } else { " " };
        let launch = if task.is_launch { " [launch]" } else { "" };
        human.push_detail(format!(
            "[{marker}] {}{launch} - {} ({}) - {} spent / {} est / {} left",
            task.name,
            task.status,
            task.status_type,
            hours(task.hours_spent),
            hours(task.hours_estimated),
            hours(task.hours_remaining)
        ));
    }

    let earliest = detail.earliest_due.as_ref().map(|due| due.next.timestamp);
    let launch = detail.launch_due.as_ref().map(|due| due.next.timestamp);
    if earliest != launch {
        human.push_warning("earliest and launch due dates differ for this project");
    }
    human
}
