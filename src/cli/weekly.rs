//! taskpulse weekly command implementation
//!
//! Picks the bucket source by capability: logged time entries when the
//! export carries them, current project totals otherwise.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::info;

use crate::cli::{Clock, Context};
use crate::config::MAX_WEEKS;
use crate::error::{Error, Result};
use crate::output::{emit_success, hours, HumanOutput};
use crate::project::ProjectMetric;
use crate::source::RecordSource;
use crate::week::{week_windows, TimePeriod};
use crate::weekly::{
    weekly_buckets, BucketMode, EntryAccurate, SnapshotDegraded, TaskIndex, WeeklyBucket,
};

/// Options for the weekly command
pub struct WeeklyOptions {
    pub period: Option<String>,
    pub weeks: Option<u32>,
    pub snapshot: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeeklyReport {
    mode: BucketMode,
    weeks: u32,
    total_hours: f64,
    buckets: Vec<WeeklyBucket>,
}

pub fn run(ctx: &Context, options: WeeklyOptions) -> Result<()> {
    let weeks = resolve_weeks(&options, ctx.config.weekly.weeks)?;
    let report = match &ctx.clock {
        Clock::Local => build_report(ctx, weeks, options.snapshot, &Local::now())?,
        Clock::Fixed(now) => build_report(ctx, weeks, options.snapshot, now)?,
    };

    let mut human = HumanOutput::new(format!("Weekly hours ({} weeks)", report.weeks));
    human.push_summary(
        "Mode",
        match report.mode {
            BucketMode::EntryAccurate => "time entries",
            BucketMode::SnapshotDegraded => "current totals (snapshot)",
        },
    );
    human.push_summary("Total", hours(report.total_hours));
    for bucket in &report.buckets {
        let breakdown = bucket
            .projects
            .iter()
            .map(|project| format!("{} {}", project.project_name, hours(project.hours)))
            .collect::<Vec<_>>()
            .join(", ");
        if breakdown.is_empty() {
            human.push_detail(format!("{}: {}", bucket.week_label, hours(bucket.total_hours)));
        } else {
            human.push_detail(format!(
                "{}: {} ({breakdown})",
                bucket.week_label,
                hours(bucket.total_hours)
            ));
        }
    }
    if report.mode == BucketMode::SnapshotDegraded {
        human.push_warning("no time-entry history used; only the current week shows hours");
    }

    emit_success(ctx.output, "weekly", &report, Some(&human))
}

fn resolve_weeks(options: &WeeklyOptions, default_weeks: u32) -> Result<u32> {
    let weeks = match (options.weeks, options.period.as_deref()) {
        (Some(weeks), _) => weeks,
        (None, Some(period)) => period.parse::<TimePeriod>()?.weeks(),
        (None, None) => default_weeks,
    };
    if weeks == 0 || weeks > MAX_WEEKS {
        return Err(Error::InvalidArgument(format!(
            "weeks must be between 1 and {MAX_WEEKS}"
        )));
    }
    Ok(weeks)
}

fn build_report<Tz: TimeZone>(
    ctx: &Context,
    weeks: u32,
    force_snapshot: bool,
    now: &DateTime<Tz>,
) -> Result<WeeklyReport> {
    let windows = week_windows(now, weeks);
    let (first, last) = match (windows.first(), windows.last()) {
        (Some(first), Some(last)) => (first.start_ms, last.end_ms),
        _ => return Err(Error::InvalidArgument("weeks must be >= 1".to_string())),
    };

    let entries = if force_snapshot {
        None
    } else {
        ctx.source.time_entries_in_range(first, last)?
    };

    let (mode, buckets) = match entries {
        Some(entries) => {
            let index = TaskIndex::from_projects(&ctx.projects);
            info!(
                entries = entries.len(),
                indexed_tasks = index.len(),
                "bucketing time entries"
            );
            let source = EntryAccurate::new(&entries, &index);
            (BucketMode::EntryAccurate, weekly_buckets(&source, &windows))
        }
        None => {
            // Upstream list order, not dashboard order.
            let metrics: Vec<ProjectMetric> = ctx
                .projects
                .iter()
                .map(|project| {
                    ProjectMetric::build(&project.id, &project.name, &project.tasks, &ctx.launch)
                })
                .collect();
            let source = SnapshotDegraded::new(&metrics);
            (BucketMode::SnapshotDegraded, weekly_buckets(&source, &windows))
        }
    };

    let total: f64 = buckets.iter().map(|bucket| bucket.total_hours).sum();
    Ok(WeeklyReport {
        mode,
        weeks,
        total_hours: crate::units::round_tenth(total),
        buckets,
    })
}
