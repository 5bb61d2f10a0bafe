//! Next-due-date selection.
//!
//! Two policies answer "when is this project next due" differently. The
//! tabular dashboard shows the earliest open deadline; the project card
//! shows the launch deadline, or the latest open deadline when there is no
//! open launch task. Callers pick a policy explicitly.

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task_metrics::TaskMetric;
use crate::units::MS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueDatePolicy {
    /// Smallest due timestamp among open tasks.
    EarliestDue,
    /// Open launch task first, else the largest due timestamp.
    LaunchPriority,
}

impl FromStr for DueDatePolicy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "earliest" | "earliest_due" => Ok(DueDatePolicy::EarliestDue),
            "launch" | "launch_priority" => Ok(DueDatePolicy::LaunchPriority),
            other => Err(Error::InvalidArgument(format!(
                "invalid due policy '{other}' (expected earliest|launch)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextDue {
    pub task_id: String,
    pub task_name: String,
    pub timestamp: i64,
}

/// Pick the next relevant due date under `policy`. `None` when no open task
/// has a due date.
pub fn next_due(tasks: &[TaskMetric], policy: DueDatePolicy) -> Option<NextDue> {
    let candidates = tasks
        .iter()
        .filter(|task| !task.is_completed)
        .filter_map(|task| task.due_timestamp().map(|timestamp| (task, timestamp)));

    let chosen = match policy {
        DueDatePolicy::EarliestDue => candidates.fold(None, |best, (task, timestamp)| match best {
            Some((_, best_ts)) if best_ts <= timestamp => best,
            _ => Some((task, timestamp)),
        }),
        DueDatePolicy::LaunchPriority => {
            let candidates: Vec<_> = candidates.collect();
            candidates
                .iter()
                .copied()
                .find(|(task, _)| task.is_launch)
                .or_else(|| {
                    candidates.iter().copied().fold(None, |best, (task, timestamp)| match best {
                        Some((_, best_ts)) if best_ts >= timestamp => best,
                        _ => Some((task, timestamp)),
                    })
                })
        }
    };

    chosen.map(|(task, timestamp)| NextDue {
        task_id: task.id.clone(),
        task_name: task.name.clone(),
        timestamp,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueProximity {
    Overdue,
    Today,
    Tomorrow,
    Upcoming,
}

impl DueProximity {
    /// Whole days until due, rounded up.
    pub fn from_days(diff_days: i64) -> Self {
        match diff_days {
            d if d < 0 => DueProximity::Overdue,
            0 => DueProximity::Today,
            1 => DueProximity::Tomorrow,
            _ => DueProximity::Upcoming,
        }
    }

    fn suffix(self) -> Option<&'static str> {
        match self {
            DueProximity::Overdue => Some("overdue"),
            DueProximity::Today => Some("today"),
            DueProximity::Tomorrow => Some("tomorrow"),
            DueProximity::Upcoming => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Dec 18"
    Short,
    /// "Dec 18, 2024"
    WithYear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueLabel {
    pub date: String,
    pub diff_days: i64,
    pub proximity: DueProximity,
    pub is_overdue: bool,
    pub label: String,
}

/// Ceiling of the millisecond gap divided by one day.
pub fn diff_days(due_ms: i64, now_ms: i64) -> i64 {
    (due_ms.saturating_sub(now_ms) as f64 / MS_PER_DAY as f64).ceil() as i64
}

/// Label a due timestamp relative to `now`, formatted in `now`'s zone.
pub fn describe_due<Tz>(due_ms: i64, now: &DateTime<Tz>, style: DateStyle) -> DueLabel
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let diff_days = diff_days(due_ms, now.timestamp_millis());
    let proximity = DueProximity::from_days(diff_days);

    let pattern = match style {
        DateStyle::Short => "%b %-d",
        DateStyle::WithYear => "%b %-d, %Y",
    };
    let date = match Utc.timestamp_millis_opt(due_ms).single() {
        Some(utc) => utc.with_timezone(&now.timezone()).format(pattern).to_string(),
        None => due_ms.to_string(),
    };

    let label = match proximity.suffix() {
        Some(suffix) => format!("{date} ({suffix})"),
        None => date.clone(),
    };

    DueLabel {
        date,
        diff_days,
        proximity,
        is_overdue: proximity == DueProximity::Overdue,
        label,
    }
}
