//! Calendar-week windows.
//!
//! Weeks run Monday 00:00:00.000 through Sunday 23:59:59.999 in the time
//! zone of the reference instant. A Sunday belongs to the week that started
//! six days earlier.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekWindow {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// First millisecond of Monday.
    pub start_ms: i64,
    /// Last millisecond of Sunday.
    pub end_ms: i64,
    pub label: String,
    pub is_current: bool,
}

impl WeekWindow {
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        self.start_ms <= timestamp_ms && timestamp_ms <= self.end_ms
    }
}

pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// `weeks` consecutive windows ending with the week containing `now`,
/// oldest first.
pub fn week_windows<Tz: TimeZone>(now: &DateTime<Tz>, weeks: u32) -> Vec<WeekWindow> {
    let tz = now.timezone();
    let current_monday = monday_of(now.date_naive());

    (0..weeks)
        .rev()
        .map(|offset| {
            let week_start = current_monday - Duration::weeks(i64::from(offset));
            let week_end = week_start + Duration::days(6);
            let next_monday = week_start + Duration::weeks(1);

            // Ending one millisecond before the next Monday keeps adjacent
            // windows gap-free even across DST shifts.
            WeekWindow {
                week_start,
                week_end,
                start_ms: local_midnight_ms(&tz, week_start),
                end_ms: local_midnight_ms(&tz, next_monday) - 1,
                label: week_label(week_start, week_end),
                is_current: offset == 0,
            }
        })
        .collect()
}

/// Epoch milliseconds of local midnight on `date`. When midnight falls in
/// a DST gap the first valid instant after it is used.
fn local_midnight_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight: NaiveDateTime = date.and_time(chrono::NaiveTime::MIN);
    for shift in 0..3 {
        let candidate = midnight + Duration::hours(shift);
        if let Some(instant) = tz.from_local_datetime(&candidate).earliest() {
            return instant.timestamp_millis();
        }
    }
    tz.from_utc_datetime(&midnight).timestamp_millis()
}

/// "Dec 18-24", or "Dec 29-Jan 4" across a month boundary.
pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    let start_month = start.format("%b");
    if start.month() == end.month() {
        format!("{start_month} {}-{}", start.day(), end.day())
    } else {
        format!("{start_month} {}-{} {}", start.day(), end.format("%b"), end.day())
    }
}

/// Reporting period selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Week,
    Month,
    Quarter,
    Year,
}

impl TimePeriod {
    pub fn weeks(self) -> u32 {
        match self {
            TimePeriod::Week => 1,
            TimePeriod::Month => 4,
            TimePeriod::Quarter => 12,
            TimePeriod::Year => 52,
        }
    }
}

impl FromStr for TimePeriod {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "week" => Ok(TimePeriod::Week),
            "month" => Ok(TimePeriod::Month),
            "quarter" => Ok(TimePeriod::Quarter),
            "year" => Ok(TimePeriod::Year),
            other => Err(Error::InvalidArgument(format!(
                "invalid period '{other}' (expected week|month|quarter|year)"
            ))),
        }
    }
}
