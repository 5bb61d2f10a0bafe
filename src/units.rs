//! Unit conversion and classification primitives.
//!
//! Everything here is stateless and total: missing or zero durations become
//! zero hours, unknown status types count as incomplete.

use serde::{Deserialize, Serialize};

use crate::record::{RawStatus, RawTask};

pub const MS_PER_HOUR: f64 = 3_600_000.0;
pub const MS_PER_DAY: i64 = 86_400_000;
pub const DEFAULT_LAUNCH_KEYWORD: &str = "launch";

/// Convert a millisecond duration to hours. `None` and zero yield 0.
pub fn ms_to_hours(ms: Option<i64>) -> f64 {
    match ms {
        Some(ms) if ms != 0 => ms as f64 / MS_PER_HOUR,
        _ => 0.0,
    }
}

/// Round to one decimal place, halves away from zero.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A task is complete iff its coarse status type is `closed` or `done`.
pub fn is_completed(status: &RawStatus) -> bool {
    matches!(status.kind.as_str(), "closed" | "done")
}

/// Case-insensitive substring test used by the launch name heuristic.
pub fn name_mentions(name: &str, keyword: &str) -> bool {
    name.to_lowercase().contains(&keyword.to_lowercase())
}

/// Decides whether a task is the project's launch milestone.
///
/// An explicit `milestone` flag on the task always wins. Without one, the
/// rule falls back to matching `keyword` in the task name when
/// `name_fallback` is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRule {
    pub keyword: String,
    pub name_fallback: bool,
}

impl Default for LaunchRule {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_LAUNCH_KEYWORD.to_string(),
            name_fallback: true,
        }
    }
}

impl LaunchRule {
    pub fn is_launch(&self, task: &RawTask) -> bool {
        match task.milestone {
            Some(flag) => flag,
            None => self.name_fallback && name_mentions(&task.name, &self.keyword),
        }
    }
}
