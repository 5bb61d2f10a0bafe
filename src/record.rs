//! Raw records as supplied by the tracking service.
//!
//! These mirror the upstream JSON shapes. Durations and timestamps are
//! epoch milliseconds; upstream sends them as numbers or numeric strings
//! depending on the endpoint, so the deserializers in [`lenient`] accept
//! both and degrade anything unparsable to `None`/0.

use serde::{Deserialize, Serialize};

/// Status label plus coarse type (`open`, `closed`, `done`, `custom`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatus {
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Reference to the list that owns a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRef {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTask {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    pub status: RawStatus,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub time_estimate: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub time_spent: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub list: Option<ListRef>,
    /// Explicit launch-milestone marker set upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<bool>,
}

impl RawTask {
    pub fn list_id(&self) -> Option<&str> {
        self.list.as_ref().map(|list| list.id.as_str())
    }
}

/// One project: a list inside a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawList {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folder: Option<FolderRef>,
}

impl RawList {
    pub fn folder_id(&self) -> Option<&str> {
        self.folder.as_ref().map(|folder| folder.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// A logged duration against one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimeEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default)]
    pub task: Option<TaskRef>,
    /// Negative while the timer is still running.
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub duration: i64,
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub start: i64,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub end: Option<i64>,
    #[serde(default)]
    pub user: Option<RawUser>,
}

impl RawTimeEntry {
    pub fn task_id(&self) -> Option<&str> {
        self.task.as_ref().map(|task| task.id.as_str())
    }

    /// Logged milliseconds. Running timers carry a negative duration and
    /// log nothing; a missing `end` alone does not discard the duration.
    pub fn logged_ms(&self) -> i64 {
        self.duration.max(0)
    }
}

/// Deserializers that accept numbers or numeric strings.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn value_to_i64(value: &Value) -> Option<i64> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|float| float as i64)),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().map(|float| float as i64))
            }
            _ => None,
        }
    }

    pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_to_i64))
    }

    pub fn i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_i64(deserializer)?.unwrap_or(0))
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        })
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number id, got {other}"
            ))),
        }
    }
}
