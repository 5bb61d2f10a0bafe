#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::{TimeZone, Utc};
use taskpulse::record::{
    FolderRef, ListRef, RawList, RawStatus, RawTask, RawTimeEntry, TaskRef,
};
use taskpulse::source::{ProjectTasks, RecordExport};
use tempfile::TempDir;

pub const HOUR_MS: i64 = 3_600_000;

/// Epoch milliseconds of a UTC wall-clock time.
pub fn utc_ms(year: i32, month: u32, day: u32, hour: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid utc time")
        .timestamp_millis()
}

pub fn status(kind: &str) -> RawStatus {
    let label = match kind {
        "closed" => "complete",
        "done" => "done",
        "open" => "to do",
        other => other,
    };
    RawStatus {
        status: label.to_string(),
        kind: kind.to_string(),
    }
}

pub fn task(id: &str, name: &str, kind: &str) -> RawTask {
    RawTask {
        id: id.to_string(),
        name: name.to_string(),
        status: status(kind),
        time_estimate: None,
        time_spent: None,
        due_date: None,
        list: None,
        milestone: None,
    }
}

pub fn timed(mut task: RawTask, estimate_ms: Option<i64>, spent_ms: Option<i64>) -> RawTask {
    task.time_estimate = estimate_ms;
    task.time_spent = spent_ms;
    task
}

pub fn due(mut task: RawTask, due_ms: i64) -> RawTask {
    task.due_date = Some(due_ms.to_string());
    task
}

pub fn in_list(mut task: RawTask, list_id: &str) -> RawTask {
    task.list = Some(ListRef {
        id: list_id.to_string(),
        name: None,
    });
    task
}

pub fn list(id: &str, name: &str, folder: Option<&str>) -> RawList {
    RawList {
        id: id.to_string(),
        name: name.to_string(),
        folder: folder.map(|folder| FolderRef {
            id: folder.to_string(),
            name: None,
        }),
    }
}

pub fn project(id: &str, name: &str, tasks: Vec<RawTask>) -> ProjectTasks {
    ProjectTasks {
        id: id.to_string(),
        name: name.to_string(),
        tasks,
    }
}

/// A finished time entry of `duration_ms` starting at `start`.
pub fn entry(id: &str, task_id: Option<&str>, start: i64, duration_ms: i64) -> RawTimeEntry {
    RawTimeEntry {
        id: id.to_string(),
        task: task_id.map(|task_id| TaskRef {
            id: task_id.to_string(),
            name: format!("task {task_id}"),
        }),
        duration: duration_ms,
        start,
        end: Some(start + duration_ms),
        user: None,
    }
}

/// A timer that is still running.
pub fn running_entry(id: &str, task_id: &str, start: i64) -> RawTimeEntry {
    RawTimeEntry {
        duration: -start,
        end: None,
        ..entry(id, Some(task_id), start, 0)
    }
}

/// Temporary directory holding an export and optionally a config file.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn write_export(&self, export: &RecordExport) -> PathBuf {
        let json = serde_json::to_string_pretty(export).expect("serialize export");
        self.write_file("export.json", &json)
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        self.write_file(".taskpulse.toml", contents)
    }

    /// A command running inside the workspace with a fixed clock.
    pub fn cmd(&self, now: &str) -> Command {
        let mut cmd = taskpulse_cmd();
        cmd.current_dir(self.path())
            .env_remove("TASKPULSE_CONFIG")
            .env_remove("TASKPULSE_DATA")
            .env_remove("TASKPULSE_FOLDER")
            .env_remove("RUST_LOG")
            .arg("--now")
            .arg(now);
        cmd
    }
}

pub fn taskpulse_cmd() -> Command {
    Command::cargo_bin("taskpulse").expect("binary")
}

/// Wednesday 2024-12-18 10:00 UTC, shared by the CLI tests.
pub const NOW: &str = "2024-12-18T10:00:00Z";

/// Two lists in folder `f1`, one in `f2`, plus time entries across two weeks.
pub fn sample_export(with_entries: bool) -> RecordExport {
    let lists = vec![
        list("901", "Website", Some("f1")),
        list("902", "Mobile App", Some("f1")),
        list("903", "Archive", Some("f2")),
    ];
    let tasks = vec![
        in_list(
            due(
                timed(task("t1", "Design pages", "open"), Some(10 * HOUR_MS), Some(4 * HOUR_MS)),
                utc_ms(2024, 12, 19, 12),
            ),
            "901",
        ),
        in_list(
            due(
                timed(task("t2", "Launch website", "open"), Some(2 * HOUR_MS), None),
                utc_ms(2025, 1, 10, 12),
            ),
            "901",
        ),
        in_list(
            due(
                timed(task("t3", "API client", "custom"), Some(6 * HOUR_MS), Some(HOUR_MS)),
                utc_ms(2024, 12, 16, 12),
            ),
            "902",
        ),
        in_list(timed(task("t4", "Old launch", "closed"), None, Some(HOUR_MS)), "903"),
    ];
    let time_entries = with_entries.then(|| {
        vec![
            entry("e1", Some("t1"), utc_ms(2024, 12, 17, 9), 3 * HOUR_MS),
            entry("e2", Some("t3"), utc_ms(2024, 12, 10, 9), HOUR_MS),
            entry("e3", Some("t1"), utc_ms(2024, 12, 11, 9), HOUR_MS),
            entry("e4", Some("gone"), utc_ms(2024, 12, 17, 14), HOUR_MS / 2),
        ]
    });
    RecordExport {
        lists,
        tasks,
        time_entries,
    }
}
