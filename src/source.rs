//! Record source boundary.
//!
//! The metrics engine never fetches anything itself. A [`RecordSource`]
//! hands it complete, already-paginated record sets; [`ExportFile`] is the
//! implementation backed by a JSON export written by an external fetcher:
//!
//! ```json
//! {
//!   "lists": [{"id": "901", "name": "Website", "folder": {"id": "77"}}],
//!   "tasks": [{"id": "t1", "name": "Launch", "status": {"status": "complete", "type": "closed"},
//!              "time_estimate": 7200000, "time_spent": "3600000", "list": {"id": "901"}}],
//!   "time_entries": [{"id": "e1", "task": {"id": "t1", "name": "Launch"},
//!                     "duration": "3600000", "start": "1734336000000", "end": "1734339600000"}]
//! }
//! ```
//!
//! `time_entries` is optional; without it no time-entry history exists and
//! weekly reporting falls back to snapshot buckets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::{RawList, RawTask, RawTimeEntry};

/// One list and every task in it, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTasks {
    pub id: String,
    pub name: String,
    pub tasks: Vec<RawTask>,
}

pub trait RecordSource {
    /// Lists in `folder_id`, or every list when no folder is given.
    fn lists_in_folder(&self, folder_id: Option<&str>) -> Result<Vec<RawList>>;

    /// All tasks of one list, pagination already resolved.
    fn tasks_in_list(&self, list_id: &str) -> Result<Vec<RawTask>>;

    /// Entries starting within `[start_ms, end_ms]`. `None` when the source
    /// has no time-entry history at all.
    fn time_entries_in_range(&self, start_ms: i64, end_ms: i64)
        -> Result<Option<Vec<RawTimeEntry>>>;
}

/// Load every project of a folder with its tasks. Any source failure
/// aborts the whole load.
pub fn load_projects(source: &dyn RecordSource, folder_id: Option<&str>) -> Result<Vec<ProjectTasks>> {
    let lists = source.lists_in_folder(folder_id)?;
    let mut projects = Vec::with_capacity(lists.len());
    for list in lists {
        let tasks = source.tasks_in_list(&list.id)?;
        debug!(list = %list.id, tasks = tasks.len(), "loaded list tasks");
        projects.push(ProjectTasks {
            id: list.id,
            name: list.name,
            tasks,
        });
    }
    info!(projects = projects.len(), "loaded projects");
    Ok(projects)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordExport {
    #[serde(default)]
    pub lists: Vec<RawList>,
    #[serde(default)]
    pub tasks: Vec<RawTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_entries: Option<Vec<RawTimeEntry>>,
}

/// Records read from a JSON export file.
#[derive(Debug, Clone)]
pub struct ExportFile {
    path: PathBuf,
    export: RecordExport,
}

impl ExportFile {
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| Error::Source {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let export: RecordExport = serde_json::from_str(&content).map_err(|err| Error::Source {
            path: path.to_path_buf(),
            reason: format!("malformed export: {err}"),
        })?;
        Ok(Self::from_export(path, export))
    }

    pub fn from_export(path: impl Into<PathBuf>, export: RecordExport) -> Self {
        let orphans = export
            .tasks
            .iter()
            .filter(|task| {
                task.list_id()
                    .map_or(true, |list_id| !export.lists.iter().any(|list| list.id == list_id))
            })
            .count();
        if orphans > 0 {
            warn!(tasks = orphans, "export has tasks outside every list");
        }
        Self {
            path: path.into(),
            export,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_time_entries(&self) -> bool {
        self.export.time_entries.is_some()
    }
}

impl RecordSource for ExportFile {
    fn lists_in_folder(&self, folder_id: Option<&str>) -> Result<Vec<RawList>> {
        Ok(self
            .export
            .lists
            .iter()
            .filter(|list| folder_id.map_or(true, |folder| list.folder_id() == Some(folder)))
            .cloned()
            .collect())
    }

    fn tasks_in_list(&self, list_id: &str) -> Result<Vec<RawTask>> {
        Ok(self
            .export
            .tasks
            .iter()
            .filter(|task| task.list_id() == Some(list_id))
            .cloned()
            .collect())
    }

    fn time_entries_in_range(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Option<Vec<RawTimeEntry>>> {
        Ok(self.export.time_entries.as_ref().map(|entries| {
            entries
                .iter()
                .filter(|entry| start_ms <= entry.start && entry.start <= end_ms)
                .cloned()
                .collect()
        }))
    }
}
