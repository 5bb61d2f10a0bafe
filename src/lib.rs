//! taskpulse - Project Metrics Library
//!
//! This library turns raw task-tracker records (tasks, lists, time entries)
//! into project-level metrics for the taskpulse CLI.
//!
//! # Core Concepts
//!
//! - **Task metrics**: per-task hours spent, estimated and remaining
//! - **Project metrics**: rollups with completion percent and a derived status
//! - **Dashboard summary**: totals and counts across every project
//! - **Due dates**: next deadline per project under an explicit policy
//! - **Weekly buckets**: hours per calendar week, from time entries when
//!   available and from current totals otherwise
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.taskpulse.toml`
//! - `error`: Error types and result aliases
//! - `record`: Raw records as exported by the tracker
//! - `source`: Record sources and the JSON export reader
//! - `units`: Unit conversion and classification rules
//! - `task_metrics`, `project`, `summary`: the metric engine
//! - `due`: Next-due-date selection and labels
//! - `week`, `weekly`: Week windows and weekly buckets
//! - `output`: Human and JSON output envelopes

pub mod cli;
pub mod config;
pub mod due;
pub mod error;
pub mod output;
pub mod project;
pub mod record;
pub mod source;
pub mod summary;
pub mod task_metrics;
pub mod units;
pub mod week;
pub mod weekly;

pub use error::{Error, Result};
