//! Command-line interface for taskpulse
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::source::{load_projects, ExportFile, ProjectTasks};
use crate::units::LaunchRule;

mod due;
mod project;
mod summary;
mod weekly;

/// taskpulse - project metrics from task tracker exports
///
/// Turns exported tasks and time entries into per-project time accounting,
/// status rollups, due dates and weekly trends.
#[derive(Parser, Debug)]
#[command(name = "taskpulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./.taskpulse.toml when present)
    #[arg(long, global = true, env = "TASKPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON record export to read
    #[arg(long, global = true, env = "TASKPULSE_DATA")]
    pub data: Option<PathBuf>,

    /// Only include lists from this folder
    #[arg(long, global = true, env = "TASKPULSE_FOLDER")]
    pub folder: Option<String>,

    /// Reference time as RFC 3339 (defaults to the local clock)
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dashboard summary across all projects
    Summary {
        /// Which projects to list: all, active, completed, not-started, in-progress
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Show one project with every task
    Project {
        /// Project id or exact name (case-insensitive)
        query: String,
    },

    /// Next due date per project
    Due {
        /// Selection policy: earliest or launch
        #[arg(long, default_value = "earliest")]
        policy: String,
    },

    /// Hours per calendar week
    Weekly {
        /// Period: week, month, quarter, year
        #[arg(long)]
        period: Option<String>,

        /// Explicit number of weeks (overrides --period)
        #[arg(long)]
        weeks: Option<u32>,

        /// Use current project totals even when time entries exist
        #[arg(long)]
        snapshot: bool,
    },
}

/// Reference clock for date-relative output.
#[derive(Debug, Clone)]
pub(crate) enum Clock {
    Local,
    Fixed(DateTime<FixedOffset>),
}

impl Clock {
    fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(Clock::Local),
            Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(Clock::Fixed)
                .map_err(|err| Error::InvalidArgument(format!("invalid --now '{raw}': {err}"))),
        }
    }
}

/// Everything a command needs after configuration and records are loaded.
pub(crate) struct Context {
    pub config: Config,
    pub source: ExportFile,
    pub projects: Vec<ProjectTasks>,
    pub launch: LaunchRule,
    pub clock: Clock,
    pub output: OutputOptions,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = self.load_context()?;
        match self.command {
            Commands::Summary { status } => summary::run(&ctx, summary::SummaryOptions { status }),
            Commands::Project { query } => project::run(&ctx, project::ProjectOptions { query }),
            Commands::Due { policy } => due::run(&ctx, due::DueOptions { policy }),
            Commands::Weekly { period, weeks, snapshot } => weekly::run(
                &ctx,
                weekly::WeeklyOptions {
                    period,
                    weeks,
                    snapshot,
                },
            ),
        }
    }

    fn load_context(&self) -> Result<Context> {
        let clock = Clock::parse(self.now.as_deref())?;
        let (config, config_dir) = self.load_config()?;

        let data = match (&self.data, &config.source.data) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) => resolve_relative(config_dir.as_deref(), path),
            (None, None) => return Err(Error::NoDataSource),
        };
        let folder = self
            .folder
            .clone()
            .or_else(|| config.source.folder_id.clone())
            .filter(|folder| !folder.trim().is_empty());

        debug!(data = %data.display(), folder = ?folder, "loading records");
        let source = ExportFile::open(&data)?;
        debug!(
            path = %source.path().display(),
            time_entries = source.has_time_entries(),
            "opened record export"
        );
        let projects = load_projects(&source, folder.as_deref())?;
        let launch = config.launch.rule();

        Ok(Context {
            config,
            source,
            projects,
            launch,
            clock,
            output: OutputOptions {
                json: self.json,
                quiet: self.quiet,
            },
        })
    }

    fn load_config(&self) -> Result<(Config, Option<PathBuf>)> {
        if let Some(path) = &self.config {
            let config = Config::load(path)?;
            return Ok((config, path.parent().map(Path::to_path_buf)));
        }
        let cwd = std::env::current_dir()?;
        let config = Config::load_from_dir(&cwd)?;
        let dir = cwd.join(CONFIG_FILE).exists().then_some(cwd);
        Ok((config, dir))
    }
}

fn resolve_relative(base: Option<&Path>, path: &Path) -> PathBuf {
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
