//! Configuration loading and management
//!
//! Handles parsing of `.taskpulse.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::units::{LaunchRule, DEFAULT_LAUNCH_KEYWORD};

pub const CONFIG_FILE: &str = ".taskpulse.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where records come from
    #[serde(default)]
    pub source: SourceConfig,

    /// Team capacity for completion forecasts
    #[serde(default)]
    pub team: TeamConfig,

    /// Launch milestone detection
    #[serde(default)]
    pub launch: LaunchConfig,

    /// Weekly report defaults
    #[serde(default)]
    pub weekly: WeeklyConfig,
}

/// Record source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the JSON record export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    /// Only report lists in this folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// Team capacity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Number of people working the backlog
    #[serde(default = "default_team_size")]
    pub size: u32,

    /// Working hours per person per week
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: f64,
}

fn default_team_size() -> u32 {
    1
}

fn default_hours_per_week() -> f64 {
    40.0
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            size: default_team_size(),
            hours_per_week: default_hours_per_week(),
        }
    }
}

/// Launch detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Name keyword used when a task carries no milestone flag
    #[serde(default = "default_launch_keyword")]
    pub keyword: String,

    /// Fall back to the name keyword for unflagged tasks
    #[serde(default = "default_true")]
    pub name_fallback: bool,
}

fn default_launch_keyword() -> String {
    DEFAULT_LAUNCH_KEYWORD.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            keyword: default_launch_keyword(),
            name_fallback: true,
        }
    }
}

impl LaunchConfig {
    pub fn rule(&self) -> LaunchRule {
        LaunchRule {
            keyword: self.keyword.trim().to_string(),
            name_fallback: self.name_fallback,
        }
    }
}

/// Weekly report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyConfig {
    /// Weeks shown when no period is requested
    #[serde(default = "default_weeks")]
    pub weeks: u32,
}

fn default_weeks() -> u32 {
    12
}

impl Default for WeeklyConfig {
    fn default() -> Self {
        Self {
            weeks: default_weeks(),
        }
    }
}

pub const MAX_WEEKS: u32 = 520;

impl Config {
    /// Load configuration from a `.taskpulse.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> crate::error::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.team.validate()?;
        self.launch.validate()?;
        self.weekly.validate()?;
        if let Some(folder) = &self.source.folder_id {
            if folder.trim().is_empty() {
                return Err(crate::error::Error::InvalidConfig(
                    "source.folder_id cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl TeamConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.size == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "team.size must be >= 1".to_string(),
            ));
        }
        if !self.hours_per_week.is_finite() || self.hours_per_week <= 0.0 {
            return Err(crate::error::Error::InvalidConfig(
                "team.hours_per_week must be > 0".to_string(),
            ));
        }
        if self.hours_per_week > 168.0 {
            return Err(crate::error::Error::InvalidConfig(
                "team.hours_per_week must be <= 168".to_string(),
            ));
        }
        Ok(())
    }
}

impl LaunchConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.keyword.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "launch.keyword cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl WeeklyConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.weeks == 0 || self.weeks > MAX_WEEKS {
            return Err(crate::error::Error::InvalidConfig(format!(
                "weekly.weeks must be between 1 and {MAX_WEEKS}"
            )));
        }
        Ok(())
    }
}
