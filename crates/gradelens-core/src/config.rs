//! Engine configuration: thresholds and defaults loaded from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grading::DEFAULT_PASSING_GRADE;
use crate::model::LearningStyle;
use crate::risk::{RiskThresholds, ATTENDANCE_THRESHOLD, COMPLETION_THRESHOLD};
use crate::trend::TREND_TOLERANCE;

/// Top-level gradelens configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grade at or above which a subject passes.
    #[serde(default = "default_passing_grade")]
    pub passing_grade: f64,
    /// General average below which a student is at risk.
    #[serde(default = "default_passing_grade")]
    pub risk_threshold: f64,
    /// Attendance percentage below which attendance is a risk factor.
    #[serde(default = "default_attendance_threshold")]
    pub attendance_threshold: f64,
    /// Completion percentage below which completion is a risk factor.
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: f64,
    /// Smallest mean difference that counts as a trend.
    #[serde(default = "default_trend_tolerance")]
    pub trend_tolerance: f64,
    /// Learning style for students who do not specify one.
    #[serde(default)]
    pub learning_style: LearningStyle,
}

fn default_passing_grade() -> f64 {
    DEFAULT_PASSING_GRADE
}
fn default_attendance_threshold() -> f64 {
    ATTENDANCE_THRESHOLD
}
fn default_completion_threshold() -> f64 {
    COMPLETION_THRESHOLD
}
fn default_trend_tolerance() -> f64 {
    TREND_TOLERANCE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            passing_grade: default_passing_grade(),
            risk_threshold: default_passing_grade(),
            attendance_threshold: default_attendance_threshold(),
            completion_threshold: default_completion_threshold(),
            trend_tolerance: default_trend_tolerance(),
            learning_style: LearningStyle::default(),
        }
    }
}

impl EngineConfig {
    /// Thresholds for [`crate::risk::risk_assessment_with`].
    pub fn risk_thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            grade: self.risk_threshold,
            attendance: self.attendance_threshold,
            completion: self.completion_threshold,
        }
    }

    /// Parse a config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config TOML")
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradelens.toml` in the current directory
/// 2. `~/.config/gradelens/config.toml`
///
/// Environment variable overrides: `GRADELENS_PASSING_GRADE`,
/// `GRADELENS_LEARNING_STYLE`.
pub fn load_config() -> Result<EngineConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EngineConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("gradelens.toml");
            if local.exists() {
                Some(local)
            } else {
                config_dir()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<EngineConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut EngineConfig) -> Result<()> {
    if let Ok(raw) = std::env::var("GRADELENS_PASSING_GRADE") {
        config.passing_grade = raw
            .trim()
            .parse()
            .with_context(|| format!("GRADELENS_PASSING_GRADE is not a number: {raw}"))?;
    }

    if let Ok(raw) = std::env::var("GRADELENS_LEARNING_STYLE") {
        config.learning_style = raw.parse()?;
    }

    Ok(())
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradelens"))
}
