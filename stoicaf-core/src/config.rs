//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/stoicaf/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/stoicaf/` (~/.config/stoicaf/)
//! - Data: `$XDG_DATA_HOME/stoicaf/` (~/.local/share/stoicaf/)
//! - State/Logs: `$XDG_STATE_HOME/stoicaf/` (~/.local/state/stoicaf/)

use crate::analytics;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics window configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics window configuration
///
/// The bounded windows trade exactness for query cost on long histories;
/// they are configuration rather than hardcoded values so the tradeoff
/// stays visible to callers.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Recent entries fed to the streak calculation; streaks longer than
    /// this window truncate
    #[serde(default = "default_streak_entry_window")]
    pub streak_entry_window: usize,

    /// Recent entries fed to the pillar distribution
    #[serde(default = "default_distribution_window")]
    pub distribution_window: usize,

    /// Guided prompt days per pillar track
    #[serde(default = "default_track_length")]
    pub track_length: u32,

    /// Length of the dashboard mood series, in days
    #[serde(default = "default_mood_window_days")]
    pub mood_window_days: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            streak_entry_window: default_streak_entry_window(),
            distribution_window: default_distribution_window(),
            track_length: default_track_length(),
            mood_window_days: default_mood_window_days(),
        }
    }
}

fn default_streak_entry_window() -> usize {
    analytics::STREAK_ENTRY_WINDOW
}

fn default_distribution_window() -> usize {
    analytics::DISTRIBUTION_WINDOW
}

fn default_track_length() -> u32 {
    analytics::TRACK_LENGTH
}

fn default_mood_window_days() -> usize {
    analytics::MOOD_WINDOW_DAYS
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject window values that would make the aggregators degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.analytics.streak_entry_window == 0 {
            return Err(Error::Config(
                "analytics.streak_entry_window must be at least 1".to_string(),
            ));
        }
        if self.analytics.distribution_window == 0 {
            return Err(Error::Config(
                "analytics.distribution_window must be at least 1".to_string(),
            ));
        }
        if self.analytics.track_length == 0 {
            return Err(Error::Config(
                "analytics.track_length must be at least 1".to_string(),
            ));
        }
        if self.analytics.mood_window_days == 0 {
            return Err(Error::Config(
                "analytics.mood_window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/stoicaf/config.toml` (~/.config/stoicaf/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("stoicaf").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite journal)
    ///
    /// `$XDG_DATA_HOME/stoicaf/` (~/.local/share/stoicaf/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("stoicaf")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/stoicaf/` (~/.local/state/stoicaf/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("stoicaf")
    }

    /// Returns the journal database file path
    ///
    /// `$XDG_DATA_HOME/stoicaf/journal.db` (~/.local/share/stoicaf/journal.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("journal.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/stoicaf/stoicaf.log` (~/.local/state/stoicaf/stoicaf.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("stoicaf.log")
    }
}
