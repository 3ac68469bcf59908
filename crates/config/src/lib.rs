#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for procpool
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/procpool/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;

use constants::{
    APP_DIR, DEFAULT_CAPACITY, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SHELL, DEFAULT_SHELL_FLAG,
};
use procpool_errors::{ConfigError, Error};
use procpool_types::{ColorChoice, OutputFormat, ReclaimStrategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub shell: ShellConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Admission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub reclaim: ReclaimStrategy,
}

/// Shell used to interpret commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_shell_program")]
    pub program: String,
    #[serde(default = "default_shell_flag")]
    pub flag: String,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            dry_run: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            reclaim: ReclaimStrategy::FirstExited,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_SHELL.to_string(),
            flag: DEFAULT_SHELL_FLAG.to_string(),
        }
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_shell_program() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_shell_flag() -> String {
    DEFAULT_SHELL_FLAG.to_string()
}

impl PoolConfig {
    /// Poll interval as a `Duration`
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Directory for debug log files
    #[must_use]
    pub fn logs_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
            .join("logs")
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let Ok(config_path) = Self::default_path() else {
            tracing::debug!("no config directory on this system, using defaults");
            return Ok(Self::default());
        };

        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // PROCPOOL_OUTPUT
        if let Ok(output) = std::env::var("PROCPOOL_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => return Err(invalid_value("PROCPOOL_OUTPUT", output)),
            };
        }

        // PROCPOOL_COLOR
        if let Ok(color) = std::env::var("PROCPOOL_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => return Err(invalid_value("PROCPOOL_COLOR", color)),
            };
        }

        // PROCPOOL_CAPACITY
        if let Ok(capacity) = std::env::var("PROCPOOL_CAPACITY") {
            self.pool.capacity = capacity
                .parse()
                .map_err(|_| invalid_value("PROCPOOL_CAPACITY", capacity))?;
        }

        // PROCPOOL_DRY_RUN
        if let Ok(dry_run) = std::env::var("PROCPOOL_DRY_RUN") {
            self.pool.dry_run = match dry_run.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(invalid_value("PROCPOOL_DRY_RUN", dry_run)),
            };
        }

        // PROCPOOL_POLL_INTERVAL_MS
        if let Ok(interval) = std::env::var("PROCPOOL_POLL_INTERVAL_MS") {
            self.pool.poll_interval_ms = interval
                .parse()
                .map_err(|_| invalid_value("PROCPOOL_POLL_INTERVAL_MS", interval))?;
        }

        // PROCPOOL_RECLAIM
        if let Ok(reclaim) = std::env::var("PROCPOOL_RECLAIM") {
            self.pool.reclaim = ReclaimStrategy::from_name(&reclaim)
                .ok_or_else(|| invalid_value("PROCPOOL_RECLAIM", reclaim))?;
        }

        // PROCPOOL_SHELL
        if let Ok(shell) = std::env::var("PROCPOOL_SHELL") {
            self.shell.program = shell;
        }

        Ok(())
    }

    /// Reject settings the pool cannot run with
    ///
    /// # Errors
    ///
    /// Returns an error for a zero capacity, a zero poll interval or an
    /// empty shell program.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pool.capacity == 0 {
            return Err(invalid_value("pool.capacity", "0"));
        }
        if self.pool.poll_interval_ms == 0 {
            return Err(invalid_value("pool.poll_interval_ms", "0"));
        }
        if self.shell.program.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "shell.program must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn invalid_value(field: &str, value: impl Into<String>) -> Error {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.into(),
    }
    .into()
}
