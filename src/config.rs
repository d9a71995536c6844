//! Application configuration.
//!
//! Loaded from a TOML file where every field has a default, validated after
//! load, then adjusted by command-line overrides.

use crate::cli::Cli;
use crate::display::VALUE_LINE_WIDTH;
use crate::error::ConfigError;
use crate::sensor::Mode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sampling cadence and sensor mode.
    pub sampling: SamplingConfig,
    /// Shared state access.
    pub state: StateConfig,
    /// Event queue sizing.
    pub queue: QueueConfig,
    /// Display geometry and repaint cadence.
    pub display: DisplayConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Sampling configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Period of the sampling tick.
    pub tick_interval_ms: u64,
    /// Wait between triggering a conversion and reading it.
    pub settle_delay_ms: u64,
    /// Sensor measurement mode.
    pub mode: Mode,
}

/// Shared state configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Upper bound on waiting for the shared state.
    pub lock_timeout_ms: u64,
}

/// Event queue configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum pending events.
    pub capacity: usize,
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Canvas width in columns.
    pub width: u16,
    /// Canvas height in rows.
    pub height: u16,
    /// Idle repaint period when no redraw was requested.
    pub repaint_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter passed to the logger (`error` .. `trace`).
    pub level: String,
    /// Log file; `luxview.log` when unset.
    pub file: Option<PathBuf>,
}

/// Log file used when none is configured.
pub const DEFAULT_LOG_FILE: &str = "luxview.log";

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            settle_delay_ms: 120,
            mode: Mode::default(),
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self { lock_timeout_ms: 25 }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { capacity: 8 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 8,
            repaint_interval_ms: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl SamplingConfig {
    /// Tick period as a [`Duration`].
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Settle delay as a [`Duration`].
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl StateConfig {
    /// Lock timeout as a [`Duration`].
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

impl DisplayConfig {
    /// Repaint period as a [`Duration`].
    pub const fn repaint_interval(&self) -> Duration {
        Duration::from_millis(self.repaint_interval_ms)
    }
}

impl LoggingConfig {
    /// The configured log file, or the default one.
    pub fn file_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        message: message.into(),
    }
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::from_file`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sampling = &self.sampling;
        if sampling.tick_interval_ms == 0 {
            return Err(invalid("sampling.tick_interval_ms", "must be greater than 0"));
        }
        if sampling.settle_delay_ms >= sampling.tick_interval_ms {
            return Err(invalid(
                "sampling.settle_delay_ms",
                format!(
                    "must be less than the tick interval ({} ms)",
                    sampling.tick_interval_ms
                ),
            ));
        }

        if self.state.lock_timeout_ms == 0 {
            return Err(invalid("state.lock_timeout_ms", "must be greater than 0"));
        }

        if self.queue.capacity == 0 {
            return Err(invalid("queue.capacity", "must be greater than 0"));
        }

        if self.display.width < VALUE_LINE_WIDTH {
            return Err(invalid(
                "display.width",
                format!("must be at least {VALUE_LINE_WIDTH}"),
            ));
        }
        if self.display.height < 3 {
            return Err(invalid("display.height", "must be at least 3"));
        }
        if self.display.repaint_interval_ms == 0 {
            return Err(invalid("display.repaint_interval_ms", "must be greater than 0"));
        }

        Ok(())
    }

    /// Apply command-line overrides, then re-validate.
    pub fn apply_cli_overrides(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(level) = cli.log_level {
            self.logging.level = level.as_str().to_ascii_lowercase();
        }
        if let Some(tick) = cli.tick_ms {
            self.sampling.tick_interval_ms = tick;
        }
        if let Some(settle) = cli.settle_ms {
            self.sampling.settle_delay_ms = settle;
        }
        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }
        self.validate()
    }
}
