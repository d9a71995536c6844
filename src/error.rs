//! Error types for the light meter.
//!
//! Sensor failures and lock contention are non-fatal and only ever logged;
//! `AppError` covers the paths that end the application.

use std::time::Duration;
use thiserror::Error;

/// Errors reported by a [`LightSensor`](crate::sensor::LightSensor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The bus transaction failed.
    #[error("sensor bus transaction failed: {0}")]
    Bus(String),

    /// The sensor is powered down.
    #[error("sensor is not powered")]
    NotPowered,

    /// A one-time mode read was attempted without a triggered conversion.
    #[error("no conversion has been triggered")]
    NoConversion,
}

/// The shared state could not be acquired within its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shared state still held after {waited:?}")]
pub struct LockTimeout {
    /// How long the caller waited before giving up.
    pub waited: Duration,
}

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The config file is not valid TOML for [`AppConfig`](crate::AppConfig).
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A field holds a value outside its allowed range.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// The shared-state guard could not be created at startup.
    #[error("cannot allocate shared state: {0}")]
    StateAlloc(String),

    /// Every producer of the event queue is gone.
    #[error("event queue was torn down")]
    QueueClosed,

    /// Terminal or file I/O.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
