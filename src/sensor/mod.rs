//! Light sensor collaborator and the polling sequence run against it.
//!
//! The register-level protocol lives behind [`LightSensor`]; this crate only
//! drives the command sequence (power, mode, trigger, read).

mod poller;
mod simulated;

pub use poller::{PollOutcome, ReadStatus, SensorPoller, SensorReading};
pub use simulated::SimulatedSensor;

use crate::error::SensorError;
use serde::Deserialize;

/// Measurement mode of a BH1750-class sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Continuous, 1 lx resolution.
    ContinuousHigh,
    /// Continuous, 0.5 lx resolution.
    ContinuousHigh2,
    /// Continuous, 4 lx resolution.
    ContinuousLow,
    /// Single conversion, 1 lx resolution, then power down.
    #[default]
    OneTimeHigh,
    /// Single conversion, 0.5 lx resolution, then power down.
    OneTimeHigh2,
    /// Single conversion, 4 lx resolution, then power down.
    OneTimeLow,
}

impl Mode {
    /// Whether every reading needs its own triggered conversion.
    pub const fn is_one_time(self) -> bool {
        matches!(self, Self::OneTimeHigh | Self::OneTimeHigh2 | Self::OneTimeLow)
    }

    /// Smallest step between two readings, in lux.
    pub const fn resolution_lux(self) -> f32 {
        match self {
            Self::ContinuousHigh | Self::OneTimeHigh => 1.0,
            Self::ContinuousHigh2 | Self::OneTimeHigh2 => 0.5,
            Self::ContinuousLow | Self::OneTimeLow => 4.0,
        }
    }
}

/// An ambient light sensor.
///
/// Every call reports success or failure; callers decide which failures
/// are fatal (none are, in the polling path).
#[cfg_attr(test, mockall::automock)]
pub trait LightSensor {
    /// Reset the data register.
    fn reset(&mut self) -> Result<(), SensorError>;

    /// Power the sensor on or off.
    fn set_power_state(&mut self, on: bool) -> Result<(), SensorError>;

    /// Select the measurement mode.
    fn set_mode(&mut self, mode: Mode) -> Result<(), SensorError>;

    /// Start a one-shot conversion.
    fn trigger_manual_conversion(&mut self) -> Result<(), SensorError>;

    /// Read the converted value in lux.
    fn read_light(&mut self) -> Result<f32, SensorError>;
}
