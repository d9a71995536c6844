//! Deterministic light source standing in for real hardware.
//!
//! Follows the BH1750 command model closely enough to exercise the poller:
//! readings need power, and one-time modes need a triggered conversion per
//! read (the sensor drops back to power-down after each one).

use super::{LightSensor, Mode};
use crate::error::SensorError;
use std::time::Instant;

/// Simulated BH1750-class sensor.
///
/// The light level follows a slow triangle wave between `floor` and
/// `ceiling`, quantized to the mode's resolution.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    powered: bool,
    mode: Mode,
    conversion_pending: bool,
    floor: f32,
    ceiling: f32,
    started: Instant,
}

impl SimulatedSensor {
    /// Period of the simulated light wave in seconds.
    const PERIOD_SECS: f32 = 20.0;

    /// Create a powered-down sensor sweeping between the given levels.
    pub fn new(floor: f32, ceiling: f32) -> Self {
        Self {
            powered: false,
            mode: Mode::default(),
            conversion_pending: false,
            floor: floor.min(ceiling),
            ceiling: ceiling.max(floor),
            started: Instant::now(),
        }
    }

    fn level(&self) -> f32 {
        let phase = (self.started.elapsed().as_secs_f32() / Self::PERIOD_SECS).fract();
        let triangle = 1.0 - (2.0f32.mul_add(phase, -1.0)).abs();
        let raw = (self.ceiling - self.floor).mul_add(triangle, self.floor);
        let step = self.mode.resolution_lux();
        (raw / step).round() * step
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new(5.0, 800.0)
    }
}

impl LightSensor for SimulatedSensor {
    fn reset(&mut self) -> Result<(), SensorError> {
        // The data register only accepts a reset while powered.
        if !self.powered {
            return Err(SensorError::NotPowered);
        }
        self.conversion_pending = false;
        Ok(())
    }

    fn set_power_state(&mut self, on: bool) -> Result<(), SensorError> {
        self.powered = on;
        if !on {
            self.conversion_pending = false;
        }
        Ok(())
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), SensorError> {
        self.mode = mode;
        Ok(())
    }

    fn trigger_manual_conversion(&mut self) -> Result<(), SensorError> {
        if !self.mode.is_one_time() {
            return Err(SensorError::Bus("manual conversion in continuous mode".into()));
        }
        // One-time commands power the sensor up on their own.
        self.powered = true;
        self.conversion_pending = true;
        Ok(())
    }

    fn read_light(&mut self) -> Result<f32, SensorError> {
        if self.mode.is_one_time() {
            if !self.conversion_pending {
                return Err(SensorError::NoConversion);
            }
            self.conversion_pending = false;
            self.powered = false;
        } else if !self.powered {
            return Err(SensorError::NotPowered);
        }

        Ok(self.level())
    }
}
