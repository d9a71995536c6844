//! Sensor poller: trigger, settle, read.
//!
//! In one-time modes the sensor only holds a valid value after a triggered
//! conversion has had time to complete, so every poll runs the full
//! trigger + settle delay + read sequence. The delay runs on the caller's
//! thread.

use super::{LightSensor, Mode};
use crate::state::SharedState;
use log::{debug, warn};
use std::thread;
use std::time::Duration;

/// Outcome of the read phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// The sensor returned a fresh value.
    Ok,
    /// The read failed; the reading carries the previous value.
    Failed,
}

/// Result of a single poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Fresh value on success, previous value (if any) on failure.
    pub lux: Option<f32>,
    /// Whether the read phase succeeded.
    pub status: ReadStatus,
}

impl SensorReading {
    /// Whether the reading holds a fresh value.
    pub fn is_ok(&self) -> bool {
        self.status == ReadStatus::Ok
    }
}

/// What a poll did to the shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollOutcome {
    /// A fresh value was committed.
    Updated(f32),
    /// The sensor read failed; the state keeps its previous value.
    ReadFailed,
    /// The state stayed locked past the timeout; the cycle was skipped.
    Contended,
}

/// Drives the trigger/settle/read sequence against a [`LightSensor`].
#[derive(Debug)]
pub struct SensorPoller<S> {
    sensor: S,
    mode: Mode,
    settle_delay: Duration,
    last_lux: Option<f32>,
}

impl<S: LightSensor> SensorPoller<S> {
    /// Create a poller using one-time high resolution mode.
    pub const fn new(sensor: S, settle_delay: Duration) -> Self {
        Self {
            sensor,
            mode: Mode::OneTimeHigh,
            settle_delay,
            last_lux: None,
        }
    }

    /// Use a different measurement mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Reset the sensor, power it on and select the measurement mode.
    ///
    /// Each step is attempted regardless of the previous one failing.
    pub fn power_up(&mut self) {
        debug!("Initializing sensor");
        match self.sensor.reset() {
            Ok(()) => debug!("Sensor reset successful"),
            Err(e) => debug!("Could not reset sensor: {e}"),
        }

        match self.sensor.set_power_state(true) {
            Ok(()) => debug!("Power state set to on"),
            Err(e) => debug!("Could not set power state: {e}"),
        }

        match self.sensor.set_mode(self.mode) {
            Ok(()) => debug!("Mode set to {:?}", self.mode),
            Err(e) => debug!("Could not set mode {:?}: {e}", self.mode),
        }
    }

    /// Power the sensor down.
    pub fn power_down(&mut self) {
        if let Err(e) = self.sensor.set_power_state(false) {
            warn!("Could not power down sensor: {e}");
        }
    }

    /// Run one trigger/settle/read sequence.
    pub fn poll(&mut self) -> SensorReading {
        match self.sensor.trigger_manual_conversion() {
            Ok(()) => debug!("Trigger manual conversion successful"),
            Err(e) => debug!("Could not trigger manual conversion: {e}"),
        }

        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }

        match self.sensor.read_light() {
            Ok(lux) => {
                debug!("Read light successful, lux = {lux}");
                self.last_lux = Some(lux);
                SensorReading {
                    lux: Some(lux),
                    status: ReadStatus::Ok,
                }
            }
            Err(e) => {
                debug!("Could not read light: {e}");
                SensorReading {
                    lux: self.last_lux,
                    status: ReadStatus::Failed,
                }
            }
        }
    }

    /// Poll and commit a fresh value into `state`.
    ///
    /// The sensor sequence runs without holding the state; only the write
    /// happens under the guard, bounded by `lock_timeout`.
    pub fn poll_into(&mut self, state: &SharedState, lock_timeout: Duration) -> PollOutcome {
        let reading = self.poll();
        let Some(lux) = reading.lux.filter(|_| reading.is_ok()) else {
            return PollOutcome::ReadFailed;
        };

        match state.acquire(lock_timeout) {
            Ok(mut meter) => {
                meter.record(lux);
                PollOutcome::Updated(lux)
            }
            Err(e) => {
                warn!("Skipping poll cycle: {e}");
                PollOutcome::Contended
            }
        }
    }
}
