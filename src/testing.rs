//! Recording doubles for the external records, shared by the unit tests.

use crate::display::{Renderer, TextCanvas, ViewPort};
use crate::error::SensorError;
use crate::notify::{Feedback, Notifier};
use crate::sensor::{LightSensor, Mode};
use crate::state::SharedState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const LOCK: Duration = Duration::from_millis(50);

/// Ordered log of calls made on the doubles.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

/// Sensor answering from a script; runs out into read failures.
pub struct ScriptedSensor {
    journal: Journal,
    trigger: VecDeque<Result<(), SensorError>>,
    reads: VecDeque<Result<f32, SensorError>>,
}

impl ScriptedSensor {
    pub fn new(journal: &Journal, reads: impl IntoIterator<Item = Result<f32, SensorError>>) -> Self {
        Self {
            journal: journal.clone(),
            trigger: VecDeque::new(),
            reads: reads.into_iter().collect(),
        }
    }

    pub fn with_triggers(mut self, trigger: impl IntoIterator<Item = Result<(), SensorError>>) -> Self {
        self.trigger = trigger.into_iter().collect();
        self
    }
}

impl LightSensor for ScriptedSensor {
    fn reset(&mut self) -> Result<(), SensorError> {
        self.journal.record("sensor:reset");
        Ok(())
    }

    fn set_power_state(&mut self, on: bool) -> Result<(), SensorError> {
        self.journal
            .record(if on { "sensor:power_on" } else { "sensor:power_off" });
        Ok(())
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), SensorError> {
        self.journal.record(format!("sensor:mode:{mode:?}"));
        Ok(())
    }

    fn trigger_manual_conversion(&mut self) -> Result<(), SensorError> {
        self.journal.record("sensor:trigger");
        self.trigger.pop_front().unwrap_or(Ok(()))
    }

    fn read_light(&mut self) -> Result<f32, SensorError> {
        self.journal.record("sensor:read");
        self.reads.pop_front().unwrap_or(Err(SensorError::NoConversion))
    }
}

/// View that renders synchronously on every update.
pub struct RecordingView {
    journal: Journal,
    state: SharedState,
    renderer: Renderer,
    frames: Arc<Mutex<Vec<String>>>,
}

impl RecordingView {
    pub fn new(journal: &Journal, state: &SharedState) -> Self {
        Self {
            journal: journal.clone(),
            state: state.clone(),
            renderer: Renderer::new(LOCK),
            frames: Arc::default(),
        }
    }

    /// Handle to the rendered frames, usable after the view moved.
    pub fn frames(&self) -> Arc<Mutex<Vec<String>>> {
        self.frames.clone()
    }
}

impl ViewPort for RecordingView {
    fn update(&self) {
        self.journal.record("view:update");
        let mut canvas = TextCanvas::new(32, 8);
        self.renderer.render(&mut canvas, &self.state);
        self.frames.lock().unwrap().push(canvas.to_lines().join("\n"));
    }

    fn release(&mut self) {
        self.journal.record("view:release");
    }
}

/// Notifier writing into the journal.
pub struct JournalNotifier(pub Journal);

impl Notifier for JournalNotifier {
    fn notify(&self, feedback: Feedback) {
        self.0.record(format!("notify:{feedback:?}"));
    }

    fn close(&mut self) {
        self.0.record("notify:close");
    }
}
