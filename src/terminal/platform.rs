//! Terminal-hosted records: simulated sensor, terminal view, logged blinks.

use super::view::{TerminalView, ViewConfig};
use crate::actor::{InputAdapter, TerminalInput};
use crate::app::Platform;
use crate::config::DisplayConfig;
use crate::display::Renderer;
use crate::error::Result;
use crate::notify::LogNotifier;
use crate::sensor::SimulatedSensor;
use crate::state::SharedState;
use std::io;
use std::time::Duration;

/// How long the input thread waits for a key before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// [`Platform`] for running in a terminal.
pub struct TerminalPlatform {
    display: DisplayConfig,
}

impl TerminalPlatform {
    /// Create a platform drawing with the given display settings.
    pub fn new(display: DisplayConfig) -> Self {
        Self { display }
    }

    /// Center the canvas on the current terminal.
    fn origin(&self) -> (u16, u16) {
        let (cols, rows) = super::TerminalSession::size().unwrap_or((0, 0));
        (
            cols.saturating_sub(self.display.width) / 2,
            rows.saturating_sub(self.display.height) / 2,
        )
    }
}

impl Platform for TerminalPlatform {
    type Sensor = SimulatedSensor;
    type View = TerminalView;
    type Notifier = LogNotifier;

    fn sensor(&mut self) -> Result<SimulatedSensor> {
        Ok(SimulatedSensor::default())
    }

    fn open_view(
        &mut self,
        state: &SharedState,
        renderer: Renderer,
        input: InputAdapter,
    ) -> Result<TerminalView> {
        let config = ViewConfig {
            width: self.display.width,
            height: self.display.height,
            repaint_interval: self.display.repaint_interval(),
            origin: self.origin(),
        };
        let view = TerminalView::spawn(io::stdout(), state.clone(), renderer, config)?;
        let input = TerminalInput::spawn(input, INPUT_POLL)?;
        Ok(view.with_input(input))
    }

    fn open_notifications(&mut self) -> Result<LogNotifier> {
        Ok(LogNotifier::new())
    }
}
