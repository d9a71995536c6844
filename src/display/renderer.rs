//! Renderer: draws the shared meter state onto a canvas.

use super::canvas::{Canvas, Font};
use crate::state::SharedState;
use log::warn;
use std::time::Duration;

/// Label of the action hint on the bottom row.
pub const ACTION_LABEL: &str = "Send";

/// Shown in place of the value before the first successful reading.
pub const PLACEHOLDER: &str = "---";

/// Result of a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The canvas holds a fresh frame.
    Drawn,
    /// The state was contended; the canvas was left untouched.
    Skipped,
}

const VALUE_PREFIX: &str = "Received value: ";
const VALUE_SUFFIX: &str = " lux";
const VALUE_COLUMNS: usize = 8;

/// Columns the value line needs; narrower canvases clip the reading.
#[allow(clippy::cast_possible_truncation)]
pub const VALUE_LINE_WIDTH: u16 =
    (VALUE_PREFIX.len() + VALUE_COLUMNS + VALUE_SUFFIX.len()) as u16;

/// Format a reading as a fixed-width (8 column) value.
pub fn format_lux(lux: Option<f32>) -> String {
    match lux {
        Some(value) => format!("{value:width$.2}", width = VALUE_COLUMNS),
        None => format!("{PLACEHOLDER:>width$}", width = VALUE_COLUMNS),
    }
}

/// Draws the meter screen.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    lock_timeout: Duration,
}

impl Renderer {
    /// Row the value line is drawn on.
    pub const VALUE_ROW: u16 = 1;

    /// Create a renderer that waits at most `lock_timeout` for the state.
    pub const fn new(lock_timeout: Duration) -> Self {
        Self { lock_timeout }
    }

    /// Draw the current state.
    ///
    /// The state stays acquired for the whole draw so a concurrent poll
    /// cannot land halfway through a frame.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, state: &SharedState) -> RenderOutcome {
        let meter = match state.acquire(self.lock_timeout) {
            Ok(meter) => meter,
            Err(e) => {
                warn!("Skipping render: {e}");
                return RenderOutcome::Skipped;
            }
        };

        canvas.clear();
        canvas.set_font(Font::Primary);
        let line = format!("{VALUE_PREFIX}{}{VALUE_SUFFIX}", format_lux(meter.lux()));
        canvas.draw_str(0, Self::VALUE_ROW, &line);
        canvas.draw_button_center(ACTION_LABEL);

        drop(meter);
        RenderOutcome::Drawn
    }
}
