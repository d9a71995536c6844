//! Display module: canvas, renderer and the view-port record.
//!
//! This module contains:
//! - [`Canvas`]: drawing primitives the renderer relies on
//! - [`TextCanvas`]: a cell grid implementing them
//! - [`Renderer`]: draws the shared meter state
//! - [`ViewPort`]: the display record the event loop asks for redraws

mod canvas;
mod renderer;

pub use canvas::{Canvas, Cell, Font, Modifiers, TextCanvas};
pub use renderer::{format_lux, RenderOutcome, Renderer, ACTION_LABEL, PLACEHOLDER, VALUE_LINE_WIDTH};

/// A display surface owned by the display subsystem.
///
/// The display decides when to actually invoke the [`Renderer`]; the
/// event loop only requests redraws.
pub trait ViewPort {
    /// Request a redraw. Must not block on the render itself.
    fn update(&self);

    /// Detach from the display. No redraws happen afterwards.
    fn release(&mut self);
}
