//! Terminal host: session guard, output encoding, view and platform.

mod output;
mod platform;
mod session;
mod view;

pub use output::OutputBuffer;
pub use platform::TerminalPlatform;
pub use session::TerminalSession;
pub use view::{DisplayCommand, TerminalView, ViewConfig};
