//! # Luxview
//!
//! A tick-driven ambient light meter.
//!
//! A periodic timer and a key input source feed one bounded event queue. A
//! single event loop drains it: every tick polls a BH1750-class sensor into a
//! mutex-guarded state and asks the display to redraw; the back key shuts
//! everything down in order.
//!
//! ## Core Concepts
//!
//! - **Shared state**: one exclusive-access value with bounded-wait, scoped guards
//! - **Merged producers**: ticks are dropped when the queue is full, input waits
//! - **Platform**: sensor, display and notification records are passed in explicitly
//!
//! ## Example
//!
//! ```rust,ignore
//! use luxview::{run, AppConfig, TerminalPlatform, TerminalSession};
//!
//! let config = AppConfig::default();
//! let _session = TerminalSession::enter(true)?;
//! let mut platform = TerminalPlatform::new(config.display.clone());
//! std::process::exit(run(&mut platform, &config, None));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod notify;
pub mod sensor;
pub mod state;
pub mod terminal;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use actor::{Event, EventLoop, EventQueue, InputAdapter, InputRecord, Key, LoopState, Ticker};
pub use app::{run, Platform, EXIT_INIT_FAILED, EXIT_OK, EXIT_QUEUE_CLOSED};
pub use cli::Cli;
pub use config::AppConfig;
pub use display::{Canvas, Renderer, TextCanvas, ViewPort};
pub use error::{AppError, ConfigError, LockTimeout, SensorError};
pub use notify::{Feedback, LogNotifier, Notifier};
pub use sensor::{LightSensor, Mode, SensorPoller, SimulatedSensor};
pub use state::{LightMeter, SharedState, StateGuard};
pub use terminal::{TerminalPlatform, TerminalSession};
