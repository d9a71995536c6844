//! Event plumbing: producers, the queue and the consuming loop.
//!
//! The sampling timer and the input subsystem each run on their own thread
//! and post into one bounded queue. The event loop is the only consumer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Event::Tick (drop if full)
//! │ Ticker       │ ──────────────────────┐
//! └──────────────┘                       ▼
//!                                 ┌──────────────┐     poll     ┌────────────┐
//!                                 │  EventQueue  │ ──▶ Event ──▶│ Event Loop │──▶ SensorPoller
//!                                 └──────────────┘     Loop     └────────────┘
//! ┌──────────────┐   Event::Input (wait)     ▲                       │
//! │ Input Thread │ ──────────────────────────┘                       │ update()
//! └──────────────┘                                                   ▼
//!                                                             ┌────────────┐
//!                                                             │  ViewPort  │
//!                                                             └────────────┘
//! ```

mod event_loop;
mod input;
mod messages;
mod queue;
mod ticker;

pub use event_loop::{EventLoop, LoopState, LoopStats};
pub use input::{InputAdapter, TerminalInput};
pub use messages::{Event, InputKind, InputRecord, Key};
pub use queue::{EventQueue, EventSender, PostError, SealedQueue};
pub use ticker::{TickStats, Ticker};
