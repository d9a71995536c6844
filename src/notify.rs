//! Notification record: fire-and-forget feedback signals.

use log::{debug, trace};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Feedback sequences understood by a [`Notifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Short blue blink, sent once per sampling cycle.
    BlinkBlue,
}

/// The notification record.
pub trait Notifier {
    /// Play a feedback sequence. Never blocks.
    fn notify(&self, feedback: Feedback);

    /// Close the record.
    fn close(&mut self);
}

/// Notifier that logs each signal and counts them.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    signals: Arc<AtomicU64>,
    closed: bool,
}

impl LogNotifier {
    /// Create an open notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals played so far (shared across clones).
    pub fn signals(&self) -> u64 {
        self.signals.load(Ordering::Relaxed)
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, feedback: Feedback) {
        if self.closed {
            return;
        }
        let n = self.signals.fetch_add(1, Ordering::Relaxed) + 1;
        trace!("Notification {feedback:?} (#{n})");
    }

    fn close(&mut self) {
        if !self.closed {
            debug!("Closing notification record after {} signals", self.signals());
            self.closed = true;
        }
    }
}
