//! Event loop: the single consumer of the event queue.
//!
//! Each iteration dequeues exactly one event and acts on it. A tick runs a
//! sensor poll, a feedback blink and a forced redraw; the cancel key ends
//! the loop. Teardown always runs, in a fixed order, whether the loop
//! ended normally or because the queue was torn down.

use super::messages::Event;
use super::queue::SealedQueue;
use super::ticker::Ticker;
use crate::display::ViewPort;
use crate::error::{AppError, Result};
use crate::notify::{Feedback, Notifier};
use crate::sensor::{LightSensor, PollOutcome, SensorPoller};
use crate::state::SharedState;
use log::{debug, error, info, trace};
use std::time::Duration;

/// Event loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Consuming events.
    Running,
    /// The cancel key was seen; teardown follows.
    ShuttingDown,
}

/// Counters collected while the loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    /// Ticks handled.
    pub ticks: u64,
    /// Polls that committed a fresh value.
    pub updates: u64,
    /// Polls whose sensor read failed.
    pub read_failures: u64,
    /// Polls skipped because the state was contended.
    pub contended: u64,
    /// Input events that did nothing.
    pub ignored_inputs: u64,
    /// Ticks the timer dropped on a full queue.
    pub dropped_ticks: u64,
}

/// The central dispatcher.
pub struct EventLoop<S, V, N> {
    queue: SealedQueue,
    ticker: Option<Ticker>,
    state: SharedState,
    poller: SensorPoller<S>,
    view: V,
    notifier: N,
    lock_timeout: Duration,
    loop_state: LoopState,
    stats: LoopStats,
}

impl<S, V, N> EventLoop<S, V, N>
where
    S: LightSensor,
    V: ViewPort,
    N: Notifier,
{
    /// Wire the loop. It starts in [`LoopState::Running`].
    pub const fn new(
        queue: SealedQueue,
        state: SharedState,
        poller: SensorPoller<S>,
        view: V,
        notifier: N,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            queue,
            ticker: None,
            state,
            poller,
            view,
            notifier,
            lock_timeout,
            loop_state: LoopState::Running,
            stats: LoopStats {
                ticks: 0,
                updates: 0,
                read_failures: 0,
                contended: 0,
                ignored_inputs: 0,
                dropped_ticks: 0,
            },
        }
    }

    /// Hand the running timer to the loop; it is stopped during teardown.
    #[must_use]
    pub fn with_ticker(mut self, ticker: Ticker) -> Self {
        self.ticker = Some(ticker);
        self
    }

    /// Act on a single event.
    pub fn dispatch(&mut self, event: Event) -> LoopState {
        if self.loop_state == LoopState::ShuttingDown {
            return self.loop_state;
        }

        match event {
            Event::Input(record) if record.is_cancel() => {
                info!("Cancel key pressed, shutting down");
                self.loop_state = LoopState::ShuttingDown;
            }
            Event::Input(record) => {
                trace!("Ignoring input {record:?}");
                self.stats.ignored_inputs += 1;
            }
            Event::Tick => self.on_tick(),
        }
        self.loop_state
    }

    fn on_tick(&mut self) {
        self.stats.ticks += 1;
        match self.poller.poll_into(&self.state, self.lock_timeout) {
            PollOutcome::Updated(lux) => {
                trace!("Tick {}: {lux} lux", self.stats.ticks);
                self.stats.updates += 1;
            }
            PollOutcome::ReadFailed => self.stats.read_failures += 1,
            PollOutcome::Contended => {
                self.stats.contended += 1;
                return;
            }
        }
        self.notifier.notify(Feedback::BlinkBlue);
        self.view.update();
    }

    /// Consume events until the cancel key, then tear down.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::QueueClosed`] if every producer disappeared
    /// while the loop was waiting. Teardown has run in that case too.
    pub fn run(mut self) -> Result<LoopStats> {
        debug!("Event loop running");
        let result = loop {
            match self.queue.recv() {
                Ok(event) => {
                    if self.dispatch(event) == LoopState::ShuttingDown {
                        break Ok(());
                    }
                }
                Err(_) => {
                    error!("Event queue torn down while waiting");
                    break Err(AppError::QueueClosed);
                }
            }
        };

        let stats = self.teardown();
        result.map(|()| stats)
    }

    /// Release resources in order: queue, view, timer, sensor, records.
    fn teardown(self) -> LoopStats {
        let Self {
            queue,
            ticker,
            mut poller,
            mut view,
            mut notifier,
            mut stats,
            ..
        } = self;

        // Blocked producers see the queue gone and bail out.
        drop(queue);
        view.release();
        if let Some(mut ticker) = ticker {
            ticker.stop();
            stats.dropped_ticks = ticker.stats().dropped();
        }
        poller.power_down();
        notifier.close();

        info!(
            "Event loop finished: {} ticks ({} dropped), {} updates, {} read failures, {} contended",
            stats.ticks, stats.dropped_ticks, stats.updates, stats.read_failures, stats.contended
        );
        stats
    }
}
