//! Ticker: dedicated thread posting periodic sampling ticks.
//!
//! Ticks are posted without waiting. When the event loop falls behind the
//! queue fills up and further ticks are dropped, so the timer thread never
//! stalls and ticks never pile up.

use super::messages::Event;
use super::queue::{EventSender, PostError};
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Tick delivery counters, shared with the ticker thread.
#[derive(Debug, Default)]
pub struct TickStats {
    posted: AtomicU64,
    dropped: AtomicU64,
    running: AtomicBool,
}

impl TickStats {
    /// Whether the ticker thread is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ticks that made it into the queue.
    pub fn posted(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }

    /// Ticks dropped because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Periodic timer posting [`Event::Tick`].
pub struct Ticker {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Delivery counters.
    stats: Arc<TickStats>,
}

impl Ticker {
    /// Start posting a tick every `interval`.
    ///
    /// The first tick fires one interval after start.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the ticker thread.
    pub fn start(sender: EventSender, interval: Duration) -> std::io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(TickStats::default());
        stats.running.store(true, Ordering::Release);

        let handle = {
            let shutdown = shutdown.clone();
            let stats = stats.clone();
            thread::Builder::new()
                .name("luxview-ticker".to_string())
                .spawn(move || {
                    Self::run_loop(&sender, &shutdown, &stats, interval);
                    stats.running.store(false, Ordering::Release);
                })?
        };

        debug!("Ticker started ({interval:?})");
        Ok(Self {
            handle: Some(handle),
            shutdown,
            stats,
        })
    }

    /// Delivery counters; the handle stays valid after the ticker is gone.
    pub fn stats(&self) -> Arc<TickStats> {
        self.stats.clone()
    }

    /// Signal the ticker to stop and wait for its thread.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!(
                "Ticker stopped ({} posted, {} dropped)",
                self.stats.posted(),
                self.stats.dropped()
            );
        }
    }

    /// Main ticker loop.
    fn run_loop(sender: &EventSender, shutdown: &AtomicBool, stats: &TickStats, interval: Duration) {
        let mut next_tick = Instant::now() + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                match sender.try_post(Event::Tick) {
                    Ok(()) => {
                        stats.posted.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(PostError::Full) => {
                        stats.dropped.fetch_add(1, Ordering::Relaxed);
                        trace!("Queue full, tick dropped");
                    }
                    Err(PostError::Closed) => break,
                }

                next_tick += interval;

                // Behind schedule: restart the cadence instead of bursting.
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                // Short naps keep shutdown latency low.
                thread::sleep((next_tick - now).min(Duration::from_millis(5)));
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
