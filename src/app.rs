//! Application entry: wiring the records together and running the loop.
//!
//! Process-wide records (sensor, display, notifications) are handed in by a
//! [`Platform`] instead of being looked up globally, so the same wiring runs
//! on the terminal and under test doubles.

use crate::actor::{EventLoop, EventQueue, InputAdapter, LoopStats, Ticker};
use crate::config::AppConfig;
use crate::display::{Renderer, ViewPort};
use crate::error::{AppError, Result};
use crate::notify::Notifier;
use crate::sensor::{LightSensor, SensorPoller};
use crate::state::SharedState;
use log::{debug, error, info};

/// Exit status of a normal run.
pub const EXIT_OK: i32 = 0;
/// Exit status when startup failed.
pub const EXIT_INIT_FAILED: i32 = -1;
/// Exit status when the event queue was torn down under the loop.
pub const EXIT_QUEUE_CLOSED: i32 = -2;

/// Provider of the process-wide records.
pub trait Platform {
    /// The light sensor.
    type Sensor: LightSensor;
    /// The display record.
    type View: ViewPort;
    /// The notification record.
    type Notifier: Notifier;

    /// Create the shared state guard.
    fn alloc_state(&mut self) -> Result<SharedState> {
        Ok(SharedState::new())
    }

    /// Hand out the sensor.
    fn sensor(&mut self) -> Result<Self::Sensor>;

    /// Open the display record. It renders `state` with `renderer` and
    /// feeds its key input into `input`.
    fn open_view(
        &mut self,
        state: &SharedState,
        renderer: Renderer,
        input: InputAdapter,
    ) -> Result<Self::View>;

    /// Open the notification record.
    fn open_notifications(&mut self) -> Result<Self::Notifier>;
}

/// Run the light meter until the cancel key.
///
/// `param` is the opaque launch parameter; it is accepted and ignored.
/// Returns [`EXIT_OK`], [`EXIT_INIT_FAILED`] or [`EXIT_QUEUE_CLOSED`].
pub fn run<P: Platform>(platform: &mut P, config: &AppConfig, param: Option<&str>) -> i32 {
    if let Some(param) = param {
        debug!("Ignoring launch parameter {param:?}");
    }

    let event_loop = match start(platform, config) {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Startup failed: {e}");
            return EXIT_INIT_FAILED;
        }
    };

    exit_status(&event_loop.run())
}

/// Map the loop's result to a process status.
pub fn exit_status(result: &Result<LoopStats>) -> i32 {
    match result {
        Ok(stats) => {
            info!("Exiting after {} ticks", stats.ticks);
            EXIT_OK
        }
        Err(e) => {
            error!("Event loop failed: {e}");
            EXIT_QUEUE_CLOSED
        }
    }
}

/// Acquire everything in startup order; whatever was acquired is released
/// again if a later step fails.
fn start<P: Platform>(
    platform: &mut P,
    config: &AppConfig,
) -> Result<EventLoop<P::Sensor, P::View, P::Notifier>> {
    let state = platform.alloc_state()?;
    let lock_timeout = config.state.lock_timeout();

    let sampling = &config.sampling;
    let mut poller =
        SensorPoller::new(platform.sensor()?, sampling.settle_delay()).with_mode(sampling.mode);
    poller.power_up();

    let queue = EventQueue::new(config.queue.capacity);
    let input = InputAdapter::new(queue.sender());
    let mut view = match platform.open_view(&state, Renderer::new(lock_timeout), input) {
        Ok(view) => view,
        Err(e) => {
            poller.power_down();
            return Err(e);
        }
    };

    let ticker = match Ticker::start(queue.sender(), sampling.tick_interval()) {
        Ok(ticker) => ticker,
        Err(e) => {
            drop(queue);
            view.release();
            poller.power_down();
            return Err(AppError::Io(e));
        }
    };

    let notifier = match platform.open_notifications() {
        Ok(notifier) => notifier,
        Err(e) => {
            drop(queue);
            view.release();
            drop(ticker);
            poller.power_down();
            return Err(e);
        }
    };

    debug!("Startup complete");
    Ok(
        EventLoop::new(queue.seal(), state, poller, view, notifier, lock_timeout)
            .with_ticker(ticker),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{InputRecord, Key};
    use crate::testing::{Journal, JournalNotifier, RecordingView, ScriptedSensor};

    struct TestPlatform {
        journal: Journal,
        fail_alloc: bool,
        fail_notifications: bool,
        cancel_on_open: bool,
    }

    impl TestPlatform {
        fn new() -> Self {
            Self {
                journal: Journal::default(),
                fail_alloc: false,
                fail_notifications: false,
                cancel_on_open: true,
            }
        }
    }

    impl Platform for TestPlatform {
        type Sensor = ScriptedSensor;
        type View = RecordingView;
        type Notifier = JournalNotifier;

        fn alloc_state(&mut self) -> Result<SharedState> {
            self.journal.record("state:alloc");
            if self.fail_alloc {
                return Err(AppError::StateAlloc("out of memory".into()));
            }
            Ok(SharedState::new())
        }

        fn sensor(&mut self) -> Result<ScriptedSensor> {
            Ok(ScriptedSensor::new(&self.journal, [Ok(10.0)]))
        }

        fn open_view(
            &mut self,
            state: &SharedState,
            _renderer: Renderer,
            input: InputAdapter,
        ) -> Result<RecordingView> {
            self.journal.record("view:open");
            if self.cancel_on_open {
                input.deliver(InputRecord::short(Key::Back))?;
            }
            Ok(RecordingView::new(&self.journal, state))
        }

        fn open_notifications(&mut self) -> Result<JournalNotifier> {
            self.journal.record("notify:open");
            if self.fail_notifications {
                return Err(AppError::Io(std::io::Error::other("record busy")));
            }
            Ok(JournalNotifier(self.journal.clone()))
        }
    }

    #[test]
    fn test_run_until_cancel() {
        let mut platform = TestPlatform::new();
        let status = run(&mut platform, &AppConfig::default(), Some("ignored"));
        assert_eq!(status, EXIT_OK);

        let entries = platform.journal.entries();
        assert_eq!(
            entries,
            [
                "state:alloc",
                "sensor:reset",
                "sensor:power_on",
                "sensor:mode:OneTimeHigh",
                "view:open",
                "notify:open",
                "view:release",
                "sensor:power_off",
                "notify:close",
            ]
        );
    }

    #[test]
    fn test_alloc_failure_opens_nothing() {
        let mut platform = TestPlatform::new();
        platform.fail_alloc = true;

        let status = run(&mut platform, &AppConfig::default(), None);
        assert_eq!(status, EXIT_INIT_FAILED);
        assert_eq!(platform.journal.entries(), ["state:alloc"]);
    }

    #[test]
    fn test_late_failure_releases_acquired_records() {
        let mut platform = TestPlatform::new();
        platform.fail_notifications = true;
        platform.cancel_on_open = false;

        let status = run(&mut platform, &AppConfig::default(), None);
        assert_eq!(status, EXIT_INIT_FAILED);

        let journal = &platform.journal;
        assert_eq!(journal.count("view:release"), 1);
        assert_eq!(journal.count("sensor:power_off"), 1);
        assert_eq!(journal.count("notify:close"), 0);
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(LoopStats::default())), EXIT_OK);
        assert_eq!(exit_status(&Err(AppError::QueueClosed)), EXIT_QUEUE_CLOSED);
    }
}
