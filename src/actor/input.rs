//! Input: turning raw key records into queued events.
//!
//! [`InputAdapter`] is the producer handle the input subsystem calls from
//! whatever thread it runs on. Input is never dropped: delivery waits for
//! room in the queue. [`TerminalInput`] is a dedicated thread polling
//! crossterm and feeding an adapter.

use super::messages::{Event, InputKind, InputRecord, Key};
use super::queue::EventSender;
use crate::error::AppError;
use crossterm::event::{self, KeyEventKind};
use log::{debug, error, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Producer handle for input records.
#[derive(Debug, Clone)]
pub struct InputAdapter {
    sender: EventSender,
}

impl InputAdapter {
    /// Wrap a queue producer.
    pub const fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    /// Queue `record`, waiting for room if the queue is full.
    ///
    /// Fails only if the queue has been torn down.
    pub fn deliver(&self, record: InputRecord) -> Result<(), AppError> {
        trace!("Input {record:?}");
        self.sender.post(Event::Input(record))
    }
}

/// Input thread that polls terminal events.
pub struct TerminalInput {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl TerminalInput {
    /// Spawn the input thread.
    ///
    /// # Arguments
    ///
    /// * `adapter` - Where input records are delivered.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the input thread.
    pub fn spawn(adapter: InputAdapter, poll_timeout: Duration) -> std::io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("luxview-input".to_string())
            .spawn(move || Self::run_loop(&adapter, &shutdown_clone, poll_timeout))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to stop and wait for it.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(adapter: &InputAdapter, shutdown: &AtomicBool, poll_timeout: Duration) {
        while !shutdown.load(Ordering::Relaxed) {
            let event = match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        error!("Failed to read terminal event: {e}");
                        continue;
                    }
                },
                Ok(false) => continue,
                Err(e) => {
                    error!("Failed to poll terminal events: {e}");
                    thread::sleep(poll_timeout);
                    continue;
                }
            };

            let Some(record) = Self::convert_event(&event) else {
                continue;
            };
            if adapter.deliver(record).is_err() {
                debug!("Event queue gone, input thread exiting");
                break;
            }
        }
    }

    /// Convert a crossterm event to an input record.
    fn convert_event(event: &event::Event) -> Option<InputRecord> {
        let event::Event::Key(key_event) = event else {
            return None;
        };
        let key = Self::convert_key_code(key_event.code)?;
        let kind = match key_event.kind {
            KeyEventKind::Press => InputKind::Short,
            KeyEventKind::Repeat => InputKind::Repeat,
            KeyEventKind::Release => InputKind::Release,
        };
        Some(InputRecord::new(key, kind))
    }

    /// Map terminal keys onto the device keys.
    fn convert_key_code(code: event::KeyCode) -> Option<Key> {
        Some(match code {
            event::KeyCode::Up | event::KeyCode::Char('k') => Key::Up,
            event::KeyCode::Down | event::KeyCode::Char('j') => Key::Down,
            event::KeyCode::Left | event::KeyCode::Char('h') => Key::Left,
            event::KeyCode::Right | event::KeyCode::Char('l') => Key::Right,
            event::KeyCode::Enter | event::KeyCode::Char(' ') => Key::Ok,
            event::KeyCode::Esc
            | event::KeyCode::Backspace
            | event::KeyCode::Char('q' | 'Q') => Key::Back,
            _ => return None,
        })
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::queue::EventQueue;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> event::Event {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = kind;
        event::Event::Key(key)
    }

    #[test]
    fn test_deliver_enqueues_input() {
        let queue = EventQueue::new(2);
        let adapter = InputAdapter::new(queue.sender());
        adapter.deliver(InputRecord::short(Key::Ok)).unwrap();

        let queue = queue.seal();
        assert_eq!(queue.recv(), Ok(Event::Input(InputRecord::short(Key::Ok))));
    }

    #[test]
    fn test_deliver_after_teardown_fails() {
        let queue = EventQueue::new(2);
        let adapter = InputAdapter::new(queue.sender());
        drop(queue);
        assert!(adapter.deliver(InputRecord::short(Key::Back)).is_err());
    }

    #[test]
    fn test_cancel_keys() {
        for code in [KeyCode::Esc, KeyCode::Backspace, KeyCode::Char('q')] {
            let record = TerminalInput::convert_event(&key(code, KeyEventKind::Press)).unwrap();
            assert_eq!(record, InputRecord::short(Key::Back));
        }
    }

    #[test]
    fn test_key_kinds() {
        let record = TerminalInput::convert_event(&key(KeyCode::Up, KeyEventKind::Repeat)).unwrap();
        assert_eq!(record, InputRecord::new(Key::Up, InputKind::Repeat));

        let record = TerminalInput::convert_event(&key(KeyCode::Enter, KeyEventKind::Release)).unwrap();
        assert_eq!(record, InputRecord::new(Key::Ok, InputKind::Release));
    }

    #[test]
    fn test_unmapped_events_are_ignored() {
        assert_eq!(TerminalInput::convert_event(&key(KeyCode::Char('x'), KeyEventKind::Press)), None);
        assert_eq!(TerminalInput::convert_event(&event::Event::FocusGained), None);
    }
}
