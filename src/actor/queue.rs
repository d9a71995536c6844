//! Event queue: one bounded channel, many producers, one consumer.
//!
//! The queue itself does not pick a send policy. Each producer chooses
//! explicitly between [`EventSender::try_post`] (drop when full) and
//! [`EventSender::post`] (wait for room).

use super::messages::Event;
use crate::error::AppError;
use crossbeam_channel::{bounded, Receiver, RecvError, Sender, TrySendError};

/// Why a non-blocking post did not enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostError {
    /// The queue is at capacity; the event was dropped.
    Full,
    /// The consumer is gone.
    Closed,
}

/// Producer handle. Can only enqueue.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<Event>,
}

impl EventSender {
    /// Enqueue without waiting; the event is dropped if the queue is full.
    pub fn try_post(&self, event: Event) -> Result<(), PostError> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => PostError::Full,
            TrySendError::Disconnected(_) => PostError::Closed,
        })
    }

    /// Enqueue, waiting as long as it takes for room.
    pub fn post(&self, event: Event) -> Result<(), AppError> {
        self.tx.send(event).map_err(|_| AppError::QueueClosed)
    }
}

/// The consumer side, owned by the event loop.
#[derive(Debug)]
pub struct EventQueue {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventQueue {
    /// Create a queue holding at most `capacity` pending events.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { rx, tx }
    }

    /// A new producer handle.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Stop handing out producers.
    ///
    /// Once every existing [`EventSender`] is dropped, [`SealedQueue::recv`]
    /// reports the queue as torn down instead of waiting forever.
    pub fn seal(self) -> SealedQueue {
        SealedQueue { rx: self.rx }
    }
}

/// Consumer side after wiring is complete.
#[derive(Debug)]
pub struct SealedQueue {
    rx: Receiver<Event>,
}

impl SealedQueue {
    /// Wait for the next event.
    ///
    /// Fails only once every producer has been dropped.
    pub fn recv(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::messages::{InputRecord, Key};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_across_producers() {
        let queue = EventQueue::new(8);
        let ticks = queue.sender();
        let input = queue.sender();

        ticks.try_post(Event::Tick).unwrap();
        input.post(Event::Input(InputRecord::short(Key::Ok))).unwrap();
        ticks.try_post(Event::Tick).unwrap();

        let queue = queue.seal();
        assert_eq!(queue.recv(), Ok(Event::Tick));
        assert_eq!(queue.recv(), Ok(Event::Input(InputRecord::short(Key::Ok))));
        assert_eq!(queue.recv(), Ok(Event::Tick));
    }

    #[test]
    fn test_try_post_drops_when_full() {
        let queue = EventQueue::new(1);
        let sender = queue.sender();

        assert_eq!(sender.try_post(Event::Tick), Ok(()));
        assert_eq!(sender.try_post(Event::Tick), Err(PostError::Full));
        drop(sender);

        let queue = queue.seal();
        assert_eq!(queue.recv(), Ok(Event::Tick));
        assert!(queue.recv().is_err());
    }

    #[test]
    fn test_post_waits_for_room() {
        let queue = EventQueue::new(1);
        let sender = queue.sender();
        sender.try_post(Event::Tick).unwrap();

        let producer = thread::spawn(move || sender.post(Event::Input(InputRecord::short(Key::Back))));

        thread::sleep(Duration::from_millis(30));
        assert!(!producer.is_finished());

        let queue = queue.seal();
        assert_eq!(queue.recv(), Ok(Event::Tick));
        assert!(producer.join().unwrap().is_ok());
        assert_eq!(queue.recv(), Ok(Event::Input(InputRecord::short(Key::Back))));
    }

    #[test]
    fn test_sealed_queue_reports_teardown() {
        let queue = EventQueue::new(4);
        let sender = queue.sender();
        let queue = queue.seal();

        sender.try_post(Event::Tick).unwrap();
        drop(sender);

        assert_eq!(queue.recv(), Ok(Event::Tick));
        assert!(queue.recv().is_err());
    }

    #[test]
    fn test_posting_to_torn_down_queue() {
        let queue = EventQueue::new(4);
        let sender = queue.sender();
        drop(queue);

        assert_eq!(sender.try_post(Event::Tick), Err(PostError::Closed));
        assert!(matches!(sender.post(Event::Tick), Err(AppError::QueueClosed)));
    }
}
