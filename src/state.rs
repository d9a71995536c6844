//! Shared light-meter state behind a bounded-wait exclusive guard.
//!
//! The meter value lives in a slot. Acquiring the state takes the value out
//! of the slot (waiting on a condvar while another context holds it), and
//! dropping the guard puts it back and wakes one waiter. The inner mutex is
//! only held for the take/put, never for the caller's critical section, so
//! the wait can be bounded with [`Condvar::wait_timeout_while`].

use crate::error::LockTimeout;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Render-affecting application state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightMeter {
    /// Last successful reading, `None` until the first one.
    lux: Option<f32>,
}

impl LightMeter {
    /// Last successful reading in lux.
    #[inline]
    pub const fn lux(&self) -> Option<f32> {
        self.lux
    }

    /// Store a fresh reading.
    #[inline]
    pub fn record(&mut self, lux: f32) {
        self.lux = Some(lux);
    }
}

struct Slot {
    value: Mutex<Option<LightMeter>>,
    released: Condvar,
}

/// Handle to the shared [`LightMeter`].
///
/// Cloning the handle shares the same state. The only way to read or
/// write the meter is through [`SharedState::acquire`].
#[derive(Clone)]
pub struct SharedState {
    slot: Arc<Slot>,
}

impl SharedState {
    /// Create state holding an empty meter.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Slot {
                value: Mutex::new(Some(LightMeter::default())),
                released: Condvar::new(),
            }),
        }
    }

    /// Acquire exclusive access, waiting at most `timeout`.
    ///
    /// The returned guard releases the state when dropped, including
    /// during unwinding.
    pub fn acquire(&self, timeout: Duration) -> Result<StateGuard<'_>, LockTimeout> {
        let start = Instant::now();
        let slot = self.slot.value.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut slot, _) = self
            .slot
            .released
            .wait_timeout_while(slot, timeout, |value| value.is_none())
            .unwrap_or_else(PoisonError::into_inner);

        match slot.take() {
            Some(meter) => Ok(StateGuard { state: self, meter }),
            None => Err(LockTimeout {
                waited: start.elapsed(),
            }),
        }
    }

    /// Whether some context currently holds the state.
    pub fn is_held(&self) -> bool {
        self.slot
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedState")
            .field("held", &self.is_held())
            .finish()
    }
}

/// Scoped exclusive access to the [`LightMeter`].
pub struct StateGuard<'a> {
    state: &'a SharedState,
    meter: LightMeter,
}

impl Deref for StateGuard<'_> {
    type Target = LightMeter;

    fn deref(&self) -> &LightMeter {
        &self.meter
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut LightMeter {
        &mut self.meter
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        let mut slot = self
            .state
            .slot
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(self.meter);
        drop(slot);
        self.state.slot.released.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SHORT: Duration = Duration::from_millis(20);
    const LONG: Duration = Duration::from_secs(2);

    #[test]
    fn test_new_state_is_unset() {
        let state = SharedState::new();
        let guard = state.acquire(SHORT).unwrap();
        assert_eq!(guard.lux(), None);
    }

    #[test]
    fn test_write_is_visible_after_release() {
        let state = SharedState::new();
        state.acquire(SHORT).unwrap().record(42.5);
        assert_eq!(state.acquire(SHORT).unwrap().lux(), Some(42.5));
    }

    #[test]
    fn test_acquire_times_out_while_held() {
        let state = SharedState::new();
        let _held = state.acquire(SHORT).unwrap();
        assert!(state.is_held());

        let other = state.clone();
        let result = thread::spawn(move || other.acquire(SHORT).map(|g| g.lux()))
            .join()
            .unwrap();

        let err = result.unwrap_err();
        assert!(err.waited >= SHORT);
    }

    #[test]
    fn test_waiter_wakes_on_release() {
        let state = SharedState::new();
        let guard = state.acquire(SHORT).unwrap();

        let other = state.clone();
        let waiter = thread::spawn(move || other.acquire(LONG).map(|g| g.lux()));

        thread::sleep(Duration::from_millis(30));
        drop(guard);

        assert_eq!(waiter.join().unwrap(), Ok(None));
        assert!(!state.is_held());
    }

    #[test]
    fn test_released_when_holder_panics() {
        let state = SharedState::new();
        let other = state.clone();

        let result = thread::spawn(move || {
            let mut guard = other.acquire(SHORT).unwrap();
            guard.record(7.0);
            panic!("holder died");
        })
        .join();
        assert!(result.is_err());

        let guard = state.acquire(SHORT).unwrap();
        assert_eq!(guard.lux(), Some(7.0));
    }

    #[test]
    fn test_intermediate_writes_are_never_observed() {
        let state = SharedState::new();
        let writer_state = state.clone();

        let writer = thread::spawn(move || {
            for i in 0..500u16 {
                let mut guard = writer_state.acquire(LONG).unwrap();
                guard.record(-1.0);
                thread::yield_now();
                guard.record(f32::from(i));
            }
        });

        for _ in 0..500 {
            if let Ok(guard) = state.acquire(LONG) {
                assert_ne!(guard.lux(), Some(-1.0));
            }
        }
        writer.join().unwrap();
    }
}
