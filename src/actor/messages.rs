//! Message types for actor communication.
//!
//! Every producer feeds the same queue with [`Event`]s; the event loop is
//! the only consumer.

/// Keys of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Center / confirm button.
    Ok,
    /// Back / cancel button.
    Back,
}

/// What happened to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputKind {
    /// Key went down.
    Press,
    /// Key went up.
    Release,
    /// Press and release within the short-press window.
    #[default]
    Short,
    /// Key held past the long-press threshold.
    Long,
    /// Auto-repeat while held.
    Repeat,
}

/// A raw record from the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputRecord {
    /// Which key.
    pub key: Key,
    /// What happened to it.
    pub kind: InputKind,
}

impl InputRecord {
    /// Create a record.
    pub const fn new(key: Key, kind: InputKind) -> Self {
        Self { key, kind }
    }

    /// A short press of `key`.
    pub const fn short(key: Key) -> Self {
        Self::new(key, InputKind::Short)
    }

    /// Whether this record asks the application to exit.
    pub const fn is_cancel(&self) -> bool {
        matches!(self.key, Key::Back)
    }
}

/// Events consumed by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Periodic sampling signal.
    Tick,
    /// Input from the user.
    Input(InputRecord),
}
