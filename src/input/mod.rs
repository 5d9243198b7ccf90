//! Global key-event bus.
//!
//! The front end publishes every key press to a [`KeyBus`]. Components that need
//! global shortcuts (the search overlay's Escape handler) call
//! [`KeyBus::listen`] when they mount and drop the returned [`KeyListener`]
//! when they unmount, which deregisters it. [`KeyBus::listener_count`] reports
//! how many listeners are live.
//!
//! [`Command`] parses the text lines the terminal front end reads.

pub mod command;

pub use command::Command;

use tokio::sync::broadcast;

/// Buffered key presses per listener before the oldest are dropped.
const KEY_BUFFER: usize = 64;

/// A key press as seen by global listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Up,
    Down,
    Char(char),
}

/// Broadcast bus for key presses.
#[derive(Debug, Clone)]
pub struct KeyBus {
    tx: broadcast::Sender<Key>,
}

impl Default for KeyBus {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBus {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(KEY_BUFFER);
        Self { tx }
    }

    /// Delivers `key` to every live listener. Returns how many received it.
    pub fn publish(&self, key: Key) -> usize {
        self.tx.send(key).unwrap_or(0)
    }

    /// Registers a listener. Dropping it deregisters.
    #[must_use]
    pub fn listen(&self) -> KeyListener {
        KeyListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A registered listener on a [`KeyBus`].
#[derive(Debug)]
pub struct KeyListener {
    rx: broadcast::Receiver<Key>,
}

impl KeyListener {
    /// Waits for the next key press, or `None` once the bus is gone.
    ///
    /// Presses lost to a full buffer are skipped.
    pub async fn next(&mut self) -> Option<Key> {
        loop {
            match self.rx.recv().await {
                Ok(key) => return Some(key),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "key listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
