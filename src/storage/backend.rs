//! Session store abstraction.
//!
//! This module defines the [`SessionStore`] trait, a small string key-value
//! interface shaped after browser local storage. The client only ever stores
//! three entries in it (see [`SessionRecord`](crate::storage::SessionRecord)),
//! but the trait stays generic so that backends do not need to know the
//! record layout.

use crate::domain::error::Result;

/// Persistent string key-value storage that survives restarts.
///
/// Implementations must tolerate removing keys that are absent.
///
/// # Implementations
///
/// - [`JsonSessionStore`](crate::storage::JsonSessionStore): JSON file with atomic writes (default)
/// - [`MemorySessionStore`](crate::storage::MemorySessionStore): process-local map
///
/// # Examples
///
/// ```
/// use complexapp::storage::{MemorySessionStore, SessionStore};
///
/// let mut store = MemorySessionStore::default();
/// store.set_item("complexappToken", "abc")?;
/// assert_eq!(store.get_item("complexappToken")?.as_deref(), Some("abc"));
/// store.remove_item("complexappToken")?;
/// assert!(store.get_item("complexappToken")?.is_none());
/// # Ok::<(), complexapp::AppError>(())
/// ```
pub trait SessionStore: Send {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be persisted.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}
