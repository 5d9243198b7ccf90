//! Session record persisted across restarts.
//!
//! The record is spread over three independently named entries of a
//! [`SessionStore`]. The entries are always written and removed together, but
//! a partially written record can still be found on disk after a crash; such a
//! record reads back as "logged out".

use crate::domain::error::Result;
use crate::domain::User;
use crate::storage::backend::SessionStore;

/// Entry holding the opaque auth token.
pub const TOKEN_KEY: &str = "complexappToken";

/// Entry holding the username.
pub const USERNAME_KEY: &str = "complexappUsername";

/// Entry holding the avatar URL.
pub const AVATAR_KEY: &str = "complexappAvatar";

/// Durable login credential and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub username: String,
    pub avatar: String,
}

impl SessionRecord {
    /// Reads the record, returning `None` unless all three entries are present
    /// and the token is non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexapp::storage::{MemorySessionStore, SessionRecord, SessionStore, TOKEN_KEY};
    ///
    /// let mut store = MemorySessionStore::default();
    /// store.set_item(TOKEN_KEY, "abc")?;
    /// // username and avatar missing: treated as logged out
    /// assert!(SessionRecord::load(&store)?.is_none());
    /// # Ok::<(), complexapp::AppError>(())
    /// ```
    pub fn load(store: &dyn SessionStore) -> Result<Option<Self>> {
        let token = store.get_item(TOKEN_KEY)?;
        let username = store.get_item(USERNAME_KEY)?;
        let avatar = store.get_item(AVATAR_KEY)?;

        let record = match (token, username, avatar) {
            (Some(token), Some(username), Some(avatar)) if !token.is_empty() => Some(Self {
                token,
                username,
                avatar,
            }),
            (token, username, avatar) => {
                if token.is_some() || username.is_some() || avatar.is_some() {
                    tracing::debug!("partial session record found, treating as logged out");
                }
                None
            }
        };

        Ok(record)
    }

    /// Writes all three entries.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry cannot be written.
    pub fn save(&self, store: &mut dyn SessionStore) -> Result<()> {
        store.set_item(TOKEN_KEY, &self.token)?;
        store.set_item(USERNAME_KEY, &self.username)?;
        store.set_item(AVATAR_KEY, &self.avatar)
    }

    /// Removes all three entries. Absent entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if any removal cannot be persisted.
    pub fn clear(store: &mut dyn SessionStore) -> Result<()> {
        store.remove_item(TOKEN_KEY)?;
        store.remove_item(USERNAME_KEY)?;
        store.remove_item(AVATAR_KEY)
    }
}

impl From<&User> for SessionRecord {
    fn from(user: &User) -> Self {
        Self {
            token: user.token.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

impl From<SessionRecord> for User {
    fn from(record: SessionRecord) -> Self {
        Self {
            token: record.token,
            username: record.username,
            avatar: record.avatar,
        }
    }
}
