//! Application state tree and its reducer.
//!
//! [`AppState`] is the single global state value: login flag, identity, flash
//! messages and search overlay visibility. It is never mutated in place by
//! readers. [`reduce`] computes a fresh value from the previous one and an
//! [`Action`], and the [`Store`](super::Store) swaps the whole tree at once, so
//! a reader never observes a half-applied update.
//!
//! # Example
//!
//! ```rust
//! use complexapp::app::{reduce, Action, AppState};
//! use complexapp::domain::User;
//!
//! let state = AppState::default();
//! let state = reduce(&state, &Action::login(User::new("t", "alice", "a.png")));
//! assert!(state.logged_in);
//!
//! let state = reduce(&state, &Action::flash("Welcome back"));
//! assert_eq!(state.flash_messages, vec!["Welcome back".to_string()]);
//! ```

use super::actions::Action;
use crate::domain::User;
use crate::storage::SessionRecord;

/// Global client state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Whether the most recent `login`/`logout` was a `login`.
    pub logged_in: bool,

    /// Identity of the session. Only trusted while `logged_in` is true; after a
    /// logout it keeps the stale values.
    pub user: User,

    /// Notifications in dispatch order. Append-only for the whole session.
    pub flash_messages: Vec<String>,

    /// Whether the live search overlay is mounted.
    pub is_search_open: bool,
}

impl AppState {
    /// Seeds the initial state from the persisted session record.
    ///
    /// A missing (or partial, see [`SessionRecord::load`]) record yields a
    /// logged-out state.
    #[must_use]
    pub fn from_session(record: Option<SessionRecord>) -> Self {
        record.map_or_else(Self::default, |record| Self {
            logged_in: true,
            user: record.into(),
            ..Self::default()
        })
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        if self.logged_in {
            Some(&self.user)
        } else {
            None
        }
    }

    /// Whether the logged-in user is `username`.
    #[must_use]
    pub fn is_current_user(&self, username: &str) -> bool {
        self.current_user().is_some_and(|user| user.username == username)
    }
}

/// Computes the state that follows `state` once `action` is applied.
///
/// Pure: the input is left untouched and unknown actions return an unchanged
/// copy.
#[must_use]
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::Login { data } => {
            next.logged_in = true;
            next.user = data.clone();
        }
        Action::Logout => {
            next.logged_in = false;
        }
        Action::FlashMessage { value } => {
            next.flash_messages.push(value.clone());
        }
        Action::OpenSearch => {
            next.is_search_open = true;
        }
        Action::CloseSearch => {
            next.is_search_open = false;
        }
        Action::Unknown => {
            tracing::debug!("ignoring unknown action");
        }
    }

    next
}
