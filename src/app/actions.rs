//! Named actions accepted by the application state container.
//!
//! [`Action`] is the closed set of state changes the container understands.
//! Actions arriving from outside the type system (a serialized command, a
//! front end typo) decode to [`Action::Unknown`], which the reducer treats as a
//! no-op instead of failing.
//!
//! # Wire Shape
//!
//! Actions serialize with a `type` tag, so they read the same as the
//! `{type, data|value}` objects a web front end would dispatch:
//!
//! ```json
//! {"type": "login", "data": {"token": "...", "username": "alice", "avatar": "..."}}
//! {"type": "flashMessage", "value": "Post deleted."}
//! {"type": "closeSearch"}
//! ```
//!
//! # Example
//!
//! ```rust
//! use complexapp::app::Action;
//!
//! let action: Action = serde_json::from_str(r#"{"type": "openSearch"}"#)?;
//! assert_eq!(action, Action::OpenSearch);
//!
//! let unknown: Action = serde_json::from_str(r#"{"type": "teleport"}"#)?;
//! assert_eq!(unknown, Action::Unknown);
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::domain::User;
use serde::{Deserialize, Serialize};

/// State changes routed through the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Marks the session as logged in with the given identity.
    Login {
        /// Identity returned by the backend.
        data: User,
    },

    /// Marks the session as logged out. The stale identity stays in state but
    /// is no longer trusted.
    Logout,

    /// Appends a one-shot notification.
    FlashMessage {
        /// Notification text.
        value: String,
    },

    /// Shows the live search overlay.
    OpenSearch,

    /// Hides the live search overlay.
    CloseSearch,

    /// Any action type the container does not know. Ignored.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Builds a `login` action.
    #[must_use]
    pub const fn login(user: User) -> Self {
        Self::Login { data: user }
    }

    /// Builds a `flashMessage` action.
    pub fn flash(message: impl Into<String>) -> Self {
        Self::FlashMessage {
            value: message.into(),
        }
    }

    /// The action's type name as used on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::FlashMessage { .. } => "flashMessage",
            Self::OpenSearch => "openSearch",
            Self::CloseSearch => "closeSearch",
            Self::Unknown => "unknown",
        }
    }
}
