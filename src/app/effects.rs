//! Side effects derived from state transitions.
//!
//! The only effect the container owns is session persistence: when `logged_in`
//! flips to true the session record is written, when it flips to false the
//! record is removed. [`session_effect`] compares two consecutive states and
//! yields at most one [`Effect`], so the write happens once per transition and
//! never for updates that leave `logged_in` alone.

use super::state::AppState;
use crate::domain::error::Result;
use crate::storage::{SessionRecord, SessionStore};

/// Commands executed against the session store after a state swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Writes all three session entries.
    PersistSession(SessionRecord),

    /// Removes all three session entries.
    ClearSession,
}

/// Returns the effect triggered by moving from `prev` to `next`, if any.
#[must_use]
pub fn session_effect(prev: &AppState, next: &AppState) -> Option<Effect> {
    match (prev.logged_in, next.logged_in) {
        (false, true) => Some(Effect::PersistSession(SessionRecord::from(&next.user))),
        (true, false) => Some(Effect::ClearSession),
        _ => None,
    }
}

/// Executes `effect` against `store`.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub fn apply(effect: &Effect, store: &mut dyn SessionStore) -> Result<()> {
    match effect {
        Effect::PersistSession(record) => {
            tracing::debug!(username = %record.username, "persisting session record");
            record.save(store)
        }
        Effect::ClearSession => {
            tracing::debug!("clearing session record");
            SessionRecord::clear(store)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{reduce, Action};
    use crate::domain::User;

    #[test]
    fn only_login_flag_transitions_produce_effects() {
        let logged_out = AppState::default();
        let logged_in = reduce(&logged_out, &Action::login(User::new("t", "bob", "b")));

        assert_eq!(
            session_effect(&logged_out, &logged_in),
            Some(Effect::PersistSession(SessionRecord::from(&User::new("t", "bob", "b"))))
        );
        assert_eq!(session_effect(&logged_in, &logged_out), Some(Effect::ClearSession));
        assert_eq!(session_effect(&logged_in, &reduce(&logged_in, &Action::OpenSearch)), None);
        assert_eq!(session_effect(&logged_out, &reduce(&logged_out, &Action::Logout)), None);
    }
}
