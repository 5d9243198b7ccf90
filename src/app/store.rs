//! Owned, single-writer state container.
//!
//! [`Store`] owns the current [`AppState`] and the session store. Readers get
//! immutable `Arc<AppState>` snapshots or a `watch` subscription that wakes on
//! every swap. The only write path is [`Dispatcher::dispatch`], which reduces
//! the action, swaps the tree, then runs the session effect for the transition
//! while still holding the session lock, so concurrent dispatches cannot
//! reorder session writes.
//!
//! # Example
//!
//! ```rust
//! use complexapp::app::{Action, Store};
//! use complexapp::domain::User;
//! use complexapp::storage::MemorySessionStore;
//!
//! let store = Store::new(Box::new(MemorySessionStore::default()))?;
//! let dispatch = store.dispatcher();
//!
//! dispatch.dispatch(Action::login(User::new("t", "alice", "a.png")));
//! assert!(store.state().logged_in);
//! assert_eq!(store.read_session()?.map(|r| r.username), Some("alice".to_string()));
//! # Ok::<(), complexapp::AppError>(())
//! ```

use super::actions::Action;
use super::effects;
use super::state::{reduce, AppState};
use crate::domain::error::Result;
use crate::storage::{SessionRecord, SessionStore};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

struct Inner {
    state: watch::Sender<Arc<AppState>>,
    session: Mutex<Box<dyn SessionStore>>,
}

impl Inner {
    fn session(&self) -> MutexGuard<'_, Box<dyn SessionStore>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Application state container.
///
/// Cloning a `Store` yields another handle to the same container.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Store {
    /// Creates the container, seeding state from the session record.
    ///
    /// No session write happens here: a state seeded from a complete record is
    /// already consistent with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub fn new(session: Box<dyn SessionStore>) -> Result<Self> {
        let record = SessionRecord::load(&*session)?;
        tracing::debug!(restored = record.is_some(), "seeding application state");

        let initial = AppState::from_session(record);
        let (state, _) = watch::channel(Arc::new(initial));

        Ok(Self {
            inner: Arc::new(Inner {
                state,
                session: Mutex::new(session),
            }),
        })
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        self.inner.state.borrow().clone()
    }

    /// Subscribes to state swaps.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.inner.state.subscribe()
    }

    /// The stable write handle for this container.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Reads the persisted session record.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub fn read_session(&self) -> Result<Option<SessionRecord>> {
        let session = self.inner.session();
        SessionRecord::load(&**session)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("state", &self.state()).finish_non_exhaustive()
    }
}

/// Write handle into the [`Store`].
///
/// Every dispatcher obtained from the same store compares equal, so views that
/// only hold a dispatcher never need refreshing when state changes.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    /// Applies `action` to the container.
    ///
    /// Unknown actions are ignored and leave the current snapshot in place.
    /// Session store failures are logged; the state swap still stands.
    pub fn dispatch(&self, action: Action) {
        let _span = tracing::debug_span!("dispatch", action = action.name()).entered();

        if action == Action::Unknown {
            tracing::debug!("unknown action type, nothing to do");
            return;
        }

        let mut session = self.inner.session();
        let mut effect = None;

        self.inner.state.send_modify(|current| {
            let next = reduce(current, &action);
            effect = effects::session_effect(current, &next);
            *current = Arc::new(next);
        });

        if let Some(effect) = effect {
            if let Err(e) = effects::apply(&effect, &mut **session) {
                tracing::warn!(error = %e, "session persistence failed");
            }
        }
    }
}

impl PartialEq for Dispatcher {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Dispatcher {}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::storage::{MemorySessionStore, TOKEN_KEY};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Session store that counts every write and removal.
    struct CountingStore {
        inner: MemorySessionStore,
        writes: Arc<AtomicUsize>,
    }

    impl SessionStore for CountingStore {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.remove_item(key)
        }
    }

    fn alice() -> User {
        User::new("t0k3n", "alice", "https://gravatar.com/avatar/alice")
    }

    fn seeded_store() -> Store {
        let mut session = MemorySessionStore::default();
        SessionRecord::from(&alice()).save(&mut session).unwrap();
        Store::new(Box::new(session)).unwrap()
    }

    #[test]
    fn session_record_tracks_login_transitions() {
        let store = Store::new(Box::new(MemorySessionStore::default())).unwrap();
        let dispatch = store.dispatcher();

        dispatch.dispatch(Action::login(alice()));
        assert_eq!(store.read_session().unwrap(), Some(SessionRecord::from(&alice())));

        dispatch.dispatch(Action::Logout);
        assert_eq!(store.read_session().unwrap(), None);
    }

    #[test]
    fn restored_session_starts_logged_in() {
        let store = seeded_store();

        assert!(store.state().logged_in);
        assert_eq!(store.state().user, alice());
    }

    #[test]
    fn partial_session_starts_logged_out() {
        let mut session = MemorySessionStore::default();
        session.set_item(TOKEN_KEY, "t0k3n").unwrap();

        let store = Store::new(Box::new(session)).unwrap();

        assert!(!store.state().logged_in);
    }

    #[test]
    fn restoring_and_non_transition_updates_never_write_the_session() {
        let mut inner = MemorySessionStore::default();
        SessionRecord::from(&alice()).save(&mut inner).unwrap();
        let writes = Arc::new(AtomicUsize::new(0));
        let store = Store::new(Box::new(CountingStore {
            inner,
            writes: Arc::clone(&writes),
        }))
        .unwrap();
        assert_eq!(writes.load(Ordering::SeqCst), 0);

        let dispatch = store.dispatcher();
        dispatch.dispatch(Action::OpenSearch);
        dispatch.dispatch(Action::flash("hi"));
        dispatch.dispatch(Action::login(User::new("t2", "alice", "other.png")));
        dispatch.dispatch(Action::CloseSearch);

        assert_eq!(writes.load(Ordering::SeqCst), 0);
        assert_eq!(store.read_session().unwrap(), Some(SessionRecord::from(&alice())));

        dispatch.dispatch(Action::Logout);
        assert_eq!(writes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unknown_action_keeps_snapshot_identity() {
        let store = seeded_store();
        let before = store.state();

        store.dispatcher().dispatch(Action::Unknown);

        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn updates_replace_the_whole_tree() {
        let store = seeded_store();
        let before = store.state();

        store.dispatcher().dispatch(Action::OpenSearch);

        assert!(!before.is_search_open);
        assert!(store.state().is_search_open);
    }

    #[test]
    fn dispatchers_from_one_store_are_equal() {
        let store = seeded_store();
        let other = seeded_store();

        assert_eq!(store.dispatcher(), store.clone().dispatcher());
        assert_ne!(store.dispatcher(), other.dispatcher());
    }

    #[tokio::test]
    async fn subscribers_wake_on_dispatch() {
        let store = seeded_store();
        let mut rx = store.subscribe();

        store.dispatcher().dispatch(Action::flash("hello"));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().flash_messages, vec!["hello".to_string()]);
    }
}
