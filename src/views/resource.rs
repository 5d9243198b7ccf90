//! Cancellable, keyed data loading for route-bound views.
//!
//! A [`Resource`] fetches one entity for the current key (a post id, a
//! username). Changing the key cancels the previous request and starts a new
//! one; dropping the resource cancels whatever is in flight. A reply is only
//! committed if it belongs to the latest load and was not cancelled, and the
//! check happens under the same lock as the commit, so a late reply can never
//! overwrite newer state or touch an unmounted view.

use crate::domain::error::{AppError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Outcome of loading the primary entity of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    /// No reply yet for the current key.
    Loading,
    Loaded(T),
    /// The backend answered without an entity.
    NotFound,
    /// Transport or decoding failure.
    Failed(String),
}

impl<T> LoadState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    fn from_reply(reply: Result<Option<T>>) -> Option<Self> {
        match reply {
            Ok(Some(value)) => Some(Self::Loaded(value)),
            Ok(None) | Err(AppError::NotFound(_)) => Some(Self::NotFound),
            Err(e) if e.is_cancelled() => None,
            Err(e) => Some(Self::Failed(e.to_string())),
        }
    }
}

/// What a resource currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<K, T> {
    pub key: Option<K>,
    pub state: LoadState<T>,
    generation: u64,
}

impl<K, T> Default for Snapshot<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            state: LoadState::Loading,
            generation: 0,
        }
    }
}

/// A keyed, cancellable loader owned by one view.
pub struct Resource<K, T> {
    name: &'static str,
    slot: Arc<watch::Sender<Snapshot<K, T>>>,
    in_flight: Option<DropGuard>,
}

impl<K, T> Resource<K, T>
where
    K: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates an idle resource; `name` labels its log lines.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        let (slot, _) = watch::channel(Snapshot::default());
        Self {
            name,
            slot: Arc::new(slot),
            in_flight: None,
        }
    }

    /// Loads `key` unless it is already the current key.
    ///
    /// `fetch` receives the request's cancellation token. Returns whether a new
    /// request was started. Must be called from within a tokio runtime.
    pub fn load<F, Fut>(&mut self, key: K, fetch: F) -> bool
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<Option<T>>> + Send + 'static,
    {
        if self.slot.borrow().key.as_ref() == Some(&key) {
            return false;
        }
        self.start(key, fetch);
        true
    }

    fn start<F, Fut>(&mut self, key: K, fetch: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<Option<T>>> + Send + 'static,
    {
        // Cancel the superseded request before anything else.
        self.in_flight = None;

        let mut generation = 0;
        self.slot.send_modify(|slot| {
            slot.generation += 1;
            slot.key = Some(key.clone());
            slot.state = LoadState::Loading;
            generation = slot.generation;
        });
        tracing::debug!(resource = self.name, ?key, generation, "loading");

        let cancel = CancellationToken::new();
        let request = fetch(cancel.clone());
        let slot = Arc::clone(&self.slot);
        let token = cancel.clone();
        let name = self.name;

        tokio::spawn(async move {
            let reply = request.await;
            if let Err(e) = &reply {
                if e.is_cancelled() {
                    tracing::debug!(resource = name, generation, "request cancelled");
                } else {
                    tracing::warn!(resource = name, generation, error = %e, "request failed");
                }
            }
            let Some(state) = LoadState::from_reply(reply) else {
                return;
            };

            let committed = slot.send_if_modified(|slot| {
                if token.is_cancelled() || slot.generation != generation {
                    return false;
                }
                slot.state = state;
                true
            });
            if !committed {
                tracing::debug!(resource = name, generation, "discarding superseded reply");
            }
        });

        self.in_flight = Some(cancel.drop_guard());
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<K, T> {
        self.slot.borrow().clone()
    }

    /// Current load state.
    #[must_use]
    pub fn state(&self) -> LoadState<T> {
        self.slot.borrow().state.clone()
    }

    /// Subscribes to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<K, T>> {
        self.slot.subscribe()
    }

    /// Waits until the current key has left [`LoadState::Loading`].
    pub async fn settled(&self) -> LoadState<T> {
        let mut rx = self.slot.subscribe();
        let settled = rx
            .wait_for(|slot| !slot.state.is_loading())
            .await
            .map(|slot| slot.state.clone());
        // The sender lives in `self`, so it cannot be gone while borrowed.
        settled.unwrap_or_else(|_| self.state())
    }
}

impl<K: std::fmt::Debug, T> std::fmt::Debug for Resource<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("key", &self.slot.borrow().key)
            .field("in_flight", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn commits_the_reply_for_the_current_key() {
        let mut resource: Resource<String, u32> = Resource::new("test");

        assert!(resource.load("a".to_string(), |_| async { Ok(Some(7)) }));

        assert_eq!(resource.settled().await, LoadState::Loaded(7));
    }

    #[tokio::test]
    async fn same_key_does_not_refetch() {
        let mut resource: Resource<String, u32> = Resource::new("test");
        resource.load("a".to_string(), |_| async { Ok(Some(1)) });
        resource.settled().await;

        assert!(!resource.load("a".to_string(), |_| async { Ok(Some(2)) }));
        assert_eq!(resource.state(), LoadState::Loaded(1));
    }

    #[tokio::test(start_paused = true)]
    async fn late_reply_for_old_key_is_discarded() {
        let mut resource: Resource<String, &'static str> = Resource::new("test");
        let (slow_tx, slow_rx) = oneshot::channel::<()>();

        // The first request ignores its token to model a reply that arrives anyway.
        resource.load("old".to_string(), |_| async move {
            let _ = slow_rx.await;
            Ok(Some("old"))
        });
        resource.load("new".to_string(), |_| async { Ok(Some("new")) });
        assert_eq!(resource.settled().await, LoadState::Loaded("new"));

        slow_tx.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(resource.state(), LoadState::Loaded("new"));
        assert_eq!(resource.snapshot().key.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn missing_entities_and_failures_finish_loading() {
        let mut missing: Resource<u8, u8> = Resource::new("missing");
        missing.load(1, |_| async { Ok(None) });
        assert_eq!(missing.settled().await, LoadState::NotFound);

        let mut broken: Resource<u8, u8> = Resource::new("broken");
        broken.load(1, |_| async { Err(AppError::Unexpected("boom".to_string())) });
        assert!(matches!(broken.settled().await, LoadState::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_resource_cancels_the_request() {
        let mut resource: Resource<u8, u8> = Resource::new("test");
        let (seen_tx, seen_rx) = oneshot::channel();

        resource.load(1, |cancel| async move {
            cancel.cancelled().await;
            let _ = seen_tx.send(());
            Err(AppError::Cancelled)
        });
        drop(resource);

        tokio::time::timeout(Duration::from_secs(1), seen_rx)
            .await
            .unwrap()
            .unwrap();
    }
}
