//! Mounts and unmounts the live search overlay from the global state.

use super::live::LiveSearch;
use crate::api::Backend;
use crate::app::{AppState, Dispatcher};
use crate::input::KeyBus;
use std::sync::Arc;
use std::time::Duration;

/// Keeps a [`LiveSearch`] mounted exactly while `is_search_open` is set.
///
/// Each open gets a fresh overlay with empty state; closing tears the previous
/// one down completely, including its pending timer and request.
pub struct SearchOverlay {
    backend: Arc<dyn Backend>,
    dispatcher: Dispatcher,
    keys: KeyBus,
    debounce: Duration,
    live: Option<LiveSearch>,
}

impl SearchOverlay {
    #[must_use]
    pub fn new(
        backend: Arc<dyn Backend>,
        dispatcher: Dispatcher,
        keys: KeyBus,
        debounce: Duration,
    ) -> Self {
        Self {
            backend,
            dispatcher,
            keys,
            debounce,
            live: None,
        }
    }

    /// Reconciles the overlay with `state`.
    pub async fn sync(&mut self, state: &AppState) {
        match (state.is_search_open, self.live.is_some()) {
            (true, false) => {
                self.live = Some(LiveSearch::mount(
                    Arc::clone(&self.backend),
                    self.dispatcher.clone(),
                    &self.keys,
                    self.debounce,
                ));
            }
            (false, true) => {
                if let Some(live) = self.live.take() {
                    live.unmount().await;
                }
            }
            _ => {}
        }
    }

    /// The mounted overlay, if open.
    #[must_use]
    pub const fn live(&self) -> Option<&LiveSearch> {
        self.live.as_ref()
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.live.is_some()
    }
}

impl std::fmt::Debug for SearchOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOverlay")
            .field("debounce", &self.debounce)
            .field("live", &self.live)
            .finish_non_exhaustive()
    }
}
