//! Async driver for the live search overlay.
//!
//! [`LiveSearch`] runs a [`SearchMachine`] on its own task and executes the
//! commands it emits. The task owns exactly two handles: the debounce timer
//! (`Option<Pin<Box<Sleep>>>`, replaced or cleared on every reschedule) and
//! the in-flight request's cancellation guard (dropped on supersede, which
//! cancels the request). Both are children of the overlay's shutdown token,
//! so unmounting tears down the timer, the request and the Escape listener on
//! every exit path.

use super::machine::{SearchCommand, SearchMachine};
use super::state::SearchState;
use crate::api::Backend;
use crate::app::{Action, Dispatcher};
use crate::domain::error::Result;
use crate::domain::PostSummary;
use crate::input::{KeyBus, KeyListener};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Sleep};
use tokio_util::sync::{CancellationToken, DropGuard};

/// Debounce window applied between the last keystroke and the request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(750);

type Reply = (u64, Result<Vec<PostSummary>>);

/// A mounted search overlay.
///
/// Dropping it unmounts the overlay; [`LiveSearch::unmount`] additionally
/// waits until the task has released its resources.
pub struct LiveSearch {
    input: mpsc::UnboundedSender<String>,
    state: watch::Receiver<SearchState>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl LiveSearch {
    /// Mounts the overlay: registers the Escape listener and starts the task.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn mount(
        backend: Arc<dyn Backend>,
        dispatcher: Dispatcher,
        keys: &KeyBus,
        debounce: Duration,
    ) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::default());
        let shutdown = CancellationToken::new();

        let driver = Driver {
            machine: SearchMachine::new(),
            backend,
            dispatcher,
            debounce,
            timer: None,
            in_flight: None,
            shutdown: shutdown.clone(),
            state: state_tx,
        };
        let task = tokio::spawn(driver.run(input_rx, keys.listen()));
        tracing::debug!(?debounce, "search overlay mounted");

        Self {
            input: input_tx,
            state: state_rx,
            shutdown,
            task: Some(task),
        }
    }

    /// Feeds the current contents of the input field.
    pub fn input(&self, term: impl Into<String>) {
        if self.input.send(term.into()).is_err() {
            tracing::debug!("search input after overlay task ended");
        }
    }

    /// Snapshot of the overlay state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Subscribes to overlay state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    /// Unmounts the overlay and waits for its task to finish.
    pub async fn unmount(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "search overlay task failed");
            }
        }
    }
}

impl Drop for LiveSearch {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl std::fmt::Debug for LiveSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSearch")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

struct Driver {
    machine: SearchMachine,
    backend: Arc<dyn Backend>,
    dispatcher: Dispatcher,
    debounce: Duration,
    timer: Option<Pin<Box<Sleep>>>,
    in_flight: Option<DropGuard>,
    shutdown: CancellationToken,
    state: watch::Sender<SearchState>,
}

impl Driver {
    async fn run(mut self, mut input: mpsc::UnboundedReceiver<String>, mut keys: KeyListener) {
        let (reply_tx, mut replies) = mpsc::unbounded_channel::<Reply>();
        let shutdown = self.shutdown.clone();

        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                Some(term) = input.recv() => {
                    let commands = self.machine.on_input(term);
                    self.execute(commands, &reply_tx);
                }
                Some(key) = keys.next() => {
                    let commands = self.machine.on_key(key);
                    self.execute(commands, &reply_tx);
                }
                () = elapsed(&mut self.timer) => {
                    self.timer = None;
                    let commands = self.machine.on_debounce_elapsed();
                    self.execute(commands, &reply_tx);
                }
                Some((seq, result)) = replies.recv() => {
                    self.machine.on_response(seq, result);
                    if self.machine.in_flight().is_none() {
                        self.in_flight = None;
                    }
                }
            }
            self.publish();
        }

        // Dropping the guard cancels whatever is still in flight.
        self.in_flight = None;
        tracing::debug!("search overlay unmounted");
    }

    fn execute(&mut self, commands: Vec<SearchCommand>, replies: &mpsc::UnboundedSender<Reply>) {
        for command in commands {
            match command {
                SearchCommand::ScheduleDebounce => {
                    self.timer = Some(Box::pin(sleep(self.debounce)));
                }
                SearchCommand::CancelDebounce => {
                    self.timer = None;
                }
                SearchCommand::CancelRequest => {
                    self.in_flight = None;
                }
                SearchCommand::IssueRequest { seq, term } => {
                    let cancel = self.shutdown.child_token();
                    let backend = Arc::clone(&self.backend);
                    let replies = replies.clone();
                    let token = cancel.clone();
                    tokio::spawn(async move {
                        let result = backend.search(&term, &token).await;
                        // The overlay may be gone; its reply is moot then.
                        let _ = replies.send((seq, result));
                    });
                    self.in_flight = Some(cancel.drop_guard());
                }
                SearchCommand::CloseOverlay => {
                    self.dispatcher.dispatch(Action::CloseSearch);
                }
            }
        }
    }

    fn publish(&self) {
        let current = self.machine.state();
        self.state.send_if_modified(|published| {
            if *published == *current {
                false
            } else {
                published.clone_from(current);
                true
            }
        });
    }
}

async fn elapsed(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(timer) => timer.await,
        None => std::future::pending().await,
    }
}
