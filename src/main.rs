//! Line-oriented terminal front end.
//!
//! Reads one line at a time from stdin, turns it into an
//! [`input::Command`](complexapp::input::Command) and drives the library:
//! global actions go through the dispatcher, the search overlay is mounted and
//! unmounted to follow `is_search_open`, and the current route owns a
//! [`Page`]. The screen is redrawn after every command and whenever the store,
//! the search overlay or a loading page changes.
//!
//! # Usage
//!
//! ```text
//! complexapp [--config <path>]
//! ```
//!
//! # Event Loop
//!
//! ```text
//! stdin line ──→ Command ──→ dispatch / navigate / overlay input ─┐
//! store changed ──→ overlay.sync ─────────────────────────────────┼─→ render
//! search state changed / page settled ────────────────────────────┘
//! ```

#![allow(clippy::multiple_crate_versions)]

use async_trait::async_trait;
use clap::Parser;
use complexapp::app::Action;
use complexapp::input::Command;
use complexapp::search::{LiveSearch, SearchState};
use complexapp::ui::{compute_screen, render};
use complexapp::views::{Confirm, DeleteOutcome, Page, Route};
use complexapp::{Client, Config, Theme};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

const DEFAULT_COLUMNS: usize = 80;

/// Flash shown when the backend rejects the credentials.
const INVALID_LOGIN_FLASH: &str = "Invalid username / password.";

/// Shared stdin reader, used by the event loop and by delete confirmation.
struct Prompt {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    async fn next_line(&self) -> io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}

#[async_trait]
impl Confirm for Prompt {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut out = io::stdout();
        if write!(out, "{prompt} [y/N] ").and_then(|()| out.flush()).is_err() {
            return false;
        }
        matches!(
            self.next_line().await,
            Ok(Some(answer)) if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
        )
    }
}

enum Flow {
    Continue,
    Quit,
}

enum Event {
    Line(Option<String>),
    StateChanged,
    SearchChanged,
    PageSettled,
}

struct Frontend {
    client: Client,
    overlay: complexapp::search::SearchOverlay,
    route: Route,
    page: Page,
    page_pending: bool,
    shown_flashes: usize,
    notice: Option<String>,
    columns: usize,
}

impl Frontend {
    fn new(client: Client, columns: usize) -> Self {
        let overlay = client.search_overlay();
        let route = Route::Home;
        let page = Page::open(
            &route,
            &client.store.state(),
            &client.backend,
            &client.store.dispatcher(),
        );
        // Flashes from a previous run are not shown again.
        let shown_flashes = client.store.state().flash_messages.len();

        Self {
            client,
            overlay,
            route,
            page,
            page_pending: true,
            shown_flashes,
            notice: None,
            columns,
        }
    }

    fn navigate(&mut self, route: Route) {
        self.page = Page::open(
            &route,
            &self.client.store.state(),
            &self.client.backend,
            &self.client.store.dispatcher(),
        );
        self.route = route;
        self.page_pending = true;
    }

    fn search_state(&self) -> Option<SearchState> {
        self.overlay.live().map(LiveSearch::state)
    }

    async fn sync(&mut self) {
        let state = self.client.store.state();
        self.overlay.sync(&state).await;
    }

    fn render(&mut self) -> io::Result<()> {
        let app = self.client.store.state();
        let fresh = &app.flash_messages[self.shown_flashes.min(app.flash_messages.len())..];
        let search = self.search_state();
        let vm = compute_screen(&app, &self.page, search.as_ref(), fresh);
        self.shown_flashes = app.flash_messages.len();

        let mut out = io::stdout().lock();
        write!(out, "\x1b[2J\x1b[H")?;
        render(&mut out, &vm, &self.client.theme, self.columns)?;
        if let Some(notice) = self.notice.take() {
            writeln!(out, "{}{notice}{}", Theme::dim(), Theme::reset())?;
        }
        out.flush()
    }

    async fn execute(&mut self, command: Command, prompt: &Prompt) -> Flow {
        let dispatcher = self.client.store.dispatcher();
        tracing::debug!(command = ?command, "executing command");

        match command {
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Logout => {
                dispatcher.dispatch(Action::Logout);
                self.navigate(self.route.clone());
            }
            Command::Open(route) => self.navigate(route),
            Command::Search => dispatcher.dispatch(Action::OpenSearch),
            Command::Key(key) => {
                self.client.keys.publish(key);
            }
            Command::Text(text) => match self.overlay.live() {
                Some(live) => live.input(text),
                None if text.trim().is_empty() => {}
                None => self.notice = Some("Type :search to search posts.".to_string()),
            },
            Command::Select(index) => self.open_result(index),
            Command::Delete => self.delete(prompt).await,
            Command::Quit => return Flow::Quit,
            Command::Invalid(hint) => self.notice = Some(hint),
        }

        self.sync().await;
        Flow::Continue
    }

    async fn login(&mut self, username: &str, password: &str) {
        let dispatcher = self.client.store.dispatcher();
        let reply = self
            .client
            .backend
            .login(username, password, &CancellationToken::new())
            .await;
        match reply {
            Ok(Some(user)) => {
                dispatcher.dispatch(Action::login(user));
                self.navigate(self.route.clone());
            }
            Ok(None) => dispatcher.dispatch(Action::flash(INVALID_LOGIN_FLASH)),
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                self.notice = Some(format!("Login failed: {e}"));
            }
        }
    }

    fn open_result(&mut self, index: usize) {
        let selected = self
            .search_state()
            .zip(index.checked_sub(1))
            .and_then(|(state, slot)| state.results.get(slot).cloned());
        let Some(post) = selected else {
            self.notice = Some(format!("No search result {index}."));
            return;
        };

        self.client.store.dispatcher().dispatch(Action::CloseSearch);
        self.navigate(Route::post(post.id));
    }

    async fn delete(&mut self, prompt: &Prompt) {
        let Page::Post(view) = &self.page else {
            self.notice = Some("Open a post to delete it.".to_string());
            return;
        };

        let app = self.client.store.state();
        let outcome = view.delete(&app, prompt).await;
        match outcome {
            DeleteOutcome::Deleted { redirect } => self.navigate(redirect),
            DeleteOutcome::Declined => {}
            DeleteOutcome::NotPermitted => {
                self.notice = Some("Only the author can delete this post.".to_string());
            }
            DeleteOutcome::Failed(reason) => {
                self.notice = Some(format!("Delete failed: {reason}"));
            }
        }
    }
}

/// Resolves when `rx` sees a new value; pends forever without a receiver.
async fn changed(rx: Option<&mut watch::Receiver<SearchState>>) {
    match rx {
        Some(rx) => {
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending().await,
    }
}

async fn run(mut frontend: Frontend, prompt: Prompt) -> io::Result<()> {
    let mut app_rx = frontend.client.store.subscribe();
    frontend.render()?;

    loop {
        let mut search_rx = frontend.overlay.live().map(LiveSearch::subscribe);

        let event = tokio::select! {
            line = prompt.next_line() => Event::Line(line?),
            Ok(()) = app_rx.changed() => Event::StateChanged,
            () = changed(search_rx.as_mut()) => Event::SearchChanged,
            _ = frontend.page.settled(), if frontend.page_pending => Event::PageSettled,
        };

        match event {
            Event::Line(None) => return Ok(()),
            Event::Line(Some(line)) => {
                if matches!(frontend.execute(Command::parse(&line), &prompt).await, Flow::Quit) {
                    return Ok(());
                }
                app_rx.borrow_and_update();
            }
            Event::StateChanged => {
                app_rx.borrow_and_update();
                frontend.sync().await;
            }
            Event::SearchChanged => {}
            Event::PageSettled => frontend.page_pending = false,
        }

        frontend.render()?;
    }
}

/// Terminal client for the ComplexApp blogging API.
#[derive(Debug, Parser)]
#[command(name = "complexapp", version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: config.toml in the data directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_COLUMNS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("complexapp: {e}");
            return ExitCode::FAILURE;
        }
    };
    complexapp::observability::init_tracing(&config);

    let client = match complexapp::initialize(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("complexapp: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(client = ?client, "client ready");

    match run(Frontend::new(client, columns()), Prompt::new()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("complexapp: {e}");
            ExitCode::FAILURE
        }
    }
}
