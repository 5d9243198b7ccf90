//! ComplexApp: a terminal client for the ComplexApp social blogging API.
//!
//! The crate is the client side of the application: a global state container
//! with a persisted login session, a debounced live post search, and views for
//! profiles and posts that talk to the backend over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │  ← Single writer
//! │  - Actions, pure reducer, Store + Dispatcher        │
//! │  - Session persistence effect                       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Views         │   │ Live search   │   │ UI            │
//! │ (views/)      │   │ (search/)     │   │ (ui/)         │
//! │ - Routes      │   │ - Machine     │   │ - View models │
//! │ - Resources   │   │ - Debounce    │   │ - Rendering   │
//! │ - Post/profile│   │ - Cancellation│   │ - Themes      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Backend API (api/), key bus (input/)               │
//! │  Session store (storage/), domain types (domain/)   │
//! │  Platform paths (infrastructure/)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing + OpenTelemetry, file-based OTLP export  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: State container, actions, reducer, dispatcher
//! - [`api`]: Backend trait and its `reqwest` implementation
//! - [`search`]: Live search state machine and async driver
//! - [`views`]: Routes and route-bound views
//! - [`input`]: Global key-event bus
//! - [`storage`]: Session store backends and the session record
//! - [`ui`]: View models and ANSI rendering
//! - [`domain`]: Wire entities and errors
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! Defaults, then `config.toml` in the data directory (or an explicit path),
//! then `COMPLEXAPP_*` environment variables:
//!
//! ```toml
//! api_url = "http://localhost:8080"
//! debounce_ms = 750
//! theme = "catppuccin-mocha"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use complexapp::app::{Action, Store};
//! use complexapp::domain::User;
//! use complexapp::storage::MemorySessionStore;
//!
//! let store = Store::new(Box::new(MemorySessionStore::default()))?;
//! store.dispatcher().dispatch(Action::login(User::new("t0k3n", "alice", "a.png")));
//! store.dispatcher().dispatch(Action::flash("Welcome back"));
//!
//! assert!(store.state().logged_in);
//! assert_eq!(store.state().flash_messages.len(), 1);
//! # Ok::<(), complexapp::AppError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod input;
pub mod search;
pub mod storage;
pub mod ui;
pub mod views;

pub mod observability;

pub use app::{Action, AppState, Dispatcher, Store};
pub use domain::{AppError, Result};
pub use ui::Theme;

use api::{Backend, HttpBackend};
use input::KeyBus;
use search::SearchOverlay;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::JsonSessionStore;

/// Prefix of the environment variables that override configuration keys.
const ENV_PREFIX: &str = "COMPLEXAPP_";

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_DEBOUNCE_MS: u64 = 750;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend root. Default: `http://localhost:8080`
    pub api_url: String,

    /// Live search debounce window in milliseconds. Default: 750
    pub debounce_ms: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Filter directive for tracing (`trace`, `debug`, `info`, ...).
    pub trace_level: Option<String>,

    /// Session file; defaults to `session.json` in the data directory.
    pub session_file: Option<PathBuf>,

    /// Trace output; defaults to `complexapp-otlp.json` in the data directory.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            session_file: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map with fallback defaults.
    ///
    /// Unparseable numbers fall back to their default; empty strings count as
    /// unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use complexapp::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "https://api.example.com".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_url, "https://api.example.com");
    /// assert_eq!(config.debounce_ms, 750);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let debounce_ms = get("debounce_ms")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            api_url: get("api_url").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            debounce_ms,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
            session_file: get("session_file").map(|path| infrastructure::expand_tilde(&path)),
            trace_file: get("trace_file").map(|path| infrastructure::expand_tilde(&path)),
        }
    }

    /// Layers a TOML document and environment variables over the defaults.
    ///
    /// Environment variables are `COMPLEXAPP_` plus the upper-cased key, e.g.
    /// `COMPLEXAPP_API_URL`; other variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if `toml` is not a valid TOML table.
    pub fn from_sources<I>(toml: Option<&str>, env: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = BTreeMap::new();

        if let Some(toml) = toml {
            let table: toml::Table = toml
                .parse()
                .map_err(|e| AppError::Config(format!("invalid config file: {e}")))?;
            for (key, value) in table {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                map.insert(key, value);
            }
        }

        for (name, value) in env {
            if let Some(key) = name.strip_prefix(ENV_PREFIX) {
                map.insert(key.to_ascii_lowercase(), value);
            }
        }

        Ok(Self::from_map(&map))
    }

    /// Loads configuration from `path` (or `config.toml` in the data
    /// directory) and the process environment.
    ///
    /// A missing default file is fine; a missing explicit file is not.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let contents = match path {
            Some(path) => Some(std::fs::read_to_string(path)?),
            None => {
                let default = infrastructure::config_file(&infrastructure::get_data_dir());
                match std::fs::read_to_string(default) {
                    Ok(contents) => Some(contents),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => return Err(e.into()),
                }
            }
        };

        Self::from_sources(contents.as_deref(), std::env::vars())
    }

    /// Debounce window for the live search.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| infrastructure::session_file(&infrastructure::get_data_dir()))
    }

    #[must_use]
    pub fn trace_file(&self) -> PathBuf {
        self.trace_file
            .clone()
            .unwrap_or_else(|| infrastructure::trace_file(&infrastructure::get_data_dir()))
    }

    /// Resolves the configured theme, falling back to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::resolve(self.theme_name.as_deref(), self.theme_file.as_deref().map(Path::new))
    }
}

/// Everything the front end wires together.
pub struct Client {
    pub store: Store,
    pub backend: Arc<dyn Backend>,
    pub keys: KeyBus,
    pub theme: Theme,
    pub debounce: Duration,
}

impl Client {
    /// A search overlay bound to this client's store, backend and key bus.
    #[must_use]
    pub fn search_overlay(&self) -> SearchOverlay {
        SearchOverlay::new(
            Arc::clone(&self.backend),
            self.store.dispatcher(),
            self.keys.clone(),
            self.debounce,
        )
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("store", &self.store)
            .field("theme", &self.theme.name)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

/// Builds a [`Client`] from configuration: restores the session from the
/// session file, connects the HTTP backend and resolves the theme.
///
/// # Errors
///
/// Returns an error if the session file exists but cannot be read, or if
/// `api_url` is invalid.
pub fn initialize(config: &Config) -> Result<Client> {
    tracing::debug!(api_url = %config.api_url, "initializing client");

    let session = JsonSessionStore::new(config.session_file())?;
    let store = Store::new(Box::new(session))?;
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.api_url)?);

    Ok(Client {
        store,
        backend,
        keys: KeyBus::new(),
        theme: config.theme(),
        debounce: config.debounce(),
    })
}
