//! Application state container and its single write path.
//!
//! # Architecture
//!
//! Global state flows in one direction:
//!
//! ```text
//! Front end / views → Dispatcher::dispatch(Action) → reduce → state swap
//!                                                      │
//!                                  login flag flipped? ─┴→ Effect → Session Store
//! ```
//!
//! Per-view state (search overlay, post view, profile) never goes through here;
//! it lives in the view that owns it.
//!
//! # Modules
//!
//! - [`actions`]: The closed set of named actions
//! - [`state`]: The state tree and the pure reducer
//! - [`effects`]: Session persistence driven by login transitions
//! - [`store`]: The owned container and its dispatcher handle

pub mod actions;
pub mod effects;
pub mod state;
pub mod store;

pub use actions::Action;
pub use effects::Effect;
pub use state::{reduce, AppState};
pub use store::{Dispatcher, Store};
