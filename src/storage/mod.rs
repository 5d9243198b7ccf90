//! Session store: persisted key-value pairs that seed the application state.
//!
//! # Modules
//!
//! - `backend`: [`SessionStore`] trait abstraction
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-process implementation
//! - `models`: the three-entry [`SessionRecord`]

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::SessionStore;
pub use json::JsonSessionStore;
pub use memory::MemorySessionStore;
pub use models::{SessionRecord, AVATAR_KEY, TOKEN_KEY, USERNAME_KEY};
