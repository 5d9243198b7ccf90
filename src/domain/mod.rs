//! Domain layer for the ComplexApp client.
//!
//! Core types shared by every other layer, independent of HTTP, storage or
//! terminal concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`post`]: Users, posts and profiles as exchanged with the backend
//!
//! # Examples
//!
//! ```
//! use complexapp::domain::{Result, User};
//!
//! fn sign_in() -> Result<User> {
//!     Ok(User::new("t0k3n", "alice", "https://gravatar.com/avatar/a"))
//! }
//! ```

pub mod error;
pub mod post;

pub use error::{AppError, Result};
pub use post::{
    format_date, Author, Post, PostSummary, Profile, ProfileCounts, User, PLACEHOLDER_AVATAR,
};
