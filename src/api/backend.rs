//! Backend API abstraction.

use crate::domain::error::Result;
use crate::domain::{Post, PostSummary, Profile, User};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Literal body the backend sends back after a successful delete.
pub const DELETE_SUCCESS_MARKER: &str = "Success";

/// Operations the client consumes from the backend.
///
/// Every read takes a [`CancellationToken`]. Implementations must return
/// [`AppError::Cancelled`](crate::AppError::Cancelled) as soon as the token
/// fires and must not complete the request afterwards.
///
/// Absent entities come back as `Ok(None)` rather than as errors so that views
/// can tell "not found" apart from "transport failed".
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchanges credentials for a user record. `Ok(None)` means the
    /// credentials were rejected.
    async fn login(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>>;

    /// Fetches a profile header, authenticated with `token` when logged in.
    async fn fetch_profile(
        &self,
        username: &str,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<Profile>>;

    /// Lists the posts written by `username`, newest first.
    async fn fetch_profile_posts(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<PostSummary>>;

    /// Full-text search over post titles and bodies.
    async fn search(&self, term: &str, cancel: &CancellationToken) -> Result<Vec<PostSummary>>;

    /// Fetches a single post.
    async fn fetch_post(&self, id: &str, cancel: &CancellationToken) -> Result<Option<Post>>;

    /// Deletes a post owned by the holder of `token`.
    ///
    /// Succeeds only when the backend answers with [`DELETE_SUCCESS_MARKER`].
    async fn delete_post(&self, id: &str, token: &str) -> Result<()>;
}
