//! Single post view and its owner-only delete flow.

use super::resource::{LoadState, Resource};
use super::route::Route;
use crate::api::Backend;
use crate::app::{Action, AppState, Dispatcher};
use crate::domain::Post;
use async_trait::async_trait;
use std::sync::Arc;

/// Prompt shown before a post is deleted.
pub const DELETE_PROMPT: &str = "Do you want to delete this post?";

/// Flash message dispatched after a successful delete.
pub const DELETED_FLASH: &str = "Post deleted.";

/// A yes/no confirmation barrier.
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Asks the user `prompt` and resolves to their answer.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Result of [`PostView::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user answered no; nothing was sent.
    Declined,
    /// Not logged in as the author, or the post is not loaded.
    NotPermitted,
    /// Deleted; the caller navigates to `redirect`.
    Deleted { redirect: Route },
    /// The backend refused or the request failed.
    Failed(String),
}

/// A mounted `/post/{id}` view.
///
/// Dropping the view cancels its in-flight fetch.
pub struct PostView {
    backend: Arc<dyn Backend>,
    dispatcher: Dispatcher,
    post: Resource<String, Post>,
}

impl PostView {
    /// Mounts the view and starts fetching `id`.
    #[must_use]
    pub fn mount(backend: Arc<dyn Backend>, dispatcher: Dispatcher, id: impl Into<String>) -> Self {
        let mut view = Self {
            backend,
            dispatcher,
            post: Resource::new("post"),
        };
        view.set_id(id);
        view
    }

    /// Switches to another post id; a no-op for the current one.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        let backend = Arc::clone(&self.backend);
        let key = id.clone();
        self.post.load(key, move |cancel| async move {
            backend.fetch_post(&id, &cancel).await
        });
    }

    /// The id currently shown.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.post.snapshot().key
    }

    #[must_use]
    pub fn state(&self) -> LoadState<Post> {
        self.post.state()
    }

    /// Waits for the current fetch to finish.
    pub async fn settled(&self) -> LoadState<Post> {
        self.post.settled().await
    }

    /// Whether the logged-in user authored the loaded post.
    #[must_use]
    pub fn is_owner(&self, app: &AppState) -> bool {
        match (self.post.state(), app.current_user()) {
            (LoadState::Loaded(post), Some(user)) => post.is_authored_by(&user.username),
            _ => false,
        }
    }

    /// Route of the editor for the loaded post.
    #[must_use]
    pub fn edit_route(&self) -> Option<Route> {
        self.post
            .state()
            .loaded()
            .map(|post| Route::EditPost { id: post.id.clone() })
    }

    /// Deletes the loaded post after confirmation.
    ///
    /// On success a flash message is dispatched and the returned outcome
    /// carries the acting user's profile route.
    pub async fn delete(&self, app: &AppState, confirm: &dyn Confirm) -> DeleteOutcome {
        let (LoadState::Loaded(post), Some(user)) = (self.post.state(), app.current_user()) else {
            return DeleteOutcome::NotPermitted;
        };
        if !post.is_authored_by(&user.username) {
            tracing::debug!(post = %post.id, "delete hidden from non-owner");
            return DeleteOutcome::NotPermitted;
        }

        if !confirm.confirm(DELETE_PROMPT).await {
            return DeleteOutcome::Declined;
        }

        match self.backend.delete_post(&post.id, &user.token).await {
            Ok(()) => {
                tracing::debug!(post = %post.id, "post deleted");
                self.dispatcher.dispatch(Action::flash(DELETED_FLASH));
                DeleteOutcome::Deleted {
                    redirect: Route::profile(user.username.clone()),
                }
            }
            Err(e) => {
                tracing::warn!(post = %post.id, error = %e, "delete failed");
                DeleteOutcome::Failed(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for PostView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostView").field("post", &self.post).finish_non_exhaustive()
    }
}
