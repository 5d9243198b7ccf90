//! Route-bound views.
//!
//! Each view owns its local state and its in-flight requests. Views read the
//! global [`AppState`] but never mutate it except through the
//! [`Dispatcher`](crate::app::Dispatcher).
//!
//! - [`route`]: Path parsing and formatting
//! - [`resource`]: Keyed, cancellable loader shared by the views
//! - [`post`]: Single post with owner-only delete
//! - [`profile`]: Profile header and post list

pub mod post;
pub mod profile;
pub mod resource;
pub mod route;

pub use post::{Confirm, DeleteOutcome, PostView, DELETED_FLASH, DELETE_PROMPT};
pub use profile::ProfileView;
pub use resource::{LoadState, Resource, Snapshot};
pub use route::Route;

use crate::api::Backend;
use crate::app::{AppState, Dispatcher};
use std::sync::Arc;

/// The view mounted for the current route.
#[derive(Debug)]
pub enum Page {
    Home,
    GuestHome,
    Profile(ProfileView),
    Post(PostView),
    /// Editor for a post; loads the post to prefill the form.
    EditPost(PostView),
    CreatePost,
    AboutUs,
    Terms,
    NotFound(String),
}

impl Page {
    /// Mounts the view for `route`.
    #[must_use]
    pub fn open(
        route: &Route,
        app: &AppState,
        backend: &Arc<dyn Backend>,
        dispatcher: &Dispatcher,
    ) -> Self {
        tracing::debug!(route = %route, "opening page");
        match route {
            Route::Home if app.logged_in => Self::Home,
            Route::Home => Self::GuestHome,
            Route::Profile { username } => Self::Profile(ProfileView::mount(
                Arc::clone(backend),
                username.clone(),
                app.current_user().map(|user| user.token.clone()),
            )),
            Route::Post { id } => {
                Self::Post(PostView::mount(Arc::clone(backend), dispatcher.clone(), id.clone()))
            }
            Route::EditPost { id } => {
                Self::EditPost(PostView::mount(Arc::clone(backend), dispatcher.clone(), id.clone()))
            }
            Route::CreatePost => Self::CreatePost,
            Route::AboutUs => Self::AboutUs,
            Route::Terms => Self::Terms,
            Route::NotFound(path) => Self::NotFound(path.clone()),
        }
    }

    /// Waits until the page's primary data has loaded or failed.
    pub async fn settled(&self) {
        match self {
            Self::Profile(view) => {
                view.settled().await;
            }
            Self::Post(view) | Self::EditPost(view) => {
                view.settled().await;
            }
            _ => {}
        }
    }
}
