//! Profile view: header data plus the user's posts.

use super::resource::{LoadState, Resource};
use crate::api::Backend;
use crate::domain::{PostSummary, Profile};
use std::sync::Arc;

/// A mounted `/profile/{username}` view.
///
/// Header and post list load independently, each cancelled when the username
/// changes or the view is dropped.
pub struct ProfileView {
    backend: Arc<dyn Backend>,
    token: Option<String>,
    profile: Resource<String, Profile>,
    posts: Resource<String, Vec<PostSummary>>,
}

impl ProfileView {
    /// Mounts the view for `username`. `token` is forwarded so the backend can
    /// report whether the viewer follows this profile.
    #[must_use]
    pub fn mount(
        backend: Arc<dyn Backend>,
        username: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        let mut view = Self {
            backend,
            token,
            profile: Resource::new("profile"),
            posts: Resource::new("profile_posts"),
        };
        view.set_username(username);
        view
    }

    /// Switches to another profile; a no-op for the current one.
    pub fn set_username(&mut self, username: impl Into<String>) {
        let username = username.into();

        let backend = Arc::clone(&self.backend);
        let token = self.token.clone();
        let name = username.clone();
        self.profile.load(username.clone(), move |cancel| async move {
            backend.fetch_profile(&name, token.as_deref(), &cancel).await
        });

        let backend = Arc::clone(&self.backend);
        let name = username.clone();
        self.posts.load(username, move |cancel| async move {
            backend.fetch_profile_posts(&name, &cancel).await.map(Some)
        });
    }

    /// Header data, or the placeholder until it arrives.
    #[must_use]
    pub fn header(&self) -> Profile {
        self.profile.state().loaded().cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn profile_state(&self) -> LoadState<Profile> {
        self.profile.state()
    }

    #[must_use]
    pub fn posts_state(&self) -> LoadState<Vec<PostSummary>> {
        self.posts.state()
    }

    /// Waits for both requests to finish.
    pub async fn settled(&self) -> (LoadState<Profile>, LoadState<Vec<PostSummary>>) {
        tokio::join!(self.profile.settled(), self.posts.settled())
    }
}

impl std::fmt::Debug for ProfileView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileView")
            .field("profile", &self.profile)
            .field("posts", &self.posts)
            .finish_non_exhaustive()
    }
}
