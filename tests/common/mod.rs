//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use complexapp::api::Backend;
use complexapp::app::Store;
use complexapp::domain::{Author, Post, PostSummary, Profile, User};
use complexapp::storage::MemorySessionStore;
use complexapp::{AppError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// A backend call as recorded by [`ScriptedBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    FetchProfile { username: String, token: Option<String> },
    FetchProfilePosts(String),
    Search(String),
    FetchPost(String),
    Delete { id: String, token: String },
}

/// In-memory backend with scripted answers.
///
/// In gated mode every read parks until the test calls [`Self::release`];
/// otherwise reads answer at once. Cancellation is honored unless the backend
/// was built with [`Self::ignoring_cancellation`], which models a reply that
/// was already on the wire.
#[derive(Default)]
pub struct ScriptedBackend {
    gated: bool,
    ignore_cancel: bool,
    calls: Mutex<Vec<Call>>,
    cancelled: Mutex<Vec<Call>>,
    parked: Mutex<Vec<(Call, oneshot::Sender<()>)>>,
    users: Mutex<HashMap<(String, String), User>>,
    posts: Mutex<HashMap<String, Post>>,
    profiles: Mutex<HashMap<String, Profile>>,
    search_results: Mutex<HashMap<String, Vec<PostSummary>>>,
    delete_reply: Mutex<Option<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }

    pub fn ignoring_cancellation(mut self) -> Self {
        self.ignore_cancel = true;
        self
    }

    pub fn with_user(self, user: User, password: &str) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert((user.username.clone(), password.to_string()), user);
        self
    }

    pub fn with_post(self, post: Post) -> Self {
        self.posts.lock().unwrap().insert(post.id.clone(), post);
        self
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.profile_username.clone(), profile);
        self
    }

    pub fn with_search(self, term: &str, results: Vec<PostSummary>) -> Self {
        self.search_results
            .lock()
            .unwrap()
            .insert(term.to_string(), results);
        self
    }

    /// Makes deletes answer `reply` instead of the success marker.
    pub fn with_delete_reply(self, reply: &str) -> Self {
        *self.delete_reply.lock().unwrap() = Some(reply.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search(term) => Some(term),
                _ => None,
            })
            .collect()
    }

    pub fn cancelled(&self) -> Vec<Call> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn parked(&self) -> Vec<Call> {
        self.parked
            .lock()
            .unwrap()
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    /// Lets the oldest parked `call` answer. Returns whether one was parked.
    pub fn release(&self, call: &Call) -> bool {
        let mut parked = self.parked.lock().unwrap();
        let Some(index) = parked.iter().position(|(parked, _)| parked == call) else {
            return false;
        };
        let (_, gate) = parked.remove(index);
        gate.send(()).is_ok()
    }

    async fn gate(&self, call: Call, cancel: &CancellationToken) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if !self.gated {
            return if cancel.is_cancelled() && !self.ignore_cancel {
                Err(AppError::Cancelled)
            } else {
                Ok(())
            };
        }

        let (tx, rx) = oneshot::channel();
        self.parked.lock().unwrap().push((call.clone(), tx));

        if self.ignore_cancel {
            return rx.await.map_err(|_| AppError::Cancelled);
        }

        tokio::select! {
            () = cancel.cancelled() => {
                self.parked.lock().unwrap().retain(|(parked, _)| *parked != call);
                self.cancelled.lock().unwrap().push(call);
                Err(AppError::Cancelled)
            }
            released = rx => released.map_err(|_| AppError::Cancelled),
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn login(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>> {
        self.gate(Call::Login(username.to_string()), cancel).await?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&(username.to_string(), password.to_string()))
            .cloned())
    }

    async fn fetch_profile(
        &self,
        username: &str,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<Profile>> {
        let call = Call::FetchProfile {
            username: username.to_string(),
            token: token.map(str::to_string),
        };
        self.gate(call, cancel).await?;
        Ok(self.profiles.lock().unwrap().get(username).cloned())
    }

    async fn fetch_profile_posts(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<PostSummary>> {
        self.gate(Call::FetchProfilePosts(username.to_string()), cancel)
            .await?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|post| post.author.username == username)
            .map(summary_of)
            .collect())
    }

    async fn search(&self, term: &str, cancel: &CancellationToken) -> Result<Vec<PostSummary>> {
        self.gate(Call::Search(term.to_string()), cancel).await?;
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(term)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_post(&self, id: &str, cancel: &CancellationToken) -> Result<Option<Post>> {
        self.gate(Call::FetchPost(id.to_string()), cancel).await?;
        Ok(self.posts.lock().unwrap().get(id).cloned())
    }

    async fn delete_post(&self, id: &str, token: &str) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Delete {
            id: id.to_string(),
            token: token.to_string(),
        });
        match self.delete_reply.lock().unwrap().clone() {
            None => {
                self.posts.lock().unwrap().remove(id);
                Ok(())
            }
            Some(reply) => Err(AppError::Unexpected(format!("delete answered {reply:?}"))),
        }
    }
}

pub fn user(name: &str) -> User {
    User::new(
        format!("token-{name}"),
        name,
        format!("https://gravatar.com/avatar/{name}?s=128"),
    )
}

pub fn post(id: &str, title: &str, author: &str) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        body: format!("Body of **{title}**"),
        author: Author {
            username: author.to_string(),
            avatar: format!("https://gravatar.com/avatar/{author}?s=128"),
        },
        created_date: Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap(),
    }
}

pub fn summary_of(post: &Post) -> PostSummary {
    PostSummary {
        id: post.id.clone(),
        title: post.title.clone(),
        author: post.author.clone(),
        created_date: post.created_date,
    }
}

pub fn memory_store() -> Store {
    Store::new(Box::new(MemorySessionStore::default())).unwrap()
}

pub fn shared(backend: ScriptedBackend) -> (Arc<ScriptedBackend>, Arc<dyn Backend>) {
    let backend = Arc::new(backend);
    let dyn_backend: Arc<dyn Backend> = backend.clone();
    (backend, dyn_backend)
}

/// Lets every spawned task run until idle. With a paused clock this also
/// advances time by `by`.
pub async fn idle_for(by: Duration) {
    tokio::time::sleep(by).await;
}

pub async fn settle() {
    idle_for(Duration::from_millis(1)).await;
}
