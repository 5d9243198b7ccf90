//! `reqwest` implementation of [`Backend`].
//!
//! Requests are raced against their cancellation token: when the token fires
//! first, the in-flight request future is dropped (which aborts the HTTP
//! exchange) and [`AppError::Cancelled`] is returned.

use super::backend::{Backend, DELETE_SUCCESS_MARKER};
use crate::domain::error::{AppError, Result};
use crate::domain::{Post, PostSummary, Profile, User};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Upper bound on a single request, cancellation aside.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the backend API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8080`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the URL does not parse or cannot carry
    /// a path, and [`AppError::Http`] if the TLS backend fails to initialize.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexapp::api::HttpBackend;
    ///
    /// let backend = HttpBackend::new("http://localhost:8080")?;
    /// assert_eq!(backend.base_url().as_str(), "http://localhost:8080/");
    /// # Ok::<(), complexapp::AppError>(())
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("invalid api_url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("api_url {base_url} cannot carry a path")));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { client, base_url })
    }

    /// Root URL every endpoint is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves path segments against the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Config(format!("api_url {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends `request` and decodes the JSON body, mapping 404 to `Ok(None)`.
    async fn send_json(&self, request: RequestBuilder, path: &str) -> Result<Option<Value>> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}

/// Runs `request` unless `cancel` fires first.
async fn cancellable<T>(
    cancel: &CancellationToken,
    request: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(AppError::Cancelled),
        result = request => result,
    }
}

/// Decodes an entity that the backend may report missing as `null`/`false`.
fn decode_entity<T: DeserializeOwned>(value: Option<Value>) -> Result<Option<T>> {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

fn decode_list<T: DeserializeOwned>(value: Option<Value>, path: &str) -> Result<Vec<T>> {
    match value {
        None => Err(AppError::NotFound(path.to_string())),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>> {
        tracing::debug!(username = %username, "logging in");
        let url = self.endpoint(&["login"])?;
        let request = self
            .client
            .post(url)
            .json(&json!({ "username": username, "password": password }));

        let value = cancellable(cancel, self.send_json(request, "/login")).await?;
        decode_entity(value)
    }

    async fn fetch_profile(
        &self,
        username: &str,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<Profile>> {
        let path = format!("/profile/{username}");
        tracing::debug!(path = %path, "fetching profile");
        let url = self.endpoint(&["profile", username])?;
        let request = self.client.post(url).json(&json!({ "token": token }));

        let value = cancellable(cancel, self.send_json(request, &path)).await?;
        decode_entity(value)
    }

    async fn fetch_profile_posts(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<PostSummary>> {
        let path = format!("/profile/{username}/posts");
        tracing::debug!(path = %path, "fetching profile posts");
        let url = self.endpoint(&["profile", username, "posts"])?;
        let request = self.client.get(url);

        let value = cancellable(cancel, self.send_json(request, &path)).await?;
        decode_list(value, &path)
    }

    async fn search(&self, term: &str, cancel: &CancellationToken) -> Result<Vec<PostSummary>> {
        tracing::debug!(term = %term, "searching posts");
        let url = self.endpoint(&["search"])?;
        let request = self.client.post(url).json(&json!({ "searchTerm": term }));

        let value = cancellable(cancel, self.send_json(request, "/search")).await?;
        decode_list(value, "/search")
    }

    async fn fetch_post(&self, id: &str, cancel: &CancellationToken) -> Result<Option<Post>> {
        let path = format!("/post/{id}");
        tracing::debug!(path = %path, "fetching post");
        let url = self.endpoint(&["post", id])?;
        let request = self.client.get(url);

        let value = cancellable(cancel, self.send_json(request, &path)).await?;
        decode_entity(value)
    }

    async fn delete_post(&self, id: &str, token: &str) -> Result<()> {
        let path = format!("/post/{id}");
        tracing::debug!(path = %path, "deleting post");
        let url = self.endpoint(&["post", id])?;
        let request = self.client.delete(url).json(&json!({ "token": token }));

        match self.send_json(request, &path).await? {
            Some(Value::String(marker)) if marker == DELETE_SUCCESS_MARKER => Ok(()),
            Some(other) => Err(AppError::Unexpected(format!("delete {path} answered {other}"))),
            None => Err(AppError::NotFound(path)),
        }
    }
}
