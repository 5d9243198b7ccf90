//! Boundary to the backend HTTP API.
//!
//! The backend itself (authentication, persistence, search indexing) is an
//! external collaborator. This module only describes what the client consumes
//! from it: the [`Backend`] trait is the seam every view and the live search
//! talk through, and [`HttpBackend`] is the `reqwest` implementation used by
//! the binary.
//!
//! | Operation           | Request                          | Response              |
//! |---------------------|----------------------------------|-----------------------|
//! | Log in              | `POST /login {username,password}`| user record or `false`|
//! | Fetch profile       | `POST /profile/{username}`       | profile header        |
//! | Fetch profile posts | `GET /profile/{username}/posts`  | post summaries        |
//! | Search posts        | `POST /search {searchTerm}`      | post summaries        |
//! | Fetch single post   | `GET /post/{id}`                 | post or `false`/`null`|
//! | Delete post         | `DELETE /post/{id} {token}`      | `"Success"`           |

pub mod backend;
pub mod http;

pub use backend::{Backend, DELETE_SUCCESS_MARKER};
pub use http::HttpBackend;
