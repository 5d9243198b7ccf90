//! Client-side routes.

use std::fmt;

/// A parsed client route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: home feed when logged in, guest landing page otherwise.
    Home,
    /// `/profile/{username}` and any sub-path below it.
    Profile { username: String },
    /// `/post/{id}`
    Post { id: String },
    /// `/post/{id}/edit`
    EditPost { id: String },
    /// `/create-post`
    CreatePost,
    /// `/about-us`
    AboutUs,
    /// `/terms`
    Terms,
    /// Anything else, keeping the requested path.
    NotFound(String),
}

impl Route {
    /// Parses a path such as `/post/64a1/edit`. Never fails: unknown paths map
    /// to [`Route::NotFound`].
    ///
    /// # Examples
    ///
    /// ```
    /// use complexapp::views::Route;
    ///
    /// assert_eq!(Route::parse("/post/42"), Route::Post { id: "42".to_string() });
    /// assert_eq!(
    ///     Route::parse("/profile/alice/followers"),
    ///     Route::Profile { username: "alice".to_string() }
    /// );
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["profile", username, ..] => Self::Profile {
                username: (*username).to_string(),
            },
            ["post", id] => Self::Post {
                id: (*id).to_string(),
            },
            ["post", id, "edit"] => Self::EditPost {
                id: (*id).to_string(),
            },
            ["create-post"] => Self::CreatePost,
            ["about-us"] => Self::AboutUs,
            ["terms"] => Self::Terms,
            _ => Self::NotFound(trimmed.to_string()),
        }
    }

    /// Canonical path of this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Profile { username } => format!("/profile/{username}"),
            Self::Post { id } => format!("/post/{id}"),
            Self::EditPost { id } => format!("/post/{id}/edit"),
            Self::CreatePost => "/create-post".to_string(),
            Self::AboutUs => "/about-us".to_string(),
            Self::Terms => "/terms".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    pub fn profile(username: impl Into<String>) -> Self {
        Self::Profile {
            username: username.into(),
        }
    }

    pub fn post(id: impl Into<String>) -> Self {
        Self::Post { id: id.into() }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_route() {
        let cases = [
            ("/", Route::Home),
            ("", Route::Home),
            ("/profile/bob", Route::profile("bob")),
            ("/profile/bob/following", Route::profile("bob")),
            ("/post/64a1", Route::post("64a1")),
            ("/post/64a1/edit", Route::EditPost { id: "64a1".to_string() }),
            ("/create-post", Route::CreatePost),
            ("/about-us", Route::AboutUs),
            ("/terms", Route::Terms),
            ("/post/64a1/comments", Route::NotFound("/post/64a1/comments".to_string())),
            ("/nowhere", Route::NotFound("/nowhere".to_string())),
        ];

        for (path, expected) in cases {
            assert_eq!(Route::parse(path), expected, "path {path:?}");
        }
    }

    #[test]
    fn canonical_paths_parse_back() {
        for route in [
            Route::Home,
            Route::profile("alice"),
            Route::post("1"),
            Route::EditPost { id: "1".to_string() },
            Route::CreatePost,
            Route::AboutUs,
            Route::Terms,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
