//! Wire entities exchanged with the backend API.
//!
//! These types are read-only to the client: the backend owns their lifecycle
//! and the client only renders them. Field names follow the backend's JSON
//! (`_id`, `createdDate`, `profileUsername`, ...) through serde renames.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Avatar shown on a profile before its data has arrived.
pub const PLACEHOLDER_AVATAR: &str = "https://gravatar.com/avatar/placeholder?s=128";

/// Identity of the logged-in user, as returned by the login endpoint.
///
/// The token is an opaque credential; no shape validation happens on the
/// client side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub token: String,
    pub username: String,
    pub avatar: String,
}

impl User {
    /// Creates a user record from its three parts.
    pub fn new(
        token: impl Into<String>,
        username: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            avatar: avatar.into(),
        }
    }
}

/// Author block embedded in every post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    pub avatar: String,
}

/// Post as listed in search results and on profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: Author,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Utc>,
}

impl PostSummary {
    /// Creation date rendered as `month/day/year`.
    #[must_use]
    pub fn date_formatted(&self) -> String {
        format_date(&self.created_date)
    }
}

/// Full post record returned by `GET /post/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub author: Author,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Utc>,
}

impl Post {
    /// Creation date rendered as `month/day/year`.
    #[must_use]
    pub fn date_formatted(&self) -> String {
        format_date(&self.created_date)
    }

    /// Whether `username` authored this post.
    #[must_use]
    pub fn is_authored_by(&self, username: &str) -> bool {
        self.author.username == username
    }
}

/// Counters shown on the profile tabs.
///
/// Counts are optional so the placeholder profile can render blank tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCounts {
    #[serde(rename = "postCounter", default)]
    pub post_counter: Option<u64>,
    #[serde(rename = "followerCounter", default)]
    pub follower_counter: Option<u64>,
    #[serde(rename = "followingCount", default)]
    pub following_count: Option<u64>,
}

/// Profile header data returned by `POST /profile/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "profileUsername")]
    pub profile_username: String,
    #[serde(rename = "profileAvatar")]
    pub profile_avatar: String,
    #[serde(rename = "isFollowing", default)]
    pub is_following: bool,
    #[serde(default)]
    pub counts: ProfileCounts,
}

impl Default for Profile {
    /// Placeholder shown until the backend answers.
    fn default() -> Self {
        Self {
            profile_username: "...".to_string(),
            profile_avatar: PLACEHOLDER_AVATAR.to_string(),
            is_following: false,
            counts: ProfileCounts::default(),
        }
    }
}

/// Formats a timestamp as `month/day/year` without zero padding.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use complexapp::domain::format_date;
///
/// let date = Utc.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap();
/// assert_eq!(format_date(&date), "3/7/2024");
/// ```
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_summary_decodes_backend_field_names() {
        let json = r#"{
            "_id": "64a1",
            "title": "Hello",
            "author": {"username": "alice", "avatar": "https://gravatar.com/a"},
            "createdDate": "2023-11-30T08:15:00.000Z"
        }"#;

        let post: PostSummary = serde_json::from_str(json).unwrap();

        assert_eq!(post.id, "64a1");
        assert_eq!(post.author.username, "alice");
        assert_eq!(post.date_formatted(), "11/30/2023");
    }

    #[test]
    fn profile_counts_tolerate_missing_fields() {
        let json = r#"{"profileUsername": "bob", "profileAvatar": "x", "counts": {"postCounter": 3}}"#;

        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.counts.post_counter, Some(3));
        assert_eq!(profile.counts.follower_counter, None);
        assert!(!profile.is_following);
    }

    #[test]
    fn placeholder_profile_matches_loading_header() {
        let profile = Profile::default();
        assert_eq!(profile.profile_username, "...");
        assert_eq!(profile.profile_avatar, PLACEHOLDER_AVATAR);
    }
}
