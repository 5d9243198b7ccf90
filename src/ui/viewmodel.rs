//! View model types representing one rendered screen.
//!
//! [`compute_screen`] turns the global state, the mounted page and the search
//! overlay into display-ready data. The renderer only formats what it finds
//! here; every decision (which notice to show, whether the delete action is
//! offered, how many results a header announces) is taken in this module.

use super::helpers::{markdown_to_lines, results_header};
use crate::app::AppState;
use crate::domain::{Post, PostSummary, Profile};
use crate::search::{SearchState, Show};
use crate::views::{LoadState, Page, Route};

/// Not-found notice for entities and unknown routes.
pub const NOT_FOUND_MESSAGE: &str = "Whoops, we cannot find that page.";

/// Notice shown when a search completed without hits.
pub const NO_RESULTS_MESSAGE: &str = "Sorry, we could not find any results for that search.";

/// Everything needed to draw one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenViewModel {
    pub header: HeaderInfo,
    /// Flash messages not yet shown, oldest first.
    pub flashes: Vec<String>,
    pub body: Body,
    /// Present while the search overlay is open; drawn instead of the body.
    pub search: Option<SearchPanel>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// `"Signed in as alice"` or `"Not signed in"`.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// A post in a list: search results or a profile's posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub title: String,
    pub author: String,
    pub date: String,
    pub path: String,
}

impl From<&PostSummary> for ListItem {
    fn from(post: &PostSummary) -> Self {
        Self {
            title: post.title.clone(),
            author: post.author.username.clone(),
            date: post.date_formatted(),
            path: Route::post(post.id.clone()).path(),
        }
    }
}

/// Main content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Loading,
    NotFound,
    Failed(String),
    Post(PostPanel),
    Profile(ProfilePanel),
    Text { title: String, lines: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPanel {
    pub title: String,
    pub author: String,
    pub date: String,
    pub lines: Vec<String>,
    /// Owner-only actions; `None` for everyone else.
    pub owner_actions: Option<OwnerActions>,
    /// Editor mode shows the raw body for editing.
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerActions {
    pub edit_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePanel {
    pub username: String,
    pub avatar: String,
    pub is_following: bool,
    pub counts: (String, String, String),
    pub posts: PostList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostList {
    Loading,
    Items(Vec<ListItem>),
    Unavailable,
}

/// The search overlay's visible panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPanel {
    Idle { term: String },
    Loading { term: String },
    Results { term: String, header: String, items: Vec<ListItem> },
    NoResults { term: String },
}

impl From<&SearchState> for SearchPanel {
    fn from(search: &SearchState) -> Self {
        let term = search.search_term.clone();
        match search.show {
            Show::Neither => Self::Idle { term },
            Show::Loading => Self::Loading { term },
            Show::Results if search.results.is_empty() => Self::NoResults { term },
            Show::Results => Self::Results {
                term,
                header: results_header(search.results.len()),
                items: search.results.iter().map(ListItem::from).collect(),
            },
        }
    }
}

/// Builds the view model for the current screen.
#[must_use]
pub fn compute_screen(
    app: &AppState,
    page: &Page,
    search: Option<&SearchState>,
    flashes: &[String],
) -> ScreenViewModel {
    let status = app.current_user().map_or_else(
        || "Not signed in".to_string(),
        |user| format!("Signed in as {}", user.username),
    );

    let keybindings = if search.is_some() {
        "type to search | :N open result N | :esc close"
    } else if app.logged_in {
        ":open <path> | :search | :delete | :logout | :quit"
    } else {
        ":open <path> | :search | :login <user> <password> | :quit"
    };

    ScreenViewModel {
        header: HeaderInfo {
            title: "ComplexApp".to_string(),
            status,
        },
        flashes: flashes.to_vec(),
        body: compute_body(app, page),
        search: search.map(SearchPanel::from),
        footer: FooterInfo {
            keybindings: keybindings.to_string(),
        },
    }
}

fn compute_body(app: &AppState, page: &Page) -> Body {
    match page {
        Page::Home => Body::Text {
            title: format!("Hello {}, your feed is empty.", app.user.username),
            lines: vec!["Follow other users to see their posts here.".to_string()],
        },
        Page::GuestHome => Body::Text {
            title: "Remember Writing?".to_string(),
            lines: vec![
                "Are you sick of short tweets and impersonal shared posts?".to_string(),
                "Sign in to start writing.".to_string(),
            ],
        },
        Page::Post(view) => post_body(view.state(), false, view.is_owner(app)),
        Page::EditPost(view) => post_body(view.state(), true, view.is_owner(app)),
        Page::Profile(view) => match view.profile_state() {
            LoadState::NotFound => Body::NotFound,
            LoadState::Failed(reason) => Body::Failed(reason),
            LoadState::Loading | LoadState::Loaded(_) => {
                Body::Profile(profile_panel(&view.header(), view.posts_state()))
            }
        },
        Page::CreatePost => Body::Text {
            title: "Create New Post".to_string(),
            lines: vec!["Posts are written in the browser editor.".to_string()],
        },
        Page::AboutUs => Body::Text {
            title: "About Us".to_string(),
            lines: vec!["ComplexApp is a place to write and share posts.".to_string()],
        },
        Page::Terms => Body::Text {
            title: "Our Terms & Conditions".to_string(),
            lines: vec!["Be kind. Post what you wrote yourself.".to_string()],
        },
        Page::NotFound(_) => Body::NotFound,
    }
}

fn post_body(state: LoadState<Post>, editing: bool, is_owner: bool) -> Body {
    match state {
        LoadState::Loading => Body::Loading,
        LoadState::NotFound => Body::NotFound,
        LoadState::Failed(reason) => Body::Failed(reason),
        // The editor is owner-only as well.
        LoadState::Loaded(_) if editing && !is_owner => Body::NotFound,
        LoadState::Loaded(post) => Body::Post(PostPanel {
            lines: if editing {
                post.body.lines().map(str::to_string).collect()
            } else {
                markdown_to_lines(&post.body)
            },
            date: post.date_formatted(),
            owner_actions: is_owner.then(|| OwnerActions {
                edit_path: Route::EditPost { id: post.id.clone() }.path(),
            }),
            title: post.title,
            author: post.author.username,
            editing,
        }),
    }
}

fn profile_panel(profile: &Profile, posts: LoadState<Vec<PostSummary>>) -> ProfilePanel {
    let count = |value: Option<u64>| value.map(|n| n.to_string()).unwrap_or_default();

    ProfilePanel {
        username: profile.profile_username.clone(),
        avatar: profile.profile_avatar.clone(),
        is_following: profile.is_following,
        counts: (
            count(profile.counts.post_counter),
            count(profile.counts.follower_counter),
            count(profile.counts.following_count),
        ),
        posts: match posts {
            LoadState::Loading => PostList::Loading,
            LoadState::Loaded(posts) => PostList::Items(posts.iter().map(ListItem::from).collect()),
            LoadState::NotFound | LoadState::Failed(_) => PostList::Unavailable,
        },
    }
}
