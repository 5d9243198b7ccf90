//! Profile renderer: header, counters and the post list.

use super::empty::{render_notice, Notice};
use super::table::render_post_list;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PostList, ProfilePanel};
use std::io::{self, Write};

/// Renders the profile header and its "Posts" tab.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_profile(out: &mut dyn Write, profile: &ProfilePanel, theme: &Theme) -> io::Result<()> {
    let following = if profile.is_following { " (following)" } else { "" };
    writeln!(
        out,
        "{}{}{}{}{following}",
        Theme::bold(),
        Theme::fg(&theme.colors.text_normal),
        profile.username,
        Theme::reset()
    )?;
    writeln!(
        out,
        "{}{}{}",
        Theme::fg(&theme.colors.text_dim),
        profile.avatar,
        Theme::reset()
    )?;

    let (posts, followers, following) = &profile.counts;
    writeln!(out, "Posts: {posts}  Followers: {followers}  Following: {following}")?;
    writeln!(out)?;

    match &profile.posts {
        PostList::Loading => render_notice(out, Notice::Info, "Loading…", None, theme),
        PostList::Unavailable => render_notice(out, Notice::Error, "Posts are unavailable.", None, theme),
        PostList::Items(items) if items.is_empty() => {
            render_notice(out, Notice::Info, "No posts yet.", None, theme)
        }
        PostList::Items(items) => render_post_list(out, items, theme),
    }
}
