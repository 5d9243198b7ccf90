//! Single post renderer.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::PostPanel;
use std::io::{self, Write};

/// Renders title, byline, owner actions and the body lines.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_post(out: &mut dyn Write, post: &PostPanel, theme: &Theme) -> io::Result<()> {
    if post.editing {
        writeln!(out, "{}Edit Post{}", Theme::dim(), Theme::reset())?;
    }
    writeln!(
        out,
        "{}{}{}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.text_normal),
        post.title,
        Theme::reset()
    )?;
    writeln!(
        out,
        "{}Posted by {} on {}{}",
        Theme::fg(&theme.colors.text_dim),
        post.author,
        post.date,
        Theme::reset()
    )?;

    if let Some(actions) = &post.owner_actions {
        writeln!(
            out,
            "{}[edit: {}] [delete: :delete]{}",
            Theme::fg(&theme.colors.link_fg),
            actions.edit_path,
            Theme::reset()
        )?;
    }

    writeln!(out)?;
    for line in &post.lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
