//! Screen components.
//!
//! Each component writes ANSI-styled lines for one part of the screen. The
//! layout functions here stitch them together:
//!
//! ```text
//! [Header + status]
//! [Rule]
//! [Flash messages]
//! [Search overlay | Page body]
//! [Rule]
//! [Footer]
//! ```

pub mod empty;
pub mod footer;
pub mod header;
pub mod post;
pub mod profile;
pub mod search;
pub mod table;

pub use empty::{render_notice, Notice};
pub use footer::render_footer;
pub use header::render_header;
pub use post::render_post;
pub use profile::render_profile;
pub use search::render_search;
pub use table::render_post_list;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, NOT_FOUND_MESSAGE};
use std::io::{self, Write};

/// Renders each pending flash message on its own highlighted line.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_flashes(out: &mut dyn Write, flashes: &[String], theme: &Theme) -> io::Result<()> {
    for message in flashes {
        writeln!(
            out,
            "{}{} {message} {}",
            Theme::fg(&theme.colors.flash_fg),
            Theme::bg(&theme.colors.flash_bg),
            Theme::reset()
        )?;
    }
    Ok(())
}

/// Renders the page body.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_body(out: &mut dyn Write, body: &Body, theme: &Theme) -> io::Result<()> {
    match body {
        Body::Loading => render_notice(out, Notice::Info, "Loading…", None, theme),
        Body::NotFound => render_notice(
            out,
            Notice::Error,
            NOT_FOUND_MESSAGE,
            Some("You can always visit the homepage to get a fresh start."),
            theme,
        ),
        Body::Failed(reason) => render_notice(
            out,
            Notice::Error,
            "Something went wrong while loading this page.",
            Some(reason.as_str()),
            theme,
        ),
        Body::Post(post) => render_post(out, post, theme),
        Body::Profile(profile) => render_profile(out, profile, theme),
        Body::Text { title, lines } => {
            writeln!(out, "{}{title}{}", Theme::bold(), Theme::reset())?;
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
    }
}
