//! Post list renderer, shared by search results and profiles.

use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListItem;
use std::io::{self, Write};

/// Width reserved for the title column.
const TITLE_WIDTH: usize = 40;

/// Renders one numbered row per post: title, author and date, then its path.
///
/// Numbers start at 1 and are what the front end accepts to open a row.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_post_list(out: &mut dyn Write, items: &[ListItem], theme: &Theme) -> io::Result<()> {
    for (index, item) in items.iter().enumerate() {
        writeln!(
            out,
            "{}{:>3}. {}{:<width$}{} {}by {} on {}{}",
            Theme::fg(&theme.colors.text_dim),
            index + 1,
            Theme::fg(&theme.colors.text_normal),
            truncate(&item.title, TITLE_WIDTH),
            Theme::reset(),
            Theme::fg(&theme.colors.text_dim),
            item.author,
            item.date,
            Theme::reset(),
            width = TITLE_WIDTH,
        )?;
        writeln!(
            out,
            "     {}{}{}",
            Theme::fg(&theme.colors.link_fg),
            item.path,
            Theme::reset()
        )?;
    }
    Ok(())
}
