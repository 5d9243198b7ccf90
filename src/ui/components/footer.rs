//! Footer help bar.

use crate::ui::helpers::{truncate, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use std::io::{self, Write};

/// Renders the keybinding hints centered and dimmed, cut to the width.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_footer(
    out: &mut dyn Write,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<()> {
    write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
    write_centered(out, &truncate(&footer.keybindings, cols), cols)?;
    writeln!(out, "{}", Theme::reset())
}
