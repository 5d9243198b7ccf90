//! Title bar with login status.

use crate::ui::helpers::write_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::io::{self, Write};

/// Renders the centered, bold title followed by the login status line.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_header(
    out: &mut dyn Write,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<()> {
    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    if let Some(bg) = &theme.colors.header_bg {
        write!(out, "{}", Theme::bg(bg))?;
    }
    write_centered(out, &header.title, cols)?;
    writeln!(out, "{}", Theme::reset())?;

    write!(out, "{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))?;
    write_centered(out, &header.status, cols)?;
    writeln!(out, "{}", Theme::reset())
}
