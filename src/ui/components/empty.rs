//! Notices shown instead of content: loading, not found, failures.

use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Kind of notice, which picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Error,
}

/// Renders a one-line notice with a dimmed subtitle below it.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_notice(
    out: &mut dyn Write,
    kind: Notice,
    message: &str,
    subtitle: Option<&str>,
    theme: &Theme,
) -> io::Result<()> {
    let color = match kind {
        Notice::Info => &theme.colors.empty_state_fg,
        Notice::Error => &theme.colors.error_fg,
    };
    writeln!(out, "{}{message}{}", Theme::fg(color), Theme::reset())?;

    if let Some(subtitle) = subtitle {
        writeln!(
            out,
            "{}{}{subtitle}{}",
            Theme::dim(),
            Theme::fg(&theme.colors.text_dim),
            Theme::reset()
        )?;
    }
    Ok(())
}
