//! Top-level rendering coordinator.
//!
//! ```text
//! AppState + Page + SearchState → compute_screen → ScreenViewModel → render → ANSI
//! ```

use crate::ui::components;
use crate::ui::helpers::write_rule;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ScreenViewModel;
use std::io::{self, Write};

/// Writes one full screen.
///
/// The search overlay, when present, replaces the page body. Output is line
/// based; the caller decides whether to clear the terminal first.
///
/// # Errors
///
/// Propagates write failures.
pub fn render(out: &mut dyn Write, vm: &ScreenViewModel, theme: &Theme, cols: usize) -> io::Result<()> {
    components::render_header(out, &vm.header, theme, cols)?;
    write_rule(out, &theme.colors.border, cols)?;
    components::render_flashes(out, &vm.flashes, theme)?;

    if let Some(search) = &vm.search {
        components::render_search(out, search, theme, cols)?;
    } else {
        components::render_body(out, &vm.body, theme)?;
    }

    write_rule(out, &theme.colors.border, cols)?;
    components::render_footer(out, &vm.footer, theme, cols)?;
    out.flush()
}
