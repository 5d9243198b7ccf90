//! Search overlay renderer.

use super::empty::{render_notice, Notice};
use super::table::render_post_list;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchPanel, NO_RESULTS_MESSAGE};
use std::io::{self, Write};

/// Horizontal margin around the search box.
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search box and whichever single panel is visible below it.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_search(
    out: &mut dyn Write,
    panel: &SearchPanel,
    theme: &Theme,
    cols: usize,
) -> io::Result<()> {
    let term = match panel {
        SearchPanel::Idle { term }
        | SearchPanel::Loading { term }
        | SearchPanel::NoResults { term }
        | SearchPanel::Results { term, .. } => term,
    };
    render_search_bar(out, term, theme, cols)?;

    match panel {
        SearchPanel::Idle { .. } => Ok(()),
        SearchPanel::Loading { .. } => render_notice(out, Notice::Info, "Loading…", None, theme),
        SearchPanel::NoResults { .. } => {
            render_notice(out, Notice::Info, NO_RESULTS_MESSAGE, None, theme)
        }
        SearchPanel::Results { header, items, .. } => {
            writeln!(
                out,
                "{}{header}{}",
                Theme::bold(),
                Theme::reset()
            )?;
            render_post_list(out, items, theme)
        }
    }
}

fn render_search_bar(out: &mut dyn Write, term: &str, theme: &Theme, cols: usize) -> io::Result<()> {
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2 + 2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    let text = format!(" Search: {term}");
    let text: String = text.chars().take(inner_width).collect();
    let padding = inner_width.saturating_sub(text.chars().count());

    writeln!(out, "{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset())?;
    writeln!(
        out,
        "{margin}{border}│{}{text}{}{border}│{}",
        Theme::fg(&theme.colors.text_normal),
        " ".repeat(padding),
        Theme::reset()
    )?;
    writeln!(out, "{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset())
}
