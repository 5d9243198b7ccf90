//! Shared rendering utilities.

use super::theme::Theme;
use std::io::{self, Write};

/// `"Search Results (N items found)"`, singular for one hit.
#[must_use]
pub fn results_header(count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("Search Results ({count} {noun} found)")
}

/// Reduces a markdown body to display lines.
///
/// Only paragraphs, line breaks, emphasis, headings and lists survive: heading
/// hashes and emphasis markers are stripped, list markers become bullets, and
/// anything else (links, images, HTML) is shown as its literal text.
#[must_use]
pub fn markdown_to_lines(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let content = trimmed.trim_start_matches('#');
            let is_heading = content.len() != trimmed.len() && content.starts_with(' ');

            let line = if is_heading {
                content.trim().to_uppercase()
            } else if let Some(item) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
                .or_else(|| trimmed.strip_prefix("+ "))
            {
                format!("• {item}")
            } else {
                line.to_string()
            };

            strip_emphasis(&line)
        })
        .collect()
}

/// Removes `*`/`_` and `**`/`__` pairs that wrap text at word boundaries.
///
/// Markers inside words (`snake_case`, `2*3`) or without a partner stay.
fn strip_emphasis(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut keep = vec![true; chars.len()];
    let mut i = 0;

    while i < chars.len() {
        let marker = chars[i];
        if !keep[i] || (marker != '*' && marker != '_') {
            i += 1;
            continue;
        }
        let width = if chars.get(i + 1) == Some(&marker) { 2 } else { 1 };
        if let Some(close) = closing_marker(&chars, i, marker, width) {
            for offset in 0..width {
                keep[i + offset] = false;
                keep[close + offset] = false;
            }
        }
        i += width;
    }

    chars
        .into_iter()
        .zip(keep)
        .filter_map(|(c, kept)| kept.then_some(c))
        .collect()
}

/// Index of the marker run closing the one opened at `open`, if it opens.
fn closing_marker(chars: &[char], open: usize, marker: char, width: usize) -> Option<usize> {
    let before = open.checked_sub(1).map(|j| chars[j]);
    let after = chars.get(open + width).copied();
    if before.is_some_and(char::is_alphanumeric) || !after.is_some_and(|c| !c.is_whitespace()) {
        return None;
    }

    let mut j = open + width + 1;
    while j + width <= chars.len() {
        let is_run = chars[j..j + width].iter().all(|&c| c == marker);
        let follows_text = !chars[j - 1].is_whitespace();
        let at_boundary = chars
            .get(j + width)
            .map_or(true, |&c| !c.is_alphanumeric() && c != marker);
        if is_run && follows_text && at_boundary {
            return Some(j);
        }
        j += 1;
    }
    None
}

/// Writes `text` centered in `cols` columns, padded to the full width.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_centered(out: &mut dyn Write, text: &str, cols: usize) -> io::Result<()> {
    let len = text.chars().count().min(cols);
    let padding = cols.saturating_sub(len) / 2;
    let text: String = text.chars().take(cols).collect();

    write!(
        out,
        "{}{text}{}",
        " ".repeat(padding),
        " ".repeat(cols.saturating_sub(padding + len))
    )
}

/// Writes a full-width horizontal rule in `color`.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_rule(out: &mut dyn Write, color: &str, cols: usize) -> io::Result<()> {
    writeln!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())
}

/// Shortens `text` to `max` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
