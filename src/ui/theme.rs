//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are compiled in from `themes/*.toml`; custom themes are
//! loaded from a TOML file with the same layout.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme (default)
//! - `catppuccin-latte`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! link_fg = "#89b4fa"
//! flash_fg = "#1e1e2e"
//! flash_bg = "#a6e3a1"
//! search_bar_border = "#f5c2e7"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! ```

use crate::domain::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme used by the renderer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every styled element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title bar text.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text: dates, footers, hints.
    pub text_dim: String,
    pub border: String,

    /// Route paths the user can open.
    pub link_fg: String,

    pub flash_fg: String,
    pub flash_bg: String,

    pub search_bar_border: String,

    /// Loading and no-results notices.
    pub empty_state_fg: String,
    /// Not-found and failure notices.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to the TOML file
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Theme`] if:
    /// - The file cannot be read (not found, permission denied, etc.)
    /// - The TOML content cannot be parsed (invalid syntax, missing colors)
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use complexapp::Theme;
    ///
    /// let theme = Theme::from_file("/path/to/theme.toml")?;
    /// println!("loaded {}", theme.name);
    /// # Ok::<(), complexapp::AppError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| AppError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| AppError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Resolves the configured theme: file first, then name, then the default.
    ///
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&Path>) -> Self {
        if let Some(file) = file {
            match Self::from_file(file) {
                Ok(theme) => return theme,
                Err(e) => tracing::debug!(error = %e, "failed to load theme file, using default"),
            }
        }
        if let Some(name) = name {
            match Self::from_name(name) {
                Some(theme) => return theme,
                None => tracing::debug!(theme_name = %name, "unknown theme, using default"),
            }
        }
        Self::default()
    }

    /// Converts `#rrggbb` to RGB, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}
