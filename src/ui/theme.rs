//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are the four Catppuccin flavours; custom themes are loaded
//! from TOML files.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! strikeout_fg = "#7f849c"
//! disabled_fg = "#585b70"
//! busy_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! dialog_border = "#cba6f7"
//! key_fg = "#a6e3a1"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use vault_explorer::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! assert!(Theme::fg(&theme.colors.error_fg).starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::error::{ExplorerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, labels and secondary text.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Rows that do not match the search query.
    pub strikeout_fg: String,
    /// Rows of disabled secrets.
    pub disabled_fg: String,

    /// Status line while an operation is in flight.
    pub busy_fg: String,
    /// Alert titles and form validation messages.
    pub error_fg: String,

    pub dialog_border: String,
    /// Key names in the footer.
    pub key_fg: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ExplorerError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ExplorerError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; malformed colors fall back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    ///
    /// ```rust
    /// use vault_explorer::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
    /// assert_eq!(Theme::fg("bogus"), "\u{1b}[38;2;255;255;255m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
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
    pub const fn strikethrough() -> &'static str {
        "\u{001b}[9m"
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
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
