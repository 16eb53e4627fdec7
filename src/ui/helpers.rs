//! Shared rendering utilities.
//!
//! Widths are counted in characters, not bytes, so names and tags with
//! non-ASCII text line up.

use crate::domain::SecretValue;
use base64::Engine;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates or pads `text` to exactly `width` characters.
///
/// Truncated text ends with `…`.
///
/// ```rust
/// use vault_explorer::ui::helpers::fit;
///
/// assert_eq!(fit("api", 5), "api  ");
/// assert_eq!(fit("database-password", 8), "databas…");
/// assert_eq!(fit("abc", 0), "");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{text}{}", " ".repeat(width - len));
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

/// Character count of `text`.
#[must_use]
pub fn width_of(text: &str) -> usize {
    text.chars().count()
}

/// OSC 52 escape that asks the terminal to place `value` on the system
/// clipboard.
///
/// ```rust
/// use vault_explorer::domain::SecretValue;
/// use vault_explorer::ui::helpers::clipboard_sequence;
///
/// assert_eq!(clipboard_sequence(&SecretValue::new("hi")), "\u{1b}]52;c;aGk=\u{7}");
/// ```
#[must_use]
pub fn clipboard_sequence(value: &SecretValue) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(value.expose());
    format!("\u{1b}]52;c;{encoded}\u{7}")
}
