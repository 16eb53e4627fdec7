//! Search bar component renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line search box at `row` and returns the next free row.
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// The border is dimmed while the box does not have keyboard focus.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        Theme::fg(&theme.colors.search_bar_border)
    } else {
        Theme::fg(&theme.colors.border)
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.focused { "▏" } else { "" };
    let search_text = format!(" Search: {}{cursor}", search.query);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&search_text, inner_width));
    print!("{border}│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
