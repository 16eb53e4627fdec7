//! Header component renderer: centered title plus the selector line.

use crate::ui::helpers::{position_cursor, width_of};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar and the geo/environment selectors at `row`.
///
/// Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = width_of(&header.title);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let selectors_len = width_of(&header.selectors);
    let padding = cols.saturating_sub(selectors_len) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{}", header.selectors);
    print!("{}", Theme::reset());

    row + 2
}
