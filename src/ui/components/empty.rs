//! Empty state component renderer.

use crate::ui::helpers::{position_cursor, width_of};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the two-line centered message, the first line at `row`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let msg_len = width_of(&empty.message);
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(cols.saturating_sub(msg_len) / 2));
    print!("{}", empty.message);
    print!("{}", Theme::reset());

    let sub_len = width_of(&empty.subtitle);
    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(cols.saturating_sub(sub_len) / 2));
    print!("{}", empty.subtitle);
    print!("{}", Theme::reset());
}
