//! Property panel for the selected secret.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailsPanel;

const LABEL_WIDTH: usize = 14;

/// Renders one line per property from `row`. Returns the next free row.
pub fn render_details(row: usize, details: &DetailsPanel, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for (label, value) in &details.properties {
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", fit(&format!(" {label}"), LABEL_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", fit(value, cols.saturating_sub(LABEL_WIDTH)));
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}
