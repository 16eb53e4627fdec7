//! Footer component renderer.

use crate::ui::helpers::{position_cursor, width_of};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders key hints as `key label` pairs, centered, dropping hints that no
/// longer fit. Disabled hints are dimmed.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let mut used = 0;
    let mut shown = Vec::new();
    for hint in &footer.hints {
        let width = width_of(hint.key) + 1 + width_of(&hint.label) + 2;
        if used + width > cols {
            break;
        }
        used += width;
        shown.push(hint);
    }

    position_cursor(row, 1);
    print!("{}", " ".repeat(cols.saturating_sub(used) / 2));
    for hint in shown {
        if hint.enabled {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.key_fg));
        } else {
            print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        }
        print!("{}", hint.key);
        print!("{}", Theme::reset());
        if hint.enabled {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        } else {
            print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        }
        print!(" {}  ", hint.label);
        print!("{}", Theme::reset());
    }
    row + 1
}
