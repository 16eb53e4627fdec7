//! Status line renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

pub fn render_status(row: usize, status: &StatusInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    if status.busy {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.busy_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{}", fit(&format!(" {}", status.text), cols));
    print!("{}", Theme::reset());
    row + 1
}
