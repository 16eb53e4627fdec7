//! Composable UI component renderers.
//!
//! Each component draws one part of the pane at a given row and returns the
//! next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar and geo/environment selectors
//! - [`search`]: Search input box
//! - [`table`]: Secret table with sortable columns
//! - [`details`]: Properties of the selected secret
//! - [`status`]: Busy indicator and last message
//! - [`footer`]: Key binding hints
//! - [`empty`]: Message shown in place of an empty table
//! - [`dialog`]: Modal overlays (form, prompt, confirm, alert)

mod details;
mod dialog;
mod empty;
mod footer;
mod header;
mod search;
mod status;
mod table;

pub use dialog::{dialog_lines, render_overlay, DialogLine, LineStyle};
pub use table::column_widths;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use details::render_details;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row`. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full pane layout.
///
/// ```text
/// [blank line]
/// [Header title]
/// [Selectors]
/// [Border]
/// [Search Bar - 3 lines, optional]
/// [Column headers]
/// [Table rows or empty state]
/// [Border + details, optional]
/// [Border]
/// [Status]
/// [Footer]
/// ```
///
/// The view model has already sized the table window to fit between the
/// top and bottom sections.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, &vm.columns, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows;
    let status_row = footer_row.saturating_sub(1);
    let border_row = status_row.saturating_sub(1);

    if let Some(details) = &vm.details {
        let details_start = border_row.saturating_sub(details.properties.len());
        render_border(details_start.saturating_sub(1), &theme.colors.border, cols);
        render_details(details_start, details, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_status(status_row, &vm.status, theme, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
