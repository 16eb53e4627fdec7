//! Table component renderer.
//!
//! Four columns: NAME, TYPE, UPDATED and CHANGED BY. The name column takes
//! whatever width the fixed columns leave.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, DisplayItem};

const TYPE_WIDTH: usize = 12;
const UPDATED_WIDTH: usize = 10;
const CHANGED_BY_WIDTH: usize = 16;
const MIN_NAME_WIDTH: usize = 12;
const GAP: &str = " ";

/// Column widths for a pane `cols` wide.
///
/// ```rust
/// use vault_explorer::ui::components::column_widths;
///
/// assert_eq!(column_widths(80), [39, 12, 10, 16]);
/// assert_eq!(column_widths(20)[0], 12);
/// ```
#[must_use]
pub fn column_widths(cols: usize) -> [usize; 4] {
    let fixed = TYPE_WIDTH + UPDATED_WIDTH + CHANGED_BY_WIDTH + GAP.len() * 3;
    [
        cols.saturating_sub(fixed).max(MIN_NAME_WIDTH),
        TYPE_WIDTH,
        UPDATED_WIDTH,
        CHANGED_BY_WIDTH,
    ]
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, cols: usize) -> String {
    let line = cells
        .zip(column_widths(cols))
        .map(|(text, width)| fit(text, width))
        .collect::<Vec<_>>()
        .join(GAP);
    fit(&line, cols)
}

/// Renders the column titles with the sort arrow. Returns the next free row.
pub fn render_table_headers(row: usize, columns: &[ColumnHeader], theme: &Theme, cols: usize) -> usize {
    let titles: Vec<String> = columns
        .iter()
        .map(|c| match c.arrow {
            Some(arrow) => format!("{} {arrow}", c.title),
            None => c.title.to_string(),
        })
        .collect();

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", join_cells(titles.iter().map(String::as_str), cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders `items` from `row` down. Returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Selection colors win over the disabled and strikeout colors; strikeout
/// also draws a line through the text.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else if item.strikeout {
        print!("{}", Theme::fg(&theme.colors.strikeout_fg));
    } else if item.disabled {
        print!("{}", Theme::fg(&theme.colors.disabled_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    if item.strikeout {
        print!("{}", Theme::strikethrough());
    }
    if item.disabled {
        print!("{}", Theme::dim());
    }

    print!("{}", join_cells(item.cells.iter().map(String::as_str), cols));
    print!("{}", Theme::reset());
    row + 1
}
