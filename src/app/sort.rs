//! Column sorting for the secrets table.

use crate::app::rows::Row;
use std::cmp::Ordering;

/// Sortable table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Name,
    Type,
    Updated,
    ChangedBy,
}

impl SortColumn {
    pub const ALL: [Self; 4] = [Self::Name, Self::Type, Self::Updated, Self::ChangedBy];

    /// Column at a zero-based header position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Type => "TYPE",
            Self::Updated => "UPDATED",
            Self::ChangedBy => "CHANGED BY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Current sort column and direction.
///
/// Lives for the whole plugin session; a refresh keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Applies a click on a column header.
    ///
    /// The same column flips the direction; another column sorts ascending.
    ///
    /// ```
    /// use vault_explorer::app::sort::{SortColumn, SortDirection, SortState};
    ///
    /// let mut sort = SortState::default();
    /// sort.click(SortColumn::Updated);
    /// assert_eq!(sort.direction, SortDirection::Ascending);
    /// sort.click(SortColumn::Updated);
    /// assert_eq!(sort.direction, SortDirection::Descending);
    /// sort.click(SortColumn::ChangedBy);
    /// assert_eq!(sort.direction, SortDirection::Ascending);
    /// ```
    pub fn click(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.toggled();
        } else {
            self.column = column;
            self.direction = SortDirection::Ascending;
        }
        tracing::debug!(column = ?self.column, direction = ?self.direction, "sort changed");
    }

    /// Orders two rows by the current column and direction.
    ///
    /// Ties fall back to the name so the order is total. Missing values sort
    /// first when ascending.
    #[must_use]
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let primary = match self.column {
            SortColumn::Name => Ordering::Equal,
            SortColumn::Type => a
                .content_type()
                .map(|c| c.label())
                .cmp(&b.content_type().map(|c| c.label())),
            SortColumn::Updated => a.updated().cmp(&b.updated()),
            SortColumn::ChangedBy => a
                .changed_by()
                .map(str::to_lowercase)
                .cmp(&b.changed_by().map(str::to_lowercase)),
        };
        let ordering = primary.then_with(|| compare_names(a.name(), b.name()));

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Secret, CHANGED_BY_TAG};

    fn row(name: &str, updated: Option<i64>, changed_by: &str) -> Row {
        let mut secret = Secret::new(name, "");
        secret.attributes.updated = updated;
        secret.tags.insert(CHANGED_BY_TAG.into(), changed_by.into());
        Row::new(&secret)
    }

    fn sorted(rows: &[Row], sort: SortState) -> Vec<String> {
        let mut rows = rows.to_vec();
        rows.sort_by(|a, b| sort.compare(a, b));
        rows.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn click_sequence_follows_column_and_direction() {
        let rows = vec![
            row("b", Some(30), "carol"),
            row("a", Some(10), "bob"),
            row("c", Some(20), "alice"),
        ];
        let mut sort = SortState::default();

        sort.click(SortColumn::from_index(2).unwrap());
        assert_eq!(sorted(&rows, sort), vec!["a", "c", "b"]);

        sort.click(SortColumn::from_index(2).unwrap());
        assert_eq!(sorted(&rows, sort), vec!["b", "c", "a"]);

        sort.click(SortColumn::from_index(3).unwrap());
        assert_eq!(sort.direction, SortDirection::Ascending);
        assert_eq!(sorted(&rows, sort), vec!["c", "a", "b"]);
    }

    #[test]
    fn names_compare_case_insensitively_with_stable_tie_break() {
        let rows = vec![row("beta", None, ""), row("Alpha", None, ""), row("alpha", None, "")];
        assert_eq!(sorted(&rows, SortState::default()), vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn missing_values_sort_first_when_ascending() {
        let rows = vec![row("new", Some(5), ""), row("unknown", None, "")];
        let sort = SortState {
            column: SortColumn::Updated,
            direction: SortDirection::Ascending,
        };
        assert_eq!(sorted(&rows, sort), vec!["unknown", "new"]);
    }

    #[test]
    fn out_of_range_column_index_is_none() {
        assert_eq!(SortColumn::from_index(4), None);
    }
}
