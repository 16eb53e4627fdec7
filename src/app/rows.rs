//! List presentation of secrets.
//!
//! A [`Row`] is the display-time form of one secret: the listed metadata plus
//! the strikeout flag set by the search filter. Rows never hold a value and are
//! replaced wholesale whenever the vault confirms a change.

use crate::app::sort::SortColumn;
use crate::domain::{ContentType, Secret};

/// One secret as shown in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Listed metadata; the value is always empty.
    pub secret: Secret,
    /// Set when the row does not match the current search query.
    pub strikeout: bool,
}

impl Row {
    /// Builds a row from a vault record, dropping its value.
    #[must_use]
    pub fn new(secret: &Secret) -> Self {
        Self {
            secret: secret.without_value(),
            strikeout: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.secret.name
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.secret.is_enabled()
    }

    #[must_use]
    pub fn content_type(&self) -> Option<ContentType> {
        self.secret.content_type
    }

    #[must_use]
    pub fn changed_by(&self) -> Option<&str> {
        self.secret.changed_by()
    }

    #[must_use]
    pub fn updated(&self) -> Option<i64> {
        self.secret.attributes.updated
    }

    /// Text the search filter matches against: the name followed by every tag
    /// key and value.
    ///
    /// ```
    /// use vault_explorer::app::rows::Row;
    /// use vault_explorer::domain::Secret;
    ///
    /// let mut secret = Secret::new("db-password", "s3cret");
    /// secret.tags.insert("owner".into(), "payments".into());
    ///
    /// let row = Row::new(&secret);
    /// assert_eq!(row.searchable_text(), "db-password owner payments");
    /// ```
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let mut text = self.secret.name.clone();
        for (key, value) in &self.secret.tags {
            text.push(' ');
            text.push_str(key);
            if !value.is_empty() {
                text.push(' ');
                text.push_str(value);
            }
        }
        text
    }

    /// Cell text for a table column.
    #[must_use]
    pub fn cell(&self, column: SortColumn, now: i64) -> String {
        match column {
            SortColumn::Name => self.secret.name.clone(),
            SortColumn::Type => self
                .content_type()
                .map(ContentType::label)
                .unwrap_or_default()
                .to_string(),
            SortColumn::Updated => self.secret.updated_ago(now),
            SortColumn::ChangedBy => self.changed_by().unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CHANGED_BY_TAG;

    #[test]
    fn rows_never_keep_values() {
        let row = Row::new(&Secret::new("api-key", "top-secret"));
        assert!(row.secret.value.is_empty());
        assert!(!row.searchable_text().contains("top-secret"));
    }

    #[test]
    fn cells_render_each_column() {
        let mut secret = Secret::new("api-key", "");
        secret.content_type = Some(ContentType::Json);
        secret.attributes.updated = Some(1_000);
        secret.tags.insert(CHANGED_BY_TAG.into(), "alice".into());
        let row = Row::new(&secret);

        assert_eq!(row.cell(SortColumn::Name, 1_000), "api-key");
        assert_eq!(row.cell(SortColumn::Type, 1_000), "JSON");
        assert_eq!(row.cell(SortColumn::Updated, 1_000 + 120), "2m ago");
        assert_eq!(row.cell(SortColumn::ChangedBy, 1_000), "alice");
    }

    #[test]
    fn missing_metadata_renders_empty_cells() {
        let row = Row::new(&Secret::new("bare", ""));
        assert_eq!(row.cell(SortColumn::Type, 0), "");
        assert_eq!(row.cell(SortColumn::Updated, 0), "");
        assert_eq!(row.cell(SortColumn::ChangedBy, 0), "");
    }
}
