//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready text only: no secret values, no
//! business logic.
//!
//! # Example
//!
//! ```rust
//! use vault_explorer::ui::viewmodel::{DisplayItem, StatusInfo};
//!
//! let item = DisplayItem {
//!     cells: vec!["db-password".into(), "Text".into(), "2h ago".into(), "alice".into()],
//!     is_selected: true,
//!     strikeout: false,
//!     disabled: false,
//! };
//! let status = StatusInfo { text: "1 secret(s)".into(), busy: false };
//! assert_eq!(item.cells.len(), 4);
//! assert!(!status.busy);
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Column titles, with the sort arrow on the active column.
    pub columns: Vec<ColumnHeader>,

    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`, if it is visible.
    pub selected_index: Option<usize>,

    /// Properties of the selected secret.
    pub details: Option<DetailsPanel>,

    /// Shown while searching or while a query is active.
    pub search_bar: Option<SearchBarInfo>,

    pub status: StatusInfo,

    pub footer: FooterInfo,

    /// Replaces the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Modal drawn over everything else.
    pub overlay: Option<Overlay>,
}

/// Title bar and selector line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Geo and environment selectors, e.g. `geo: us (westus)  env: dev`.
    pub selectors: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub title: &'static str,
    /// `▲` or `▼` when the table is sorted by this column.
    pub arrow: Option<&'static str>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Cell text in column order.
    pub cells: Vec<String>,
    pub is_selected: bool,
    /// The row does not match the search query.
    pub strikeout: bool,
    /// The secret's effective enabled flag is false.
    pub disabled: bool,
}

/// Property panel for the selected secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsPanel {
    /// `(label, value)` pairs in display order.
    pub properties: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Keystrokes go to the search box.
    pub focused: bool,
}

/// Status line: busy text while an operation is in flight, otherwise the last
/// message or the secret count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub text: String,
    pub busy: bool,
}

/// Key binding hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub hints: Vec<KeyHint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: String,
    /// Disabled hints are drawn dimmed.
    pub enabled: bool,
}

impl KeyHint {
    #[must_use]
    pub fn new(key: &'static str, label: impl Into<String>, enabled: bool) -> Self {
        Self {
            key,
            label: label.into(),
            enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Modal overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Confirm { question: String },
    Alert { title: String, message: String },
    Form(FormView),
    Prompt { title: String, path: String },
}

/// Rendered secret form. The value is masked unless the user revealed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FormFieldView>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
}
