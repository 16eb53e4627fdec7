//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth on the plugin thread: the rows of
//! the connected vault, the selection, the search query and sort order, the
//! operation guard and the current input mode. Rows are only ever changed in
//! response to a confirmed worker reply.
//!
//! # Example
//!
//! ```rust
//! use vault_explorer::{AppState, Config, Secret, Theme};
//! use vault_explorer::vault::{Geo, VaultLocation};
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! let location = VaultLocation::new(&Geo::parse("us:westus").unwrap(), "dev");
//! state.replace_all(location, &[Secret::new("b", ""), Secret::new("a", "")]);
//!
//! assert_eq!(state.order, vec!["a", "b"]);
//! assert_eq!(state.status, "2 secret(s)");
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.display_items.len(), 2);
//! ```

use super::form::{FormField, SecretForm};
use super::guard::{Operation, OperationGuard};
use super::modes::InputMode;
use super::rows::Row;
use super::search::{self, Debounce};
use super::sort::{SortColumn, SortState};
use crate::domain::{format_tags, Secret};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnHeader, DetailsPanel, DisplayItem, EmptyState, FooterInfo, FormFieldView, FormView,
    HeaderInfo, KeyHint, Overlay, SearchBarInfo, StatusInfo, UIViewModel,
};
use crate::vault::VaultLocation;
use crate::worker::VaultTarget;
use crate::Config;
use std::collections::BTreeMap;

/// Lines taken by the header, selectors, borders, column titles, status and
/// footer.
const CHROME_ROWS: usize = 8;
const SEARCH_BAR_ROWS: usize = 3;
/// Border plus six property lines.
const DETAILS_ROWS: usize = 7;
/// Below this height the details panel is dropped to keep the table usable.
const MIN_ROWS_FOR_DETAILS: usize = 20;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Rows of the connected vault, keyed by secret name.
    pub rows: BTreeMap<String, Row>,

    /// Row names in display order. Regenerated by [`AppState::resort`].
    pub order: Vec<String>,

    /// Name of the selected row.
    pub selected: Option<String>,

    pub sort: SortState,

    /// In-flight operations. An action is ignored while its previous run is
    /// still waiting for the worker.
    pub guard: OperationGuard,

    /// Current search text. Kept when leaving the search box.
    pub search_query: String,

    /// Pending search timers.
    pub debounce: Debounce,

    pub input_mode: InputMode,

    /// Index into `config.geos` of the geo selector.
    pub geo_index: usize,

    /// Index into `config.environments` of the environment selector.
    pub environment_index: usize,

    /// Location of the listed rows. `None` until the first refresh succeeds.
    pub connected: Option<VaultLocation>,

    pub config: Config,

    /// Last status message. Replaced by the busy text while an operation runs.
    pub status: String,

    pub theme: Theme,
}

impl AppState {
    /// Creates a disconnected state with the first geo and environment
    /// selected.
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            rows: BTreeMap::new(),
            order: vec![],
            selected: None,
            sort: SortState::default(),
            guard: OperationGuard::default(),
            search_query: String::new(),
            debounce: Debounce::default(),
            input_mode: InputMode::Normal,
            geo_index: 0,
            environment_index: 0,
            connected: None,
            config: config.clone(),
            status: "Press r to load secrets".to_string(),
            theme,
        }
    }

    /// Location chosen by the selectors, or `None` if a selector list is empty.
    #[must_use]
    pub fn location(&self) -> Option<VaultLocation> {
        let geo = self.config.geos.get(self.geo_index)?;
        let environment = self.config.environments.get(self.environment_index)?;
        Some(VaultLocation::new(geo, environment))
    }

    /// Vault the listed rows belong to, for requests about those rows.
    #[must_use]
    pub fn target(&self) -> Option<VaultTarget> {
        let location = self.connected.clone()?;
        Some(VaultTarget {
            location,
            data_dir: self.config.data_dir.clone(),
        })
    }

    /// Forgets the listed rows while another vault is being loaded.
    pub fn disconnect(&mut self) {
        self.rows.clear();
        self.order.clear();
        self.selected = None;
        self.connected = None;
    }

    pub fn cycle_geo(&mut self) {
        if !self.config.geos.is_empty() {
            self.geo_index = (self.geo_index + 1) % self.config.geos.len();
        }
    }

    pub fn cycle_environment(&mut self) {
        if !self.config.environments.is_empty() {
            self.environment_index = (self.environment_index + 1) % self.config.environments.len();
        }
    }

    /// Replaces every row with a fresh listing of `location`.
    ///
    /// The selection survives if the selected secret is still listed.
    pub fn replace_all(&mut self, location: VaultLocation, secrets: &[Secret]) {
        let _span = tracing::debug_span!("replace_all", vault = %location, count = secrets.len()).entered();

        self.rows = secrets
            .iter()
            .map(|secret| (secret.name.clone(), Row::new(secret)))
            .collect();
        self.connected = Some(location);
        if self.selected.as_ref().is_some_and(|name| !self.rows.contains_key(name)) {
            self.selected = None;
        }
        self.resort();
        self.mark_strikeouts();
        self.refresh_count();
    }

    /// Inserts or replaces the row for `secret`, reapplies the search filter
    /// and selects the new row.
    pub fn upsert_row(&mut self, secret: &Secret) {
        self.rows.insert(secret.name.clone(), Row::new(secret));
        self.resort();
        self.apply_search_filter();
        self.selected = Some(secret.name.clone());
        self.refresh_count();
    }

    /// Removes the row named `name`, clearing the selection if it pointed there.
    pub fn remove_row(&mut self, name: &str) {
        if self.rows.remove(name).is_some() {
            self.order.retain(|n| n != name);
            if self.selected.as_deref() == Some(name) {
                self.selected = None;
            }
            self.refresh_count();
        }
    }

    /// Regenerates the display order from the sort state.
    pub fn resort(&mut self) {
        let mut rows: Vec<&Row> = self.rows.values().collect();
        rows.sort_by(|a, b| self.sort.compare(a, b));
        self.order = rows.into_iter().map(|row| row.name().to_string()).collect();
    }

    /// Sorts by the column at `index`, as if its header was clicked.
    pub fn sort_by(&mut self, index: usize) {
        if let Some(column) = SortColumn::from_index(index) {
            self.sort.click(column);
            self.resort();
        }
    }

    fn mark_strikeouts(&mut self) {
        let query = &self.search_query;
        for row in self.rows.values_mut() {
            row.strikeout = !search::matches(&row.searchable_text(), query);
        }
    }

    /// Strikes out the rows that do not match the query and selects the first
    /// match in display order, or nothing when no row matches.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!("apply_search_filter",
            total_rows = self.rows.len(),
            query_len = self.search_query.len()
        ).entered();

        self.mark_strikeouts();
        self.selected = self
            .order
            .iter()
            .find(|name| self.rows.get(*name).is_some_and(|row| !row.strikeout))
            .cloned();

        tracing::debug!(
            matching = self.rows.values().filter(|row| !row.strikeout).count(),
            "search filter applied"
        );
    }

    fn selected_position(&self) -> Option<usize> {
        let name = self.selected.as_ref()?;
        self.order.iter().position(|n| n == name)
    }

    /// Moves the selection down one row, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.order.is_empty() {
            return;
        }
        let next = self.selected_position().map_or(0, |i| (i + 1) % self.order.len());
        self.selected = Some(self.order[next].clone());
    }

    /// Moves the selection up one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.order.is_empty() {
            return;
        }
        let last = self.order.len() - 1;
        let prev = match self.selected_position() {
            Some(0) | None => last,
            Some(i) => i - 1,
        };
        self.selected = Some(self.order[prev].clone());
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected.as_ref()?)
    }

    /// Status line reset after list changes.
    pub fn refresh_count(&mut self) {
        self.status = format!("{} secret(s)", self.rows.len());
    }

    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.location().is_some() && !self.guard.is_busy(Operation::Refresh)
    }

    #[must_use]
    pub fn can_add(&self) -> bool {
        self.connected.is_some() && !self.guard.is_busy(Operation::Add)
    }

    /// Edit needs one selected row whose secret is enabled.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.selected_row().is_some_and(Row::is_enabled) && !self.guard.is_busy(Operation::Edit)
    }

    /// Copy needs one selected row whose secret is enabled.
    #[must_use]
    pub fn can_copy(&self) -> bool {
        self.selected_row().is_some_and(Row::is_enabled) && !self.guard.is_busy(Operation::Copy)
    }

    #[must_use]
    pub fn can_toggle(&self) -> bool {
        self.selected_row().is_some() && !self.guard.is_busy(Operation::Toggle)
    }

    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.selected_row().is_some() && !self.guard.is_busy(Operation::Delete)
    }

    /// "Disable" for an enabled selection, "Enable" otherwise.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.selected_row().is_some_and(Row::is_enabled) {
            "Disable"
        } else {
            "Enable"
        }
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// The table window is centered on the selected row when the list is
    /// taller than the space available.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let now = chrono::Utc::now().timestamp();
        let show_details = self.selected_row().is_some() && rows >= MIN_ROWS_FOR_DETAILS;
        let search_bar = self.compute_search_bar();

        let mut chrome = CHROME_ROWS;
        if search_bar.is_some() {
            chrome += SEARCH_BAR_ROWS;
        }
        if show_details {
            chrome += DETAILS_ROWS;
        }
        let available_rows = rows.saturating_sub(chrome).max(1);

        let selected_position = self.selected_position();
        // Never scroll past the point where the last row reaches the bottom.
        let last_start = self.order.len().saturating_sub(available_rows);
        let visible_start = selected_position
            .unwrap_or(0)
            .saturating_sub(available_rows / 2)
            .min(last_start);
        let visible_end = (visible_start + available_rows).min(self.order.len());

        let display_items = self.order[visible_start..visible_end]
            .iter()
            .filter_map(|name| self.rows.get(name))
            .map(|row| DisplayItem {
                cells: SortColumn::ALL.iter().map(|c| row.cell(*c, now)).collect(),
                is_selected: self.selected.as_deref() == Some(row.name()),
                strikeout: row.strikeout,
                disabled: !row.is_enabled(),
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            columns: self.compute_columns(),
            display_items,
            selected_index: selected_position
                .filter(|p| (visible_start..visible_end).contains(p))
                .map(|p| p - visible_start),
            details: if show_details { self.compute_details() } else { None },
            search_bar,
            status: self.compute_status(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            overlay: self.compute_overlay(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = self.connected.as_ref().map_or_else(
            || " Vault Explorer ".to_string(),
            |location| format!(" Vault Explorer: {location} "),
        );
        let geo = self
            .config
            .geos
            .get(self.geo_index)
            .map_or_else(|| "-".to_string(), ToString::to_string);
        let environment = self
            .config
            .environments
            .get(self.environment_index)
            .map_or("-", String::as_str);
        HeaderInfo {
            title,
            selectors: format!("geo: {geo}   env: {environment}"),
        }
    }

    fn compute_columns(&self) -> Vec<ColumnHeader> {
        SortColumn::ALL
            .iter()
            .map(|column| ColumnHeader {
                title: column.title(),
                arrow: (*column == self.sort.column).then(|| self.sort.direction.arrow()),
            })
            .collect()
    }

    fn compute_details(&self) -> Option<DetailsPanel> {
        let row = self.selected_row()?;
        let secret = &row.secret;
        let timestamp = |ts: Option<i64>| {
            ts.and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_default()
        };
        Some(DetailsPanel {
            properties: vec![
                ("Name", secret.name.clone()),
                ("Content type", secret.content_type.map(|c| c.as_mime().to_string()).unwrap_or_default()),
                ("Enabled", if row.is_enabled() { "yes" } else { "no" }.to_string()),
                ("Created", timestamp(secret.attributes.created)),
                ("Updated", timestamp(secret.attributes.updated)),
                ("Tags", format_tags(&secret.tags)),
            ],
        })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let focused = matches!(self.input_mode, InputMode::Search);
        (focused || !self.search_query.is_empty()).then(|| SearchBarInfo {
            query: self.search_query.clone(),
            focused,
        })
    }

    fn compute_status(&self) -> StatusInfo {
        self.guard.busy_status().map_or_else(
            || StatusInfo {
                text: self.status.clone(),
                busy: false,
            },
            |busy| StatusInfo {
                text: busy.to_string(),
                busy: true,
            },
        )
    }

    fn compute_footer(&self) -> FooterInfo {
        let hints = match &self.input_mode {
            InputMode::Search => vec![
                KeyHint::new("Esc", "done", true),
                KeyHint::new("Ctrl+u", "clear", true),
                KeyHint::new("Enter", "done", true),
            ],
            InputMode::Form(_) => vec![
                KeyHint::new("Tab", "next field", true),
                KeyHint::new("←/→", "change", true),
                KeyHint::new("Ctrl+v", "show value", true),
                KeyHint::new("Enter", "save", true),
                KeyHint::new("Esc", "cancel", true),
            ],
            InputMode::Prompt(_) => vec![
                KeyHint::new("Enter", "load", true),
                KeyHint::new("Esc", "cancel", true),
            ],
            InputMode::Confirm(_) => vec![
                KeyHint::new("y", "yes", true),
                KeyHint::new("n", "no", true),
            ],
            InputMode::Alert { .. } => vec![KeyHint::new("Enter", "dismiss", true)],
            InputMode::Normal => vec![
                KeyHint::new("r", "refresh", self.can_refresh()),
                KeyHint::new("g/e", "geo/env", true),
                KeyHint::new("a", "add", self.can_add()),
                KeyHint::new("C", "add cert", self.can_add()),
                KeyHint::new("F", "add file", self.can_add()),
                KeyHint::new("Enter", "edit", self.can_edit()),
                KeyHint::new("t", self.toggle_label(), self.can_toggle()),
                KeyHint::new("d", "delete", self.can_delete()),
                KeyHint::new("c", "copy", self.can_copy()),
                KeyHint::new("/", "search", self.connected.is_some()),
                KeyHint::new("1-4", "sort", true),
                KeyHint::new("?", "help", true),
                KeyHint::new("q", "quit", true),
            ],
        };
        FooterInfo { hints }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.rows.is_empty() {
            return None;
        }
        Some(if self.connected.is_some() {
            EmptyState {
                message: "This vault has no secrets".to_string(),
                subtitle: "Press a to add one".to_string(),
            }
        } else {
            EmptyState {
                message: "Not connected".to_string(),
                subtitle: "Pick a geo (g) and environment (e), then press r".to_string(),
            }
        })
    }

    fn compute_overlay(&self) -> Option<Overlay> {
        match &self.input_mode {
            InputMode::Normal | InputMode::Search => None,
            InputMode::Form(form) => Some(Overlay::Form(Self::form_view(form))),
            InputMode::Prompt(prompt) => Some(Overlay::Prompt {
                title: prompt.title().to_string(),
                path: prompt.path.clone(),
            }),
            InputMode::Confirm(action) => Some(Overlay::Confirm {
                question: action.question(),
            }),
            InputMode::Alert { title, message } => Some(Overlay::Alert {
                title: title.clone(),
                message: message.clone(),
            }),
        }
    }

    fn form_view(form: &SecretForm) -> FormView {
        let fields = FormField::ALL
            .iter()
            .map(|field| {
                let value = match field {
                    FormField::Name => form.name.clone(),
                    FormField::Value if form.reveal => form.value.expose().to_string(),
                    FormField::Value => form.value.masked(),
                    FormField::ContentType => form
                        .content_type
                        .map_or_else(|| "(none)".to_string(), |c| c.as_mime().to_string()),
                    FormField::Tags => form.tags.clone(),
                    FormField::Enabled => if form.is_enabled() { "[x]" } else { "[ ]" }.to_string(),
                };
                FormFieldView {
                    label: field.label(),
                    value,
                    focused: *field == form.focus,
                }
            })
            .collect();

        FormView {
            title: form.title(),
            fields,
            error: form.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::ConfirmAction;
    use crate::domain::{SecretAttributes, SecretValue};
    use crate::vault::Geo;

    fn state_with(names: &[&str]) -> AppState {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let secrets: Vec<Secret> = names.iter().map(|n| Secret::new(*n, "")).collect();
        state.replace_all(location(), &secrets);
        state
    }

    fn location() -> VaultLocation {
        VaultLocation::new(&Geo::parse("us:westus").unwrap(), "dev")
    }

    fn tagged(name: &str, key: &str, value: &str) -> Secret {
        let mut secret = Secret::new(name, "");
        secret.tags.insert(key.into(), value.into());
        secret
    }

    #[test]
    fn selectors_cycle_and_resolve_location() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        state.cycle_geo();
        state.cycle_environment();
        state.cycle_environment();
        assert_eq!(state.location().unwrap().vault_name(), "eu-prod");

        state.cycle_geo();
        state.cycle_geo();
        assert_eq!(state.location().unwrap().geo, "us");
    }

    #[test]
    fn empty_selector_lists_have_no_location() {
        let config = Config {
            environments: vec![],
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        state.cycle_environment();
        assert!(state.location().is_none());
        assert!(!state.can_refresh());
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = state_with(&["a", "b", "c"]);
        state.move_selection_down();
        assert_eq!(state.selected.as_deref(), Some("a"));
        state.move_selection_up();
        assert_eq!(state.selected.as_deref(), Some("c"));
        state.move_selection_down();
        assert_eq!(state.selected.as_deref(), Some("a"));
    }

    #[test]
    fn strikeout_tracks_query_for_every_row() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        state.replace_all(
            location(),
            &[tagged("api-key", "owner", "payments"), tagged("db-password", "owner", "storage")],
        );
        state.search_query = "PAY".into();
        state.apply_search_filter();

        for row in state.rows.values() {
            let hit = row.searchable_text().to_lowercase().contains("pay");
            assert_eq!(row.strikeout, !hit, "row {}", row.name());
        }
        assert_eq!(state.selected.as_deref(), Some("api-key"));
    }

    #[test]
    fn no_match_clears_selection() {
        let mut state = state_with(&["a", "b"]);
        state.selected = Some("a".into());
        state.search_query = "zzz".into();
        state.apply_search_filter();
        assert_eq!(state.selected, None);
        assert!(state.rows.values().all(|row| row.strikeout));
    }

    #[test]
    fn refresh_reapplies_the_active_query() {
        let mut state = state_with(&[]);
        state.search_query = "key".into();
        state.replace_all(location(), &[Secret::new("api-key", ""), Secret::new("other", "")]);
        assert!(!state.rows["api-key"].strikeout);
        assert!(state.rows["other"].strikeout);
    }

    #[test]
    fn upsert_replaces_row_and_selects_it() {
        let mut state = state_with(&["a", "b"]);
        let mut updated = Secret::new("b", "");
        updated.attributes = SecretAttributes::with_enabled(Some(false));
        state.upsert_row(&updated);

        assert_eq!(state.rows.len(), 2);
        assert!(!state.rows["b"].is_enabled());
        assert_eq!(state.selected.as_deref(), Some("b"));
        assert_eq!(state.status, "2 secret(s)");
    }

    #[test]
    fn remove_row_updates_order_selection_and_count() {
        let mut state = state_with(&["a", "b"]);
        state.selected = Some("a".into());
        state.remove_row("a");
        assert_eq!(state.order, vec!["b"]);
        assert_eq!(state.selected, None);
        assert_eq!(state.status, "1 secret(s)");
    }

    #[test]
    fn enablement_follows_selection() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let mut disabled = Secret::new("off", "");
        disabled.attributes.enabled = Some(false);
        state.replace_all(location(), &[Secret::new("on", ""), disabled]);

        assert!(!state.can_edit() && !state.can_delete());

        state.selected = Some("off".into());
        assert!(!state.can_edit() && !state.can_copy());
        assert!(state.can_toggle() && state.can_delete());
        assert_eq!(state.toggle_label(), "Enable");

        state.selected = Some("on".into());
        assert!(state.can_edit() && state.can_copy());
        assert_eq!(state.toggle_label(), "Disable");

        state.guard.begin(Operation::Copy);
        assert!(!state.can_copy());
    }

    #[test]
    fn viewmodel_marks_sort_arrow_and_selection() {
        let mut state = state_with(&["a", "b"]);
        state.sort_by(0);
        state.selected = Some("a".into());
        let vm = state.compute_viewmodel(30, 100);

        assert_eq!(vm.columns[0].arrow, Some("▼"));
        assert!(vm.columns[1].arrow.is_none());
        assert_eq!(vm.display_items[0].cells[0], "b");
        assert_eq!(vm.selected_index, Some(1));
        assert!(vm.details.is_some());
    }

    #[test]
    fn viewmodel_window_keeps_selection_visible() {
        let names: Vec<String> = (0..50).map(|i| format!("s{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.selected = Some("s40".into());

        let vm = state.compute_viewmodel(20, 80);
        let index = vm.selected_index.unwrap();
        assert_eq!(vm.display_items[index].cells[0], "s40");
    }

    #[test]
    fn short_list_is_shown_whole_with_the_last_row_selected() {
        let names: Vec<String> = (0..12).map(|i| format!("s{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.selected = Some("s11".into());

        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.display_items.len(), 12);
        assert_eq!(vm.display_items[0].cells[0], "s00");
        assert_eq!(vm.selected_index, Some(11));
    }

    #[test]
    fn long_list_window_stops_at_the_last_row() {
        let names: Vec<String> = (0..50).map(|i| format!("s{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.selected = Some("s49".into());

        let vm = state.compute_viewmodel(20, 80);
        assert_eq!(vm.display_items.len(), 5);
        assert_eq!(vm.display_items[0].cells[0], "s45");
        assert_eq!(vm.selected_index, Some(4));
    }

    #[test]
    fn busy_operation_overrides_status() {
        let mut state = state_with(&["a"]);
        state.guard.begin(Operation::Delete);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.text, "Deleting…");
        assert!(vm.status.busy);
    }

    #[test]
    fn form_overlay_masks_value_until_revealed() {
        let mut state = state_with(&[]);
        let mut form = SecretForm::new_secret();
        form.value = SecretValue::new("hunter2");
        state.input_mode = InputMode::Form(form.clone());

        let masked = format!("{:?}", state.compute_viewmodel(24, 80).overlay);
        assert!(!masked.contains("hunter2"));

        form.reveal = true;
        state.input_mode = InputMode::Form(form);
        let Some(Overlay::Form(view)) = state.compute_viewmodel(24, 80).overlay else {
            panic!("expected form overlay");
        };
        assert_eq!(view.fields[1].value, "hunter2");
    }

    #[test]
    fn confirm_overlay_carries_the_question() {
        let mut state = state_with(&["a"]);
        state.input_mode = InputMode::Confirm(ConfirmAction::Delete { name: "a".into() });
        assert_eq!(
            state.compute_viewmodel(24, 80).overlay,
            Some(Overlay::Confirm {
                question: "Are you sure you want to delete secret 'a'?".into()
            })
        );
    }
}
