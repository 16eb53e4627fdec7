//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes. User input
//! arrives as [`Event`]s already mapped from keys by the plugin shim; worker
//! replies arrive as [`Event::WorkerResponse`]. Every vault-touching action
//! passes through the operation guard before a request is posted, and every
//! reply releases the guard for the operation it names before anything else
//! happens.
//!
//! # Example
//!
//! ```rust
//! use vault_explorer::{handle_event, initialize, Config, Event, InputMode};
//!
//! let mut state = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::SearchMode)?;
//! assert!(!render && actions.is_empty()); // nothing to search before a refresh
//! assert_eq!(state.input_mode, InputMode::Normal);
//! # Ok::<(), vault_explorer::ExplorerError>(())
//! ```

use crate::app::form::SecretForm;
use crate::app::guard::Operation;
use crate::app::modes::{ConfirmAction, InputMode, PathPrompt};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Secret;
use crate::infrastructure::paths::expand_tilde;
use crate::vault::FileKind;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, timers, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down one row (wraps to top).
    KeyDown,
    /// Moves the selection up one row (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Lists the vault chosen by the selectors.
    Refresh,
    CycleGeo,
    CycleEnvironment,

    /// Opens an empty secret form.
    AddSecret,
    /// Prompts for a certificate file to import.
    AddCertificate,
    /// Prompts for a configuration file to import.
    AddFile,
    /// Fetches the selected secret and opens it in the form.
    Edit,
    /// Asks to enable or disable the selected secret.
    Toggle,
    /// Asks to delete the selected secret.
    Delete,
    /// Fetches the selected secret's value for the clipboard.
    Copy,
    /// Opens the help URL.
    Help,

    /// Focuses the search box.
    SearchMode,
    /// Leaves the search box, keeping the query.
    ExitSearch,
    /// Empties the search query and reapplies the filter at once.
    ClearSearch,
    /// Types into the focused text input (search box, form field or path).
    Char(char),
    Backspace,
    /// A search debounce timer fired.
    SearchTimer,
    /// Clicks the header of the column at this zero-based index.
    SortBy(usize),

    FormNext,
    FormPrevious,
    /// Cycles the focused choice field backwards.
    FormLeft,
    /// Cycles the focused choice field forwards.
    FormRight,
    /// Shows or masks the value field.
    RevealValue,

    /// Enter in a modal: save the form, load the file, confirm, or dismiss.
    Submit,
    /// Esc in a modal.
    Cancel,
    /// Answers yes to the pending confirmation.
    Confirm,

    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Variant name for traces. Never includes typed characters or replies.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::CloseFocus => "CloseFocus",
            Self::Refresh => "Refresh",
            Self::CycleGeo => "CycleGeo",
            Self::CycleEnvironment => "CycleEnvironment",
            Self::AddSecret => "AddSecret",
            Self::AddCertificate => "AddCertificate",
            Self::AddFile => "AddFile",
            Self::Edit => "Edit",
            Self::Toggle => "Toggle",
            Self::Delete => "Delete",
            Self::Copy => "Copy",
            Self::Help => "Help",
            Self::SearchMode => "SearchMode",
            Self::ExitSearch => "ExitSearch",
            Self::ClearSearch => "ClearSearch",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::SearchTimer => "SearchTimer",
            Self::SortBy(_) => "SortBy",
            Self::FormNext => "FormNext",
            Self::FormPrevious => "FormPrevious",
            Self::FormLeft => "FormLeft",
            Self::FormRight => "FormRight",
            Self::RevealValue => "RevealValue",
            Self::Submit => "Submit",
            Self::Cancel => "Cancel",
            Self::Confirm => "Confirm",
            Self::WorkerResponse(_) => "WorkerResponse",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to
/// execute.
///
/// The boolean tells the shim whether the pane must be re-rendered.
///
/// # Errors
///
/// Currently infallible; the `Result` is kept so state transitions can grow
/// fallible steps without changing the plugin shim.
///
/// ```rust
/// use vault_explorer::{handle_event, initialize, Action, Config, Event};
///
/// let mut state = initialize(&Config::default());
/// let (_, first) = handle_event(&mut state, &Event::Refresh)?;
/// let (_, second) = handle_event(&mut state, &Event::Refresh)?;
/// assert_eq!(first.len(), 1);
/// assert!(second.is_empty()); // still refreshing
/// # Ok::<(), vault_explorer::ExplorerError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::Refresh => Ok(refresh(state)),
        Event::CycleGeo => {
            state.cycle_geo();
            Ok((true, vec![]))
        }
        Event::CycleEnvironment => {
            state.cycle_environment();
            Ok((true, vec![]))
        }

        Event::AddSecret => {
            if !state.can_add() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Form(SecretForm::new_secret());
            Ok((true, vec![]))
        }
        Event::AddCertificate | Event::AddFile => {
            if !state.can_add() {
                return Ok((false, vec![]));
            }
            let kind = if *event == Event::AddCertificate {
                FileKind::Certificate
            } else {
                FileKind::Config
            };
            state.input_mode = InputMode::Prompt(PathPrompt {
                kind,
                path: String::new(),
            });
            Ok((true, vec![]))
        }
        Event::Edit => {
            let (Some(name), Some(target)) = (state.selected.clone(), state.target()) else {
                return Ok((false, vec![]));
            };
            if !state.can_edit() {
                return Ok((false, vec![]));
            }
            Ok(dispatch(state, WorkerMessage::fetch_for_edit(target, name)))
        }
        Event::Toggle => {
            let Some(row) = state.selected_row().filter(|_| state.can_toggle()) else {
                return Ok((false, vec![]));
            };
            let action = ConfirmAction::Toggle {
                name: row.name().to_string(),
                enable: !row.is_enabled(),
            };
            state.input_mode = InputMode::Confirm(action);
            Ok((true, vec![]))
        }
        Event::Delete => {
            let Some(name) = state.selected.clone().filter(|_| state.can_delete()) else {
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::Confirm(ConfirmAction::Delete { name });
            Ok((true, vec![]))
        }
        Event::Copy => {
            let (Some(name), Some(target)) = (state.selected.clone(), state.target()) else {
                return Ok((false, vec![]));
            };
            if !state.can_copy() {
                return Ok((false, vec![]));
            }
            Ok(dispatch(state, WorkerMessage::copy_secret(target, name)))
        }
        Event::Help => Ok((false, vec![Action::OpenUrl(state.config.help_url.clone())])),

        Event::SearchMode => {
            if state.connected.is_none() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            if state.input_mode == InputMode::Search {
                state.input_mode = InputMode::Normal;
            }
            Ok((true, vec![]))
        }
        Event::ClearSearch => {
            state.search_query.clear();
            state.debounce = crate::app::search::Debounce::default();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok(type_char(state, *c)),
        Event::Backspace => Ok(backspace(state)),
        Event::SearchTimer => {
            if state.debounce.fire() {
                state.apply_search_filter();
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::SortBy(index) => {
            state.sort_by(*index);
            Ok((true, vec![]))
        }

        Event::FormNext | Event::FormPrevious | Event::FormLeft | Event::FormRight | Event::RevealValue => {
            let InputMode::Form(form) = &mut state.input_mode else {
                return Ok((false, vec![]));
            };
            match event {
                Event::FormNext => form.focus_next(),
                Event::FormPrevious => form.focus_previous(),
                Event::FormLeft => form.cycle(false),
                Event::FormRight => form.cycle(true),
                _ => form.reveal = !form.reveal,
            }
            Ok((true, vec![]))
        }

        Event::Submit => Ok(submit(state)),
        Event::Cancel => {
            if state.input_mode == InputMode::Normal {
                return Ok((false, vec![]));
            }
            tracing::debug!("modal dismissed");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Confirm => Ok(confirm(state)),

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

/// Posts `message` if its operation is not already in flight.
fn dispatch(state: &mut AppState, message: WorkerMessage) -> (bool, Vec<Action>) {
    if !state.guard.begin(message.operation()) {
        return (false, vec![]);
    }
    (true, vec![Action::PostToWorker(message)])
}

fn refresh(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(location) = state.location() else {
        tracing::debug!("no vault location selected");
        return (false, vec![]);
    };
    tracing::debug!(vault = %location, "refreshing");
    let switching = state.connected.as_ref() != Some(&location);
    let data_dir = state.config.data_dir.clone();
    let (render, actions) = dispatch(state, WorkerMessage::list_secrets(location, data_dir));
    if switching && !actions.is_empty() {
        tracing::debug!("vault changed, clearing rows");
        state.disconnect();
    }
    (render, actions)
}

fn dispatch_save(
    state: &mut AppState,
    operation: Operation,
    previous: Option<Secret>,
    secret: Secret,
) -> (bool, Vec<Action>) {
    state.input_mode = InputMode::Normal;
    let Some(target) = state.target() else {
        return (true, vec![]);
    };
    let (_, actions) = dispatch(state, WorkerMessage::save_secret(target, operation, previous, secret));
    (true, actions)
}

fn type_char(state: &mut AppState, c: char) -> (bool, Vec<Action>) {
    match &mut state.input_mode {
        InputMode::Search => {
            state.search_query.push(c);
            state.debounce.arm();
            (true, vec![Action::ArmSearchTimer])
        }
        InputMode::Form(form) => {
            form.insert_char(c);
            (true, vec![])
        }
        InputMode::Prompt(prompt) => {
            prompt.path.push(c);
            (true, vec![])
        }
        InputMode::Normal | InputMode::Confirm(_) | InputMode::Alert { .. } => (false, vec![]),
    }
}

fn backspace(state: &mut AppState) -> (bool, Vec<Action>) {
    match &mut state.input_mode {
        InputMode::Search => {
            if state.search_query.pop().is_none() {
                return (false, vec![]);
            }
            state.debounce.arm();
            (true, vec![Action::ArmSearchTimer])
        }
        InputMode::Form(form) => {
            form.backspace();
            (true, vec![])
        }
        InputMode::Prompt(prompt) => {
            prompt.path.pop();
            (true, vec![])
        }
        InputMode::Normal | InputMode::Confirm(_) | InputMode::Alert { .. } => (false, vec![]),
    }
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    if matches!(state.input_mode, InputMode::Confirm(_)) {
        return confirm(state);
    }

    match &mut state.input_mode {
        InputMode::Form(form) => match form.to_secret(&state.config.changed_by) {
            Err(message) => {
                form.error = Some(message);
                (true, vec![])
            }
            Ok(secret) if form.previous.is_none() && state.rows.contains_key(&secret.name) => {
                state.input_mode = InputMode::Confirm(ConfirmAction::Replace { secret });
                (true, vec![])
            }
            Ok(secret) => {
                let operation = form.operation;
                let previous = form.previous.take();
                dispatch_save(state, operation, previous, secret)
            }
        },
        InputMode::Prompt(prompt) => {
            if prompt.path.trim().is_empty() {
                return (false, vec![]);
            }
            let path = expand_tilde(&prompt.path);
            let kind = prompt.kind;
            state.input_mode = InputMode::Normal;
            let (_, actions) = dispatch(state, WorkerMessage::load_file(path, kind));
            (true, actions)
        }
        InputMode::Search | InputMode::Confirm(_) | InputMode::Alert { .. } => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        InputMode::Normal => (false, vec![]),
    }
}

fn confirm(state: &mut AppState) -> (bool, Vec<Action>) {
    let InputMode::Confirm(action) = std::mem::replace(&mut state.input_mode, InputMode::Normal) else {
        return (false, vec![]);
    };
    tracing::debug!(action = ?action, "confirmed");

    let message = match action {
        ConfirmAction::Replace { secret } => return dispatch_save(state, Operation::Add, None, secret),
        ConfirmAction::Toggle { name, .. } => {
            let (Some(target), Some(row)) = (state.target(), state.rows.get(&name)) else {
                return (true, vec![]);
            };
            WorkerMessage::toggle_secret(target, row.secret.clone(), state.config.changed_by.clone())
        }
        ConfirmAction::Delete { name } => {
            let Some(target) = state.target() else {
                return (true, vec![]);
            };
            WorkerMessage::delete_secret(target, name)
        }
    };
    let (_, actions) = dispatch(state, message);
    (true, actions)
}

/// Opens `form` unless another modal took the keyboard meanwhile.
fn open_form(state: &mut AppState, form: SecretForm) {
    if state.input_mode.is_modal() {
        tracing::debug!("modal already open, dropping form");
        return;
    }
    state.input_mode = InputMode::Form(form);
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    state.guard.finish(response.operation());

    match response {
        WorkerResponse::SecretsListed { location, secrets } => {
            state.replace_all(location.clone(), secrets);
            (true, vec![])
        }
        WorkerResponse::SecretFetchedForEdit { secret } => {
            open_form(state, SecretForm::edit(secret.clone()));
            (true, vec![])
        }
        WorkerResponse::FileLoaded { secret } => {
            open_form(state, SecretForm::from_file(secret.clone()));
            (true, vec![])
        }
        WorkerResponse::SecretSaved { secret, removed, .. } => {
            if let Some(old) = removed {
                state.remove_row(old);
            }
            state.upsert_row(secret);
            (true, vec![])
        }
        WorkerResponse::SecretToggled { secret } => {
            state.upsert_row(secret);
            (true, vec![])
        }
        WorkerResponse::SecretDeleted { name } => {
            state.remove_row(name);
            (true, vec![])
        }
        WorkerResponse::SecretValueFetched { name, value } => {
            state.status = format!("Copied '{name}' to clipboard");
            (true, vec![Action::CopyToClipboard(value.clone())])
        }
        WorkerResponse::Failed { operation, message } => {
            state.input_mode = InputMode::Alert {
                title: format!(" {operation:?} failed "),
                message: message.clone(),
            };
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SecretValue;
    use crate::ui::Theme;
    use crate::vault::{Geo, VaultLocation};
    use crate::Config;

    fn connected(secrets: &[Secret]) -> AppState {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let location = VaultLocation::new(&Geo::parse("us:westus").unwrap(), "dev");
        state.replace_all(location, secrets);
        state
    }

    fn posted(actions: &[Action]) -> &WorkerMessage {
        match actions {
            [Action::PostToWorker(message)] => message,
            other => panic!("expected one worker message, got {other:?}"),
        }
    }

    fn run(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    #[test]
    fn refresh_is_guarded_until_the_reply() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let actions = run(&mut state, Event::Refresh);
        assert!(matches!(posted(&actions), WorkerMessage::ListSecrets { .. }));
        assert!(run(&mut state, Event::Refresh).is_empty());

        let location = state.location().unwrap();
        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SecretsListed {
                location,
                secrets: vec![Secret::new("a", "")],
            }),
        );
        assert!(!state.guard.is_busy(Operation::Refresh));
        assert_eq!(state.status, "1 secret(s)");
        assert_eq!(run(&mut state, Event::Refresh).len(), 1);
    }

    #[test]
    fn add_is_disabled_until_connected() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        run(&mut state, Event::AddSecret);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn invalid_name_keeps_the_form_open() {
        let mut state = connected(&[]);
        run(&mut state, Event::AddSecret);
        run(&mut state, Event::Char('_'));
        let actions = run(&mut state, Event::Submit);

        assert!(actions.is_empty());
        let InputMode::Form(form) = &state.input_mode else {
            panic!("form closed");
        };
        assert!(form.error.is_some());
    }

    #[test]
    fn adding_an_existing_name_asks_before_replacing() {
        let mut state = connected(&[Secret::new("api", "")]);
        run(&mut state, Event::AddSecret);
        for c in "api".chars() {
            run(&mut state, Event::Char(c));
        }
        assert!(run(&mut state, Event::Submit).is_empty());
        assert!(matches!(state.input_mode, InputMode::Confirm(ConfirmAction::Replace { .. })));

        let actions = run(&mut state, Event::Confirm);
        match posted(&actions) {
            WorkerMessage::SaveSecret { operation, previous, secret, .. } => {
                assert_eq!(*operation, Operation::Add);
                assert!(previous.is_none());
                assert_eq!(secret.changed_by(), Some("unknown"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn edit_fetches_then_saves_against_the_fetched_record() {
        let mut state = connected(&[Secret::new("api", "")]);
        state.selected = Some("api".into());

        let actions = run(&mut state, Event::Edit);
        assert!(matches!(posted(&actions), WorkerMessage::FetchForEdit { name, .. } if name == "api"));

        let fetched = Secret::new("api", "v1");
        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SecretFetchedForEdit { secret: fetched.clone() }),
        );
        assert!(!state.guard.is_busy(Operation::Edit));

        let actions = run(&mut state, Event::Submit);
        match posted(&actions) {
            WorkerMessage::SaveSecret { operation, previous, .. } => {
                assert_eq!(*operation, Operation::Edit);
                assert_eq!(previous.as_ref(), Some(&fetched));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn toggle_confirms_then_sends_the_listed_record() {
        let mut state = connected(&[Secret::new("api", "")]);
        state.selected = Some("api".into());

        assert!(run(&mut state, Event::Toggle).is_empty());
        assert_eq!(
            state.input_mode,
            InputMode::Confirm(ConfirmAction::Toggle { name: "api".into(), enable: false })
        );

        let actions = run(&mut state, Event::Confirm);
        match posted(&actions) {
            WorkerMessage::ToggleSecret { secret, actor, .. } => {
                assert_eq!(secret.name, "api");
                assert_eq!(actor, "unknown");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cancelled_delete_posts_nothing() {
        let mut state = connected(&[Secret::new("api", "")]);
        state.selected = Some("api".into());
        run(&mut state, Event::Delete);
        assert!(run(&mut state, Event::Cancel).is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.rows.contains_key("api"));
    }

    #[test]
    fn copy_goes_to_the_worker_and_back_to_the_clipboard() {
        let mut state = connected(&[Secret::new("api", "")]);
        state.selected = Some("api".into());

        let actions = run(&mut state, Event::Copy);
        assert!(matches!(posted(&actions), WorkerMessage::CopySecret { name, .. } if name == "api"));

        let actions = run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SecretValueFetched {
                name: "api".into(),
                value: SecretValue::new("v1"),
            }),
        );
        assert_eq!(actions, vec![Action::CopyToClipboard(SecretValue::new("v1"))]);
        assert_eq!(state.status, "Copied 'api' to clipboard");
        assert!(!state.status.contains("v1"));
    }

    #[test]
    fn failure_releases_guard_and_alerts() {
        let mut state = connected(&[Secret::new("api", "")]);
        state.selected = Some("api".into());
        run(&mut state, Event::Copy);

        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Failed {
                operation: Operation::Copy,
                message: "secret not found: api".into(),
            }),
        );
        assert!(!state.guard.is_busy(Operation::Copy));
        assert!(matches!(&state.input_mode, InputMode::Alert { message, .. } if message.contains("api")));

        run(&mut state, Event::Submit);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn rename_reply_removes_the_old_row() {
        let mut state = connected(&[Secret::new("old", "")]);
        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SecretSaved {
                operation: Operation::Edit,
                secret: Secret::new("new", ""),
                removed: Some("old".into()),
            }),
        );
        assert_eq!(state.order, vec!["new"]);
        assert_eq!(state.selected.as_deref(), Some("new"));
    }

    #[test]
    fn failed_rename_keeps_the_old_row() {
        let mut state = connected(&[Secret::new("old", "")]);
        state.selected = Some("old".into());
        run(&mut state, Event::Edit);
        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SecretFetchedForEdit {
                secret: Secret::new("old", "v1"),
            }),
        );

        run(&mut state, Event::FormPrevious);
        for _ in 0.."old".len() {
            run(&mut state, Event::Backspace);
        }
        for c in "new".chars() {
            run(&mut state, Event::Char(c));
        }
        let actions = run(&mut state, Event::Submit);
        assert!(matches!(posted(&actions), WorkerMessage::SaveSecret { secret, .. } if secret.name == "new"));
        assert!(state.guard.is_busy(Operation::Edit));

        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Failed {
                operation: Operation::Edit,
                message: "vault unavailable".into(),
            }),
        );

        assert_eq!(state.order, vec!["old"]);
        assert!(!state.rows.contains_key("new"));
        assert!(!state.guard.is_busy(Operation::Edit));
        match &state.input_mode {
            InputMode::Alert { title, message } => {
                assert_eq!(title, " Edit failed ");
                assert_eq!(message, "vault unavailable");
            }
            other => panic!("expected an alert, got {other:?}"),
        }
    }

    #[test]
    fn switching_vaults_clears_rows_until_the_new_listing() {
        let mut state = connected(&[Secret::new("api", "")]);
        state.selected = Some("api".into());

        run(&mut state, Event::CycleEnvironment);
        let actions = run(&mut state, Event::Refresh);
        let WorkerMessage::ListSecrets { location, .. } = posted(&actions).clone() else {
            panic!("expected a listing");
        };
        assert_eq!(location.vault_name(), "us-int");
        assert!(state.rows.is_empty());
        assert_eq!(state.selected, None);
        assert_eq!(state.target(), None);

        run(&mut state, Event::Delete);
        assert_eq!(state.input_mode, InputMode::Normal);

        run(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SecretsListed {
                location: location.clone(),
                secrets: vec![Secret::new("api", "")],
            }),
        );
        state.selected = Some("api".into());
        run(&mut state, Event::Delete);
        let actions = run(&mut state, Event::Confirm);
        match posted(&actions) {
            WorkerMessage::DeleteSecret { target, name, .. } => {
                assert_eq!(target.location, location);
                assert_eq!(target.data_dir, state.config.data_dir);
                assert_eq!(name, "api");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn refreshing_the_same_vault_keeps_its_rows() {
        let mut state = connected(&[Secret::new("api", "")]);
        run(&mut state, Event::Refresh);
        assert_eq!(state.order, vec!["api"]);
        assert!(state.target().is_some());
    }

    #[test]
    fn only_the_last_search_timer_filters() {
        let mut state = connected(&[Secret::new("alpha", ""), Secret::new("beta", "")]);
        run(&mut state, Event::SearchMode);
        assert_eq!(run(&mut state, Event::Char('b')), vec![Action::ArmSearchTimer]);
        run(&mut state, Event::Char('e'));

        let (render, _) = handle_event(&mut state, &Event::SearchTimer).unwrap();
        assert!(!render);
        assert!(!state.rows["alpha"].strikeout);

        let (render, _) = handle_event(&mut state, &Event::SearchTimer).unwrap();
        assert!(render);
        assert!(state.rows["alpha"].strikeout);
        assert_eq!(state.selected.as_deref(), Some("beta"));
    }

    #[test]
    fn leaving_search_keeps_query_and_ctrl_u_clears_it() {
        let mut state = connected(&[Secret::new("alpha", "")]);
        run(&mut state, Event::SearchMode);
        run(&mut state, Event::Char('z'));
        run(&mut state, Event::SearchTimer);
        run(&mut state, Event::ExitSearch);

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.search_query, "z");

        run(&mut state, Event::ClearSearch);
        assert!(state.search_query.is_empty());
        assert!(!state.rows["alpha"].strikeout);
    }

    #[test]
    fn prompt_expands_tilde_and_loads_under_add() {
        let mut state = connected(&[]);
        run(&mut state, Event::AddCertificate);
        for c in "~/api.pem".chars() {
            run(&mut state, Event::Char(c));
        }
        let actions = run(&mut state, Event::Submit);
        match posted(&actions) {
            WorkerMessage::LoadFile { path, kind, .. } => {
                assert_eq!(path, "/host/api.pem");
                assert_eq!(*kind, FileKind::Certificate);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(state.guard.is_busy(Operation::Add));
    }

    #[test]
    fn traced_event_kind_hides_typed_text() {
        let typed = Event::Char('h');
        assert_eq!(typed.kind(), "Char");
        assert!(!typed.kind().contains('h'));

        let reply = Event::WorkerResponse(WorkerResponse::SecretValueFetched {
            name: "api".into(),
            value: SecretValue::new("v1"),
        });
        assert_eq!(reply.kind(), "WorkerResponse");
    }

    #[test]
    fn help_opens_the_configured_url() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let actions = run(&mut state, Event::Help);
        assert_eq!(actions, vec![Action::OpenUrl(Config::default().help_url)]);
    }
}
