//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the library and the Zellij plugin system:
//! it maps keys to library events, forwards worker replies, and executes the
//! actions the event handler returns.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │ JSON         │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   VaultWorker    │   │  ← Vault calls, file loads
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`k`/`Down`/`Up`, `Ctrl+n`/`Ctrl+p`: Move selection
//! - `r`/`Ctrl+r`: Refresh; `g`/`e`: Cycle geo/environment
//! - `a`/`Insert`: Add secret; `C`: Add certificate; `F`: Add from file
//! - `Enter`/`Ctrl+e`: Edit; `t`: Enable/disable; `d`/`Delete`: Delete
//! - `c`/`Ctrl+c`: Copy value to the clipboard
//! - `/`: Search; `Ctrl+u`: Clear search; `1`-`4`: Sort by column
//! - `?`: Help; `q`: Close plugin
//!
//! Search mode: type to filter, `Esc`/`Enter` to leave, `Ctrl+u` to clear.
//!
//! Form: `Tab`/`Down` next field, `Shift+Tab`/`Up` previous, `Left`/`Right`
//! change choice, `Ctrl+v` show value, `Enter` save, `Esc` cancel.
//!
//! Confirmations: `y`/`Enter` yes, `n`/`Esc` no.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use vault_explorer::app::search::SEARCH_DEBOUNCE_SECONDS;
use vault_explorer::domain::SecretValue;
use vault_explorer::worker::{VaultWorker, WorkerMessage, WorkerResponse};
use vault_explorer::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(VaultWorker, vault_worker, VAULT_WORKER);

/// Plugin state wrapper.
struct State {
    app: vault_explorer::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Value waiting to be written to the clipboard on the next render.
    pending_clipboard: Option<SecretValue>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: vault_explorer::initialize(&Config::default()),
            worker_name: "vault".to_string(),
            pending_clipboard: None,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        vault_explorer::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(
            environments = ?config.environments,
            geos = config.geos.len(),
            data_dir = %config.data_dir,
            "parsed configuration"
        );
        self.app = vault_explorer::initialize(&config);

        request_permission(&[PermissionType::RunCommands, PermissionType::FullHdAccess]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard =
            tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name)
                .entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::SearchTimer,
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code != Some(0) {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        "opener command failed"
                    );
                }
                return false;
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match permissions {
                    PermissionStatus::Granted => tracing::debug!("permissions granted"),
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - vault files and help are unavailable");
                    }
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                let mut render = should_render;
                for action in actions {
                    render |= self.execute_action(action);
                }
                render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        vault_explorer::ui::render(&self.app, rows, cols);
        if let Some(value) = self.pending_clipboard.take() {
            print!("{}", vault_explorer::ui::helpers::clipboard_sequence(&value));
        }
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(_) => "Key".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        let shift = key.has_modifiers(&[KeyModifier::Shift]);
        // Outside normal mode keys are typed text: names, values, paths.
        if self.app.input_mode == InputMode::Normal {
            tracing::debug!(bare_key = ?key.bare_key, ctrl, "key event");
        }

        match &self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key.bare_key, ctrl),
            InputMode::Search => Some(match key.bare_key {
                BareKey::Char('u') if ctrl => Event::ClearSearch,
                BareKey::Esc | BareKey::Enter => Event::ExitSearch,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Form(_) => Some(match key.bare_key {
                BareKey::Char('v') if ctrl => Event::RevealValue,
                BareKey::Tab if shift => Event::FormPrevious,
                BareKey::Tab | BareKey::Down => Event::FormNext,
                BareKey::Up => Event::FormPrevious,
                BareKey::Left => Event::FormLeft,
                BareKey::Right => Event::FormRight,
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Cancel,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Prompt(_) => Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Cancel,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Confirm(_) => Some(match key.bare_key {
                BareKey::Char('y' | 'Y') | BareKey::Enter => Event::Confirm,
                BareKey::Char('n' | 'N') | BareKey::Esc => Event::Cancel,
                _ => return None,
            }),
            InputMode::Alert { .. } => Some(match key.bare_key {
                BareKey::Enter | BareKey::Esc => Event::Cancel,
                _ => return None,
            }),
        }
    }

    fn map_normal_key(bare_key: BareKey, ctrl: bool) -> Option<Event> {
        if ctrl {
            return Some(match bare_key {
                BareKey::Char('n') => Event::KeyDown,
                BareKey::Char('p') => Event::KeyUp,
                BareKey::Char('r') => Event::Refresh,
                BareKey::Char('e') => Event::Edit,
                BareKey::Char('c') => Event::Copy,
                BareKey::Char('u') => Event::ClearSearch,
                _ => return None,
            });
        }

        Some(match bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('g') => Event::CycleGeo,
            BareKey::Char('e') => Event::CycleEnvironment,
            BareKey::Char('a') | BareKey::Insert => Event::AddSecret,
            BareKey::Char('C') => Event::AddCertificate,
            BareKey::Char('F') => Event::AddFile,
            BareKey::Enter => Event::Edit,
            BareKey::Char('t') => Event::Toggle,
            BareKey::Char('d') | BareKey::Delete => Event::Delete,
            BareKey::Char('c') => Event::Copy,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char(c @ '1'..='4') => Event::SortBy(c as usize - '1' as usize),
            BareKey::Char('?') => Event::Help,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps worker replies to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(operation = ?response.operation(), "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling. Returns `true` when a
    /// render is needed to complete it.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::CloseFocus => {
                hide_self();
                false
            }
            Action::PostToWorker(message) => {
                self.post_worker_message(&message);
                false
            }
            Action::CopyToClipboard(value) => {
                self.pending_clipboard = Some(value);
                true
            }
            Action::OpenUrl(url) => {
                let opener = self.app.config.opener.clone();
                tracing::debug!(opener = %opener, url = %url, "opening url");
                run_command(&[opener.as_str(), url.as_str()], BTreeMap::new());
                false
            }
            Action::ArmSearchTimer => {
                set_timeout(SEARCH_DEBOUNCE_SECONDS);
                false
            }
        }
    }
}
