//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never touches the Zellij API. It
//! returns a list of [`Action`]s that the plugin shim executes in order, which
//! keeps the handler testable without a running multiplexer.

use crate::domain::SecretValue;
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a request to the vault worker.
    PostToWorker(WorkerMessage),

    /// Places a value on the system clipboard.
    ///
    /// The value is only ever written to the terminal as a clipboard escape
    /// sequence; it is never rendered or logged.
    CopyToClipboard(SecretValue),

    /// Opens a URL with the configured opener command.
    OpenUrl(String),

    /// Arms one search debounce timer.
    ArmSearchTimer,
}
