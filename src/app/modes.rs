//! Input modes of the explorer.
//!
//! The mode decides which key bindings are active and which overlay, if any,
//! is drawn over the table:
//!
//! - **Normal**: table navigation and toolbar commands
//! - **Search**: typing into the search box
//! - **Form**: the add/edit secret form
//! - **Prompt**: a file path prompt for certificate/file import
//! - **Confirm**: a yes/no question guarding a destructive action
//! - **Alert**: an error message waiting to be dismissed

use crate::app::form::SecretForm;
use crate::domain::Secret;
use crate::vault::FileKind;

/// A destructive action waiting for the user's consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Overwrite an existing secret with a newly added one.
    Replace { secret: Secret },
    /// Flip the enabled flag of the named secret.
    Toggle { name: String, enable: bool },
    /// Delete the named secret.
    Delete { name: String },
}

impl ConfirmAction {
    /// Question shown in the confirmation overlay.
    ///
    /// ```
    /// use vault_explorer::app::modes::ConfirmAction;
    ///
    /// let action = ConfirmAction::Toggle { name: "api-key".into(), enable: false };
    /// assert_eq!(action.question(), "Are you sure you want to disable secret 'api-key'?");
    /// ```
    #[must_use]
    pub fn question(&self) -> String {
        match self {
            Self::Replace { secret } => {
                format!("Are you sure you want to replace secret '{}' with new value?", secret.name)
            }
            Self::Toggle { name, enable } => {
                let verb = if *enable { "enable" } else { "disable" };
                format!("Are you sure you want to {verb} secret '{name}'?")
            }
            Self::Delete { name } => format!("Are you sure you want to delete secret '{name}'?"),
        }
    }
}

/// Path being typed for a file import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    pub kind: FileKind,
    pub path: String,
}

impl PathPrompt {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.kind {
            FileKind::Certificate => " Add certificate ",
            FileKind::Config => " Add secret from file ",
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form(SecretForm),
    Prompt(PathPrompt),
    Confirm(ConfirmAction),
    Alert { title: String, message: String },
}

impl InputMode {
    /// Whether a modal overlay owns the keyboard.
    #[must_use]
    pub const fn is_modal(&self) -> bool {
        matches!(
            self,
            Self::Form(_) | Self::Prompt(_) | Self::Confirm(_) | Self::Alert { .. }
        )
    }
}
