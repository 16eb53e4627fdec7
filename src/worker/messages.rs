//! Plugin/worker message protocol.
//!
//! Requests ([`WorkerMessage`]) and replies ([`WorkerResponse`]) cross the thread
//! boundary as JSON. Every request carries the trace context of the span that
//! sent it, and every reply names the [`Operation`] it completes so the plugin
//! can release its guard on success and failure alike.

use crate::app::guard::Operation;
use crate::domain::{Secret, SecretValue};
use crate::vault::{FileKind, VaultLocation};
use serde::{Deserialize, Serialize};

/// Trace and parent span IDs of the sending span, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    pub trace_id: String,
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current span.
    ///
    /// Returns `None` when no valid span is active, for example when tracing
    /// was never initialized.
    ///
    /// ```
    /// use vault_explorer::worker::TraceContext;
    ///
    /// // No subscriber installed: nothing to propagate.
    /// assert!(TraceContext::from_current().is_none());
    /// ```
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// The vault a row-level request applies to.
///
/// Rows carry the location they were listed from, so a request always lands in
/// that vault even if the worker has since been pointed at another one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultTarget {
    pub location: VaultLocation,
    /// Root directory holding the vault files.
    pub data_dir: String,
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` request with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    list_secrets(ListSecrets { location: VaultLocation, data_dir: String }),
    fetch_for_edit(FetchForEdit { target: VaultTarget, name: String }),
    save_secret(SaveSecret {
        target: VaultTarget,
        operation: Operation,
        previous: Option<Secret>,
        secret: Secret,
    }),
    toggle_secret(ToggleSecret { target: VaultTarget, secret: Secret, actor: String }),
    delete_secret(DeleteSecret { target: VaultTarget, name: String }),
    copy_secret(CopySecret { target: VaultTarget, name: String }),
    load_file(LoadFile { path: String, kind: FileKind }),
}

/// Requests from the plugin to the vault worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Connect to the vault at `location` (if not already) and list it.
    ListSecrets {
        location: VaultLocation,
        /// Root directory holding the vault files.
        data_dir: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch a secret with its value to prefill the edit form.
    FetchForEdit {
        target: VaultTarget,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Add or update a secret; see [`crate::vault::save_secret`].
    SaveSecret {
        target: VaultTarget,
        /// [`Operation::Add`] or [`Operation::Edit`].
        operation: Operation,
        previous: Option<Secret>,
        secret: Secret,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Flip the enabled flag of a listed secret.
    ToggleSecret {
        target: VaultTarget,
        secret: Secret,
        /// Written to the `ChangedBy` tag.
        actor: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    DeleteSecret {
        target: VaultTarget,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the current value for the clipboard.
    CopySecret {
        target: VaultTarget,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read a certificate or configuration file into a draft secret.
    LoadFile {
        path: String,
        kind: FileKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The guarded operation this request belongs to.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::ListSecrets { .. } => Operation::Refresh,
            Self::FetchForEdit { .. } => Operation::Edit,
            Self::SaveSecret { operation, .. } => *operation,
            Self::ToggleSecret { .. } => Operation::Toggle,
            Self::DeleteSecret { .. } => Operation::Delete,
            Self::CopySecret { .. } => Operation::Copy,
            Self::LoadFile { .. } => Operation::Add,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ListSecrets { trace_context, .. }
            | Self::FetchForEdit { trace_context, .. }
            | Self::SaveSecret { trace_context, .. }
            | Self::ToggleSecret { trace_context, .. }
            | Self::DeleteSecret { trace_context, .. }
            | Self::CopySecret { trace_context, .. }
            | Self::LoadFile { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Replies from the vault worker.
///
/// Secrets in replies carry no value, except the draft in [`FileLoaded`] and
/// the fetched record in [`SecretFetchedForEdit`], which feed the form, and
/// [`SecretValueFetched`], which feeds the clipboard.
///
/// [`FileLoaded`]: WorkerResponse::FileLoaded
/// [`SecretFetchedForEdit`]: WorkerResponse::SecretFetchedForEdit
/// [`SecretValueFetched`]: WorkerResponse::SecretValueFetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    SecretsListed {
        location: VaultLocation,
        secrets: Vec<Secret>,
    },
    SecretFetchedForEdit {
        secret: Secret,
    },
    SecretSaved {
        operation: Operation,
        secret: Secret,
        /// Old name deleted by a rename.
        removed: Option<String>,
    },
    SecretToggled {
        secret: Secret,
    },
    SecretDeleted {
        name: String,
    },
    SecretValueFetched {
        name: String,
        value: SecretValue,
    },
    FileLoaded {
        secret: Secret,
    },
    /// The request for `operation` failed; nothing was changed locally.
    Failed {
        operation: Operation,
        message: String,
    },
}

impl WorkerResponse {
    /// The guarded operation this reply completes.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::SecretsListed { .. } => Operation::Refresh,
            Self::SecretFetchedForEdit { .. } => Operation::Edit,
            Self::SecretSaved { operation, .. } | Self::Failed { operation, .. } => *operation,
            Self::SecretToggled { .. } => Operation::Toggle,
            Self::SecretDeleted { .. } => Operation::Delete,
            Self::SecretValueFetched { .. } => Operation::Copy,
            Self::FileLoaded { .. } => Operation::Add,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Geo;

    fn target() -> VaultTarget {
        VaultTarget {
            location: VaultLocation::new(&Geo::parse("eu:northeurope").unwrap(), "prod"),
            data_dir: "/data".into(),
        }
    }

    #[test]
    fn messages_survive_the_json_boundary() {
        let message = WorkerMessage::save_secret(target(), Operation::Edit, None, Secret::new("a", "1"));
        let json = serde_json::to_string(&message).unwrap();
        let back: WorkerMessage = serde_json::from_str(&json).unwrap();

        assert_eq!(back, message);
        assert_eq!(back.operation(), Operation::Edit);
        assert!(!json.contains("trace_context"));
    }

    #[test]
    fn every_reply_names_its_operation() {
        let failed = WorkerResponse::Failed {
            operation: Operation::Delete,
            message: "boom".into(),
        };
        assert_eq!(failed.operation(), Operation::Delete);
        assert_eq!(
            WorkerResponse::FileLoaded { secret: Secret::new("a", "") }.operation(),
            Operation::Add
        );
    }

    #[test]
    fn logging_a_message_does_not_leak_values() {
        let message = WorkerMessage::save_secret(target(), Operation::Add, None, Secret::new("a", "hunter2"));
        assert!(!format!("{message:?}").contains("hunter2"));
    }
}
