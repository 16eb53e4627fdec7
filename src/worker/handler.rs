//! Vault worker running on a Zellij worker thread.
//!
//! The worker owns the vault client and performs every blocking call (vault
//! I/O, file reads) so the plugin thread never waits. Every vault request names
//! its vault; the client is reopened whenever a request targets a different
//! one than the last.

use crate::domain::error::{ExplorerError, Result};
use crate::infrastructure::paths;
use crate::vault::{self, JsonVault, VaultClient, VaultLocation};
use crate::worker::{VaultTarget, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::Path;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker state: the connected vault, if any.
#[derive(Serialize, Deserialize, Default)]
pub struct VaultWorker {
    #[serde(skip)]
    client: Option<Box<dyn VaultClient>>,
    #[serde(skip)]
    location: Option<VaultLocation>,
}

impl VaultWorker {
    fn client_mut(&mut self) -> Result<&mut dyn VaultClient> {
        match self.client.as_mut() {
            Some(client) => Ok(client.as_mut()),
            None => Err(ExplorerError::NotConnected),
        }
    }

    fn connect(&mut self, location: &VaultLocation, data_dir: &str) -> Result<&mut dyn VaultClient> {
        if self.location.as_ref() != Some(location) || self.client.is_none() {
            let file = paths::vault_file(Path::new(data_dir), &location.vault_name());
            tracing::debug!(vault = %location, path = ?file, "connecting to vault");
            self.client = Some(Box::new(JsonVault::open(file)?));
            self.location = Some(location.clone());
        }
        self.client_mut()
    }

    fn open(&mut self, target: &VaultTarget) -> Result<&mut dyn VaultClient> {
        self.connect(&target.location, &target.data_dir)
    }

    fn run(&mut self, message: WorkerMessage) -> Result<WorkerResponse> {
        match message {
            WorkerMessage::ListSecrets { location, data_dir, .. } => {
                let secrets = self.connect(&location, &data_dir)?.list_secrets()?;
                tracing::debug!(count = secrets.len(), "secrets listed");
                Ok(WorkerResponse::SecretsListed { location, secrets })
            }
            WorkerMessage::FetchForEdit { target, name, .. } => {
                let secret = self.open(&target)?.get_secret(&name)?;
                Ok(WorkerResponse::SecretFetchedForEdit { secret })
            }
            WorkerMessage::SaveSecret {
                target,
                operation,
                previous,
                secret,
                ..
            } => {
                let outcome = vault::save_secret(self.open(&target)?, previous.as_ref(), &secret)?;
                Ok(WorkerResponse::SecretSaved {
                    operation,
                    secret: outcome.secret.without_value(),
                    removed: outcome.removed,
                })
            }
            WorkerMessage::ToggleSecret { target, secret, actor, .. } => {
                let toggled = vault::toggle_secret(self.open(&target)?, &secret, &actor)?;
                Ok(WorkerResponse::SecretToggled {
                    secret: toggled.without_value(),
                })
            }
            WorkerMessage::DeleteSecret { target, name, .. } => {
                self.open(&target)?.delete_secret(&name)?;
                Ok(WorkerResponse::SecretDeleted { name })
            }
            WorkerMessage::CopySecret { target, name, .. } => {
                let value = vault::fetch_value(self.open(&target)?, &name)?;
                Ok(WorkerResponse::SecretValueFetched { name, value })
            }
            WorkerMessage::LoadFile { path, kind, .. } => {
                let secret = vault::load_secret_file(Path::new(&path), kind)?;
                Ok(WorkerResponse::FileLoaded { secret })
            }
        }
    }

    /// Re-attaches the sender's trace context so worker spans join its trace.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Executes one request and builds its reply.
    ///
    /// Never fails: errors become [`WorkerResponse::Failed`] carrying the
    /// request's operation.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let operation = message.operation();
        let _span = tracing::debug_span!("worker_handle_message", operation = ?operation).entered();

        match self.run(message) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(operation = ?operation, error = %e, "vault operation failed");
                WorkerResponse::Failed {
                    operation,
                    message: e.to_string(),
                }
            }
        }
    }
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for VaultWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        let request: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(request);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::guard::Operation;
    use crate::domain::{Secret, SecretValue};
    use crate::vault::{FileKind, Geo};

    fn target(dir: &tempfile::TempDir, environment: &str) -> VaultTarget {
        VaultTarget {
            location: VaultLocation::new(&Geo::parse("us:westus").unwrap(), environment),
            data_dir: dir.path().to_string_lossy().to_string(),
        }
    }

    fn connected(dir: &tempfile::TempDir) -> VaultWorker {
        let mut worker = VaultWorker::default();
        let VaultTarget { location, data_dir } = target(dir, "dev");
        let response = worker.handle_message(WorkerMessage::list_secrets(location, data_dir));
        assert!(matches!(response, WorkerResponse::SecretsListed { .. }));
        worker
    }

    fn listed(worker: &mut VaultWorker, target: VaultTarget) -> Vec<String> {
        match worker.handle_message(WorkerMessage::list_secrets(target.location, target.data_dir)) {
            WorkerResponse::SecretsListed { secrets, .. } => {
                secrets.into_iter().map(|secret| secret.name).collect()
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn requests_land_in_their_own_vault_after_another_was_listed() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = VaultWorker::default();
        for environment in ["dev", "int"] {
            let response = worker.handle_message(WorkerMessage::save_secret(
                target(&dir, environment),
                Operation::Add,
                None,
                Secret::new("shared", environment),
            ));
            assert!(matches!(response, WorkerResponse::SecretSaved { .. }));
        }
        assert_eq!(listed(&mut worker, target(&dir, "int")), vec!["shared"]);

        let response = worker.handle_message(WorkerMessage::delete_secret(target(&dir, "dev"), "shared".into()));
        assert_eq!(response, WorkerResponse::SecretDeleted { name: "shared".into() });

        assert!(listed(&mut worker, target(&dir, "dev")).is_empty());
        assert_eq!(listed(&mut worker, target(&dir, "int")), vec!["shared"]);
    }

    #[test]
    fn missing_secret_fails_with_the_request_operation() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = connected(&dir);
        let response = worker.handle_message(WorkerMessage::copy_secret(target(&dir, "dev"), "absent".into()));
        assert!(matches!(response, WorkerResponse::Failed { operation: Operation::Copy, .. }));
    }

    #[test]
    fn list_opens_one_file_per_location() {
        let dir = tempfile::tempdir().unwrap();
        let _worker = connected(&dir);
        assert!(dir.path().join("vaults").is_dir());
    }

    #[test]
    fn saved_secret_comes_back_without_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = connected(&dir);

        let response = worker.handle_message(WorkerMessage::save_secret(
            target(&dir, "dev"),
            Operation::Add,
            None,
            Secret::new("api-key", "v1"),
        ));
        match response {
            WorkerResponse::SecretSaved { operation, secret, removed } => {
                assert_eq!(operation, Operation::Add);
                assert!(secret.value.is_empty());
                assert!(secret.attributes.updated.is_some());
                assert_eq!(removed, None);
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn copy_reads_the_latest_value_from_the_vault() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = connected(&dir);
        let first = Secret::new("api-key", "v1");
        worker.handle_message(WorkerMessage::save_secret(target(&dir, "dev"), Operation::Add, None, first.clone()));

        let mut rotated = first.clone();
        rotated.value = SecretValue::new("v2");
        worker.handle_message(WorkerMessage::save_secret(
            target(&dir, "dev"),
            Operation::Edit,
            Some(first),
            rotated,
        ));

        let response = worker.handle_message(WorkerMessage::copy_secret(target(&dir, "dev"), "api-key".into()));
        assert_eq!(
            response,
            WorkerResponse::SecretValueFetched {
                name: "api-key".into(),
                value: SecretValue::new("v2"),
            }
        );
    }

    #[test]
    fn oversized_file_fails_the_add_operation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.txt");
        let size = usize::try_from(crate::vault::MAX_SECRET_VALUE_LENGTH).unwrap() + 1;
        std::fs::write(&path, vec![b'x'; size]).unwrap();

        let mut worker = VaultWorker::default();
        let response = worker.handle_message(WorkerMessage::load_file(
            path.to_string_lossy().to_string(),
            FileKind::Config,
        ));
        assert!(matches!(response, WorkerResponse::Failed { operation: Operation::Add, .. }));
    }
}
