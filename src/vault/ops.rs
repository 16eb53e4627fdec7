//! Multi-call vault operations.
//!
//! The explorer's mutating actions are short sequences of vault calls. They are
//! expressed here once, over `&mut dyn VaultClient`, and executed by the worker.
//! A failure at any step is returned as-is; earlier steps are not rolled back.

use crate::domain::error::Result;
use crate::domain::{with_changed_by, Secret, SecretAttributes, SecretValue};
use crate::vault::client::{SecretUpdate, VaultClient};

/// Result of [`save_secret`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The record as confirmed by the vault.
    pub secret: Secret,
    /// Old name deleted by a rename, if any.
    pub removed: Option<String>,
}

/// Writes a new or edited secret.
///
/// A full write (value included) is issued when there is no previous record or
/// when the name or the value changed. Otherwise only tags, content type and the
/// enabled flag are updated and the stored value is preserved.
///
/// When the name changed, the old name is deleted after the new one is written.
/// The two calls are not transactional: if the delete fails, both names remain
/// in the vault and the error is returned.
///
/// # Errors
///
/// Returns the first vault error encountered.
pub fn save_secret(
    client: &mut dyn VaultClient,
    previous: Option<&Secret>,
    secret: &Secret,
) -> Result<SaveOutcome> {
    let _span = tracing::debug_span!(
        "save_secret",
        secret = %secret.name,
        previous = ?previous.map(|p| p.name.as_str())
    )
    .entered();

    let needs_full_write = previous.map_or(true, |old| {
        old.name != secret.name || old.value != secret.value
    });

    let stored = if needs_full_write {
        tracing::debug!("writing secret with value");
        client.set_secret(secret)?
    } else {
        tracing::debug!("value unchanged, updating metadata only");
        client.update_secret(&SecretUpdate {
            name: secret.name.clone(),
            tags: secret.tags.clone(),
            content_type: secret.content_type,
            attributes: SecretAttributes::with_enabled(secret.attributes.enabled),
        })?
    };

    let removed = match previous {
        Some(old) if old.name != secret.name => {
            tracing::debug!(old_name = %old.name, "deleting renamed secret");
            client.delete_secret(&old.name)?;
            Some(old.name.clone())
        }
        _ => None,
    };

    Ok(SaveOutcome {
        secret: stored,
        removed,
    })
}

/// Flips the effective enabled flag of a secret.
///
/// Only the enabled attribute and the `ChangedBy` audit tag are sent; content
/// type and value are left untouched.
///
/// # Errors
///
/// Returns the vault error if the update fails.
pub fn toggle_secret(client: &mut dyn VaultClient, current: &Secret, actor: &str) -> Result<Secret> {
    let enable = !current.is_enabled();
    let _span = tracing::debug_span!("toggle_secret", secret = %current.name, enable).entered();

    client.update_secret(&SecretUpdate {
        name: current.name.clone(),
        tags: with_changed_by(&current.tags, actor),
        content_type: None,
        attributes: SecretAttributes::with_enabled(Some(enable)),
    })
}

/// Fetches the current value of a secret from the vault.
///
/// # Errors
///
/// Returns the vault error if the secret cannot be read.
pub fn fetch_value(client: &dyn VaultClient, name: &str) -> Result<SecretValue> {
    let _span = tracing::debug_span!("fetch_value", secret = %name).entered();
    client.get_secret(name).map(|secret| secret.value)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording in-memory client shared by tests across the crate.

    use super::*;
    use crate::domain::error::ExplorerError;
    use std::cell::Cell;
    use std::collections::BTreeMap;

    /// One observed mutating vault call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Set { name: String, value: String },
        Update(SecretUpdate),
        Delete(String),
    }

    #[derive(Default)]
    pub struct RecordingVault {
        pub secrets: BTreeMap<String, Secret>,
        pub calls: Vec<Call>,
        pub gets: Cell<usize>,
        pub fail_delete: bool,
    }

    impl RecordingVault {
        pub fn with(secrets: impl IntoIterator<Item = Secret>) -> Self {
            Self {
                secrets: secrets.into_iter().map(|s| (s.name.clone(), s)).collect(),
                ..Self::default()
            }
        }
    }

    impl VaultClient for RecordingVault {
        fn vault_name(&self) -> &str {
            "recording"
        }

        fn list_secrets(&self) -> Result<Vec<Secret>> {
            Ok(self.secrets.values().map(Secret::without_value).collect())
        }

        fn get_secret(&self, name: &str) -> Result<Secret> {
            self.gets.set(self.gets.get() + 1);
            self.secrets
                .get(name)
                .cloned()
                .ok_or_else(|| ExplorerError::NotFound(name.to_string()))
        }

        fn set_secret(&mut self, secret: &Secret) -> Result<Secret> {
            self.calls.push(Call::Set {
                name: secret.name.clone(),
                value: secret.value.expose().to_string(),
            });
            self.secrets.insert(secret.name.clone(), secret.clone());
            Ok(secret.clone())
        }

        fn update_secret(&mut self, update: &SecretUpdate) -> Result<Secret> {
            self.calls.push(Call::Update(update.clone()));
            let stored = self
                .secrets
                .get_mut(&update.name)
                .ok_or_else(|| ExplorerError::NotFound(update.name.clone()))?;
            stored.tags.clone_from(&update.tags);
            if update.content_type.is_some() {
                stored.content_type = update.content_type;
            }
            if update.attributes.enabled.is_some() {
                stored.attributes.enabled = update.attributes.enabled;
            }
            Ok(stored.clone())
        }

        fn delete_secret(&mut self, name: &str) -> Result<()> {
            self.calls.push(Call::Delete(name.to_string()));
            if self.fail_delete {
                return Err(ExplorerError::Vault("delete refused".into()));
            }
            self.secrets
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| ExplorerError::NotFound(name.to_string()))
        }
    }
}
