//! JSON file-based vault backend.
//!
//! Stores one vault per file, keyed by secret name. Writes go to a temporary file
//! that is then renamed over the target, so the file is never left half-written.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "secrets": {
//!     "db-password": {
//!       "name": "db-password",
//!       "value": "s3cret",
//!       "content_type": "text/plain",
//!       "tags": { "ChangedBy": "alice" },
//!       "attributes": { "enabled": true, "created": 1700000000, "updated": 1700000000 }
//!     }
//!   }
//! }
//! ```

use crate::domain::error::{ExplorerError, Result};
use crate::domain::Secret;
use crate::vault::client::{SecretUpdate, VaultClient};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VaultData {
    /// Version of the file format for future migrations.
    version: u32,

    /// All secrets, indexed by name.
    #[serde(default)]
    secrets: BTreeMap<String, Secret>,
}

impl Default for VaultData {
    fn default() -> Self {
        Self {
            version: 1,
            secrets: BTreeMap::new(),
        }
    }
}

/// JSON file vault backend.
///
/// The whole vault is kept in memory and persisted after every mutation. Designed
/// to be owned by the single worker thread.
pub struct JsonVault {
    name: String,
    file_path: PathBuf,
    data: VaultData,
    dirty: bool,
}

impl JsonVault {
    /// Opens a vault file, creating an empty vault if it does not exist yet.
    ///
    /// The vault name is the file stem. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file exists but
    /// cannot be read or parsed.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON vault");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("vault file missing, starting empty");
            VaultData::default()
        };

        let name = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("vault")
            .to_string();

        tracing::debug!(vault = %name, secret_count = data.secrets.len(), "vault opened");

        Ok(Self {
            name,
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<VaultData> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| ExplorerError::Vault(format!("failed to parse vault file: {e}")))
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ExplorerError::Vault(format!("failed to serialize vault: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::trace!(path = ?self.file_path, "vault saved");
        Ok(())
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }
}

impl VaultClient for JsonVault {
    fn vault_name(&self) -> &str {
        &self.name
    }

    fn list_secrets(&self) -> Result<Vec<Secret>> {
        let _span = tracing::debug_span!("json_list_secrets", vault = %self.name).entered();

        let secrets: Vec<Secret> = self.data.secrets.values().map(Secret::without_value).collect();
        tracing::debug!(count = secrets.len(), "listed secrets");
        Ok(secrets)
    }

    fn get_secret(&self, name: &str) -> Result<Secret> {
        let _span = tracing::debug_span!("json_get_secret", secret = %name).entered();

        self.data
            .secrets
            .get(name)
            .cloned()
            .ok_or_else(|| ExplorerError::NotFound(name.to_string()))
    }

    fn set_secret(&mut self, secret: &Secret) -> Result<Secret> {
        let _span = tracing::debug_span!("json_set_secret", secret = %secret.name).entered();

        let now = Self::now();
        let created = self
            .data
            .secrets
            .get(&secret.name)
            .and_then(|existing| existing.attributes.created)
            .unwrap_or(now);

        let mut stored = secret.clone();
        stored.attributes.created = Some(created);
        stored.attributes.updated = Some(now);

        self.data.secrets.insert(stored.name.clone(), stored.clone());
        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!(created = created == now, "secret written");
        Ok(stored)
    }

    fn update_secret(&mut self, update: &SecretUpdate) -> Result<Secret> {
        let _span = tracing::debug_span!("json_update_secret", secret = %update.name).entered();

        let stored = self
            .data
            .secrets
            .get_mut(&update.name)
            .ok_or_else(|| ExplorerError::NotFound(update.name.clone()))?;

        stored.tags.clone_from(&update.tags);
        if let Some(content_type) = update.content_type {
            stored.content_type = Some(content_type);
        }
        if let Some(enabled) = update.attributes.enabled {
            stored.attributes.enabled = Some(enabled);
        }
        stored.attributes.updated = Some(Self::now());
        let result = stored.clone();

        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!("secret metadata updated");
        Ok(result)
    }

    fn delete_secret(&mut self, name: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_delete_secret", secret = %name).entered();

        if self.data.secrets.remove(name).is_none() {
            return Err(ExplorerError::NotFound(name.to_string()));
        }

        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!("secret deleted");
        Ok(())
    }
}

impl Drop for JsonVault {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save vault on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentType, SecretAttributes, Tags};

    fn open_temp() -> (tempfile::TempDir, JsonVault) {
        let dir = tempfile::tempdir().unwrap();
        let vault = JsonVault::open(dir.path().join("vaults").join("us-dev.json")).unwrap();
        (dir, vault)
    }

    #[test]
    fn vault_name_is_file_stem() {
        let (_dir, vault) = open_temp();
        assert_eq!(vault.vault_name(), "us-dev");
    }

    #[test]
    fn set_then_get_returns_value_and_timestamps() {
        let (_dir, mut vault) = open_temp();
        let mut secret = Secret::new("db-password", "s3cret");
        secret.content_type = Some(ContentType::Text);

        let stored = vault.set_secret(&secret).unwrap();
        assert!(stored.attributes.created.is_some());
        assert_eq!(stored.attributes.created, stored.attributes.updated);

        let fetched = vault.get_secret("db-password").unwrap();
        assert_eq!(fetched.value.expose(), "s3cret");
        assert_eq!(fetched.content_type, Some(ContentType::Text));
    }

    #[test]
    fn listing_strips_values() {
        let (_dir, mut vault) = open_temp();
        vault.set_secret(&Secret::new("a", "1")).unwrap();
        vault.set_secret(&Secret::new("b", "2")).unwrap();

        let listed = vault.list_secrets().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|s| s.value.is_empty()));
    }

    #[test]
    fn update_keeps_value_and_unspecified_fields() {
        let (_dir, mut vault) = open_temp();
        let mut secret = Secret::new("api-key", "v1");
        secret.content_type = Some(ContentType::Json);
        secret.attributes.enabled = Some(true);
        vault.set_secret(&secret).unwrap();

        let mut tags = Tags::new();
        tags.insert("owner".into(), "team-a".into());
        let updated = vault
            .update_secret(&SecretUpdate {
                name: "api-key".into(),
                tags,
                content_type: None,
                attributes: SecretAttributes::with_enabled(Some(false)),
            })
            .unwrap();

        assert_eq!(updated.value.expose(), "v1");
        assert_eq!(updated.content_type, Some(ContentType::Json));
        assert_eq!(updated.attributes.enabled, Some(false));
        assert_eq!(updated.tags.get("owner").map(String::as_str), Some("team-a"));
    }

    #[test]
    fn missing_secrets_are_not_found() {
        let (_dir, mut vault) = open_temp();
        assert!(matches!(vault.get_secret("nope"), Err(ExplorerError::NotFound(_))));
        assert!(matches!(vault.delete_secret("nope"), Err(ExplorerError::NotFound(_))));
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eu-prod.json");
        {
            let mut vault = JsonVault::open(path.clone()).unwrap();
            vault.set_secret(&Secret::new("kept", "value")).unwrap();
            vault.set_secret(&Secret::new("dropped", "value")).unwrap();
            vault.delete_secret("dropped").unwrap();
        }

        let reopened = JsonVault::open(path).unwrap();
        let names: Vec<String> = reopened.list_secrets().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["kept".to_string()]);
    }
}
