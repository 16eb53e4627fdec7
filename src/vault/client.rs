//! Vault client abstraction.
//!
//! This module defines the [`VaultClient`] trait, the seam between the explorer and
//! the key-management backend. The explorer never interprets backend failures; it
//! only propagates them.
//!
//! # Design Philosophy
//!
//! The trait mirrors the handful of calls the explorer actually makes, not a
//! general vault SDK. Metadata-only updates take a [`SecretUpdate`], which has no
//! value field, so an update can never overwrite a value.

use crate::domain::error::Result;
use crate::domain::{ContentType, Secret, SecretAttributes, Tags};

/// Metadata-only update of an existing secret.
///
/// `content_type: None` and `attributes.enabled: None` leave the stored values
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretUpdate {
    /// Name of the secret to update.
    pub name: String,
    /// Replacement tag set.
    pub tags: Tags,
    /// New content type, or `None` to keep the current one.
    pub content_type: Option<ContentType>,
    /// Attribute changes; only `enabled` is honored.
    pub attributes: SecretAttributes,
}

/// Abstraction over a secrets vault backend.
///
/// # Implementations
///
/// - [`JsonVault`](crate::vault::JsonVault): JSON file per vault with atomic writes
///
/// # Examples
///
/// ```no_run
/// use vault_explorer::vault::{JsonVault, VaultClient};
/// use std::path::PathBuf;
///
/// let vault = JsonVault::open(PathBuf::from("/tmp/us-dev.json"))?;
/// for secret in vault.list_secrets()? {
///     println!("{}", secret.name);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait VaultClient: Send {
    /// Display name of the vault this client talks to.
    fn vault_name(&self) -> &str;

    /// Lists every secret in the vault.
    ///
    /// Listings return metadata only: the `value` of each record is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn list_secrets(&self) -> Result<Vec<Secret>>;

    /// Retrieves a secret, including its value.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::NotFound`](crate::ExplorerError::NotFound) if no
    /// secret has that name, or an error if the backend call fails.
    fn get_secret(&self, name: &str) -> Result<Secret>;

    /// Writes a secret: name, value, tags, content type and attributes.
    ///
    /// Creates the secret or replaces the value of an existing one. Returns the
    /// record as stored by the vault.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn set_secret(&mut self, secret: &Secret) -> Result<Secret>;

    /// Updates tags, content type and attributes of an existing secret, keeping
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret does not exist or the backend call fails.
    fn update_secret(&mut self, update: &SecretUpdate) -> Result<Secret>;

    /// Deletes a secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret does not exist or the backend call fails.
    fn delete_secret(&mut self, name: &str) -> Result<()>;
}
