//! Error types for the vault explorer.
//!
//! This module defines the centralized error type [`ExplorerError`] and a type alias
//! [`Result`] used throughout the plugin. Vault failures are carried as messages and
//! never interpreted: the explorer only propagates them to the user.

use thiserror::Error;

/// The main error type for vault explorer operations.
///
/// # Examples
///
/// ```
/// use vault_explorer::ExplorerError;
///
/// fn lookup(name: &str) -> Result<(), ExplorerError> {
///     Err(ExplorerError::NotFound(name.to_string()))
/// }
///
/// assert_eq!(lookup("db-password").unwrap_err().to_string(), "Secret not found: db-password");
/// ```
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The vault backend rejected or failed an operation.
    #[error("Vault error: {0}")]
    Vault(String),

    /// No secret with the given name exists in the vault.
    #[error("Secret not found: {0}")]
    NotFound(String),

    /// A vault operation was requested before any vault was selected and refreshed.
    #[error("Not connected to a vault, refresh first")]
    NotConnected,

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file exceeds the maximum secret value length.
    ///
    /// Raised before any vault call is made.
    #[error("File {path} size is {size} bytes. Maximum file size allowed for secret value is {max} bytes")]
    FileTooLarge {
        /// Path of the rejected file.
        path: String,
        /// Actual file size in bytes.
        size: u64,
        /// Maximum accepted size in bytes.
        max: u64,
    },

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for vault explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
