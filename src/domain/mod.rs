//! Domain layer for the vault explorer.
//!
//! Core types independent of Zellij APIs or the vault backend.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`secret`]: Secret record, content types and attributes
//!
//! # Examples
//!
//! ```
//! use vault_explorer::domain::{Result, Secret};
//!
//! fn draft() -> Result<Secret> {
//!     Ok(Secret::new("db-password", "s3cret"))
//! }
//! # assert!(draft().is_ok());
//! ```

pub mod error;
pub mod secret;

pub use error::{ExplorerError, Result};
pub use secret::{
    format_tags, parse_tags, with_changed_by, ContentType, Secret, SecretAttributes, SecretValue,
    Tags, CHANGED_BY_TAG,
};
