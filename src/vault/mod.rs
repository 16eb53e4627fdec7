//! Vault access layer.
//!
//! Everything that talks to a secrets vault or reads files destined for one.
//! Only the worker thread calls into this module.
//!
//! # Modules
//!
//! - [`client`]: The [`VaultClient`] trait and metadata update type
//! - [`json`]: JSON file backend, one file per vault
//! - [`location`]: Geo/environment selection and vault naming
//! - [`ops`]: Multi-call operations (save, rename, toggle, copy)
//! - [`files`]: Certificate and configuration file loading

pub mod client;
pub mod files;
pub mod json;
pub mod location;
pub mod ops;

pub use client::{SecretUpdate, VaultClient};
pub use files::{load_secret_file, FileKind, MAX_SECRET_VALUE_LENGTH};
pub use json::JsonVault;
pub use location::{Geo, VaultLocation};
pub use ops::{fetch_value, save_secret, toggle_secret, SaveOutcome};
