//! Infrastructure helpers for the Zellij sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`; these
//! helpers translate between what the user types or sees and sandbox paths.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, strip_host_prefix, vault_file};
