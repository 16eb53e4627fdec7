//! Path handling for the Zellij plugin sandbox.
//!
//! The host filesystem is visible under `/host`, which Zellij maps to the
//! directory it was started from (usually the user's home).

use std::path::{Path, PathBuf};

/// Default root for vault files and traces:
/// `/host/.local/share/zellij/vault-explorer`.
///
/// ```
/// use vault_explorer::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/vault-explorer")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("vault-explorer")
}

/// File backing the vault named `vault_name` under `data_dir`.
///
/// ```
/// use vault_explorer::infrastructure::vault_file;
/// use std::path::Path;
///
/// assert_eq!(
///     vault_file(Path::new("/data"), "eu-prod"),
///     Path::new("/data/vaults/eu-prod.json")
/// );
/// ```
#[must_use]
pub fn vault_file(data_dir: &Path, vault_name: &str) -> PathBuf {
    data_dir.join("vaults").join(format!("{vault_name}.json"))
}

/// Maps `~` to the sandbox's `/host` mount.
///
/// Relative paths are resolved against `/host` as well, since that is the
/// plugin's view of the user's starting directory.
///
/// ```
/// use vault_explorer::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/certs/api.pem"), "/host/certs/api.pem");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("certs/api.pem"), "/host/certs/api.pem");
/// assert_eq!(expand_tilde("/tmp/api.pem"), "/tmp/api.pem");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let path = path.trim();
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/host/{path}")
    }
}

/// Removes the `/host` mount prefix for display.
///
/// ```
/// use vault_explorer::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/certs/api.pem"), "~/certs/api.pem");
/// assert_eq!(strip_host_prefix("/tmp/api.pem"), "/tmp/api.pem");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix("/host") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}
