//! Loading certificate and configuration files into secret drafts.
//!
//! The size limit is checked against file metadata before anything is read, so
//! an oversized file never reaches memory or the vault.

use crate::domain::error::{ExplorerError, Result};
use crate::domain::{ContentType, Secret};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Largest file accepted as a secret value, in bytes.
pub const MAX_SECRET_VALUE_LENGTH: u64 = 25 * 1024;

const PEM_MARKER: &str = "-----BEGIN";

/// What a file is being loaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    /// A certificate, PEM text or binary DER/PKCS#12.
    Certificate,
    /// Any text configuration file.
    Config,
}

/// Reads a file into an unsaved secret named after the file.
///
/// Certificates are kept as text when they are PEM and base64-encoded
/// otherwise. Configuration files must be UTF-8 text; their content type is
/// guessed from the extension.
///
/// # Errors
///
/// Returns [`ExplorerError::FileTooLarge`] when the file is larger than
/// [`MAX_SECRET_VALUE_LENGTH`], or an I/O error when it cannot be read.
pub fn load_secret_file(path: &Path, kind: FileKind) -> Result<Secret> {
    let _span = tracing::debug_span!("load_secret_file", path = ?path, kind = ?kind).entered();

    let size = fs::metadata(path)?.len();
    if size > MAX_SECRET_VALUE_LENGTH {
        tracing::debug!(size, max = MAX_SECRET_VALUE_LENGTH, "file rejected");
        return Err(ExplorerError::FileTooLarge {
            path: path.display().to_string(),
            size,
            max: MAX_SECRET_VALUE_LENGTH,
        });
    }

    let bytes = fs::read(path)?;
    let (value, content_type) = match kind {
        FileKind::Certificate => certificate_value(bytes),
        FileKind::Config => {
            let text = String::from_utf8(bytes).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidData, "file is not valid UTF-8 text")
            })?;
            let content_type = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(ContentType::Text, ContentType::from_extension);
            (text, content_type)
        }
    };

    let mut secret = Secret::new(secret_name_for(path), value);
    secret.content_type = Some(content_type);
    tracing::debug!(size, content_type = %content_type, "file loaded");
    Ok(secret)
}

fn certificate_value(bytes: Vec<u8>) -> (String, ContentType) {
    match String::from_utf8(bytes) {
        Ok(text) if text.trim_start().starts_with(PEM_MARKER) => (text, ContentType::Pem),
        Ok(text) => (STANDARD.encode(text.as_bytes()), ContentType::Certificate),
        Err(e) => (STANDARD.encode(e.as_bytes()), ContentType::Certificate),
    }
}

/// Derives a vault-safe secret name from a file stem.
///
/// Characters other than ASCII letters, digits and `-` become `-`.
///
/// ```
/// use vault_explorer::vault::files::secret_name_for;
/// use std::path::Path;
///
/// assert_eq!(secret_name_for(Path::new("/certs/api.client_cert.pem")), "api-client-cert");
/// ```
#[must_use]
pub fn secret_name_for(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    name.trim_matches('-').to_string()
}
