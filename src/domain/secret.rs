//! Secret domain model.
//!
//! This module defines the [`Secret`] record exchanged with the vault backend: a
//! named value with a content type, free-form tags and attributes. The secret name
//! is the identity key used for list membership and replacement; a rename is a
//! delete of the old name plus an insert of the new one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Tag key recording who last changed a secret.
pub const CHANGED_BY_TAG: &str = "ChangedBy";

/// Secret tags, ordered by key for stable display.
pub type Tags = BTreeMap<String, String>;

/// Raw secret value.
///
/// Serializes transparently, but its `Debug` output is redacted so values never
/// end up in traces or log lines when messages carrying them are logged.
///
/// ```
/// use vault_explorer::domain::SecretValue;
///
/// let value = SecretValue::new("hunter2");
/// assert_eq!(format!("{value:?}"), "SecretValue(<redacted>)");
/// assert_eq!(value.expose(), "hunter2");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretValue(String);

impl SecretValue {
    /// Wraps a raw value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Length of the raw value in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the value is empty (listings never carry values).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a typed character.
    pub fn push(&mut self, c: char) {
        self.0.push(c);
    }

    /// Removes the last character, if any.
    pub fn pop(&mut self) {
        self.0.pop();
    }

    /// One bullet per character, for masked display.
    #[must_use]
    pub fn masked(&self) -> String {
        "•".repeat(self.0.chars().count())
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}

/// Content type of a secret value, stored in the vault as a MIME string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "text/plain")]
    Text,
    #[serde(rename = "text/csv")]
    Csv,
    #[serde(rename = "application/json")]
    Json,
    #[serde(rename = "application/xml")]
    Xml,
    #[serde(rename = "application/base64")]
    Base64,
    #[serde(rename = "application/x-pkcs12")]
    Certificate,
    #[serde(rename = "application/x-pem-file")]
    Pem,
}

impl ContentType {
    /// All content types in the order the secret form cycles through them.
    pub const ALL: [Self; 7] = [
        Self::Text,
        Self::Csv,
        Self::Json,
        Self::Xml,
        Self::Base64,
        Self::Certificate,
        Self::Pem,
    ];

    /// MIME string stored in the vault.
    #[must_use]
    pub const fn as_mime(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Csv => "text/csv",
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::Base64 => "application/base64",
            Self::Certificate => "application/x-pkcs12",
            Self::Pem => "application/x-pem-file",
        }
    }

    /// Short label shown in the Type column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Csv => "CSV",
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Base64 => "Base64",
            Self::Certificate => "Certificate",
            Self::Pem => "PEM",
        }
    }

    /// Guesses the content type of a configuration file from its extension.
    ///
    /// Unknown extensions fall back to [`ContentType::Text`].
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Self::Csv,
            "json" => Self::Json,
            "xml" | "config" => Self::Xml,
            "pem" | "crt" => Self::Pem,
            "pfx" | "p12" | "cer" | "der" => Self::Certificate,
            _ => Self::Text,
        }
    }

    /// Next content type in [`ContentType::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous content type in [`ContentType::ALL`], wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_mime().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown content type: {s}"))
    }
}

/// Vault-managed attributes of a secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretAttributes {
    /// Tri-state enabled flag.
    ///
    /// `None` means the vault never recorded a value; it is treated as enabled.
    /// Use [`SecretAttributes::is_enabled`] rather than reading the field directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Unix timestamp of creation, set by the vault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// Unix timestamp of the last write, set by the vault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
}

impl SecretAttributes {
    /// Attributes carrying only an enabled flag, as sent by update calls.
    #[must_use]
    pub const fn with_enabled(enabled: Option<bool>) -> Self {
        Self {
            enabled,
            created: None,
            updated: None,
        }
    }

    /// Effective enabled state: an unspecified flag defaults to enabled.
    ///
    /// ```
    /// use vault_explorer::domain::SecretAttributes;
    ///
    /// assert!(SecretAttributes::with_enabled(None).is_enabled());
    /// assert!(SecretAttributes::with_enabled(Some(true)).is_enabled());
    /// assert!(!SecretAttributes::with_enabled(Some(false)).is_enabled());
    /// ```
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// A secret as stored in the vault.
///
/// Records produced by a listing carry metadata only; their `value` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    #[serde(default)]
    pub value: SecretValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub attributes: SecretAttributes,
}

impl Secret {
    /// Creates an enabled-by-default secret with no tags and no content type.
    ///
    /// ```
    /// use vault_explorer::domain::Secret;
    ///
    /// let secret = Secret::new("db-password", "s3cret");
    /// assert_eq!(secret.name, "db-password");
    /// assert!(secret.is_enabled());
    /// assert!(secret.content_type.is_none());
    /// ```
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: SecretValue::new(value),
            content_type: None,
            tags: Tags::new(),
            attributes: SecretAttributes::default(),
        }
    }

    /// Effective enabled state (see [`SecretAttributes::is_enabled`]).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.attributes.is_enabled()
    }

    /// The actor recorded in the [`CHANGED_BY_TAG`] tag, if any.
    #[must_use]
    pub fn changed_by(&self) -> Option<&str> {
        self.tags.get(CHANGED_BY_TAG).map(String::as_str)
    }

    /// Copy of the record without its value, as returned by listings.
    #[must_use]
    pub fn without_value(&self) -> Self {
        Self {
            value: SecretValue::default(),
            ..self.clone()
        }
    }

    /// Human-readable age of the last write, relative to `now`.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    ///
    /// Returns an empty string when the vault reported no update time.
    #[must_use]
    pub fn updated_ago(&self, now: i64) -> String {
        let Some(updated) = self.attributes.updated else {
            return String::new();
        };
        let diff = (now - updated).max(0);

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// Returns a copy of `tags` with the [`CHANGED_BY_TAG`] audit tag set to `actor`.
///
/// ```
/// use vault_explorer::domain::{with_changed_by, Tags, CHANGED_BY_TAG};
///
/// let tags = with_changed_by(&Tags::new(), "alice");
/// assert_eq!(tags.get(CHANGED_BY_TAG).map(String::as_str), Some("alice"));
/// ```
#[must_use]
pub fn with_changed_by(tags: &Tags, actor: &str) -> Tags {
    let mut tags = tags.clone();
    tags.insert(CHANGED_BY_TAG.to_string(), actor.to_string());
    tags
}

/// Parses the `key=value, key2=value2` tag syntax used by the secret form.
///
/// Entries without `=` become tags with an empty value; blank entries are skipped.
#[must_use]
pub fn parse_tags(input: &str) -> Tags {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (entry.to_string(), String::new()),
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Formats tags back into the form syntax accepted by [`parse_tags`].
#[must_use]
pub fn format_tags(tags: &Tags) -> String {
    tags.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
