//! Geo/environment selection and vault name resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geo selector entry: short geo code plus the region it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub code: String,
    pub region: String,
}

impl Geo {
    /// Parses a `code:region` pair; a bare code uses itself as region.
    ///
    /// ```
    /// use vault_explorer::vault::Geo;
    ///
    /// let geo = Geo::parse("us:westus").unwrap();
    /// assert_eq!(geo.code, "us");
    /// assert_eq!(geo.region, "westus");
    /// assert!(Geo::parse(" : ").is_none());
    /// ```
    #[must_use]
    pub fn parse(entry: &str) -> Option<Self> {
        let (code, region) = entry.split_once(':').unwrap_or((entry, entry));
        let code = code.trim();
        let region = region.trim();
        if code.is_empty() {
            return None;
        }
        Some(Self {
            code: code.to_lowercase(),
            region: if region.is_empty() { code } else { region }.to_string(),
        })
    }
}

impl fmt::Display for Geo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.region)
    }
}

/// The vault instance selected by the geo and environment selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultLocation {
    pub geo: String,
    pub environment: String,
    pub region: String,
}

impl VaultLocation {
    /// Resolves a location from the selected geo and environment.
    #[must_use]
    pub fn new(geo: &Geo, environment: &str) -> Self {
        Self {
            geo: geo.code.clone(),
            environment: environment.to_string(),
            region: geo.region.clone(),
        }
    }

    /// Vault name, `"{geo}-{environment}"`.
    ///
    /// ```
    /// use vault_explorer::vault::{Geo, VaultLocation};
    ///
    /// let geo = Geo::parse("eu:northeurope").unwrap();
    /// assert_eq!(VaultLocation::new(&geo, "prod").vault_name(), "eu-prod");
    /// ```
    #[must_use]
    pub fn vault_name(&self) -> String {
        format!("{}-{}", self.geo, self.environment)
    }
}

impl fmt::Display for VaultLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.vault_name(), self.region)
    }
}
