//! Vault Explorer: a Zellij plugin for browsing and editing the secrets of a
//! cloud key vault.
//!
//! The plugin lists the secrets of one vault at a time, chosen by a geo and an
//! environment selector, and lets the user:
//! - add secrets by hand, from a certificate file or from a configuration file
//! - edit, enable/disable and delete secrets, with confirmation for anything
//!   destructive
//! - copy a secret's value to the clipboard without it ever being displayed
//! - search (debounced, case-insensitive, non-matching rows struck out) and
//!   sort by any column
//!
//! Vault calls run on a Zellij worker thread so the pane never blocks.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Keys, timers, OSC 52
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, operation guard                  │
//! │  - Rows, search filter, sort comparator             │
//! │  - Secret form, confirmations                       │
//! └─────────────────────────────────────────────────────┘
//!         │                                        │
//! ┌───────────────┐                       ┌───────────────┐
//! │ UI Layer      │                       │ Worker Layer  │
//! │ (ui/)         │                       │ (worker/)     │
//! │ - Rendering   │                       │ - Vault calls │
//! │ - Theming     │                       │ - File loads  │
//! └───────────────┘                       └───────────────┘
//!                                                  │
//! ┌─────────────────────────────────────────────────────┐
//! │  Vault, Domain & Infrastructure                     │
//! │  - VaultClient trait, JsonVault backend (vault/)    │
//! │  - Secret model, errors (domain/)                   │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/vault-explorer.wasm" {
//!         environments "dev,int,prod"
//!         geos "us:westus,eu:northeurope"
//!         changed_by "alice"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Library usage
//!
//! ```rust
//! use vault_explorer::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! # Ok::<(), vault_explorer::ExplorerError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod vault;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{ExplorerError, Result, Secret};
pub use ui::Theme;

use std::collections::BTreeMap;
use vault::Geo;

const DEFAULT_ENVIRONMENTS: &str = "dev,int,prod";
const DEFAULT_GEOS: &str = "us:westus,eu:northeurope,as:southeastasia";
const DEFAULT_HELP_URL: &str = "https://learn.microsoft.com/azure/key-vault/secrets/about-secrets";
const DEFAULT_OPENER: &str = "xdg-open";
const DEFAULT_ACTOR: &str = "unknown";

/// Plugin configuration parsed from the Zellij plugin block.
///
/// ```kdl
/// plugin location="file:/path/to/vault-explorer.wasm" {
///     environments "dev,prod"
///     geos "us:westus,eu:northeurope"
///     data_dir "/host/.local/share/zellij/vault-explorer"
///     changed_by "alice"
///     help_url "https://wiki.example.org/vaults"
///     opener "xdg-open"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Environment selector values, in display order.
    pub environments: Vec<String>,

    /// Geo selector values. Entries without a code are dropped; a bare code
    /// doubles as its region.
    pub geos: Vec<Geo>,

    /// Root for vault files and trace output.
    pub data_dir: String,

    /// Actor recorded in the `ChangedBy` tag of every write.
    pub changed_by: String,

    /// Opened by the help key.
    pub help_url: String,

    /// Command that opens URLs on the host.
    pub opener: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environments: split_list(DEFAULT_ENVIRONMENTS),
            geos: parse_geos(DEFAULT_GEOS),
            data_dir: infrastructure::get_data_dir().to_string_lossy().to_string(),
            changed_by: DEFAULT_ACTOR.to_string(),
            help_url: DEFAULT_HELP_URL.to_string(),
            opener: DEFAULT_OPENER.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

fn parse_geos(value: &str) -> Vec<Geo> {
    value
        .split(',')
        .filter_map(|entry| {
            let geo = Geo::parse(entry);
            if geo.is_none() && !entry.trim().is_empty() {
                tracing::debug!(entry = %entry, "ignoring malformed geo entry");
            }
            geo
        })
        .collect()
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, empty or unparsable values fall back to their defaults; a
    /// list that ends up empty is replaced by the default list.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use vault_explorer::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("environments".to_string(), "dev, prod".to_string());
    /// map.insert("geos".to_string(), "eu:northeurope".to_string());
    /// map.insert("changed_by".to_string(), "alice".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.environments, vec!["dev", "prod"]);
    /// assert_eq!(config.geos[0].code, "eu");
    /// assert_eq!(config.changed_by, "alice");
    /// assert_eq!(config.opener, "xdg-open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environments = non_empty("environments")
            .map(|v| split_list(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.environments);

        let geos = non_empty("geos")
            .map(|v| parse_geos(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.geos);

        Self {
            environments,
            geos,
            data_dir: non_empty("data_dir").unwrap_or(defaults.data_dir),
            changed_by: non_empty("changed_by").unwrap_or(defaults.changed_by),
            help_url: non_empty("help_url").unwrap_or(defaults.help_url),
            opener: non_empty("opener").unwrap_or(defaults.opener),
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Resolves the configured theme, falling back to the default theme when
    /// the file or name cannot be loaded.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state: no vault connected, no rows, the
/// first geo and environment selected.
///
/// ```rust
/// use vault_explorer::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.connected.is_none());
/// assert_eq!(state.location().map(|l| l.vault_name()), Some("us-dev".to_string()));
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        environments = config.environments.len(),
        geos = config.geos.len(),
        "initializing vault explorer plugin"
    );
    AppState::new(config, config.theme())
}
