use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Version-related constants
// =============================================================================

/// Engine version bundled with this build.
///
/// Set `DATAPROXY_ENGINE_VERSION` at compile time to pin it, otherwise the
/// crate version is used.
pub const ENGINE_VERSION: &str = match option_env!("DATAPROXY_ENGINE_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Client version assumed when the client does not declare one
pub const UNKNOWN_CLIENT_VERSION: &str = "unknown";

/// Version reported by locally built clients
pub const DEV_SENTINEL_VERSION: &str = "0.0.0";

/// Engine version used in place of the 4.17 line
pub const INCOMPATIBLE_ENGINE_PIN: &str = "5.0.0";

/// Timeout for the registry lookup in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

// =============================================================================
// Environment overrides
// =============================================================================

/// Forces the resolved version, bypassing every other rule
pub const FORCED_VERSION_VAR: &str = "PRISMA_CLIENT_DATA_PROXY_CLIENT_VERSION";

/// Routes pre-release clients to the local test engine
pub const TEST_MODE_VAR: &str = "TEST_DATA_PROXY";

/// Default base URL of the package index
pub const DEFAULT_REGISTRY_URL: &str = "https://unpkg.com";

/// Default package whose published versions track the engine
pub const DEFAULT_PACKAGE: &str = "prisma";

/// Configuration declared by the requesting client
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub client_version: Option<String>,
}

impl ClientConfig {
    pub fn new(client_version: impl Into<String>) -> Self {
        Self {
            client_version: Some(client_version.into()),
        }
    }

    /// Declared client version, or `"unknown"` when absent
    pub fn client_version(&self) -> &str {
        self.client_version
            .as_deref()
            .unwrap_or(UNKNOWN_CLIENT_VERSION)
    }
}

/// Read-only snapshot of the process overrides consulted by the resolver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentView {
    /// Version returned verbatim when set
    pub forced_version: Option<String>,
    /// Whether pre-release clients should use the local test engine
    pub test_mode: bool,
}

impl EnvironmentView {
    /// Captures the overrides from the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the view from an arbitrary variable lookup.
    ///
    /// An empty forced version is treated as unset. Test mode is enabled by
    /// any defined value, including an empty one.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            forced_version: lookup(FORCED_VERSION_VAR).filter(|v| !v.is_empty()),
            test_mode: lookup(TEST_MODE_VAR).is_some(),
        }
    }
}

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    pub registry: RegistryConfig,
}

impl ResolverConfig {
    /// Loads configuration from a JSON file. Missing fields use defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Package index configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the package index
    pub url: String,
    /// Package queried for published versions
    pub package: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

/// Returns the path to the data directory for dataproxy-version.
/// Uses $XDG_DATA_HOME/dataproxy-version if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/dataproxy-version,
/// or ./dataproxy-version if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("dataproxy-version.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("dataproxy-version")
}
