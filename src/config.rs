use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::changelog::github::{DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_RAW_URL};
use crate::error::ConfigError;
use crate::registry::npm::DEFAULT_BASE_URL as DEFAULT_REGISTRY_URL;

/// Simulated latency of the vulnerability lookup in milliseconds
pub const DEFAULT_VULNERABILITY_DELAY_MS: u64 = 500;

/// Number of packages processed at the same time
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Runtime configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub registry_url: String,
    pub github_api_url: String,
    pub github_raw_url: String,
    /// Branch the CHANGELOG.md fallback is read from
    pub changelog_branch: String,
    pub github_token: Option<String>,
    pub concurrency: usize,
    pub vulnerability_delay_ms: u64,
    /// Extra entries for the vulnerability table, keyed by package name
    pub known_vulnerabilities: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            github_api_url: DEFAULT_API_URL.to_string(),
            github_raw_url: DEFAULT_RAW_URL.to_string(),
            changelog_branch: DEFAULT_BRANCH.to_string(),
            github_token: None,
            concurrency: DEFAULT_CONCURRENCY,
            vulnerability_delay_ms: DEFAULT_VULNERABILITY_DELAY_MS,
            known_vulnerabilities: IndexMap::new(),
        }
    }
}

impl Config {
    /// Reads the configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Reads the configuration from the default location, or returns defaults
    /// when no config file exists there
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path();
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Concurrency limit, never below one
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

/// Returns the path to the config directory for dep-digest.
/// Uses $XDG_CONFIG_HOME/dep-digest if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/dep-digest,
/// or ./dep-digest if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("dep-digest")
}
