//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{resolve_engine, DEFAULT_BASE_URL, DEFAULT_ENGINE};

/// Environment variable holding the Stability API key.
pub const API_KEY_ENV: &str = "STABILITY_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// API endpoint configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Download settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Stability API key.
    pub stability: Option<String>,
}

/// Where requests are sent.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Stability REST API.
    pub base_url: String,
    /// Engine name or alias.
    pub engine: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), engine: DEFAULT_ENGINE.to_string() }
    }
}

/// Download settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory downloaded images are written to.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from(".") }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Stability API key, preferring the environment variable.
    #[must_use]
    pub fn stability_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.keys.stability.clone())
    }

    /// The configured engine with aliases resolved.
    #[must_use]
    pub fn engine(&self) -> String {
        resolve_engine(&self.api.engine)
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `REALPIX_CONFIG` environment variable
/// 3. `~/.config/realpix/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("REALPIX_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/realpix/config.toml")
    } else {
        PathBuf::from("realpix.toml")
    }
}
