//! Configuration file parser for ~/.config/dailynews/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning so typos are
//! visible. `FIRESTORE_PROJECT_ID` and `FIRESTORE_API_KEY` override the file.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Store connection settings.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// The API key is masked in `Debug` output.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Firestore project id. Required unless running with `--demo`.
    pub project_id: Option<String>,

    /// Web API key, sent as the `key` query parameter.
    pub api_key: Option<String>,

    /// Firestore database id.
    pub database: String,

    /// Collection holding the news documents.
    pub collection: String,

    /// REST endpoint root. Plain HTTP is only accepted for localhost.
    pub base_url: String,

    /// Per-request transport timeout.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: None,
            api_key: None,
            database: "(default)".to_string(),
            collection: "news".to_string(),
            base_url: "https://firestore.googleapis.com".to_string(),
            request_timeout_secs: 20,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("project_id", &self.project_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "project_id",
        "api_key",
        "database",
        "collection",
        "base_url",
        "request_timeout_secs",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            project_id = ?config.project_id,
            collection = %config.collection,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Apply `FIRESTORE_PROJECT_ID` / `FIRESTORE_API_KEY` on top of the file.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("FIRESTORE_PROJECT_ID").ok(),
            std::env::var("FIRESTORE_API_KEY").ok(),
        )
    }

    fn with_overrides(mut self, project_id: Option<String>, api_key: Option<String>) -> Self {
        if let Some(project_id) = project_id.filter(|v| !v.trim().is_empty()) {
            self.project_id = Some(project_id);
        }
        if let Some(api_key) = api_key.filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(api_key);
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
