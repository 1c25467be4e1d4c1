//! Configuration for the meeting-insight service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_PATH_ENV: &str = "MEETING_INSIGHT_CONFIG";

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InsightConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Google Drive configuration
    #[serde(default)]
    pub drive: DriveConfig,
    /// Profile enrichment (RapidAPI) configuration
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Gemini configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Download and extraction behaviour
    #[serde(default)]
    pub ingestion: IngestionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum request body size in bytes (default: 50MB)
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_size: 50 * 1024 * 1024,
        }
    }
}

/// Google Drive configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Drive v3 API base URL
    pub api_base: String,
    /// OAuth scope requested for the service account
    pub scope: String,
    /// Inline service account key JSON (takes precedence over the key path)
    #[serde(default, skip_serializing)]
    pub service_account_json: Option<String>,
    /// Path to a service account JSON key file
    #[serde(default)]
    pub service_account_key_path: Option<PathBuf>,
    /// Bytes requested per download chunk (default: 100MB)
    pub chunk_size: u64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base: "https://www.googleapis.com/drive/v3".to_string(),
            scope: "https://www.googleapis.com/auth/drive.readonly".to_string(),
            service_account_json: None,
            service_account_key_path: None,
            chunk_size: 100 * 1024 * 1024,
            timeout_secs: 300,
        }
    }
}

/// Profile enrichment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Scraper endpoint receiving the form POST
    pub endpoint: String,
    /// RapidAPI key (sent as `x-rapidapi-key`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// RapidAPI host (sent as `x-rapidapi-host`)
    pub api_host: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://linkedin-data-scraper1.p.rapidapi.com/get_user_data.php".to_string(),
            api_key: None,
            api_host: "linkedin-data-scraper1.p.rapidapi.com".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Gemini configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Generative Language API base URL
    pub api_base: String,
    /// API key (sent as `x-goog-api-key`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            model: "gemini-2.5-flash-preview-05-20".to_string(),
            timeout_secs: 300,
        }
    }
}

/// What to do when a chunk request fails part-way through a file
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DownloadFailurePolicy {
    /// Log and continue with whatever bytes arrived
    #[default]
    KeepPartial,
    /// Fail the whole request
    Abort,
}

impl std::str::FromStr for DownloadFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "keep_partial" | "keep-partial" => Ok(Self::KeepPartial),
            "abort" => Ok(Self::Abort),
            other => Err(Error::Config(format!("Unknown download failure policy: {}", other))),
        }
    }
}

/// Download and extraction behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Policy for interrupted downloads
    #[serde(default)]
    pub download_failure_policy: DownloadFailurePolicy,
    /// Upper bound on PDF text extraction per file, in seconds
    pub extraction_timeout_secs: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            download_failure_policy: DownloadFailurePolicy::KeepPartial,
            extraction_timeout_secs: 60,
        }
    }
}

impl InsightConfig {
    /// Load configuration: `.env`, then the optional TOML file, then environment overrides
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }

        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse TOML configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid PORT '{}': {}", port, e)))?;
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.llm.model = model;
        }
        if let Some(json) = lookup("GOOGLE_SERVICE_ACCOUNT_JSON") {
            self.drive.service_account_json = Some(json);
        }
        if let Some(path) = lookup("GOOGLE_APPLICATION_CREDENTIALS") {
            self.drive.service_account_key_path = Some(PathBuf::from(path));
        }
        if let Some(key) = lookup("RAPIDAPI_KEY") {
            self.profile.api_key = Some(key);
        }
        if let Some(host) = lookup("RAPIDAPI_HOST") {
            self.profile.api_host = host;
        }
        if let Some(policy) = lookup("DOWNLOAD_FAILURE_POLICY") {
            self.ingestion.download_failure_policy = policy.parse()?;
        }
        Ok(())
    }
}
