//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Extraction assist configuration.
    pub extraction: ExtractionSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Object storage settings.
///
/// The core storage service interprets these; `provider` selects which of
/// the optional field groups applies.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Provider kind: "s3", "azure_blob", or "local".
    pub provider: String,
    /// Public base URL under which stored objects are retrievable.
    pub public_base_url: String,
    /// S3 endpoint URL (s3 provider).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bucket or container name (s3 / azure_blob providers).
    #[serde(default)]
    pub bucket: Option<String>,
    /// Access key ID (s3 provider).
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key (s3 provider) or account key (azure_blob).
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Region (s3 provider).
    #[serde(default)]
    pub region: Option<String>,
    /// Storage account name (azure_blob provider).
    #[serde(default)]
    pub account: Option<String>,
    /// Root directory (local provider).
    #[serde(default)]
    pub root: Option<String>,
    /// Maximum upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

/// Extraction assist settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    /// POST endpoint of the extraction service.
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_extraction_timeout")]
    pub timeout_secs: u64,
}

fn default_extraction_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BOEKHOUD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
