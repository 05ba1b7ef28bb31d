//! # Client Configuration
//!
//! Configuration management for the platform client library and CLI.
//! Supports environment variables, config files, and command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::auth::AuthDescriptor;
use crate::error::{ClientError, ClientResult};

/// Client configuration for API connections and CLI behavior
///
/// # Examples
///
/// ```rust
/// use platform_client::config::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.api.base_url, "http://localhost:8080/api");
/// assert_eq!(config.api.realm, "platform");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Management API settings
    #[serde(default)]
    pub api: ApiEndpointConfig,
    /// OAuth2 password-grant credentials
    #[serde(default)]
    pub auth: AuthDescriptor,
    /// CLI-specific settings
    #[serde(default)]
    pub cli: CliConfig,
}

/// API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpointConfig {
    /// Base URL of the management API (e.g., "<https://platform.local/api>")
    pub base_url: String,
    /// Identity provider realm that issues platform tokens
    pub realm: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum attempts for idempotent requests
    pub max_retries: u32,
}

/// CLI-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default output format (table, json)
    pub default_format: String,
    /// Verbose logging level
    pub verbose_level: u8,
}

impl Default for ApiEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            realm: "platform".to_string(),
            timeout_ms: 30000,
            max_retries: 3,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_format: "table".to_string(),
            verbose_level: 0,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (./platform-client.toml, ~/.platform/config.toml)
    /// 3. Default values
    pub fn load() -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(config_path) = Self::find_config_file() {
            debug!("Loading config from: {}", config_path.display());
            match Self::load_from_file(&config_path) {
                Ok(file_config) => config = file_config,
                Err(e) => {
                    warn!(
                        path = %config_path.display(),
                        error = %e,
                        "Ignoring unreadable config file"
                    );
                }
            }
        }

        config.apply_env_overrides();

        debug!(
            base_url = %config.api.base_url,
            realm = %config.api.realm,
            "Loaded client configuration"
        );
        Ok(config)
    }

    /// Load configuration from a specific file, then apply environment overrides
    pub fn load_with_file(path: &Path) -> ClientResult<Self> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ClientError::config_error(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut possible_paths = vec![
            PathBuf::from("./platform-client.toml"),
            PathBuf::from("./config/platform-client.toml"),
        ];
        if let Some(home) = dirs::home_dir() {
            possible_paths.push(home.join(".platform").join("config.toml"));
        }
        if let Some(config_dir) = dirs::config_dir() {
            possible_paths.push(config_dir.join("platform").join("client.toml"));
        }

        possible_paths
            .into_iter()
            .find(|path| path.exists() && path.is_file())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PLATFORM_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(realm) = std::env::var("PLATFORM_REALM") {
            self.api.realm = realm;
        }
        if let Ok(timeout) = std::env::var("PLATFORM_TIMEOUT_MS") {
            if let Ok(timeout_ms) = timeout.parse() {
                self.api.timeout_ms = timeout_ms;
            }
        }

        if let Ok(username) = std::env::var("PLATFORM_USERNAME") {
            self.auth.username = username;
        }
        if let Ok(password) = std::env::var("PLATFORM_PASSWORD") {
            self.auth.password = password;
        }
        if let Ok(client_id) = std::env::var("PLATFORM_CLIENT_ID") {
            self.auth.client_id = client_id;
        }
        if let Ok(token_url) = std::env::var("PLATFORM_TOKEN_URL") {
            self.auth.token_url = token_url;
        }
        if let Ok(scopes) = std::env::var("PLATFORM_SCOPES") {
            self.auth.scopes = scopes
                .split([',', ' '])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(format) = std::env::var("PLATFORM_CLI_FORMAT") {
            self.cli.default_format = format;
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ClientError::config_error(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            ClientError::config_error(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get default config file path
    pub fn default_config_path() -> ClientResult<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| ClientError::config_error("Could not determine home directory"))?;

        Ok(home_dir.join(".platform").join("config.toml"))
    }

    /// Copy of this configuration that is safe to print
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth.password.is_empty() {
            copy.auth.password = "********".to_string();
        }
        copy
    }
}
