//! Configuration types for Wayfare
//!
//! All configuration is read from the environment once at process startup;
//! there is no hot-reload.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage configuration for the profile document database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type
    pub backend: StorageBackend,
    /// Storage path for file-based backends
    pub path: Option<PathBuf>,
    /// Namespace for multi-tenant storage
    pub namespace: String,
    /// Database name
    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StorageBackend {
    /// SurrealDB file-based storage
    SurrealFile,
    /// SurrealDB in-memory storage
    SurrealMemory,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::SurrealFile,
            path: Some(PathBuf::from("./data/profiles.db")),
            namespace: "wayfare".to_string(),
            database: "profiles".to_string(),
        }
    }
}

impl StorageConfig {
    /// Read storage settings from the environment, defaulting to a file
    /// database under the given data directory
    pub fn from_env(data_dir: &std::path::Path) -> Self {
        let namespace =
            std::env::var("PROFILE_DB_NAMESPACE").unwrap_or_else(|_| "wayfare".to_string());
        let database =
            std::env::var("PROFILE_DB_DATABASE").unwrap_or_else(|_| "profiles".to_string());

        Self {
            backend: StorageBackend::SurrealFile,
            path: Some(data_dir.join("profiles.db")),
            namespace,
            database,
        }
    }
}

/// How the LLM backend is reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmMode {
    /// Hosted platform backend identified by a project id
    Hosted { project: String },
    /// Direct API-key access (the key itself is read by the client library
    /// from its provider-specific environment variable)
    ApiKey,
}

/// LLM backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub mode: LlmMode,
    /// Model identifier passed to the client
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mode: LlmMode::ApiKey,
            model: crate::constants::DEFAULT_MODEL.to_string(),
        }
    }
}

impl LlmConfig {
    /// Read LLM settings from the environment.
    ///
    /// `LLM_USE_HOSTED` selects the hosted-platform mode, in which case
    /// `LLM_PROJECT_ID` must identify the backend project; otherwise direct
    /// API-key mode is assumed. `LLM_MODEL` overrides the default model.
    pub fn from_env() -> crate::Result<Self> {
        let model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| crate::constants::DEFAULT_MODEL.to_string());

        let use_hosted = std::env::var("LLM_USE_HOSTED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mode = if use_hosted {
            let project = std::env::var("LLM_PROJECT_ID").map_err(|_| {
                crate::WayfareError::Config(
                    "LLM_USE_HOSTED is set but LLM_PROJECT_ID is missing".to_string(),
                )
            })?;
            LlmMode::Hosted { project }
        } else {
            LlmMode::ApiKey
        };

        Ok(Self { mode, model })
    }
}

/// SMTP configuration for the email notification tool.
///
/// The transport itself is an external collaborator; this struct only
/// carries the settings. When credentials are absent the tool runs in
/// simulation mode (`enabled == false`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub address: Option<String>,
    pub password: Option<String>,
    pub use_tls: bool,
    pub enabled: bool,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            server: crate::constants::smtp::DEFAULT_SERVER.to_string(),
            port: crate::constants::smtp::DEFAULT_PORT,
            address: None,
            password: None,
            use_tls: true,
            enabled: false,
        }
    }
}

impl SmtpConfig {
    /// Read SMTP settings from the environment
    pub fn from_env() -> Self {
        let server = std::env::var("SMTP_SERVER")
            .unwrap_or_else(|_| crate::constants::smtp::DEFAULT_SERVER.to_string());
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(crate::constants::smtp::DEFAULT_PORT);
        let address = std::env::var("EMAIL_ADDRESS").ok();
        let password = std::env::var("EMAIL_PASSWORD").ok();
        let use_tls = std::env::var("EMAIL_USE_TLS")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let enabled = address.is_some() && password.is_some();
        if !enabled {
            tracing::warn!("Email credentials not configured, email functionality will be simulated");
        }

        Self {
            server,
            port,
            address,
            password,
            use_tls,
            enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.namespace, "wayfare");
        assert_eq!(config.database, "profiles");
        assert!(matches!(config.backend, StorageBackend::SurrealFile));
    }

    #[test]
    fn test_llm_config_default_is_api_key_mode() {
        let config = LlmConfig::default();
        assert_eq!(config.mode, LlmMode::ApiKey);
        assert_eq!(config.model, crate::constants::DEFAULT_MODEL);
    }

    #[test]
    fn test_smtp_config_disabled_without_credentials() {
        let config = SmtpConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.port, 587);
    }
}
