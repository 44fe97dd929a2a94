use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const SERVICE_ID_VAR: &str = "SKAPI_SERVICE_ID";

/// Service identifier used by `dev` mode, which never leaves the process.
pub const DEV_SERVICE_ID: &str = "dev-local";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("SKAPI_SERVICE_ID is not set. Add it to the environment or a .env file")]
    MissingServiceId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitConfig {
    /// Base URL of the record service, e.g. "https://api.skapi.local"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Email prefilled in the login view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_email: Option<String>,
}

fn default_api_url() -> String {
    "https://api.skapi.local".to_string()
}

impl Default for HabitConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            last_email: None,
        }
    }
}

pub fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("habit-tui"))
}

impl HabitConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(root_path()?.join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

/// Service identifier resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub service_id: String,
}

impl ServiceConfig {
    /// Load `.env` if present, then read the service identifier.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_value(std::env::var(SERVICE_ID_VAR).ok())
    }

    fn from_value(value: Option<String>) -> Result<Self, ConfigError> {
        match value.map(|v| v.trim().to_string()) {
            Some(service_id) if !service_id.is_empty() => Ok(Self { service_id }),
            _ => Err(ConfigError::MissingServiceId),
        }
    }

    pub fn dev() -> Self {
        Self {
            service_id: DEV_SERVICE_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = HabitConfig::parse("").unwrap();
        assert_eq!(config, HabitConfig::default());
        assert_eq!(config.api_url, "https://api.skapi.local");
    }

    #[test]
    fn reads_api_url_and_email() {
        let config = HabitConfig::parse(
            r#"
api_url = "http://localhost:9000"
last_email = "ada@example.com"
"#,
        )
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.last_email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn service_id_is_required() {
        assert_eq!(
            ServiceConfig::from_value(None),
            Err(ConfigError::MissingServiceId)
        );
        assert_eq!(
            ServiceConfig::from_value(Some("  ".to_string())),
            Err(ConfigError::MissingServiceId)
        );
        assert_eq!(
            ServiceConfig::from_value(Some(" svc-1 ".to_string())),
            Ok(ServiceConfig {
                service_id: "svc-1".to_string()
            })
        );
    }
}
