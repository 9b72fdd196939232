//! Client settings and their JSON persistence.
//!
//! Settings live in `~/.config/parse-insight/settings.json`. A missing file
//! yields the defaults; a present but invalid file is an error.

use crate::error::ConfigError;
use crate::models::MessageType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Client settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the benchmark server
    pub server_url: String,
    /// Pre-filled iteration count
    pub default_iterations: u32,
    /// Pre-filled concurrency
    pub default_concurrency: u32,
    /// Pre-selected message type
    pub default_message_type: MessageType,
    /// `log` level filter name (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: "http://localhost:8080".to_string(),
            default_iterations: 10_000,
            default_concurrency: 1,
            default_message_type: MessageType::Request,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parsed `log_level`, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Check values a user could have hand-edited into nonsense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(format!(
                "server_url must start with http:// or https://, got '{}'",
                self.server_url
            )));
        }
        if self.default_iterations == 0 {
            return Err(ConfigError::ValidationFailed(
                "default_iterations must be at least 1".to_string(),
            ));
        }
        if self.default_concurrency == 0 {
            return Err(ConfigError::ValidationFailed(
                "default_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get the global settings path: ~/.config/parse-insight/settings.json
pub fn get_global_settings_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::ValidationFailed("Cannot determine home directory".to_string())
    })?;

    Ok(home.join(".config/parse-insight").join("settings.json"))
}

/// Validate config path (.json extension required).
pub fn validate_config_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "Configuration path cannot be empty".to_string(),
        ));
    }

    match path.extension() {
        Some(ext) if ext == "json" => Ok(()),
        Some(ext) => Err(ConfigError::ValidationFailed(format!(
            "Configuration file must have .json extension, got .{}",
            ext.to_string_lossy()
        ))),
        None => Err(ConfigError::ValidationFailed(
            "Configuration file must have .json extension".to_string(),
        )),
    }
}

/// Load config from a JSON file.
pub fn load_config_from_file(path: &Path) -> Result<ClientConfig, ConfigError> {
    validate_config_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(format!(
                "Configuration file not found at: {}",
                path.display()
            ))
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let config: ClientConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning defaults when the file does not exist.
pub fn load_or_default(path: &Path) -> Result<ClientConfig, ConfigError> {
    match load_config_from_file(path) {
        Err(ConfigError::FileNotFound(msg)) => {
            log::info!("[Config] {}; using defaults", msg);
            Ok(ClientConfig::default())
        }
        other => other,
    }
}

/// Save config to a JSON file, creating parent directories.
pub fn save_config_to_file(config: &ClientConfig, path: &Path) -> Result<(), ConfigError> {
    validate_config_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json_content = serde_json::to_string_pretty(config)?;
    fs::write(path, json_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_level_filter_fallback() {
        let config = ClientConfig {
            log_level: "chatty".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Info);

        let debug = ClientConfig {
            log_level: "debug".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(debug.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ClientConfig {
            server_url: "localhost:8080".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn test_validate_config_path() {
        assert!(validate_config_path(Path::new("settings.json")).is_ok());
        assert!(validate_config_path(Path::new("settings.toml")).is_err());
        assert!(validate_config_path(Path::new("settings")).is_err());
        assert!(validate_config_path(Path::new("")).is_err());
    }
}
