//! Integration tests for client settings persistence
//!
//! Test Organization:
//! - Save/load round trip
//! - Missing and malformed files
//! - Path and value validation

use parse_insight::config::{
    load_config_from_file, load_or_default, save_config_to_file, validate_config_path,
    ClientConfig,
};
use parse_insight::error::ConfigError;
use parse_insight::models::MessageType;
use std::fs;
use std::path::Path;

fn custom_config() -> ClientConfig {
    ClientConfig {
        server_url: "http://bench.internal:9090".to_string(),
        default_iterations: 50_000,
        default_concurrency: 8,
        default_message_type: MessageType::Response,
        log_level: "debug".to_string(),
    }
}

#[test]
fn test_save_then_load_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/settings.json");

    save_config_to_file(&custom_config(), &path).unwrap();
    let loaded = load_config_from_file(&path).unwrap();

    assert_eq!(loaded, custom_config());
    assert_eq!(loaded.level_filter(), log::LevelFilter::Debug);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let config = load_or_default(&path).unwrap();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.server_url, "http://localhost:8080");
    assert_eq!(config.default_iterations, 10_000);
    assert_eq!(config.default_concurrency, 1);
}

#[test]
fn test_missing_file_is_an_error_for_strict_load() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config_from_file(&dir.path().join("settings.json"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"server_url": "https://bench.example.com"}"#).unwrap();

    let config = load_or_default(&path).unwrap();
    assert_eq!(config.server_url, "https://bench.example.com");
    assert_eq!(config.default_iterations, 10_000);
    assert_eq!(config.default_message_type, MessageType::Request);
}

#[test]
fn test_invalid_json_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let result = load_or_default(&path);
    assert!(matches!(result, Err(ConfigError::InvalidJson(_))));
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"server_url": "localhost:8080"}"#).unwrap();
    assert!(matches!(
        load_config_from_file(&path),
        Err(ConfigError::ValidationFailed(_))
    ));

    fs::write(&path, r#"{"default_concurrency": 0}"#).unwrap();
    assert!(matches!(
        load_config_from_file(&path),
        Err(ConfigError::ValidationFailed(_))
    ));
}

#[test]
fn test_config_path_requires_json_extension() {
    assert!(validate_config_path(Path::new("settings.json")).is_ok());
    assert!(validate_config_path(Path::new("settings.toml")).is_err());
    assert!(validate_config_path(Path::new("settings")).is_err());
    assert!(validate_config_path(Path::new("")).is_err());
}

#[test]
fn test_unknown_log_level_falls_back_to_info() {
    let mut config = ClientConfig::default();
    config.log_level = "chatty".to_string();
    assert_eq!(config.level_filter(), log::LevelFilter::Info);
}
