//! Configuration from `TASKBOARD_*` environment variables

use std::time::Duration;

use serial_test::serial;

use taskboard::shared::config::{ConfigError, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use taskboard::shared::AppConfig;

const VARS: [&str; 3] = ["TASKBOARD_API_URL", "TASKBOARD_STORAGE_DIR", "TASKBOARD_TIMEOUT_SECS"];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    assert!(config.session_file().ends_with("auth-storage.json"));
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("TASKBOARD_API_URL", "https://boards.example.com/");
    std::env::set_var("TASKBOARD_STORAGE_DIR", dir.path());
    std::env::set_var("TASKBOARD_TIMEOUT_SECS", "5");

    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.api_base_url, "https://boards.example.com");
    assert_eq!(config.api_url("/api/boards"), "https://boards.example.com/api/boards");
    assert_eq!(config.storage_dir, dir.path());
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[test]
#[serial]
fn test_bad_env_values_are_rejected() {
    clear_env();
    std::env::set_var("TASKBOARD_TIMEOUT_SECS", "soon");
    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue(_)));

    clear_env();
    std::env::set_var("TASKBOARD_API_URL", "ftp://boards.example.com");
    let err = AppConfig::from_env().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::InvalidUrl(_)));
}

#[test]
#[serial]
fn test_toml_file_then_env() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskboard.toml");
    std::fs::write(&path, "api_base_url = \"http://10.0.0.2:8000\"\ntimeout_secs = 12\n").unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.api_base_url, "http://10.0.0.2:8000");
    assert_eq!(config.request_timeout, Duration::from_secs(12));

    std::env::set_var("TASKBOARD_TIMEOUT_SECS", "3");
    let config = AppConfig::load(&path).unwrap();
    clear_env();
    assert_eq!(config.request_timeout, Duration::from_secs(3));
}
