//! Integration tests for configuration loading and validation
//!
//! Tests that touch environment variables take `ENV_MUTEX` so they never
//! interleave with each other.

use meridian::config::{load_config, load_config_or_default};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("MERIDIAN_APPLICATION_LOG_LEVEL");
    std::env::remove_var("MERIDIAN_EXPORT_TEMP_DIR");
    std::env::remove_var("MERIDIAN_EXPORT_CONTAINER_FILE_NAME");
    std::env::remove_var("TEST_MERIDIAN_TEMP");
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[export]
temp_dir = "/var/scratch/meridian"
container_file_name = "staging.mlc"

[logging]
local_enabled = true
local_path = "/tmp/meridian-logs"
local_rotation = "hourly"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.export.temp_dir,
        Some(PathBuf::from("/var/scratch/meridian"))
    );
    assert_eq!(config.export.container_file_name, "staging.mlc");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/meridian-logs");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]

[export]

[logging]
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify defaults are applied
    assert_eq!(config.application.log_level, "info");
    assert!(config.export.temp_dir.is_none());
    assert_eq!(config.export.container_file_name, "staged_layers.mlc");
    assert_eq!(config.export.resolved_temp_dir(), std::env::temp_dir());
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_MERIDIAN_TEMP", "/mnt/fast-scratch");

    let toml_content = r#"
[export]
temp_dir = "${TEST_MERIDIAN_TEMP}"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(
        config.export.temp_dir,
        Some(PathBuf::from("/mnt/fast-scratch"))
    );

    std::env::remove_var("TEST_MERIDIAN_TEMP");
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("MERIDIAN_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("MERIDIAN_EXPORT_CONTAINER_FILE_NAME", "override.mlc");

    let toml_content = r#"
[application]
log_level = "info"

[export]
container_file_name = "from_file.mlc"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify env var overrides took effect
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.export.container_file_name, "override.mlc");

    std::env::remove_var("MERIDIAN_APPLICATION_LOG_LEVEL");
    std::env::remove_var("MERIDIAN_EXPORT_CONTAINER_FILE_NAME");
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "invalid_level"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_container_file_name_must_be_bare() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[export]
container_file_name = "nested/staging.mlc"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    // Strict loading refuses a missing file
    assert!(load_config("definitely_absent.toml").is_err());

    // The optional path yields defaults
    let config = load_config_or_default("definitely_absent.toml").unwrap();
    assert_eq!(config.export.container_file_name, "staged_layers.mlc");
}
