//! Configuration schema types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Meridian configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section has defaults, so a missing file or empty section yields a
/// usable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeridianConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export pipeline settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MeridianConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Temp area for the intermediate container; system temp dir if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,

    /// File name of the intermediate container inside the temp area
    ///
    /// Fixed per installation: exactly one pipeline run owns this file at
    /// a time, and a stale leftover is cleared at the start of a run.
    #[serde(default = "default_container_file_name")]
    pub container_file_name: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.container_file_name.is_empty() {
            return Err("container_file_name must not be empty".to_string());
        }
        if self.container_file_name.contains(['/', '\\']) {
            return Err(format!(
                "container_file_name '{}' must be a bare file name",
                self.container_file_name
            ));
        }
        Ok(())
    }

    /// The directory the intermediate container is placed in
    pub fn resolved_temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            container_file_name: default_container_file_name(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging in addition to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation ("daily" or "hourly")
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("local_path must be set when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_container_file_name() -> String {
    "staged_layers.mlc".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MeridianConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.export.container_file_name, "staged_layers.mlc");
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let mut config = MeridianConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_container_file_name_must_be_bare() {
        let mut config = MeridianConfig::default();
        config.export.container_file_name = "sub/dir.mlc".to_string();
        assert!(config.validate().is_err());

        config.export.container_file_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolved_temp_dir_defaults_to_system_temp() {
        let config = ExportConfig::default();
        assert_eq!(config.resolved_temp_dir(), std::env::temp_dir());

        let config = ExportConfig {
            temp_dir: Some(PathBuf::from("/var/scratch")),
            ..Default::default()
        };
        assert_eq!(config.resolved_temp_dir(), PathBuf::from("/var/scratch"));
    }

    #[test]
    fn test_rotation_validation() {
        let mut config = MeridianConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_toml_parses_to_defaults() {
        let config: MeridianConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert!(config.export.temp_dir.is_none());
    }
}
