//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Unlike the export command, a missing configuration file is an error
    /// here: validating nothing is not useful.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(path = config_path, "Validating configuration");

        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid: {config_path}");
                println!("  log_level: {}", config.application.log_level);
                println!(
                    "  temp area: {}",
                    config.export.resolved_temp_dir().display()
                );
                println!("  container: {}", config.export.container_file_name);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Configuration validation failed");
                eprintln!("Configuration invalid: {e}");
                Ok(2)
            }
        }
    }
}
