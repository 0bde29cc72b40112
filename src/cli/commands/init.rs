//! Init command implementation
//!
//! Writes a starter configuration file with the default settings spelled
//! out, so users have something to edit.

use clap::Args;
use std::path::Path;

const SAMPLE_CONFIG: &str = r#"# Meridian configuration

[application]
# trace, debug, info, warn, error
log_level = "info"

[export]
# Directory for the intermediate container; system temp dir if unset.
# temp_dir = "/var/tmp"
container_file_name = "staged_layers.mlc"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let path = Path::new(config_path);

        if path.exists() && !self.force {
            eprintln!("{config_path} already exists (use --force to overwrite)");
            return Ok(2);
        }

        std::fs::write(path, SAMPLE_CONFIG)?;
        tracing::info!(path = config_path, "Wrote starter configuration");
        println!("Wrote {config_path}");
        Ok(0)
    }
}
