//! Export command implementation
//!
//! This module implements the `export` command: load the input GeoJSON
//! layers, run the staging-and-conversion pipeline, and report the result.

use crate::adapters::geojson;
use crate::config::load_config_or_default;
use crate::core::feedback::ConsoleFeedback;
use crate::core::pipeline::ExportPipeline;
use crate::domain::MeridianError;
use clap::Args;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input GeoJSON files, exported in the given order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output KML file path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the temp directory for the intermediate container
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        cancel_flag: Arc<AtomicBool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = load_config_or_default(config_path)?;

        if let Some(temp_dir) = &self.temp_dir {
            tracing::info!(temp_dir = %temp_dir.display(), "Overriding temp directory from CLI");
            config.export.temp_dir = Some(temp_dir.clone());
        }

        // Load input layers in the order given; order decides both the
        // create-vs-append write mode and name collision resolution.
        let mut layers = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            match geojson::load_layer(input) {
                Ok(layer) => {
                    tracing::info!(
                        layer = %layer.name,
                        features = layer.feature_count(),
                        "Loaded input layer"
                    );
                    layers.push(layer);
                }
                Err(e) => {
                    tracing::error!(input = %input.display(), error = %e, "Failed to load input");
                    eprintln!("Failed to load {}: {e}", input.display());
                    return Ok(2);
                }
            }
        }

        let pipeline = ExportPipeline::new(&config.export);
        let feedback = ConsoleFeedback::with_cancel_flag(cancel_flag.clone());
        let output = self.output.clone();

        println!("Exporting {} layer(s) to {}", layers.len(), output.display());
        println!();

        // The pipeline is synchronous and blocking; keep it off the
        // async runtime's worker threads.
        let result = tokio::task::spawn_blocking(move || {
            pipeline.run(&layers, &output, &feedback)
        })
        .await?;

        match result {
            Ok(produced) => {
                println!();
                if cancel_flag.load(Ordering::Relaxed) {
                    println!("Export cancelled partway; {} contains the layers staged before cancellation", produced.display());
                } else {
                    println!("Export completed: {}", produced.display());
                }
                Ok(0)
            }
            Err(e @ MeridianError::InvalidInput(_)) => {
                tracing::error!(error = %e, "Export rejected");
                eprintln!("Export rejected: {e}");
                Ok(2)
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                if cancel_flag.load(Ordering::Relaxed) {
                    Ok(130)
                } else {
                    Ok(5)
                }
            }
        }
    }
}
