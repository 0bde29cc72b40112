// Meridian - multi-layer vector export to KML
// Copyright (c) 2025 Meridian Contributors
// Licensed under the MIT License

use clap::Parser;
use meridian::cli::{Cli, Commands};
use meridian::config::LoggingConfig;
use meridian::logging::init_logging;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging with console-only config (file logging is driven
    // by the configuration file inside the commands that need it)
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    let _guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Meridian - multi-layer vector export to KML"
    );

    // Shared cancellation flag, raised by the signal handler and polled by
    // the stager at layer boundaries
    let cancel_flag = Arc::new(AtomicBool::new(false));

    let signal_flag = cancel_flag.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("Failed to create SIGTERM handler");

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), requesting cancellation...");
                    println!("\nCancellation requested, finishing current layer...");
                    signal_flag.store(true, Ordering::Relaxed);
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, requesting cancellation...");
                    println!("\nCancellation requested, finishing current layer...");
                    signal_flag.store(true, Ordering::Relaxed);
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), requesting cancellation...");
                println!("\nCancellation requested, finishing current layer...");
                signal_flag.store(true, Ordering::Relaxed);
            }
        }
    });

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, cancel_flag).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, cancel_flag: Arc<AtomicBool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config, cancel_flag).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute(&cli.config).await,
    }
}
