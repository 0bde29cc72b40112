// Meridian - multi-layer vector export to KML
// Copyright (c) 2025 Meridian Contributors
// Licensed under the MIT License

//! # Meridian - multi-layer vector export to KML
//!
//! Meridian exports multiple geospatial vector layers - each potentially
//! with a different geometry type and attribute schema - into a single
//! combined KML file. KML handles heterogeneous multi-layer input poorly,
//! so Meridian stages every layer into an intermediate multi-layer
//! container first and bulk-converts the container in one pass.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Staging** layers into a temporary multi-layer container with
//!   deterministic name collision resolution and create-vs-append ordering
//! - **Converting** the finished container into one KML file with
//!   two-dimensional geometry
//! - **Orchestrating** the run end to end: validation, container
//!   lifecycle, progress, cancellation and cleanup
//!
//! ## Architecture
//!
//! Meridian follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (staging, conversion, orchestration, feedback)
//! - [`adapters`] - Format integrations (container codec, KML, GeoJSON)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meridian::config::ExportConfig;
//! use meridian::core::feedback::NullFeedback;
//! use meridian::core::pipeline::ExportPipeline;
//! use meridian::domain::{GeometryType, VectorLayer};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let layers = vec![
//!         VectorLayer::new("parcels", GeometryType::Polygon),
//!         VectorLayer::new("parcels", GeometryType::Point),
//!     ];
//!
//!     let pipeline = ExportPipeline::new(&ExportConfig::default());
//!     let produced = pipeline.run(&layers, Path::new("combined.kml"), &NullFeedback)?;
//!
//!     println!("wrote {}", produced.display());
//!     Ok(())
//! }
//! ```
//!
//! Duplicate layer names are resolved deterministically: the two `parcels`
//! layers above land in the output as `parcels` and `parcels_1`.
//!
//! ## Error Handling
//!
//! Meridian uses the [`domain::MeridianError`] type for all errors:
//!
//! ```rust,no_run
//! use meridian::domain::MeridianError;
//!
//! fn example() -> Result<(), MeridianError> {
//!     let config = meridian::config::load_config("meridian.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Meridian uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(layer = "parcels", "Layer name already used");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
