//! Core business logic for Meridian.
//!
//! This module contains the staging-and-conversion pipeline and its
//! feedback surface.
//!
//! # Modules
//!
//! - [`pipeline`] - Staging, conversion and orchestration
//! - [`feedback`] - Progress reporting and cooperative cancellation
//!
//! # Export Workflow
//!
//! A run moves through a fixed, linear sequence:
//!
//! 1. **Validate**: reject an empty layer list or missing output path
//! 2. **Prepare**: clear any stale temporary container
//! 3. **Stage**: write each layer into the container, resolving name
//!    collisions, reporting progress, polling cancellation
//! 4. **Verify**: the container must exist after staging
//! 5. **Convert**: bulk-convert every container layer to KML (2D)
//! 6. **Verify**: the output file must exist after conversion
//! 7. **Cleanup**: delete the container, best-effort, on every exit path
//!
//! # Example
//!
//! ```rust,no_run
//! use meridian::config::ExportConfig;
//! use meridian::core::feedback::NullFeedback;
//! use meridian::core::pipeline::ExportPipeline;
//! use meridian::domain::{GeometryType, VectorLayer};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = ExportPipeline::new(&ExportConfig::default());
//! let layers = vec![VectorLayer::new("roads", GeometryType::LineString)];
//!
//! let produced = pipeline.run(&layers, Path::new("export.kml"), &NullFeedback)?;
//! println!("wrote {}", produced.display());
//! # Ok(())
//! # }
//! ```

pub mod feedback;
pub mod pipeline;
