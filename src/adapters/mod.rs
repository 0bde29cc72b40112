//! External format integrations for Meridian.
//!
//! This module provides the adapters around the core pipeline:
//!
//! - [`traits`] - Service abstractions the pipeline depends on
//! - [`container`] - Intermediate multi-layer container codec
//! - [`kml`] - KML output conversion
//! - [`geojson`] - GeoJSON input loading for the CLI
//!
//! # Design Pattern
//!
//! The pipeline never talks to a concrete format directly. It goes through
//! the [`traits::LayerWriter`] and [`traits::ContainerConverter`] traits so
//! tests can substitute recording or failing implementations, and so the
//! container codec and output format can evolve independently of the
//! staging logic.
//!
//! ```rust,no_run
//! use meridian::adapters::container::ContainerWriter;
//! use meridian::adapters::kml::KmlConverter;
//! use meridian::adapters::traits::{ContainerConverter, ConvertOptions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = KmlConverter::new();
//! converter.convert(
//!     Path::new("/tmp/staged_layers.mlc"),
//!     true,
//!     Path::new("/tmp/export.kml"),
//!     &ConvertOptions { force_2d: true },
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod geojson;
pub mod kml;
pub mod traits;
