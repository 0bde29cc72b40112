//! Domain models and types for Meridian.
//!
//! This module contains the core domain models and business rules shared by
//! the pipeline and the adapters.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Layer handles** ([`VectorLayer`], [`Feature`], [`FieldDef`])
//! - **Geometry model** ([`Geometry`], [`Coord`], [`GeometryType`])
//! - **Error types** ([`MeridianError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MeridianError>`]:
//!
//! ```rust
//! use meridian::domain::{MeridianError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(MeridianError::InvalidInput("no input layers".to_string()))
//! }
//! ```

pub mod errors;
pub mod geometry;
pub mod layer;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::MeridianError;
pub use geometry::{Coord, Geometry, GeometryType};
pub use layer::{AttributeValue, Feature, FieldDef, FieldType, VectorLayer};
pub use result::Result;
