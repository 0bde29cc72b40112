//! Service abstraction traits
//!
//! This module defines the traits the pipeline depends on for writing
//! layers into the intermediate container and for converting the finished
//! container into the output format. Both services are blocking calls on
//! the caller's thread; each layer write depends on the container state
//! left by the previous one, so the pipeline serializes them.

use crate::domain::{Result, VectorLayer};
use std::path::Path;

/// What to do with the container file when saving a layer
///
/// The first layer of a run creates (or overwrites) the container file;
/// every subsequent layer is written into the existing file. Reversing
/// this order would make later layers wipe earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the container file, replacing any existing file
    CreateOrOverwriteFile,
    /// Create or overwrite a single layer inside the existing file
    CreateOrOverwriteLayer,
}

/// Format-specific option strings passed to the layer-save service
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Datasource-level creation options
    pub datasource_options: Vec<String>,
    /// Layer-level creation options
    pub layer_options: Vec<String>,
}

/// Options passed to the format-conversion service
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Force two-dimensional output, dropping elevations
    ///
    /// KML output always sets this; the target format does not handle
    /// three-dimensional source geometry well.
    pub force_2d: bool,
}

/// Layer-save service
///
/// Writes one layer into a multi-layer container file. Implementations
/// signal failure through [`crate::domain::MeridianError`]; the pipeline
/// wraps those failures with the offending layer's resolved name.
pub trait LayerWriter: Send + Sync {
    /// Write `layer` into `container` under `layer_name`
    ///
    /// # Errors
    ///
    /// Returns an error if the layer cannot be written, including the case
    /// where `mode` is [`WriteMode::CreateOrOverwriteLayer`] but the
    /// container file does not exist.
    fn save_layer(
        &self,
        layer: &VectorLayer,
        container: &Path,
        layer_name: &str,
        mode: WriteMode,
        options: &SaveOptions,
    ) -> Result<()>;
}

/// Format-conversion service
///
/// Bulk-converts a multi-layer container into the destination format.
/// Atomicity of the destination write is the implementation's concern;
/// the pipeline only verifies that the destination exists afterwards.
pub trait ContainerConverter: Send + Sync {
    /// Convert `source` into `destination`
    ///
    /// # Arguments
    ///
    /// * `source` - Path of the populated multi-layer container
    /// * `convert_all_layers` - Convert every layer, not just the first
    /// * `destination` - Output file path
    /// * `options` - Conversion options (dimensionality)
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be read or the destination
    /// cannot be produced.
    fn convert(
        &self,
        source: &Path,
        convert_all_layers: bool,
        destination: &Path,
        options: &ConvertOptions,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_mode_equality() {
        assert_eq!(WriteMode::CreateOrOverwriteFile, WriteMode::CreateOrOverwriteFile);
        assert_ne!(
            WriteMode::CreateOrOverwriteFile,
            WriteMode::CreateOrOverwriteLayer
        );
    }

    #[test]
    fn test_default_options_are_empty() {
        let save = SaveOptions::default();
        assert!(save.datasource_options.is_empty());
        assert!(save.layer_options.is_empty());

        let convert = ConvertOptions::default();
        assert!(!convert.force_2d);
    }
}
