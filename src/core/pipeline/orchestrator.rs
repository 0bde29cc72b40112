//! Export pipeline orchestration
//!
//! Owns the end-to-end sequence: validate inputs, prepare a clean slate
//! for the intermediate container, stage every layer, verify the container,
//! convert it to KML, verify the output, and delete the container on every
//! exit path. The container lifetime is held by a scoped guard so cleanup
//! runs for success, failure and cancellation alike; a failed delete is
//! logged as a warning and never replaces the primary outcome.

use crate::adapters::container::ContainerWriter;
use crate::adapters::kml::KmlConverter;
use crate::adapters::traits::{ContainerConverter, LayerWriter};
use crate::config::ExportConfig;
use crate::core::feedback::Feedback;
use crate::core::pipeline::converter::FormatConverter;
use crate::core::pipeline::stager::LayerStager;
use crate::domain::{MeridianError, Result, VectorLayer};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Scoped lifetime of the temporary container file
///
/// Created at PREPARE_CONTAINER after clearing any stale leftover from an
/// aborted prior run; the actual file appears when the first layer is
/// written. Dropping the guard deletes the file best-effort.
struct TempContainer {
    path: PathBuf,
}

impl TempContainer {
    fn prepare(path: PathBuf, feedback: &dyn Feedback) -> Result<Self> {
        if path.exists() {
            feedback.push_info(&format!(
                "Removing stale container from a previous run: {}",
                path.display()
            ));
            fs::remove_file(&path).map_err(|e| {
                MeridianError::Io(format!(
                    "failed to remove stale container {}: {e}",
                    path.display()
                ))
            })?;
        }
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempContainer {
    fn drop(&mut self) {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Temporary container already gone");
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Deleted temporary container");
            }
            Err(e) => {
                // Never escalated; the primary outcome stands.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to delete temporary container"
                );
            }
        }
    }
}

/// Export pipeline
///
/// The single boundary operation exposed to the host environment: an
/// ordered list of layer handles plus a destination path in, the produced
/// KML path or one typed failure out.
pub struct ExportPipeline {
    stager: LayerStager,
    converter: FormatConverter,
    temp_dir: PathBuf,
    container_file_name: String,
}

impl ExportPipeline {
    /// Create a pipeline with the default container and KML services
    pub fn new(config: &ExportConfig) -> Self {
        Self::with_services(
            Arc::new(ContainerWriter::new()),
            Arc::new(KmlConverter::new()),
            config.resolved_temp_dir(),
            config.container_file_name.clone(),
        )
    }

    /// Create a pipeline over explicit services
    ///
    /// Used by tests to substitute recording or failing implementations.
    pub fn with_services(
        writer: Arc<dyn LayerWriter>,
        converter: Arc<dyn ContainerConverter>,
        temp_dir: PathBuf,
        container_file_name: String,
    ) -> Self {
        Self {
            stager: LayerStager::new(writer),
            converter: FormatConverter::new(converter),
            temp_dir,
            container_file_name,
        }
    }

    /// Run the full export
    ///
    /// # Errors
    ///
    /// - [`MeridianError::InvalidInput`] for an empty layer list or empty
    ///   output path, before any filesystem access
    /// - [`MeridianError::Staging`] when a layer write fails
    /// - [`MeridianError::Integrity`] when the container is missing after
    ///   staging or the output is missing after conversion
    /// - [`MeridianError::Conversion`] when the conversion service fails
    pub fn run(
        &self,
        layers: &[VectorLayer],
        output: &Path,
        feedback: &dyn Feedback,
    ) -> Result<PathBuf> {
        // VALIDATE_INPUTS
        if layers.is_empty() {
            return Err(MeridianError::InvalidInput(
                "no input layers provided".to_string(),
            ));
        }
        if output.as_os_str().is_empty() {
            return Err(MeridianError::InvalidInput(
                "no output path specified".to_string(),
            ));
        }

        feedback.push_info(&format!(
            "Exporting {} layer(s) to {}",
            layers.len(),
            output.display()
        ));

        if output.exists() {
            feedback.push_info(&format!(
                "Output file already exists and will be replaced: {}",
                output.display()
            ));
            fs::remove_file(output).map_err(|e| {
                MeridianError::Io(format!(
                    "failed to remove existing output {}: {e}",
                    output.display()
                ))
            })?;
        }

        // PREPARE_CONTAINER; the guard's Drop is CLEANUP on every path out
        let container_path = self.temp_dir.join(&self.container_file_name);
        feedback.push_info(&format!(
            "Staging layers into temporary container: {}",
            container_path.display()
        ));
        let container = TempContainer::prepare(container_path, feedback)?;

        // STAGE_LAYERS
        let summary = self.stager.stage(layers, container.path(), feedback)?;
        if summary.canceled {
            feedback.push_info("Export canceled during staging");
        }

        // VERIFY_CONTAINER; also covers cancellation before any layer was
        // written and staging that silently produced nothing
        if !container.path().exists() {
            feedback.push_info(&format!(
                "Staging produced no container: {}",
                container.path().display()
            ));
            return Err(MeridianError::Integrity {
                expected: container.path().to_path_buf(),
            });
        }

        tracing::info!(
            staged = summary.layer_names.len(),
            container = %container.path().display(),
            "All layers staged"
        );

        // CONVERT
        self.converter.convert(container.path(), output, feedback)?;

        // VERIFY_OUTPUT
        if !output.exists() {
            feedback.push_info(&format!(
                "Conversion reported success but produced no output: {}",
                output.display()
            ));
            return Err(MeridianError::Integrity {
                expected: output.to_path_buf(),
            });
        }

        feedback.set_progress(100);
        feedback.push_info(&format!(
            "Exported {} layer(s) to {}",
            summary.layer_names.len(),
            output.display()
        ));

        Ok(output.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::traits::{ConvertOptions, SaveOptions, WriteMode};
    use crate::core::feedback::NullFeedback;
    use crate::domain::GeometryType;
    use tempfile::TempDir;

    fn layer(name: &str) -> VectorLayer {
        VectorLayer::new(name, GeometryType::Point)
    }

    fn default_pipeline(temp: &TempDir) -> ExportPipeline {
        ExportPipeline::with_services(
            Arc::new(ContainerWriter::new()),
            Arc::new(KmlConverter::new()),
            temp.path().to_path_buf(),
            "staged_layers.mlc".to_string(),
        )
    }

    /// Writes the container normally but fails on a chosen layer name
    struct FailingWriter {
        inner: ContainerWriter,
        fail_on: String,
    }

    impl LayerWriter for FailingWriter {
        fn save_layer(
            &self,
            layer: &VectorLayer,
            container: &Path,
            layer_name: &str,
            mode: WriteMode,
            options: &SaveOptions,
        ) -> Result<()> {
            if layer_name == self.fail_on {
                return Err(MeridianError::Container("write refused".to_string()));
            }
            self.inner
                .save_layer(layer, container, layer_name, mode, options)
        }
    }

    /// Reports success without producing any destination file
    struct SilentConverter;

    impl ContainerConverter for SilentConverter {
        fn convert(
            &self,
            _source: &Path,
            _convert_all_layers: bool,
            _destination: &Path,
            _options: &ConvertOptions,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_layer_list_fails_before_filesystem_access() {
        let temp = TempDir::new().unwrap();
        let pipeline = default_pipeline(&temp);
        let output = temp.path().join("out.kml");

        let err = pipeline.run(&[], &output, &NullFeedback).unwrap_err();
        assert!(matches!(err, MeridianError::InvalidInput(_)));
        assert!(!temp.path().join("staged_layers.mlc").exists());
    }

    #[test]
    fn test_empty_output_path_is_invalid() {
        let temp = TempDir::new().unwrap();
        let pipeline = default_pipeline(&temp);

        let err = pipeline
            .run(&[layer("roads")], Path::new(""), &NullFeedback)
            .unwrap_err();
        assert!(matches!(err, MeridianError::InvalidInput(_)));
    }

    #[test]
    fn test_successful_run_returns_output_and_cleans_container() {
        let temp = TempDir::new().unwrap();
        let pipeline = default_pipeline(&temp);
        let output = temp.path().join("out.kml");

        let produced = pipeline
            .run(&[layer("roads"), layer("rivers")], &output, &NullFeedback)
            .unwrap();

        assert_eq!(produced, output);
        assert!(output.exists());
        assert!(!temp.path().join("staged_layers.mlc").exists());
    }

    #[test]
    fn test_stale_container_is_cleared_before_staging() {
        let temp = TempDir::new().unwrap();
        let stale = temp.path().join("staged_layers.mlc");
        fs::write(&stale, "leftover from a crashed run").unwrap();

        let pipeline = default_pipeline(&temp);
        let output = temp.path().join("out.kml");

        pipeline
            .run(&[layer("roads")], &output, &NullFeedback)
            .unwrap();

        assert!(output.exists());
        assert!(!stale.exists());
    }

    #[test]
    fn test_staging_failure_cleans_up_half_written_container() {
        let temp = TempDir::new().unwrap();
        let pipeline = ExportPipeline::with_services(
            Arc::new(FailingWriter {
                inner: ContainerWriter::new(),
                fail_on: "b".to_string(),
            }),
            Arc::new(KmlConverter::new()),
            temp.path().to_path_buf(),
            "staged_layers.mlc".to_string(),
        );
        let output = temp.path().join("out.kml");

        let err = pipeline
            .run(&[layer("a"), layer("b"), layer("c")], &output, &NullFeedback)
            .unwrap_err();

        match err {
            MeridianError::Staging { layer, .. } => assert_eq!(layer, "b"),
            other => panic!("expected staging error, got {other}"),
        }
        assert!(!temp.path().join("staged_layers.mlc").exists());
        assert!(!output.exists());
    }

    #[test]
    fn test_conversion_without_output_is_integrity_failure() {
        let temp = TempDir::new().unwrap();
        let pipeline = ExportPipeline::with_services(
            Arc::new(ContainerWriter::new()),
            Arc::new(SilentConverter),
            temp.path().to_path_buf(),
            "staged_layers.mlc".to_string(),
        );
        let output = temp.path().join("out.kml");

        let err = pipeline
            .run(&[layer("roads")], &output, &NullFeedback)
            .unwrap_err();

        match err {
            MeridianError::Integrity { expected } => assert_eq!(expected, output),
            other => panic!("expected integrity error, got {other}"),
        }
        assert!(!temp.path().join("staged_layers.mlc").exists());
    }

    #[test]
    fn test_existing_output_is_replaced() {
        let temp = TempDir::new().unwrap();
        let pipeline = default_pipeline(&temp);
        let output = temp.path().join("out.kml");
        fs::write(&output, "previous export").unwrap();

        pipeline
            .run(&[layer("roads")], &output, &NullFeedback)
            .unwrap();

        let contents = fs::read_to_string(&output).unwrap();
        assert!(contents.contains("<kml"));
    }
}
