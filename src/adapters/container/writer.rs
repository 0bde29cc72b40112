//! Container layer-save service
//!
//! Implements [`LayerWriter`] over the internal JSON container document.
//! Create-file mode starts a fresh document; append mode loads the existing
//! file, upserts the layer, and writes the document back. Append mode on a
//! missing file is an error rather than an implicit create, so the
//! stager's ordering contract (first layer creates, later layers append)
//! stays observable.

use crate::adapters::container::models::{ContainerDocument, ContainerLayer};
use crate::adapters::container::reader;
use crate::adapters::traits::{LayerWriter, SaveOptions, WriteMode};
use crate::domain::{MeridianError, Result, VectorLayer};
use std::fs;
use std::path::Path;

/// Layer-save service writing into the internal JSON container
#[derive(Debug, Default)]
pub struct ContainerWriter;

impl ContainerWriter {
    pub fn new() -> Self {
        Self
    }

    fn write_document(&self, container: &Path, document: &ContainerDocument) -> Result<()> {
        let json = serde_json::to_string(document)?;
        fs::write(container, json).map_err(|e| {
            MeridianError::Container(format!(
                "failed to write container {}: {e}",
                container.display()
            ))
        })
    }
}

impl LayerWriter for ContainerWriter {
    fn save_layer(
        &self,
        layer: &VectorLayer,
        container: &Path,
        layer_name: &str,
        mode: WriteMode,
        _options: &SaveOptions,
    ) -> Result<()> {
        if layer_name.is_empty() {
            return Err(MeridianError::Container(
                "layer name must not be empty".to_string(),
            ));
        }

        let mut document = match mode {
            WriteMode::CreateOrOverwriteFile => ContainerDocument::new(),
            WriteMode::CreateOrOverwriteLayer => {
                if !container.exists() {
                    return Err(MeridianError::Container(format!(
                        "cannot append layer '{layer_name}': container {} does not exist",
                        container.display()
                    )));
                }
                reader::read_container(container)?
            }
        };

        document.upsert_layer(ContainerLayer {
            name: layer_name.to_string(),
            geometry_type: layer.geometry_type,
            fields: layer.fields.clone(),
            features: layer.features.clone(),
        });

        self.write_document(container, &document)?;

        tracing::debug!(
            layer = %layer_name,
            features = layer.feature_count(),
            container = %container.display(),
            mode = ?mode,
            "Saved layer to container"
        );

        Ok(())
    }
}
