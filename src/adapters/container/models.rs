//! Intermediate container document model
//!
//! The container is a single JSON document holding every staged layer. Its
//! on-disk schema is implementation-internal with no external compatibility
//! guarantee: the file lives in the temp area and is deleted at the end of
//! every pipeline run.

use crate::domain::layer::{Feature, FieldDef};
use crate::domain::GeometryType;
use serde::{Deserialize, Serialize};

/// Container format version, bumped on incompatible schema changes
pub const CONTAINER_FORMAT_VERSION: u32 = 1;

/// One staged layer inside the container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerLayer {
    /// Container-internal layer name (collision-free within the document)
    pub name: String,

    /// Declared geometry type of the layer
    pub geometry_type: GeometryType,

    /// Attribute schema
    pub fields: Vec<FieldDef>,

    /// Features, in source order
    pub features: Vec<Feature>,
}

/// The full container document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerDocument {
    /// Schema version of this document
    pub format_version: u32,

    /// Staged layers, in staging order
    pub layers: Vec<ContainerLayer>,
}

impl ContainerDocument {
    /// Create an empty document at the current format version
    pub fn new() -> Self {
        Self {
            format_version: CONTAINER_FORMAT_VERSION,
            layers: Vec::new(),
        }
    }

    /// Insert a layer, replacing any existing layer with the same name
    pub fn upsert_layer(&mut self, layer: ContainerLayer) {
        match self.layers.iter_mut().find(|l| l.name == layer.name) {
            Some(existing) => *existing = layer,
            None => self.layers.push(layer),
        }
    }

    /// Look up a layer by name
    pub fn layer(&self, name: &str) -> Option<&ContainerLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Names of all layers, in staging order
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }
}

impl Default for ContainerDocument {
    fn default() -> Self {
        Self::new()
    }
}
