//! Vector layer handle and attribute model
//!
//! A [`VectorLayer`] is the unit the export pipeline works on: a named
//! feature collection with an attribute schema. Layer names are not
//! guaranteed to be unique across an input set; the stager resolves
//! collisions when assigning container-internal names.

use crate::domain::geometry::{Geometry, GeometryType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Real,
    Boolean,
}

/// A field in a layer's attribute schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Null,
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Real(r) => write!(f, "{r}"),
            AttributeValue::Boolean(b) => write!(f, "{b}"),
            AttributeValue::Null => Ok(()),
        }
    }
}

/// A single feature: optional geometry plus attributes
///
/// Attributes are kept in a BTreeMap so serialized output is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Feature {
    /// Create a feature with a geometry and no attributes
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute value
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}

/// A source vector layer handle
///
/// Ownership stays with the caller for the duration of a pipeline run; the
/// pipeline only borrows layers and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorLayer {
    /// Human-readable layer name (not guaranteed unique across an input set)
    pub name: String,

    /// Declared geometry type of the layer
    pub geometry_type: GeometryType,

    /// Attribute schema
    pub fields: Vec<FieldDef>,

    /// Feature stream
    pub features: Vec<Feature>,
}

impl VectorLayer {
    /// Create an empty layer
    pub fn new(name: impl Into<String>, geometry_type: GeometryType) -> Self {
        Self {
            name: name.into(),
            geometry_type,
            fields: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Add a field to the schema
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldDef::new(name, field_type));
        self
    }

    /// Add a feature
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Number of features in the layer
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}
