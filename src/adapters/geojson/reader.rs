//! GeoJSON input reader
//!
//! Loads a GeoJSON FeatureCollection into a [`VectorLayer`]. This is the
//! host-side adapter feeding the export pipeline from the CLI: the layer
//! name comes from the file stem, the attribute schema is inferred from
//! the feature properties.
//!
//! Only FeatureCollections are accepted; reprojection is out of scope and
//! coordinates are taken as-is.

use crate::domain::layer::{AttributeValue, Feature, FieldDef, FieldType, VectorLayer};
use crate::domain::{Coord, Geometry, GeometryType, MeridianError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load a GeoJSON FeatureCollection as a vector layer
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid GeoJSON, or
/// is not a FeatureCollection.
pub fn load_layer(path: &Path) -> Result<VectorLayer> {
    let contents = fs::read_to_string(path)
        .map_err(|e| MeridianError::Io(format!("failed to read {}: {e}", path.display())))?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| {
        MeridianError::Serialization(format!("{} is not valid JSON: {e}", path.display()))
    })?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "layer".to_string());

    layer_from_value(&name, &value)
        .map_err(|e| MeridianError::InvalidInput(format!("{}: {e}", path.display())))
}

/// Build a vector layer from an already-parsed GeoJSON value
pub fn layer_from_value(name: &str, value: &Value) -> std::result::Result<VectorLayer, String> {
    if value.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err("expected a GeoJSON FeatureCollection".to_string());
    }

    let raw_features = value
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| "FeatureCollection has no features array".to_string())?;

    let mut features = Vec::with_capacity(raw_features.len());
    let mut fields: Vec<FieldDef> = Vec::new();
    let mut layer_type: Option<GeometryType> = None;

    for (index, raw) in raw_features.iter().enumerate() {
        let geometry = match raw.get("geometry") {
            Some(Value::Null) | None => None,
            Some(geom) => Some(
                parse_geometry(geom).map_err(|e| format!("feature {index}: {e}"))?,
            ),
        };

        if layer_type.is_none() {
            layer_type = geometry.as_ref().map(Geometry::geometry_type);
        }

        let mut feature = Feature {
            geometry,
            attributes: Default::default(),
        };

        if let Some(props) = raw.get("properties").and_then(Value::as_object) {
            for (key, prop) in props {
                let attr = parse_attribute(prop);
                if !fields.iter().any(|f| &f.name == key) {
                    if let Some(field_type) = field_type_of(&attr) {
                        fields.push(FieldDef::new(key.clone(), field_type));
                    }
                }
                feature.attributes.insert(key.clone(), attr);
            }
        }

        features.push(feature);
    }

    Ok(VectorLayer {
        name: name.to_string(),
        geometry_type: layer_type.unwrap_or(GeometryType::Point),
        fields,
        features,
    })
}

fn parse_geometry(value: &Value) -> std::result::Result<Geometry, String> {
    let geometry_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "geometry has no type".to_string())?;
    let coordinates = value
        .get("coordinates")
        .ok_or_else(|| "geometry has no coordinates".to_string())?;

    match geometry_type {
        "Point" => Ok(Geometry::Point(parse_coord(coordinates)?)),
        "LineString" => Ok(Geometry::LineString(parse_coords(coordinates)?)),
        "Polygon" => Ok(Geometry::Polygon(parse_rings(coordinates)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(parse_coords(coordinates)?)),
        "MultiLineString" => Ok(Geometry::MultiLineString(parse_rings(coordinates)?)),
        "MultiPolygon" => {
            let polygons = coordinates
                .as_array()
                .ok_or_else(|| "MultiPolygon coordinates must be an array".to_string())?
                .iter()
                .map(parse_rings)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(Geometry::MultiPolygon(polygons))
        }
        other => Err(format!("unsupported geometry type '{other}'")),
    }
}

fn parse_coord(value: &Value) -> std::result::Result<Coord, String> {
    let parts = value
        .as_array()
        .ok_or_else(|| "coordinate must be an array".to_string())?;
    if parts.len() < 2 {
        return Err("coordinate needs at least x and y".to_string());
    }

    let x = parts[0]
        .as_f64()
        .ok_or_else(|| "coordinate x must be a number".to_string())?;
    let y = parts[1]
        .as_f64()
        .ok_or_else(|| "coordinate y must be a number".to_string())?;

    Ok(match parts.get(2).and_then(Value::as_f64) {
        Some(z) => Coord::with_elevation(x, y, z),
        None => Coord::new(x, y),
    })
}

fn parse_coords(value: &Value) -> std::result::Result<Vec<Coord>, String> {
    value
        .as_array()
        .ok_or_else(|| "coordinate list must be an array".to_string())?
        .iter()
        .map(parse_coord)
        .collect()
}

fn parse_rings(value: &Value) -> std::result::Result<Vec<Vec<Coord>>, String> {
    value
        .as_array()
        .ok_or_else(|| "ring list must be an array".to_string())?
        .iter()
        .map(parse_coords)
        .collect()
}

fn parse_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(b) => AttributeValue::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                AttributeValue::Integer(i)
            } else {
                AttributeValue::Real(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => AttributeValue::String(s.clone()),
        // Nested structures are carried as their JSON text
        other => AttributeValue::String(other.to_string()),
    }
}

fn field_type_of(value: &AttributeValue) -> Option<FieldType> {
    match value {
        AttributeValue::String(_) => Some(FieldType::String),
        AttributeValue::Integer(_) => Some(FieldType::Integer),
        AttributeValue::Real(_) => Some(FieldType::Real),
        AttributeValue::Boolean(_) => Some(FieldType::Boolean),
        AttributeValue::Null => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_layer_names_after_file_stem() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("parcels.geojson");
        let collection = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [121.4, 31.2] },
                "properties": { "owner": "Li" }
            }]
        });
        fs::write(&path, collection.to_string()).unwrap();

        let layer = load_layer(&path).unwrap();
        assert_eq!(layer.name, "parcels");
        assert_eq!(layer.feature_count(), 1);
        assert_eq!(layer.geometry_type, GeometryType::Point);
    }

    #[test]
    fn test_non_feature_collection_is_rejected() {
        let value = json!({ "type": "Feature" });
        let result = layer_from_value("x", &value);
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_inferred_from_properties() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                    "properties": { "name": "a", "count": 3, "ratio": 0.5, "active": true }
                }
            ]
        });

        let layer = layer_from_value("pts", &value).unwrap();
        let types: Vec<(&str, FieldType)> = layer
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type))
            .collect();
        assert!(types.contains(&("name", FieldType::String)));
        assert!(types.contains(&("count", FieldType::Integer)));
        assert!(types.contains(&("ratio", FieldType::Real)));
        assert!(types.contains(&("active", FieldType::Boolean)));
    }

    #[test]
    fn test_three_dimensional_coordinates_preserved() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 30.0] },
                "properties": {}
            }]
        });

        let layer = layer_from_value("pts", &value).unwrap();
        let geom = layer.features[0].geometry.as_ref().unwrap();
        assert!(geom.is_three_dimensional());
    }

    #[test]
    fn test_multipolygon_parses() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                        [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]]
                    ]
                },
                "properties": {}
            }]
        });

        let layer = layer_from_value("areas", &value).unwrap();
        assert_eq!(layer.geometry_type, GeometryType::MultiPolygon);
    }

    #[test]
    fn test_feature_without_geometry_is_kept() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": null,
                "properties": { "note": "no shape" }
            }]
        });

        let layer = layer_from_value("notes", &value).unwrap();
        assert_eq!(layer.feature_count(), 1);
        assert!(layer.features[0].geometry.is_none());
    }
}
