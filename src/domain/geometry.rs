//! Vector geometry types
//!
//! Geometries pass through the export pipeline unchanged except for
//! dimensionality flattening: KML output is always two-dimensional, so the
//! converter drops elevations via [`Geometry::flattened`].

use serde::{Deserialize, Serialize};

/// A single coordinate, optionally carrying an elevation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,

    /// Elevation, present only for three-dimensional source data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Coord {
    /// Create a two-dimensional coordinate
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Create a three-dimensional coordinate
    pub fn with_elevation(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Return this coordinate with the elevation dropped
    pub fn flattened(self) -> Self {
        Self { z: None, ..self }
    }
}

/// Geometry type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
        };
        write!(f, "{name}")
    }
}

/// A vector geometry
///
/// Polygons are stored as rings (outer ring first, then holes), matching
/// the usual simple-features layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
    Polygon(Vec<Vec<Coord>>),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
}

impl Geometry {
    /// The type tag of this geometry
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }

    /// Whether any coordinate carries an elevation
    pub fn is_three_dimensional(&self) -> bool {
        fn any_z(coords: &[Coord]) -> bool {
            coords.iter().any(|c| c.z.is_some())
        }

        match self {
            Geometry::Point(c) => c.z.is_some(),
            Geometry::LineString(cs) | Geometry::MultiPoint(cs) => any_z(cs),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                rings.iter().any(|r| any_z(r))
            }
            Geometry::MultiPolygon(polys) => {
                polys.iter().any(|rings| rings.iter().any(|r| any_z(r)))
            }
        }
    }

    /// Return this geometry with every elevation dropped
    pub fn flattened(&self) -> Geometry {
        fn flat(coords: &[Coord]) -> Vec<Coord> {
            coords.iter().map(|c| c.flattened()).collect()
        }

        match self {
            Geometry::Point(c) => Geometry::Point(c.flattened()),
            Geometry::LineString(cs) => Geometry::LineString(flat(cs)),
            Geometry::MultiPoint(cs) => Geometry::MultiPoint(flat(cs)),
            Geometry::Polygon(rings) => {
                Geometry::Polygon(rings.iter().map(|r| flat(r)).collect())
            }
            Geometry::MultiLineString(lines) => {
                Geometry::MultiLineString(lines.iter().map(|l| flat(l)).collect())
            }
            Geometry::MultiPolygon(polys) => Geometry::MultiPolygon(
                polys
                    .iter()
                    .map(|rings| rings.iter().map(|r| flat(r)).collect())
                    .collect(),
            ),
        }
    }
}
