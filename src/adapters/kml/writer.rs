//! KML conversion service
//!
//! Implements [`ContainerConverter`] by reading the intermediate container
//! and emitting a single KML document: one `Folder` per layer, one
//! `Placemark` per feature, attributes carried as `ExtendedData`. When the
//! force-2D option is set every geometry is flattened before rendering,
//! since KML consumers handle three-dimensional source data poorly.

use crate::adapters::container::models::ContainerLayer;
use crate::adapters::container::reader::read_container;
use crate::adapters::traits::{ContainerConverter, ConvertOptions};
use crate::domain::{Coord, Feature, Geometry, MeridianError, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const KML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
     <kml xmlns=\"http://www.opengis.net/kml/2.2\">\n";

/// KML format-conversion service
#[derive(Debug, Default)]
pub struct KmlConverter;

impl KmlConverter {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerConverter for KmlConverter {
    fn convert(
        &self,
        source: &Path,
        convert_all_layers: bool,
        destination: &Path,
        options: &ConvertOptions,
    ) -> Result<()> {
        let document = read_container(source)?;

        let layers: &[ContainerLayer] = if convert_all_layers {
            &document.layers
        } else {
            // Single-layer mode mirrors converters that default to the
            // first layer of a multi-layer source.
            &document.layers[..document.layers.len().min(1)]
        };

        let document_name = destination
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "export".to_string());

        let kml = render_kml(&document_name, layers, options.force_2d);

        fs::write(destination, kml).map_err(|e| {
            MeridianError::Conversion(format!(
                "failed to write KML output {}: {e}",
                destination.display()
            ))
        })?;

        tracing::debug!(
            source = %source.display(),
            destination = %destination.display(),
            layers = layers.len(),
            force_2d = options.force_2d,
            "Converted container to KML"
        );

        Ok(())
    }
}

fn render_kml(document_name: &str, layers: &[ContainerLayer], force_2d: bool) -> String {
    let mut out = String::from(KML_HEADER);
    out.push_str("  <Document>\n");
    let _ = writeln!(out, "    <name>{}</name>", escape_xml(document_name));

    for layer in layers {
        out.push_str("    <Folder>\n");
        let _ = writeln!(out, "      <name>{}</name>", escape_xml(&layer.name));
        for feature in &layer.features {
            render_placemark(&mut out, feature, force_2d);
        }
        out.push_str("    </Folder>\n");
    }

    out.push_str("  </Document>\n</kml>\n");
    out
}

fn render_placemark(out: &mut String, feature: &Feature, force_2d: bool) {
    out.push_str("      <Placemark>\n");

    // A "name" attribute becomes the placemark label and is left out of
    // the ExtendedData block below.
    if let Some(name) = feature.attributes.get("name") {
        let _ = writeln!(out, "        <name>{}</name>", escape_xml(&name.to_string()));
    }

    let extended: Vec<_> = feature
        .attributes
        .iter()
        .filter(|(key, _)| key.as_str() != "name")
        .collect();
    if !extended.is_empty() {
        out.push_str("        <ExtendedData>\n");
        for (key, value) in extended {
            let _ = writeln!(
                out,
                "          <Data name=\"{}\"><value>{}</value></Data>",
                escape_xml(key),
                escape_xml(&value.to_string())
            );
        }
        out.push_str("        </ExtendedData>\n");
    }

    if let Some(geometry) = &feature.geometry {
        let geometry = if force_2d {
            geometry.flattened()
        } else {
            geometry.clone()
        };
        render_geometry(out, &geometry, 8);
    }

    out.push_str("      </Placemark>\n");
}

fn render_geometry(out: &mut String, geometry: &Geometry, indent: usize) {
    let pad = " ".repeat(indent);
    match geometry {
        Geometry::Point(coord) => {
            let _ = writeln!(
                out,
                "{pad}<Point><coordinates>{}</coordinates></Point>",
                coordinate(coord)
            );
        }
        Geometry::LineString(coords) => {
            let _ = writeln!(
                out,
                "{pad}<LineString><coordinates>{}</coordinates></LineString>",
                coordinate_list(coords)
            );
        }
        Geometry::Polygon(rings) => render_polygon(out, rings, indent),
        Geometry::MultiPoint(coords) => {
            let _ = writeln!(out, "{pad}<MultiGeometry>");
            for coord in coords {
                render_geometry(out, &Geometry::Point(*coord), indent + 2);
            }
            let _ = writeln!(out, "{pad}</MultiGeometry>");
        }
        Geometry::MultiLineString(lines) => {
            let _ = writeln!(out, "{pad}<MultiGeometry>");
            for line in lines {
                render_geometry(out, &Geometry::LineString(line.clone()), indent + 2);
            }
            let _ = writeln!(out, "{pad}</MultiGeometry>");
        }
        Geometry::MultiPolygon(polygons) => {
            let _ = writeln!(out, "{pad}<MultiGeometry>");
            for rings in polygons {
                render_polygon(out, rings, indent + 2);
            }
            let _ = writeln!(out, "{pad}</MultiGeometry>");
        }
    }
}

fn render_polygon(out: &mut String, rings: &[Vec<Coord>], indent: usize) {
    let pad = " ".repeat(indent);
    let _ = writeln!(out, "{pad}<Polygon>");
    for (i, ring) in rings.iter().enumerate() {
        let boundary = if i == 0 {
            "outerBoundaryIs"
        } else {
            "innerBoundaryIs"
        };
        let _ = writeln!(
            out,
            "{pad}  <{boundary}><LinearRing><coordinates>{}</coordinates></LinearRing></{boundary}>",
            coordinate_list(ring)
        );
    }
    let _ = writeln!(out, "{pad}</Polygon>");
}

/// Render one coordinate as `lon,lat` or `lon,lat,alt`
fn coordinate(coord: &Coord) -> String {
    match coord.z {
        Some(z) => format!("{},{},{}", coord.x, coord.y, z),
        None => format!("{},{}", coord.x, coord.y),
    }
}

fn coordinate_list(coords: &[Coord]) -> String {
    coords
        .iter()
        .map(coordinate)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Minimal XML text/attribute escaping
fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
