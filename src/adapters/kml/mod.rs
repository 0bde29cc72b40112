//! KML output format
//!
//! Default implementation of the format-conversion service: reads the
//! intermediate container and writes one combined KML file.

pub mod writer;

pub use writer::KmlConverter;
