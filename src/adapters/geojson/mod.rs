//! GeoJSON input format

pub mod reader;

pub use reader::{layer_from_value, load_layer};
