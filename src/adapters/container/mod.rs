//! Intermediate multi-layer container
//!
//! The staging half of the pipeline writes every input layer into one
//! container file before the bulk conversion to KML. This module provides
//! the default container codec: a JSON document with one entry per layer.
//!
//! The container is a scratch artifact. It lives in the temp area, exactly
//! one pipeline run owns it at a time, and it is deleted at the end of
//! every run.

pub mod models;
pub mod reader;
pub mod writer;

pub use models::{ContainerDocument, ContainerLayer, CONTAINER_FORMAT_VERSION};
pub use reader::read_container;
pub use writer::ContainerWriter;
