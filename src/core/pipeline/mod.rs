//! Staging-and-conversion pipeline
//!
//! This module provides the core export logic for Meridian, including:
//! - Layer staging with deterministic name collision resolution
//! - Bulk conversion of the staged container to KML
//! - End-to-end orchestration and container lifecycle

pub mod converter;
pub mod orchestrator;
pub mod stager;

pub use converter::FormatConverter;
pub use orchestrator::ExportPipeline;
pub use stager::{resolve_layer_name, LayerStager, StagingSummary};
