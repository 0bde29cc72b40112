//! Layer staging into the intermediate container
//!
//! The stager walks the ordered input layers and writes each into the
//! container through the layer-save service, resolving name collisions
//! deterministically and choosing the write mode by position: the first
//! layer creates (or overwrites) the container file, every later layer is
//! written into the existing file. Reversing that order would let later
//! layers wipe earlier ones.

use crate::adapters::traits::{LayerWriter, SaveOptions, WriteMode};
use crate::core::feedback::Feedback;
use crate::domain::{MeridianError, Result, VectorLayer};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Fallback base name for layers whose source name is empty
const UNNAMED_LAYER: &str = "layer";

/// Outcome of a staging pass
#[derive(Debug, Clone, Default)]
pub struct StagingSummary {
    /// Container-internal names assigned, in staging order
    pub layer_names: Vec<String>,

    /// Whether staging stopped early on a cancellation request
    pub canceled: bool,
}

/// Layer stager
pub struct LayerStager {
    writer: Arc<dyn LayerWriter>,
}

impl LayerStager {
    /// Create a stager over a layer-save service
    pub fn new(writer: Arc<dyn LayerWriter>) -> Self {
        Self { writer }
    }

    /// Write each layer into `container`, reporting progress after each
    ///
    /// Progress is `(index + 1) / total_steps` as an integer percentage,
    /// where `total_steps` is the layer count plus one; the trailing step
    /// is reserved for the conversion that follows staging.
    ///
    /// Cancellation is polled before each layer. When raised, staging
    /// stops silently; the caller decides what a partial container means.
    ///
    /// # Errors
    ///
    /// Returns [`MeridianError::Staging`] naming the offending layer's
    /// resolved container name if any single write fails. The half-written
    /// container is left in place; cleanup is the orchestrator's job.
    pub fn stage(
        &self,
        layers: &[VectorLayer],
        container: &Path,
        feedback: &dyn Feedback,
    ) -> Result<StagingSummary> {
        let total_steps = layers.len() + 1;
        let mut used_names: HashSet<String> = HashSet::new();
        let mut summary = StagingSummary::default();

        for (index, layer) in layers.iter().enumerate() {
            if feedback.is_canceled() {
                tracing::info!(
                    staged = summary.layer_names.len(),
                    remaining = layers.len() - index,
                    "Cancellation requested, stopping staging"
                );
                summary.canceled = true;
                break;
            }

            let layer_name = resolve_layer_name(&layer.name, &used_names);
            used_names.insert(layer_name.clone());

            if layer_name != layer.name {
                feedback.push_info(&format!(
                    "Layer name '{}' already used, staging as '{layer_name}'",
                    layer.name
                ));
            }
            feedback.push_info(&format!("Staging layer: {layer_name}"));

            let mode = if index == 0 {
                WriteMode::CreateOrOverwriteFile
            } else {
                WriteMode::CreateOrOverwriteLayer
            };

            self.writer
                .save_layer(layer, container, &layer_name, mode, &SaveOptions::default())
                .map_err(|e| {
                    feedback.push_info(&format!("Failed to stage layer '{layer_name}': {e}"));
                    MeridianError::Staging {
                        layer: layer_name.clone(),
                        message: e.to_string(),
                    }
                })?;

            tracing::debug!(
                layer = %layer_name,
                index,
                mode = ?mode,
                "Layer staged"
            );

            summary.layer_names.push(layer_name);
            feedback.set_progress(((index + 1) * 100 / total_steps) as u8);
        }

        Ok(summary)
    }
}

/// Resolve a collision-free container-internal name
///
/// Takes the original name unless it is already used; otherwise appends
/// `_1`, `_2`, ... and returns the first free candidate. Deterministic
/// given input order, including when source names collide with previously
/// suffixed names.
pub fn resolve_layer_name(original: &str, used: &HashSet<String>) -> String {
    let base = if original.is_empty() {
        UNNAMED_LAYER
    } else {
        original
    };

    if !used.contains(base) {
        return base.to_string();
    }

    let mut suffix = 1usize;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !used.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
