//! Bulk conversion of the staged container
//!
//! Thin step over the format-conversion service: converts every layer of
//! the populated container into the destination file, always forcing
//! two-dimensional output. The orchestrator verifies the container exists
//! before this step runs and verifies the destination exists after it.

use crate::adapters::traits::{ContainerConverter, ConvertOptions};
use crate::core::feedback::Feedback;
use crate::domain::{MeridianError, Result};
use std::path::Path;
use std::sync::Arc;

/// Format-conversion step of the pipeline
pub struct FormatConverter {
    service: Arc<dyn ContainerConverter>,
}

impl FormatConverter {
    /// Create a conversion step over a conversion service
    pub fn new(service: Arc<dyn ContainerConverter>) -> Self {
        Self { service }
    }

    /// Convert the full container into `destination`
    ///
    /// Runs to completion once started; cancellation is not polled here.
    ///
    /// # Errors
    ///
    /// Any service error is surfaced as [`MeridianError::Conversion`]
    /// carrying the underlying message.
    pub fn convert(
        &self,
        container: &Path,
        destination: &Path,
        feedback: &dyn Feedback,
    ) -> Result<()> {
        feedback.push_info("Converting staged container to KML...");

        let options = ConvertOptions { force_2d: true };
        self.service
            .convert(container, true, destination, &options)
            .map_err(|e| {
                feedback.push_info(&format!("Conversion failed: {e}"));
                match e {
                    MeridianError::Conversion(_) => e,
                    other => MeridianError::Conversion(other.to_string()),
                }
            })?;

        tracing::info!(
            container = %container.display(),
            destination = %destination.display(),
            "Container converted"
        );
        Ok(())
    }
}
