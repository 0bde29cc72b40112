//! Container document reader

use crate::adapters::container::models::{ContainerDocument, CONTAINER_FORMAT_VERSION};
use crate::domain::{MeridianError, Result};
use std::fs;
use std::path::Path;

/// Read and validate a container document from disk
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid container
/// document, or was written at an unsupported format version.
pub fn read_container(path: &Path) -> Result<ContainerDocument> {
    let contents = fs::read_to_string(path).map_err(|e| {
        MeridianError::Container(format!("failed to read container {}: {e}", path.display()))
    })?;

    let document: ContainerDocument = serde_json::from_str(&contents).map_err(|e| {
        MeridianError::Container(format!(
            "container {} is not a valid document: {e}",
            path.display()
        ))
    })?;

    if document.format_version != CONTAINER_FORMAT_VERSION {
        return Err(MeridianError::Container(format!(
            "unsupported container format version {} (expected {})",
            document.format_version, CONTAINER_FORMAT_VERSION
        )));
    }

    Ok(document)
}
