use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::models::VideoConsensus;

/// Write consensus results as pretty-printed JSON, creating parent directories.
pub fn write_results(path: &Path, results: &[VideoConsensus]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(results)?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write results to {}", path.display()))
}

pub fn read_results(path: &Path) -> Result<Vec<VideoConsensus>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read results from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse results from {}", path.display()))
}
