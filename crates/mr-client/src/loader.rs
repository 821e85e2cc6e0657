//! Loading exported records from JSON.

use crate::types::{Discussion, MergeRequestChanges};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a JSON array of discussions.
pub fn read_discussions(reader: impl Read) -> Result<Vec<Discussion>> {
    serde_json::from_reader(reader).context("Failed to parse discussions JSON")
}

/// Parse a merge request changes object.
pub fn read_changes(reader: impl Read) -> Result<MergeRequestChanges> {
    serde_json::from_reader(reader).context("Failed to parse changes JSON")
}

pub fn load_discussions(path: impl AsRef<Path>) -> Result<Vec<Discussion>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open discussions file: {}", path.display()))?;
    let discussions = read_discussions(BufReader::new(file))
        .with_context(|| format!("Failed to load discussions from {}", path.display()))?;

    log::debug!("Loaded {} discussion(s) from {:?}", discussions.len(), path);
    Ok(discussions)
}

pub fn load_changes(path: impl AsRef<Path>) -> Result<MergeRequestChanges> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open changes file: {}", path.display()))?;
    let changes = read_changes(BufReader::new(file))
        .with_context(|| format!("Failed to load changes from {}", path.display()))?;

    log::debug!(
        "Loaded {} change(s) at {} from {:?}",
        changes.changes.len(),
        changes.sha,
        path
    );
    Ok(changes)
}
