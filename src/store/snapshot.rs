//! JSON snapshot persistence for the in-memory store

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::{StoreError, StoreResult};
use crate::types::RankedEntry;

const SNAPSHOT_VERSION: u32 = 1;

/// One stored value, keyed by its rendered store key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub(super) enum SnapshotValue {
    Scalar(String),
    Ranking(Vec<RankedEntry>),
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    keys: BTreeMap<String, SnapshotValue>,
}

/// Reads a snapshot; a missing file is an empty store.
pub(super) fn load(path: &Path) -> StoreResult<BTreeMap<String, SnapshotValue>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let json = fs::read_to_string(path)?;
    let file: SnapshotFile = serde_json::from_str(&json)?;
    if file.version != SNAPSHOT_VERSION {
        return Err(StoreError::Snapshot {
            path: path.to_path_buf(),
            reason: format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                file.version
            ),
        });
    }
    Ok(file.keys)
}

/// Writes the snapshot through a temp file in the same directory and
/// renames it over `path`, so the file is either fully old or fully new.
pub(super) fn write(path: &Path, keys: BTreeMap<String, SnapshotValue>) -> StoreResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let file = SnapshotFile {
        version: SNAPSHOT_VERSION,
        keys,
    };
    let json = serde_json::to_vec_pretty(&file)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Snapshot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!("Wrote store snapshot to {}", path.display());
    Ok(())
}
