//! JSON file adapter for the snapshot store port.
//!
//! Stores the whole rotation state as one pretty-printed JSON document,
//! the same logical document the export operation hands to callers.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::snapshot::StateSnapshot;
use crate::ports::{SnapshotStore, SnapshotStoreError};

/// `SnapshotStore` backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given file path. The file need not exist
    /// yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<StateSnapshot>, SnapshotStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| SnapshotStoreError::Io(e.to_string()))?;
        let snapshot = serde_json::from_str(&contents)
            .map_err(|e| SnapshotStoreError::DeserializationFailed(e.to_string()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &StateSnapshot) -> Result<(), SnapshotStoreError> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SnapshotStoreError::SerializationFailed(e.to_string()))?;

        // Write to a sibling temp file and rename, so a crash mid-write
        // never leaves a truncated state file.
        let tmp = self.path.with_extension("tmp");
        let mut file =
            fs::File::create(&tmp).map_err(|e| SnapshotStoreError::Io(e.to_string()))?;
        file.write_all(json.as_bytes())
            .map_err(|e| SnapshotStoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| SnapshotStoreError::Io(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::roster::Roster;
    use crate::domain::rotation::RotationSettings;

    fn snapshot() -> StateSnapshot {
        StateSnapshot::new(Roster::default_household(), RotationSettings::default())
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let snap = snapshot();
        store.save(&snap).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, snap);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let mut snap = snapshot();
        store.save(&snap).unwrap();
        snap.metadata.cycle_counter = 5;
        store.save(&snap).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.metadata.cycle_counter, 5);
    }

    #[test]
    fn load_rejects_garbage_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.load(),
            Err(SnapshotStoreError::DeserializationFailed(_))
        ));
    }
}
