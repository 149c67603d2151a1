//! Snapshot store port - interface for persisting rotation state.
//!
//! The core never blocks on I/O itself; a caller loads a snapshot, drives
//! the service, and saves the result. Adapters implement this port.

use crate::domain::snapshot::StateSnapshot;

/// Errors that can occur during snapshot storage operations.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize snapshot: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for loading and saving the rotation state document.
pub trait SnapshotStore {
    /// Loads the stored snapshot, or `None` when no state has been saved
    /// yet.
    fn load(&self) -> Result<Option<StateSnapshot>, SnapshotStoreError>;

    /// Saves the snapshot, replacing any previous one.
    fn save(&self, snapshot: &StateSnapshot) -> Result<(), SnapshotStoreError>;
}
