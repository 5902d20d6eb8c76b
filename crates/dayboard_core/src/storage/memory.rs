use super::{SnapshotStore, StorageResult};

/// Slot kept in process memory; nothing survives the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySnapshotStore {
    blob: Option<Vec<u8>>,
    writes: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `blob`, as if written by an earlier run.
    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Some(blob.into()),
            writes: 0,
        }
    }

    pub fn blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }

    /// Number of `save` calls since construction.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &[u8]) -> StorageResult<()> {
        self.blob = Some(blob.to_vec());
        self.writes += 1;
        Ok(())
    }
}
