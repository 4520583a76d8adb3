// In-memory backend - keeps the last saved groups in memory, with write failure injection

use parking_lot::Mutex;
use std::sync::Arc;

use super::{AliasBackend, StorageError};
use crate::aliases::AliasGroups;

#[derive(Debug, Default)]
struct MemoryState {
    saved: Option<AliasGroups>,
    save_count: usize,
    fail_writes: bool,
}

/// Backend that never touches disk.
///
/// Clones share the same state, so a test can hand one clone to the store and
/// inspect or sabotage writes through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds persisted groups
    pub fn with_groups(groups: AliasGroups) -> Self {
        let backend = Self::new();
        backend.state.lock().saved = Some(groups);
        backend
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    /// Last successfully saved groups
    pub fn saved(&self) -> Option<AliasGroups> {
        self.state.lock().saved.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.state.lock().save_count
    }
}

impl AliasBackend for MemoryBackend {
    fn load(&self) -> Result<Option<AliasGroups>, StorageError> {
        Ok(self.state.lock().saved.clone())
    }

    fn save(&self, groups: &AliasGroups) -> Result<(), StorageError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(StorageError::Write {
                location: self.location(),
                message: "simulated write failure".to_string(),
            });
        }
        state.saved = Some(groups.clone());
        state.save_count += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
