//! Persistence backend trait for the alias store.
//!
//! The store never touches the filesystem directly; it is handed a backend at
//! construction so tests can swap in an in-memory implementation.

use crate::aliases::AliasGroups;

/// Error types for backend read/write operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Backing file could not be read
    #[error("Failed to read {location}: {message}")]
    Read { location: String, message: String },
    /// Backing data exists but is not a valid alias document
    #[error("Failed to parse {location}: {message}")]
    Parse { location: String, message: String },
    /// Write did not complete; previously persisted data is untouched
    #[error("Failed to write {location}: {message}")]
    Write { location: String, message: String },
}

/// Backend trait for alias persistence.
///
/// Implementations must make `save` all-or-nothing: either the new groups are
/// durably stored, or the previous contents remain readable.
pub trait AliasBackend: Send + Sync {
    /// Load persisted groups. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<AliasGroups>, StorageError>;

    /// Persist the complete set of groups, replacing what was there.
    fn save(&self, groups: &AliasGroups) -> Result<(), StorageError>;

    /// Human-readable location used in log lines and error messages.
    fn location(&self) -> String;
}

#[cfg(test)]
#[path = "traits_test.rs"]
mod tests;
