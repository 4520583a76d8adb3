// Grouped shell alias manager - core store, persistence backends and command boundary

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod aliases;
pub mod commands;
pub mod events;
pub mod paths;
pub mod storage;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use aliases::{
    AliasData, AliasGroup, AliasGroups, AliasRow, AliasStore, AliasStoreError, FilterField,
    GroupInfo, GroupStats, SearchFilter, ValidationError, DEFAULT_GROUP,
};
pub use commands::AliasStoreState;
pub use storage::{AliasBackend, FileBackend, MemoryBackend, StorageError};
