//! Persistence backends for the alias store.
//!
//! - `traits`: `AliasBackend` interface and `StorageError`
//! - `file`: JSON file with atomic replace, used in production
//! - `memory`: in-process backend for tests and embedding

mod file;
mod memory;
mod traits;

pub use file::{FileBackend, FORMAT_VERSION};
pub use memory::MemoryBackend;
pub use traits::{AliasBackend, StorageError};
