// JSON file backend - persists alias groups with atomic writes (temp file + rename)

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{AliasBackend, StorageError};
use crate::aliases::AliasGroups;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// On-disk document written by `FileBackend`
#[derive(Debug, Serialize, Deserialize)]
struct AliasDocument<'a> {
    version: u32,
    groups: Cow<'a, AliasGroups>,
}

/// Numeric key that marks the versioned document. Group values are objects, so
/// a bare group map that happens to hold a group named "version" is not mistaken for one
const VERSION_KEY: &str = "version";

/// File-based alias backend
#[derive(Debug, Clone)]
pub struct FileBackend {
    /// Path to persistence file
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at `<config_dir>/aliases.json`
    pub fn with_default_path() -> Result<Self, StorageError> {
        let config_dir = crate::paths::get_config_dir().map_err(|e| StorageError::Read {
            location: "config directory".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(config_dir.join(crate::paths::ALIASES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, message: String) -> StorageError {
        StorageError::Write {
            location: self.location(),
            message,
        }
    }
}

impl AliasBackend for FileBackend {
    fn load(&self) -> Result<Option<AliasGroups>, StorageError> {
        if !self.path.exists() {
            crate::debug!("No alias file at {:?}", self.path);
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
            location: self.location(),
            message: e.to_string(),
        })?;

        let parse_error = |e: serde_json::Error| StorageError::Parse {
            location: self.location(),
            message: e.to_string(),
        };

        // Pick the shape first, then parse the text again as that type so
        // serde reports the offending field with its line and column
        let value: serde_json::Value = serde_json::from_str(&content).map_err(parse_error)?;
        let versioned = value
            .as_object()
            .and_then(|object| object.get(VERSION_KEY))
            .is_some_and(serde_json::Value::is_number);

        let groups = if versioned {
            let doc: AliasDocument<'static> =
                serde_json::from_str(&content).map_err(parse_error)?;
            if doc.version > FORMAT_VERSION {
                crate::warn!(
                    "Alias file {:?} has format version {}, newer than {}",
                    self.path,
                    doc.version,
                    FORMAT_VERSION
                );
            }
            doc.groups.into_owned()
        } else {
            serde_json::from_str(&content).map_err(parse_error)?
        };
        Ok(Some(groups))
    }

    fn save(&self, groups: &AliasGroups) -> Result<(), StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e.to_string()))?;
        }

        let document = AliasDocument {
            version: FORMAT_VERSION,
            groups: Cow::Borrowed(groups),
        };
        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| self.write_error(e.to_string()))?;

        let temp_path = self.path.with_extension("tmp");

        // Write to temp file with explicit sync
        {
            let mut file = File::create(&temp_path)
                .map_err(|e| self.write_error(format!("Failed to create temp file: {}", e)))?;
            file.write_all(content.as_bytes())
                .map_err(|e| self.write_error(format!("Failed to write: {}", e)))?;
            file.sync_all()
                .map_err(|e| self.write_error(format!("Failed to sync: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.write_error(format!("Failed to rename: {}", e))
        })?;

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
