//! JSON file result storage.
//!
//! The output file is one JSON array. Existing content is only read when
//! appending; a missing or unreadable file counts as an empty array.

use crate::error::{StorageError, StorageResult};
use crate::types::ResultEntry;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "results.json";

/// How new results combine with an existing output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Keep the existing array and add new results after it.
    Append,
    /// Replace the file with only the new results.
    Overwrite,
}

impl WriteMode {
    pub fn from_append_flag(append: bool) -> Self {
        if append {
            Self::Append
        } else {
            Self::Overwrite
        }
    }
}

/// A JSON array of results stored at a fixed path.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    /// Create a store for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the records already in the file.
    ///
    /// Never fails: a missing file, unreadable content or a document that
    /// is not an array all yield an empty list.
    pub fn load_existing(&self) -> Vec<Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no existing results");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                debug!(path = %self.path.display(), "existing results are not an array, ignoring");
                Vec::new()
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "existing results unreadable, ignoring");
                Vec::new()
            }
        }
    }

    /// Write `entries` to the file.
    ///
    /// Returns the total number of records in the written file.
    pub fn persist(&self, entries: &[ResultEntry], mode: WriteMode) -> StorageResult<usize> {
        let mut records = match mode {
            WriteMode::Append => self.load_existing(),
            WriteMode::Overwrite => Vec::new(),
        };
        let previous = records.len();
        records.extend(entries.iter().cloned().map(ResultEntry::into_value));

        let content = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, content).map_err(|e| StorageError::WriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        debug!(
            path = %self.path.display(),
            previous,
            added = entries.len(),
            "results written"
        );
        Ok(records.len())
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT)
    }
}
