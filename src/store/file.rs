//! # JSON File Store

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::errors::{StoreError, StoreResult};
use super::types::KnowledgeDocument;
use super::KnowledgeBase;

/// Knowledge store backed by a single JSON file.
///
/// The file is read on every call, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KnowledgeBase for JsonFileStore {
    fn document(&self) -> StoreResult<KnowledgeDocument> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "knowledge file unreadable");
            StoreError::Io(format!("{}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "knowledge file malformed");
            StoreError::Malformed(format!("{}: {}", self.path.display(), e))
        })
    }
}
