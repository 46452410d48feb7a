//! # In-Memory Store

use super::errors::StoreResult;
use super::types::KnowledgeDocument;
use super::KnowledgeBase;

/// Fixed document held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: KnowledgeDocument,
}

impl MemoryStore {
    pub fn new(document: KnowledgeDocument) -> Self {
        Self { document }
    }
}

impl KnowledgeBase for MemoryStore {
    fn document(&self) -> StoreResult<KnowledgeDocument> {
        Ok(self.document.clone())
    }
}
