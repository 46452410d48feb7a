//! # Knowledge Store
//!
//! Read-only access to projects, rules and fact declarations. The store
//! hands out raw rules; turning them into a validated `RuleSet` is the
//! loader's job.

mod errors;
mod file;
mod memory;
mod types;

pub use errors::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use types::{FactDefinition, KnowledgeDocument, Project, Responsible, DEFAULT_POSSIBLE_VALUES};

use crate::rules::RawRule;

/// Source of knowledge documents.
///
/// Implementors only provide `document`; lookups are derived from it.
pub trait KnowledgeBase: Send + Sync + std::fmt::Debug {
    /// Current contents of the store
    fn document(&self) -> StoreResult<KnowledgeDocument>;

    /// Raw rules referenced by a project, in the project's order
    fn rules_for_project(&self, project_id: &str) -> StoreResult<Vec<RawRule>> {
        self.document()?.rules_for_project(project_id)
    }

    /// One rule of a project
    fn project_rule(&self, project_id: &str, rule_id: &str) -> StoreResult<RawRule> {
        self.rules_for_project(project_id)?
            .into_iter()
            .find(|r| r.id == rule_id)
            .ok_or_else(|| StoreError::RuleNotFound(rule_id.to_string()))
    }

    /// Answer options for a fact
    fn possible_values(&self, fact: &str) -> StoreResult<Vec<String>> {
        Ok(self.document()?.possible_values(fact))
    }
}
