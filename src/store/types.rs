//! Knowledge document layout

use serde::{Deserialize, Serialize};

use crate::rules::RawRule;

use super::errors::{StoreError, StoreResult};

/// Offered when a fact declares no values of its own
pub const DEFAULT_POSSIBLE_VALUES: [&str; 2] = ["yes", "no"];

/// A project groups the rules asked together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Rule ids, in evaluation order
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactDefinition {
    pub id: String,
    /// Name used in conditions; falls back to `id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub fact_type: Option<String>,
    #[serde(default)]
    pub possible_values: Vec<String>,
}

impl FactDefinition {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    fn answers_to(&self, fact: &str) -> bool {
        self.name() == fact || self.id == fact
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responsible {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The whole store: one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub rules: Vec<RawRule>,
    #[serde(default)]
    pub facts: Vec<FactDefinition>,
    #[serde(default)]
    pub responsibles: Vec<Responsible>,
}

impl KnowledgeDocument {
    pub fn project(&self, project_id: &str) -> StoreResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))
    }

    /// Raw rules a project lists. Fails if any listed rule is missing or
    /// the project lists none.
    pub fn rules_for_project(&self, project_id: &str) -> StoreResult<Vec<RawRule>> {
        let project = self.project(project_id)?;
        if project.rules.is_empty() {
            return Err(StoreError::ProjectHasNoRules(project_id.to_string()));
        }

        project
            .rules
            .iter()
            .map(|rule_id| {
                self.rules
                    .iter()
                    .find(|r| &r.id == rule_id)
                    .cloned()
                    .ok_or_else(|| StoreError::RuleNotFound(rule_id.clone()))
            })
            .collect()
    }

    /// Declared values, `yes`/`no` for boolean or undeclared facts.
    pub fn possible_values(&self, fact: &str) -> Vec<String> {
        self.facts
            .iter()
            .find(|f| f.answers_to(fact))
            .filter(|f| !f.possible_values.is_empty())
            .map(|f| f.possible_values.clone())
            .unwrap_or_else(|| DEFAULT_POSSIBLE_VALUES.iter().map(|v| v.to_string()).collect())
    }
}
