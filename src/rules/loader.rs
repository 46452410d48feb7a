//! Rule loader: raw JSON rules → typed rules
//!
//! Raw condition shapes:
//! - `{"equals": {"fact": "<name>", "value": "<v>" | ["<v>", ...]}}`
//! - `{"notIn": {"fact": "<name>", "values": "<v>" | ["<v>", ...]}}`
//! - `{"all": [<condition>, ...]}`
//! - `{"or": [<condition>, ...]}`
//!
//! Anything else is rejected here, so evaluation only ever sees the closed
//! `Condition` enum. Groups must be non-empty and leaves must name a fact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::condition::{Condition, FactValue, MAX_CONDITION_DEPTH};

use super::errors::{RuleError, RuleResult};
use super::types::{Rule, RuleSet};

/// A rule as stored: the condition is still untyped JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRule {
    pub id: String,
    pub condition: Value,
    pub conclusion: String,
    #[serde(default, alias = "else_conclusion", skip_serializing_if = "Option::is_none")]
    pub else_conclusion: Option<String>,
}

/// Converts and validates rules
#[derive(Debug, Clone, Copy)]
pub struct RuleLoader {
    max_depth: usize,
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self {
            max_depth: MAX_CONDITION_DEPTH,
        }
    }
}

impl RuleLoader {
    /// Create a loader with a depth limit.
    ///
    /// The limit is clamped to `1..=MAX_CONDITION_DEPTH`.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.clamp(1, MAX_CONDITION_DEPTH),
        }
    }

    /// Returns the effective depth limit
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Convert a single raw rule.
    pub fn load_rule(&self, raw: &RawRule) -> RuleResult<Rule> {
        if raw.id.trim().is_empty() {
            return Err(RuleError::malformed("<unnamed>", "rule id is empty"));
        }
        if raw.conclusion.trim().is_empty() {
            return Err(RuleError::malformed(&raw.id, "conclusion is empty"));
        }

        let condition = self.parse_condition(&raw.id, &raw.condition, 1)?;

        Ok(Rule {
            id: raw.id.clone(),
            condition,
            conclusion: raw.conclusion.clone(),
            else_conclusion: raw
                .else_conclusion
                .clone()
                .filter(|s| !s.trim().is_empty()),
        })
    }

    /// Convert raw rules into a validated rule set, preserving order.
    pub fn load_rule_set(&self, raws: &[RawRule]) -> RuleResult<RuleSet> {
        let rules = raws
            .iter()
            .map(|raw| self.load_rule(raw))
            .collect::<RuleResult<Vec<_>>>()?;
        RuleSet::new(rules)
    }

    /// Check a programmatically built rule against the same constraints the
    /// JSON path enforces.
    pub fn validate(&self, rule: &Rule) -> RuleResult<()> {
        if rule.condition.depth() > self.max_depth {
            return Err(RuleError::too_deep(&rule.id, self.max_depth));
        }
        let mut stack = vec![&rule.condition];
        while let Some(node) = stack.pop() {
            match node {
                Condition::Equals { fact, expected } => {
                    check_leaf(&rule.id, "equals", fact, expected)?
                }
                Condition::NotIn { fact, excluded } => {
                    check_leaf(&rule.id, "notIn", fact, excluded)?
                }
                Condition::All(children) | Condition::Or(children) => {
                    if children.is_empty() {
                        return Err(RuleError::malformed(
                            &rule.id,
                            format!("'{}' group has no conditions", node.op_name()),
                        ));
                    }
                    stack.extend(children.iter());
                }
            }
        }
        Ok(())
    }

    /// Validate programmatically built rules and wrap them in a rule set.
    pub fn check_rule_set(&self, rules: Vec<Rule>) -> RuleResult<RuleSet> {
        for rule in &rules {
            self.validate(rule)?;
        }
        RuleSet::new(rules)
    }

    fn parse_condition(&self, rule_id: &str, value: &Value, depth: usize) -> RuleResult<Condition> {
        if depth > self.max_depth {
            return Err(RuleError::too_deep(rule_id, self.max_depth));
        }

        let object = value
            .as_object()
            .ok_or_else(|| RuleError::malformed(rule_id, "condition must be a JSON object"))?;

        let (key, body) = single_entry(rule_id, object)?;

        match key.as_str() {
            "equals" => {
                let (fact, expected) = parse_leaf(rule_id, key, body, &["value"])?;
                Ok(Condition::Equals { fact, expected })
            }
            "notIn" => {
                let (fact, excluded) = parse_leaf(rule_id, key, body, &["values", "value"])?;
                Ok(Condition::NotIn { fact, excluded })
            }
            "all" | "or" => {
                let items = body.as_array().ok_or_else(|| {
                    RuleError::malformed(rule_id, format!("'{}' must be an array", key))
                })?;
                if items.is_empty() {
                    return Err(RuleError::malformed(
                        rule_id,
                        format!("'{}' group has no conditions", key),
                    ));
                }
                let children = items
                    .iter()
                    .map(|item| self.parse_condition(rule_id, item, depth + 1))
                    .collect::<RuleResult<Vec<_>>>()?;
                if key == "all" {
                    Ok(Condition::All(children))
                } else {
                    Ok(Condition::Or(children))
                }
            }
            other => Err(RuleError::malformed(
                rule_id,
                format!("unrecognized condition shape '{}'", other),
            )),
        }
    }
}

fn single_entry<'a>(rule_id: &str, object: &'a Map<String, Value>) -> RuleResult<(&'a String, &'a Value)> {
    let mut entries = object.iter();
    match (entries.next(), entries.next()) {
        (Some(entry), None) => Ok(entry),
        (None, _) => Err(RuleError::malformed(rule_id, "condition object is empty")),
        (Some(_), Some(_)) => {
            let keys: Vec<&str> = object.keys().map(String::as_str).collect();
            Err(RuleError::malformed(
                rule_id,
                format!("condition must have exactly one operator, found: {}", keys.join(", ")),
            ))
        }
    }
}

fn parse_leaf(
    rule_id: &str,
    op: &str,
    body: &Value,
    value_keys: &[&str],
) -> RuleResult<(String, FactValue)> {
    let fact = body
        .get("fact")
        .and_then(Value::as_str)
        .ok_or_else(|| RuleError::malformed(rule_id, format!("'{}' requires a string 'fact'", op)))?
        .to_string();

    let raw_value = value_keys
        .iter()
        .find_map(|k| body.get(*k))
        .ok_or_else(|| {
            RuleError::malformed(
                rule_id,
                format!("'{}' on '{}' requires '{}'", op, fact, value_keys[0]),
            )
        })?;

    let value: FactValue = serde_json::from_value(raw_value.clone()).map_err(|_| {
        RuleError::malformed(
            rule_id,
            format!("'{}' on '{}' expects a string or an array of strings", op, fact),
        )
    })?;

    check_leaf(rule_id, op, &fact, &value)?;
    Ok((fact, value))
}

fn check_leaf(rule_id: &str, op: &str, fact: &str, value: &FactValue) -> RuleResult<()> {
    if fact.trim().is_empty() {
        return Err(RuleError::malformed(rule_id, format!("'{}' has an empty fact name", op)));
    }
    if value.is_blank() {
        return Err(RuleError::malformed(
            rule_id,
            format!("'{}' on '{}' has no values", op, fact),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleErrorCode;
    use serde_json::json;

    fn raw(id: &str, condition: Value) -> RawRule {
        RawRule {
            id: id.to_string(),
            condition,
            conclusion: "done".to_string(),
            else_conclusion: None,
        }
    }

    #[test]
    fn test_load_nested_rule() {
        let rule = RuleLoader::default()
            .load_rule(&raw(
                "r1",
                json!({"all": [
                    {"equals": {"fact": "runs", "value": "yes"}},
                    {"or": [
                        {"equals": {"fact": "color", "value": ["red", "blue"]}},
                        {"notIn": {"fact": "size", "values": ["tiny"]}}
                    ]}
                ]}),
            ))
            .unwrap();

        assert_eq!(
            rule.condition,
            Condition::all(vec![
                Condition::equals("runs", "yes"),
                Condition::or(vec![
                    Condition::equals("color", FactValue::many(["red", "blue"])),
                    Condition::not_in("size", FactValue::many(["tiny"])),
                ]),
            ])
        );
    }

    #[test]
    fn test_unrecognized_shape_rejected() {
        let err = RuleLoader::default()
            .load_rule(&raw("r9", json!({"not": {"equals": {"fact": "a", "value": "b"}}})))
            .unwrap_err();
        assert_eq!(err.code(), RuleErrorCode::RqRuleMalformed);
        assert_eq!(err.rule_id(), Some("r9"));
        assert!(err.message().contains("'not'"));
    }

    #[test]
    fn test_multiple_operators_rejected() {
        let err = RuleLoader::default()
            .load_rule(&raw("r1", json!({"all": [], "or": []})))
            .unwrap_err();
        assert!(err.message().contains("exactly one operator"));
    }

    #[test]
    fn test_empty_group_rejected() {
        let err = RuleLoader::default()
            .load_rule(&raw("r1", json!({"or": []})))
            .unwrap_err();
        assert_eq!(err.code(), RuleErrorCode::RqRuleMalformed);
    }

    #[test]
    fn test_non_string_value_rejected() {
        let err = RuleLoader::default()
            .load_rule(&raw("r1", json!({"equals": {"fact": "age", "value": 42}})))
            .unwrap_err();
        assert!(err.message().contains("string"));
    }

    #[test]
    fn test_depth_limit() {
        let mut condition = json!({"equals": {"fact": "a", "value": "yes"}});
        for _ in 0..4 {
            condition = json!({"all": [condition]});
        }

        assert!(RuleLoader::new(5).load_rule(&raw("r1", condition.clone())).is_ok());
        let err = RuleLoader::new(4).load_rule(&raw("r1", condition)).unwrap_err();
        assert_eq!(err.code(), RuleErrorCode::RqRuleTooDeep);
    }

    #[test]
    fn test_loader_clamps_limit() {
        assert_eq!(RuleLoader::new(0).max_depth(), 1);
        assert_eq!(RuleLoader::new(10_000).max_depth(), MAX_CONDITION_DEPTH);
    }

    #[test]
    fn test_else_conclusion_aliases() {
        let camel: RawRule = serde_json::from_value(json!({
            "id": "r1",
            "condition": {"equals": {"fact": "a", "value": "yes"}},
            "conclusion": "A",
            "elseConclusion": "not A"
        }))
        .unwrap();
        let snake: RawRule = serde_json::from_value(json!({
            "id": "r1",
            "condition": {"equals": {"fact": "a", "value": "yes"}},
            "conclusion": "A",
            "else_conclusion": "not A"
        }))
        .unwrap();
        assert_eq!(camel, snake);
    }

    #[test]
    fn test_validate_programmatic_rule() {
        let loader = RuleLoader::default();
        let good = Rule::new("ok", Condition::equals("a", "yes"), "A");
        let empty_or = Rule::new("bad", Condition::or(vec![]), "B");
        let blank_fact = Rule::new("blank", Condition::equals(" ", "yes"), "C");

        assert!(loader.validate(&good).is_ok());
        assert!(loader.validate(&empty_or).is_err());
        assert!(loader.validate(&blank_fact).is_err());
    }

    #[test]
    fn test_load_rule_set_preserves_order() {
        let set = RuleLoader::default()
            .load_rule_set(&[
                raw("b", json!({"equals": {"fact": "x", "value": "1"}})),
                raw("a", json!({"equals": {"fact": "y", "value": "1"}})),
            ])
            .unwrap();
        assert_eq!(set.ids(), vec!["b", "a"]);
    }
}
