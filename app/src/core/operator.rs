use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::error::PlanningError;
use super::state::Domain;

/// One entry of a declarative operator table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRecord {
    pub name: String,
    #[serde(default)]
    pub preconditions: Vec<String>,
    #[serde(default)]
    pub postconditions: Vec<String>,
}

/// Immutable precondition/effect schema. Search metadata is derived once by
/// the domain rules at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    name: String,
    preconditions: Vec<Condition>,
    postconditions: Vec<Condition>,
    reverse_search_anchor: Option<Condition>,
    conflict_check_condition: Option<Condition>,
}

impl Operator {
    pub fn new<D: Domain>(
        domain: &D,
        name: impl Into<String>,
        preconditions: Vec<Condition>,
        postconditions: Vec<Condition>,
    ) -> Self {
        let preconditions = dedup(preconditions);
        let postconditions = dedup(postconditions);

        Self {
            name: name.into(),
            reverse_search_anchor: domain.reverse_search_anchor(&preconditions),
            conflict_check_condition: domain.conflict_check_condition(&preconditions),
            preconditions,
            postconditions,
        }
    }

    pub fn from_record<D: Domain>(domain: &D, record: &OperatorRecord) -> Result<Self, PlanningError> {
        let parse_all = |literals: &[String]| -> Result<Vec<Condition>, PlanningError> {
            literals.iter().map(|literal| domain.parse_condition(literal)).collect()
        };

        Ok(Self::new(
            domain,
            record.name.trim(),
            parse_all(&record.preconditions)?,
            parse_all(&record.postconditions)?,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preconditions(&self) -> &[Condition] {
        &self.preconditions
    }

    pub fn postconditions(&self) -> &[Condition] {
        &self.postconditions
    }

    pub fn matches_goal(&self, condition: &Condition) -> bool {
        self.postconditions.contains(condition)
    }

    pub fn reverse_search_anchor(&self) -> Option<&Condition> {
        self.reverse_search_anchor.as_ref()
    }

    pub fn conflict_check_condition(&self) -> Option<&Condition> {
        self.conflict_check_condition.as_ref()
    }
}

fn dedup(conditions: Vec<Condition>) -> Vec<Condition> {
    let mut unique: Vec<Condition> = Vec::with_capacity(conditions.len());
    for condition in conditions {
        if !unique.contains(&condition) {
            unique.push(condition);
        }
    }
    unique
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Name-keyed operator registry. Iteration follows table order, which decides
/// regression tie-breaks.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    operators: Vec<Arc<Operator>>,
}

impl OperatorRegistry {
    pub fn new(operators: impl IntoIterator<Item = Operator>) -> Result<Self, PlanningError> {
        let mut registry = Self::default();

        for operator in operators {
            if registry.find(operator.name()).is_some() {
                return Err(PlanningError::DuplicateOperator {
                    name: operator.name().to_string(),
                });
            }
            registry.operators.push(Arc::new(operator));
        }

        Ok(registry)
    }

    pub fn from_records<D: Domain>(domain: &D, records: &[OperatorRecord]) -> Result<Self, PlanningError> {
        let operators = records
            .iter()
            .map(|record| Operator::from_record(domain, record))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(operators)
    }

    pub fn from_json<D: Domain>(domain: &D, json: &str) -> anyhow::Result<Self> {
        let records: Vec<OperatorRecord> =
            serde_json::from_str(json).context("Error parsing operator table")?;

        let registry = Self::from_records(domain, &records)
            .with_context(|| format!("Invalid operator table for domain {}", domain.name()))?;

        tracing::debug!(
            domain = domain.name(),
            operators = ?registry.names(),
            "Loaded operator table"
        );

        Ok(registry)
    }

    pub fn load<D: Domain>(domain: &D, path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading operator table {}", path.display()))?;

        Self::from_json(domain, &json)
    }

    pub fn get(&self, name: &str) -> Result<&Arc<Operator>, PlanningError> {
        self.find(name.trim()).ok_or_else(|| PlanningError::UnknownOperator {
            name: name.to_string(),
        })
    }

    /// First operator in table order whose postconditions contain `goal`.
    pub fn first_achieving(&self, goal: &Condition) -> Option<&Arc<Operator>> {
        self.operators.iter().find(|operator| operator.matches_goal(goal))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Operator>> {
        self.operators.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.operators.iter().map(|operator| operator.name()).collect()
    }

    fn find(&self, name: &str) -> Option<&Arc<Operator>> {
        self.operators.iter().find(|operator| operator.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painting::RobotPainting;

    fn record(name: &str, preconditions: &[&str], postconditions: &[&str]) -> OperatorRecord {
        OperatorRecord {
            name: name.to_string(),
            preconditions: preconditions.iter().map(|c| c.to_string()).collect(),
            postconditions: postconditions.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn derives_search_metadata_at_construction() {
        let operator = Operator::from_record(
            &RobotPainting,
            &record("climb-ladder", &["Dry(Ladder)", "On(Robot, Floor)"], &["On(Robot, Ladder)"]),
        )
        .unwrap();

        assert_eq!(
            operator.reverse_search_anchor(),
            Some(&Condition::binary("On", "Robot", "Floor"))
        );
        assert_eq!(operator.conflict_check_condition(), Some(&Condition::unary("Dry", "Ladder")));
        assert!(operator.matches_goal(&Condition::binary("On", "Robot", "Ladder")));
        assert!(!operator.matches_goal(&Condition::binary("On", "Robot", "Floor")));
    }

    #[test]
    fn operator_without_position_precondition_is_terminal() {
        let operator =
            Operator::from_record(&RobotPainting, &record("touch-up", &["Dry(Ceiling)"], &["Painted(Ceiling)"]))
                .unwrap();

        assert_eq!(operator.reverse_search_anchor(), None);
        assert_eq!(operator.conflict_check_condition(), Some(&Condition::unary("Dry", "Ceiling")));
    }

    #[test]
    fn keeps_table_order() {
        let json = r#"[
            {"name": "paint-ladder", "preconditions": ["On(Robot, Floor)"], "postconditions": ["Painted(Ladder)", "¬Dry(Ladder)"]},
            {"name": "climb-ladder", "preconditions": ["On(Robot, Floor)", "Dry(Ladder)"], "postconditions": ["On(Robot, Ladder)"]}
        ]"#;

        let registry = OperatorRegistry::from_json(&RobotPainting, json).unwrap();

        assert_eq!(registry.names(), vec!["paint-ladder", "climb-ladder"]);
        assert_eq!(
            registry.first_achieving(&Condition::unary("Painted", "Ladder")).map(|op| op.name()),
            Some("paint-ladder")
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = OperatorRegistry::from_records(
            &RobotPainting,
            &[
                record("paint-ladder", &["On(Robot, Floor)"], &["Painted(Ladder)"]),
                record("paint-ladder", &["On(Robot, Ladder)"], &["Painted(Ladder)"]),
            ],
        );

        assert_eq!(
            result.unwrap_err(),
            PlanningError::DuplicateOperator {
                name: "paint-ladder".to_string()
            }
        );
    }

    #[test]
    fn rejects_literals_outside_vocabulary() {
        let result = OperatorRegistry::from_records(
            &RobotPainting,
            &[record("fly", &["On(Robot, Floor)"], &["On(Robot, Sky)"])],
        );

        assert!(matches!(result, Err(PlanningError::InvalidCondition { .. })));
    }

    #[test]
    fn reports_unknown_operator() {
        let registry = RobotPainting::default_operators().unwrap();

        assert_eq!(registry.get("paint-ladder").map(|op| op.name()), Ok("paint-ladder"));
        assert_eq!(
            registry.get("paint-floor").map(|op| op.name()),
            Err(PlanningError::UnknownOperator {
                name: "paint-floor".to_string()
            })
        );
    }

    #[test]
    fn empty_table_is_valid() {
        let registry = OperatorRegistry::from_json(&RobotPainting, "[]").unwrap();

        assert!(registry.names().is_empty());
        assert!(OperatorRegistry::from_json(&RobotPainting, "not json").is_err());
    }
}
