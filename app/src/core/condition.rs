use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PlanningError;

pub const NEGATION: char = '¬';

/// A ground literal such as `On(Robot, Floor)` or `¬Dry(Ceiling)`.
///
/// Parsing only checks the shape of the literal. Whether predicate and
/// arguments belong to a vocabulary is decided by the domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Condition {
    negated: bool,
    predicate: String,
    args: Vec<String>,
}

impl Condition {
    pub fn unary(predicate: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            negated: false,
            predicate: predicate.into(),
            args: vec![object.into()],
        }
    }

    pub fn binary(predicate: impl Into<String>, subject: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            negated: false,
            predicate: predicate.into(),
            args: vec![subject.into(), object.into()],
        }
    }

    pub fn negate(&self) -> Self {
        Self {
            negated: !self.negated,
            ..self.clone()
        }
    }

    pub fn parse(literal: &str) -> Result<Self, PlanningError> {
        let trimmed = literal.trim();
        let (negated, body) = match trimmed.strip_prefix(NEGATION) {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let Some((predicate, rest)) = body.split_once('(') else {
            return Err(PlanningError::invalid_condition(
                literal,
                "expected the form 'Predicate(Argument)' or 'Predicate(Subject, Object)'",
            ));
        };

        let Some(inner) = rest.strip_suffix(')') else {
            return Err(PlanningError::invalid_condition(literal, "missing closing parenthesis"));
        };

        let predicate = predicate.trim();
        if !is_identifier(predicate) {
            return Err(PlanningError::invalid_condition(
                literal,
                format!("'{predicate}' is not a valid predicate name"),
            ));
        }

        let args: Vec<String> = inner.split(',').map(|arg| arg.trim().to_string()).collect();
        if args.len() > 2 {
            return Err(PlanningError::invalid_condition(
                literal,
                "predicates take one or two arguments",
            ));
        }

        if let Some(bad) = args.iter().find(|arg| !is_identifier(arg)) {
            return Err(PlanningError::invalid_condition(
                literal,
                format!("'{bad}' is not a valid argument"),
            ));
        }

        Ok(Self {
            negated,
            predicate: predicate.to_string(),
            args,
        })
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "{NEGATION}")?;
        }
        write!(f, "{}({})", self.predicate, self.args.join(", "))
    }
}

impl FromStr for Condition {
    type Err = PlanningError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        Self::parse(literal)
    }
}

impl TryFrom<String> for Condition {
    type Error = PlanningError;

    fn try_from(literal: String) -> Result<Self, Self::Error> {
        Self::parse(&literal)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.to_string()
    }
}
