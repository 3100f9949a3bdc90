use super::condition::Condition;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlanningError {
    #[display("Invalid condition '{literal}': {reason}")]
    InvalidCondition { literal: String, reason: String },

    #[display("{message}")]
    MissingRequiredLiteral { message: String },

    #[display("Operator '{name}' is not a known operator")]
    UnknownOperator { name: String },

    #[display("Operator '{name}' is defined more than once")]
    DuplicateOperator { name: String },

    #[display("Precondition '{condition}' is not met.")]
    PreconditionNotMet { condition: Condition },

    #[display("No operator achieves the condition '{goal}'")]
    NoOperatorForGoal { goal: Condition },

    #[display("Regression for '{goal}' exceeded the search depth of {max_depth} steps")]
    SearchDepthExceeded { goal: Condition, max_depth: usize },
}

impl PlanningError {
    pub fn invalid_condition(literal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCondition {
            literal: literal.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_literal(message: impl Into<String>) -> Self {
        Self::MissingRequiredLiteral {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PlanningError::InvalidCondition { .. } => "InvalidCondition",
            PlanningError::MissingRequiredLiteral { .. } => "MissingRequiredLiteral",
            PlanningError::UnknownOperator { .. } => "UnknownOperator",
            PlanningError::DuplicateOperator { .. } => "DuplicateOperator",
            PlanningError::PreconditionNotMet { .. } => "PreconditionNotMet",
            PlanningError::NoOperatorForGoal { .. } => "NoOperatorForGoal",
            PlanningError::SearchDepthExceeded { .. } => "SearchDepthExceeded",
        }
    }
}
