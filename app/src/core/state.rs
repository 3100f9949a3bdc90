use std::fmt::{Debug, Display};

use super::condition::Condition;
use super::error::PlanningError;
use super::operator::Operator;

/// Capabilities the planner needs from a domain state.
///
/// States are values: `apply_operator` returns a new state and leaves the
/// receiver untouched.
pub trait DomainState: Clone + Debug + Display + PartialEq {
    /// All literals currently true, in the domain's canonical order.
    fn condition_set(&self) -> &[Condition];

    /// Builds the successor state. Implementations must call
    /// [`DomainState::check_preconditions`] first.
    fn apply_operator(&self, operator: &Operator) -> Result<Self, PlanningError>;

    /// True when the state makes `condition` false in a way another plan cannot rely on.
    fn clobbers(&self, condition: &Condition) -> bool;

    /// Literals a caller may ask the planner to achieve.
    fn eligible_goal_conditions(&self) -> Vec<Condition>;

    fn matches_goal_condition(&self, condition: &Condition) -> bool {
        self.condition_set().contains(condition)
    }

    fn check_preconditions(&self, operator: &Operator) -> Result<(), PlanningError> {
        match operator
            .preconditions()
            .iter()
            .find(|precondition| !self.matches_goal_condition(precondition))
        {
            Some(unmet) => Err(PlanningError::PreconditionNotMet {
                condition: unmet.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Vocabulary and search rules of one problem domain.
pub trait Domain {
    type State: DomainState;

    fn name(&self) -> &str;

    /// Parses a literal and checks it against the domain vocabulary.
    fn parse_condition(&self, literal: &str) -> Result<Condition, PlanningError>;

    /// Precondition that continues the regression towards the start state.
    /// `None` marks a terminal operator.
    fn reverse_search_anchor(&self, preconditions: &[Condition]) -> Option<Condition>;

    /// Precondition most likely to be invalidated by another plan.
    fn conflict_check_condition(&self, preconditions: &[Condition]) -> Option<Condition>;

    fn state_from_conditions(&self, literals: &[String]) -> Result<Self::State, PlanningError>;
}
