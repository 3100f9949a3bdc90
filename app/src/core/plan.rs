use std::collections::VecDeque;
use std::sync::Arc;

use super::condition::Condition;
use super::error::PlanningError;
use super::operator::{Operator, OperatorRegistry};
use super::state::DomainState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlanRole {
    #[display("goal")]
    Goal,
    #[display("connector")]
    Connector,
}

/// Operator sequence reaching a single goal condition, together with every
/// state visited on the way. `state_steps` always holds one more entry than
/// `operator_steps`; its first entry is the start state.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<S> {
    role: PlanRole,
    primary_goal: Condition,
    operator_steps: Vec<Arc<Operator>>,
    state_steps: Vec<S>,
}

impl<S: DomainState> Plan<S> {
    /// Regresses from `goal` to `start_state`, always taking the first
    /// operator in registry order that achieves the current subgoal, then
    /// replays the chain forwards to record the visited states.
    #[tracing::instrument(level = "debug", skip_all, fields(goal = %goal))]
    pub fn build(
        start_state: &S,
        goal: &Condition,
        operators: &OperatorRegistry,
        max_depth: usize,
    ) -> Result<Self, PlanningError> {
        let mut operator_steps: VecDeque<Arc<Operator>> = VecDeque::new();
        let mut current_goal = Some(goal.clone());

        while let Some(subgoal) = current_goal.take() {
            if start_state.matches_goal_condition(&subgoal) {
                break;
            }

            if operator_steps.len() >= max_depth {
                return Err(PlanningError::SearchDepthExceeded {
                    goal: goal.clone(),
                    max_depth,
                });
            }

            let operator = operators
                .first_achieving(&subgoal)
                .ok_or_else(|| PlanningError::NoOperatorForGoal { goal: subgoal.clone() })?;

            tracing::debug!(
                subgoal = %subgoal,
                operator = %operator,
                anchor = ?operator.reverse_search_anchor().map(|c| c.to_string()),
                "Regression step"
            );

            operator_steps.push_front(operator.clone());
            current_goal = operator.reverse_search_anchor().cloned();
        }

        let operator_steps = Vec::from(operator_steps);
        let state_steps = replay(start_state, &operator_steps)?;

        Ok(Self {
            role: PlanRole::Goal,
            primary_goal: goal.clone(),
            operator_steps,
            state_steps,
        })
    }

    /// Steps whose reverse-search anchor already holds in `state`, latest first.
    /// Terminal steps have no anchor and never qualify.
    pub fn join_indices<'a>(&'a self, state: &'a S) -> impl Iterator<Item = usize> + 'a {
        self.operator_steps
            .iter()
            .enumerate()
            .rev()
            .filter(move |(_, operator)| {
                operator
                    .reverse_search_anchor()
                    .is_some_and(|anchor| state.matches_goal_condition(anchor))
            })
            .map(|(index, _)| index)
    }

    /// Suffix of this plan starting at operator `index`, keeping the recorded states.
    pub fn slice_from(&self, index: usize) -> Self {
        let index = index.min(self.operator_steps.len());

        Self {
            role: self.role,
            primary_goal: self.primary_goal.clone(),
            operator_steps: self.operator_steps[index..].to_vec(),
            state_steps: self.state_steps[index..].to_vec(),
        }
    }

    /// Same operators, executed from `start_state` instead of the state the plan
    /// was built from.
    pub fn replay_from(&self, start_state: &S) -> Result<Self, PlanningError> {
        Ok(Self {
            role: self.role,
            primary_goal: self.primary_goal.clone(),
            operator_steps: self.operator_steps.clone(),
            state_steps: replay(start_state, &self.operator_steps)?,
        })
    }

    pub fn into_connector(self) -> Self {
        Self {
            role: PlanRole::Connector,
            ..self
        }
    }

    /// Condition that must hold before the first operator can run.
    pub fn entry_condition(&self) -> Option<&Condition> {
        self.operator_steps
            .first()
            .and_then(|operator| operator.reverse_search_anchor())
    }

    /// Each operator paired with the state it produces.
    pub fn steps(&self) -> impl Iterator<Item = (&Operator, &S)> {
        self.operator_steps
            .iter()
            .map(|operator| operator.as_ref())
            .zip(self.state_steps.iter().skip(1))
    }
}

impl<S> Plan<S> {
    pub fn role(&self) -> PlanRole {
        self.role
    }

    pub fn primary_goal(&self) -> &Condition {
        &self.primary_goal
    }

    pub fn operator_steps(&self) -> &[Arc<Operator>] {
        &self.operator_steps
    }

    pub fn operator_names(&self) -> Vec<&str> {
        self.operator_steps.iter().map(|operator| operator.name()).collect()
    }

    pub fn state_steps(&self) -> &[S] {
        &self.state_steps
    }

    pub fn start_state(&self) -> &S {
        &self.state_steps[0]
    }

    pub fn final_state(&self) -> &S {
        &self.state_steps[self.state_steps.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.operator_steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operator_steps.is_empty()
    }
}

fn replay<S: DomainState>(start_state: &S, operator_steps: &[Arc<Operator>]) -> Result<Vec<S>, PlanningError> {
    let mut state_steps = Vec::with_capacity(operator_steps.len() + 1);
    let mut current = start_state.clone();

    for operator in operator_steps {
        let next = current.apply_operator(operator)?;
        state_steps.push(std::mem::replace(&mut current, next));
    }

    state_steps.push(current);
    Ok(state_steps)
}
