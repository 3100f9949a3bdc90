mod dispatch;

use crate::core::condition::Condition;
use crate::core::error::PlanningError;
use crate::core::operator::OperatorRegistry;
use crate::core::plan::{Plan, PlanRole};
use crate::core::planner::{DEFAULT_MAX_SEARCH_DEPTH, Planner};
use crate::core::state::{Domain, DomainState};

pub use dispatch::{ToolCall, ToolOutput};

/// Tool-call surface of a planning domain. Every call answers with a
/// human-readable string, failures included.
#[derive(Debug, Clone)]
pub struct PlanningTools<D: Domain> {
    domain: D,
    operators: OperatorRegistry,
    max_search_depth: usize,
}

impl<D: Domain + Clone> PlanningTools<D> {
    pub fn new(domain: D, operators: OperatorRegistry) -> Self {
        Self {
            domain,
            operators,
            max_search_depth: DEFAULT_MAX_SEARCH_DEPTH,
        }
    }

    pub fn with_max_search_depth(mut self, max_search_depth: usize) -> Self {
        self.max_search_depth = max_search_depth;
        self
    }

    pub fn operators(&self) -> &OperatorRegistry {
        &self.operators
    }

    #[tracing::instrument(skip_all, fields(operator = operator_name))]
    pub fn apply_operator(&self, start_conditions: &[String], operator_name: &str) -> String {
        match self.try_apply_operator(start_conditions, operator_name) {
            Ok(message) | Err(message) => message,
        }
    }

    #[tracing::instrument(skip_all, fields(goals = ?goal_conditions))]
    pub fn create_plan(&self, start_conditions: &[String], goal_conditions: &[String]) -> String {
        match self.try_create_plan(start_conditions, goal_conditions) {
            Ok(message) | Err(message) => message,
        }
    }

    fn try_apply_operator(&self, start_conditions: &[String], operator_name: &str) -> Result<String, String> {
        let start = self.domain.state_from_conditions(start_conditions).map_err(rejected)?;
        let operator = self.operators.get(operator_name).map_err(rejected)?;

        match start.apply_operator(operator) {
            Ok(end) => Ok(format!(
                "The result of applying the '{operator}' operator to start state '{start}' is the resulting state '{end}'"
            )),
            Err(e @ PlanningError::PreconditionNotMet { .. }) => Err(format!(
                "The provided operator '{operator}' cannot be applied to start state '{start}' for the following reason: {e}"
            )),
            Err(e) => Err(rejected(e)),
        }
    }

    fn try_create_plan(&self, start_conditions: &[String], goal_conditions: &[String]) -> Result<String, String> {
        let start = self.domain.state_from_conditions(start_conditions).map_err(rejected)?;
        let requested = goal_conditions
            .iter()
            .map(|literal| self.domain.parse_condition(literal))
            .collect::<Result<Vec<_>, _>>()
            .map_err(rejected)?;

        let eligible = start.eligible_goal_conditions();
        let mut goals: Vec<Condition> = vec![];
        for goal in requested {
            if eligible.contains(&goal) && !goals.contains(&goal) {
                goals.push(goal);
            }
        }

        if goals.is_empty() {
            return Err(rejected(PlanningError::missing_literal(format!(
                "Goal conditions must include at least {}",
                eligible.iter().map(|g| format!("'{g}'")).collect::<Vec<_>>().join(" or ")
            ))));
        }

        let mut planner =
            Planner::new(self.domain.clone(), self.operators.clone()).with_max_search_depth(self.max_search_depth);

        match planner.build_complete_plan(&start, &goals) {
            Ok(complete_plan) => Ok(render_plan(&start, &goals, &complete_plan)),
            Err(e) => {
                tracing::info!(error = %e, kind = e.kind(), "No plan found");
                Err(format!(
                    "No plan could be created to reach '{}' from start state '{start}' for the following reason: {e}",
                    join_conditions(&goals)
                ))
            }
        }
    }
}

fn rejected(error: PlanningError) -> String {
    tracing::debug!(kind = error.kind(), %error, "Rejected tool input");
    format!("Error: {} - {}", error.kind(), error)
}

fn join_conditions(conditions: &[Condition]) -> String {
    conditions.iter().map(Condition::to_string).collect::<Vec<_>>().join(" ^ ")
}

fn render_plan<S: DomainState>(start: &S, goals: &[Condition], complete_plan: &[Plan<S>]) -> String {
    let mut lines = vec![format!(
        "Plan to reach '{}' from start state '{start}':",
        join_conditions(goals)
    )];

    let mut step = 0;
    for plan in complete_plan {
        for (operator, state) in plan.steps() {
            step += 1;
            let label = match plan.role() {
                PlanRole::Goal => String::new(),
                PlanRole::Connector => format!(" ({} to '{}')", plan.role(), plan.primary_goal()),
            };
            lines.push(format!("{step}. {operator}{label} -> '{state}'"));
        }
    }

    if step == 0 {
        lines.push("No operators are needed.".to_string());
    }

    let final_state = complete_plan.last().map_or_else(|| start.to_string(), |plan| plan.final_state().to_string());
    lines.push(format!("Final state: '{final_state}'"));

    lines.join("\n")
}
