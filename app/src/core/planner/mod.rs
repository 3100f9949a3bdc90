mod reorder;
mod stitch;

use std::collections::VecDeque;

use super::condition::Condition;
use super::error::PlanningError;
use super::operator::OperatorRegistry;
use super::plan::Plan;
use super::state::Domain;

pub const DEFAULT_MAX_SEARCH_DEPTH: usize = 64;

/// Owns the operator registry of one domain. The partial-plan queue and the
/// complete plan are scratch lists, rebuilt for every top-level request.
pub struct Planner<D: Domain> {
    domain: D,
    operators: OperatorRegistry,
    max_search_depth: usize,
    partial_plans: VecDeque<Plan<D::State>>,
    complete_plan: Vec<Plan<D::State>>,
}

impl<D: Domain> Planner<D> {
    pub fn new(domain: D, operators: OperatorRegistry) -> Self {
        Self {
            domain,
            operators,
            max_search_depth: DEFAULT_MAX_SEARCH_DEPTH,
            partial_plans: VecDeque::new(),
            complete_plan: Vec::new(),
        }
    }

    pub fn with_max_search_depth(mut self, max_search_depth: usize) -> Self {
        self.max_search_depth = max_search_depth;
        self
    }

    pub fn partial_plans(&self) -> &VecDeque<Plan<D::State>> {
        &self.partial_plans
    }

    pub fn complete_plan(&self) -> &[Plan<D::State>] {
        &self.complete_plan
    }

    /// Builds a plan for a single goal and queues it for stitching.
    pub fn build_partial_plan(
        &mut self,
        start_state: &D::State,
        goal: &Condition,
    ) -> Result<&Plan<D::State>, PlanningError> {
        let plan = self.build_plan(start_state, goal)?;
        self.partial_plans.push_back(plan);
        Ok(&self.partial_plans[self.partial_plans.len() - 1])
    }

    /// Schedules every plan after the plans that clobber its conflict-check
    /// conditions. Plans without conflicts keep their request order.
    pub fn reorder_partial_plans_list(&mut self) {
        let plans: Vec<_> = self.partial_plans.drain(..).collect();
        self.partial_plans = reorder::conflict_order(plans).into();

        tracing::debug!(
            order = ?self.partial_plans.iter().map(|p| p.primary_goal().to_string()).collect::<Vec<_>>(),
            "Reordered partial plans"
        );
    }

    /// Plans every goal from the same start state, orders the partial plans to
    /// avoid clobbering and stitches them into one temporally ordered plan.
    #[tracing::instrument(skip_all, fields(domain = self.domain.name(), goals = goals.len()))]
    pub fn build_complete_plan(
        &mut self,
        start_state: &D::State,
        goals: &[Condition],
    ) -> Result<Vec<Plan<D::State>>, PlanningError> {
        self.partial_plans.clear();
        self.complete_plan.clear();

        for goal in goals {
            self.build_partial_plan(start_state, goal)?;
        }

        self.reorder_partial_plans_list();
        self.stitch_partial_plans()?;

        tracing::info!(
            segments = self.complete_plan.len(),
            operators = self.complete_plan.iter().map(Plan::len).sum::<usize>(),
            "Complete plan built"
        );

        Ok(self.complete_plan.clone())
    }

    fn build_plan(&self, start_state: &D::State, goal: &Condition) -> Result<Plan<D::State>, PlanningError> {
        let plan = Plan::build(start_state, goal, &self.operators, self.max_search_depth)?;

        tracing::debug!(
            goal = %goal,
            operators = ?plan.operator_names(),
            "Built plan"
        );

        Ok(plan)
    }
}
