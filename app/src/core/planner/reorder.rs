use std::collections::BTreeSet;

use crate::core::plan::Plan;
use crate::core::state::DomainState;

/// True when a state visited by `clobberer` invalidates the conflict-check
/// condition of any operator in `victim`. The shared start state is skipped.
pub(super) fn clobbers<S: DomainState>(clobberer: &Plan<S>, victim: &Plan<S>) -> bool {
    victim
        .operator_steps()
        .iter()
        .filter_map(|operator| operator.conflict_check_condition())
        .any(|condition| {
            clobberer
                .state_steps()
                .iter()
                .skip(1)
                .any(|state| state.clobbers(condition))
        })
}

/// Stable topological order over the clobber graph. A plan whose conflict-check
/// conditions another plan clobbers runs before that plan, while its conditions
/// still hold. Among unconstrained plans the lower request index wins.
pub(super) fn conflict_order<S: DomainState>(plans: Vec<Plan<S>>) -> Vec<Plan<S>> {
    let count = plans.len();
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut in_degree = vec![0usize; count];

    for (i, clobberer) in plans.iter().enumerate() {
        for (j, victim) in plans.iter().enumerate() {
            if i != j && clobbers(clobberer, victim) {
                tracing::debug!(
                    clobberer = %clobberer.primary_goal(),
                    victim = %victim.primary_goal(),
                    "Plan clobbers another plan"
                );
                successors[j].push(i);
                in_degree[i] += 1;
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(count);

    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &j in &successors[i] {
            in_degree[j] -= 1;
            if in_degree[j] == 0 {
                ready.insert(j);
            }
        }
    }

    if order.len() < count {
        let remaining: Vec<usize> = (0..count).filter(|i| !order.contains(i)).collect();
        tracing::warn!(
            goals = ?remaining.iter().map(|&i| plans[i].primary_goal().to_string()).collect::<Vec<_>>(),
            "Plans clobber each other in a cycle, keeping request order"
        );
        order.extend(remaining);
    }

    let mut slots: Vec<Option<Plan<S>>> = plans.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::condition::Condition;
    use crate::core::operator::{OperatorRecord, OperatorRegistry};
    use crate::painting::{RobotPainting, RobotPaintingState};

    fn floor_start() -> RobotPaintingState {
        RobotPaintingState::from_conditions(&["On(Robot, Floor)".to_string()]).unwrap()
    }

    fn plan(goal: &str, operators: &OperatorRegistry) -> Plan<RobotPaintingState> {
        Plan::build(&floor_start(), &Condition::parse(goal).unwrap(), operators, 16).unwrap()
    }

    fn goal_order(plans: &[Plan<RobotPaintingState>]) -> Vec<String> {
        plans.iter().map(|p| p.primary_goal().to_string()).collect()
    }

    #[test]
    fn climbing_runs_before_the_ladder_is_painted() {
        let operators = RobotPainting::default_operators().unwrap();
        let ceiling = plan("Painted(Ceiling)", &operators);
        let ladder = plan("Painted(Ladder)", &operators);

        assert!(clobbers(&ladder, &ceiling));
        assert!(!clobbers(&ceiling, &ladder));

        let ordered = conflict_order(vec![ladder, ceiling]);
        assert_eq!(goal_order(&ordered), vec!["Painted(Ceiling)", "Painted(Ladder)"]);
    }

    #[test]
    fn independent_plans_keep_request_order() {
        let operators = RobotPainting::default_operators().unwrap();
        let ordered = conflict_order(vec![
            plan("On(Robot, Ladder)", &operators),
            plan("Painted(Ceiling)", &operators),
        ]);

        assert_eq!(goal_order(&ordered), vec!["On(Robot, Ladder)", "Painted(Ceiling)"]);
    }

    #[test]
    fn cycle_falls_back_to_request_order() {
        let records: Vec<OperatorRecord> = serde_json::from_value(serde_json::json!([
            {"name": "climb-ladder", "preconditions": ["On(Robot, Floor)", "Dry(Ladder)"], "postconditions": ["On(Robot, Ladder)"]},
            {"name": "paint-ceiling", "preconditions": ["On(Robot, Ladder)"], "postconditions": ["Painted(Ceiling)", "¬Dry(Ceiling)"]},
            {"name": "paint-ladder", "preconditions": ["On(Robot, Floor)", "Dry(Ceiling)"], "postconditions": ["Painted(Ladder)", "¬Dry(Ladder)"]}
        ]))
        .unwrap();
        let operators = OperatorRegistry::from_records(&RobotPainting, &records).unwrap();

        let ceiling = plan("Painted(Ceiling)", &operators);
        let ladder = plan("Painted(Ladder)", &operators);
        assert!(clobbers(&ceiling, &ladder));
        assert!(clobbers(&ladder, &ceiling));

        let ordered = conflict_order(vec![ceiling, ladder]);
        assert_eq!(goal_order(&ordered), vec!["Painted(Ceiling)", "Painted(Ladder)"]);
    }
}
