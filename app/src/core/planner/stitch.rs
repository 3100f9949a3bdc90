use crate::core::error::PlanningError;
use crate::core::state::{Domain, DomainState};

use super::Planner;

impl<D: Domain> Planner<D> {
    /// Drains the partial-plan queue into the complete plan. Each queued plan
    /// is dropped when its goal already holds, spliced in from the latest step
    /// that can run from the current final state, or preceded by a connector
    /// plan that reaches its entry condition. Every appended segment is replayed
    /// from the final state of the segment before it.
    pub(super) fn stitch_partial_plans(&mut self) -> Result<(), PlanningError> {
        let Some(first) = self.partial_plans.pop_front() else {
            return Ok(());
        };

        let mut current = first.final_state().clone();
        self.complete_plan.push(first);

        while let Some(next) = self.partial_plans.pop_front() {
            if current.matches_goal_condition(next.primary_goal()) {
                tracing::debug!(goal = %next.primary_goal(), "Goal already reached, dropping redundant plan");
                continue;
            }

            //goal held at the start but an earlier plan undid it
            if next.is_empty() {
                let connector = self.build_plan(&current, next.primary_goal())?.into_connector();
                tracing::debug!(
                    goal = %next.primary_goal(),
                    operators = ?connector.operator_names(),
                    "Re-establishing goal with connector plan"
                );
                current = connector.final_state().clone();
                self.complete_plan.push(connector);
                continue;
            }

            let spliced = next.join_indices(&current).find_map(|index| {
                match next.slice_from(index).replay_from(&current) {
                    Ok(spliced) => Some((index, spliced)),
                    Err(e) => {
                        tracing::debug!(goal = %next.primary_goal(), index, error = %e, "Splice rejected");
                        None
                    }
                }
            });

            if let Some((index, spliced)) = spliced {
                tracing::debug!(
                    goal = %next.primary_goal(),
                    skipped = index,
                    operators = ?spliced.operator_names(),
                    "Splicing plan"
                );
                current = spliced.final_state().clone();
                self.complete_plan.push(spliced);
                continue;
            }

            let entry = match next.entry_condition() {
                Some(entry) if !current.matches_goal_condition(entry) => entry.clone(),
                _ => {
                    let replayed = next.replay_from(&current)?;
                    current = replayed.final_state().clone();
                    self.complete_plan.push(replayed);
                    continue;
                }
            };

            let connector = self.build_plan(&current, &entry)?.into_connector();
            if !connector.final_state().matches_goal_condition(&entry) {
                return Err(PlanningError::NoOperatorForGoal { goal: entry });
            }

            tracing::debug!(
                goal = %next.primary_goal(),
                entry = %entry,
                operators = ?connector.operator_names(),
                "Inserting connector plan"
            );

            current = connector.final_state().clone();
            self.complete_plan.push(connector);
            self.partial_plans.push_front(next);
        }

        Ok(())
    }
}
