use crate::core::condition::Condition;
use crate::core::planner::Planner;

use super::{Position, RobotPainting, RobotPaintingState, SurfaceStatus};

mod state;

fn state(literals: &[&str]) -> RobotPaintingState {
    let literals: Vec<String> = literals.iter().map(|l| l.to_string()).collect();
    RobotPaintingState::from_conditions(&literals).unwrap()
}

fn goal(literal: &str) -> Condition {
    Condition::parse(literal).unwrap()
}

fn planner() -> Planner<RobotPainting> {
    Planner::new(RobotPainting, RobotPainting::default_operators().unwrap())
}

/// Every consistent state of the domain.
fn all_states() -> Vec<RobotPaintingState> {
    let statuses = [SurfaceStatus::DRY, SurfaceStatus::WET, SurfaceStatus::PAINTED];

    let mut states = vec![];
    for position in Position::ALL {
        for ceiling in statuses {
            for ladder in statuses {
                states.push(RobotPaintingState::new(position, ceiling, ladder));
            }
        }
    }
    states
}
