use crate::core::condition::Condition;
use crate::core::error::PlanningError;
use crate::core::state::DomainState;
use crate::painting::{Position, RobotPainting, RobotPaintingState, Surface, SurfaceStatus};

use super::{all_states, goal, state};

mod from_conditions {
    use super::*;

    #[test]
    fn unspecified_surfaces_are_dry() {
        let state = state(&["On(Robot, Floor)"]);

        assert_eq!(state.position(), Position::Floor);
        assert_eq!(state.status(Surface::Ceiling), SurfaceStatus::DRY);
        assert_eq!(state.status(Surface::Ladder), SurfaceStatus::DRY);
        assert_eq!(state.to_string(), "On(Robot, Floor) ^ Dry(Ceiling) ^ Dry(Ladder)");
    }

    #[test]
    fn painted_surfaces_are_wet() {
        let state = state(&["Painted(Ladder)", "On(Robot, Ladder)"]);

        assert!(state.matches_goal_condition(&goal("¬Dry(Ladder)")));
        assert!(!state.matches_goal_condition(&goal("Dry(Ladder)")));
        assert_eq!(
            state.to_string(),
            "On(Robot, Ladder) ^ Dry(Ceiling) ^ Painted(Ladder) ^ ¬Dry(Ladder)"
        );
    }

    #[test]
    fn tolerates_spacing_and_repeated_literals() {
        assert_eq!(
            state(&[" On(Robot,Floor) ", "¬Dry( Ceiling)", "On(Robot, Floor)"]),
            state(&["On(Robot, Floor)", "¬Dry(Ceiling)"])
        );
    }

    #[test]
    fn requires_robot_position() {
        let result = RobotPaintingState::from_conditions(&["Dry(Ceiling)".to_string()]);

        assert!(matches!(result, Err(PlanningError::MissingRequiredLiteral { .. })));
    }

    #[test]
    fn rejects_two_robot_positions() {
        let literals = ["On(Robot, Floor)".to_string(), "On(Robot, Ladder)".to_string()];

        let result = RobotPaintingState::from_conditions(&literals);

        assert!(matches!(result, Err(PlanningError::MissingRequiredLiteral { .. })));
    }

    #[test]
    fn rejects_dry_painted_surface() {
        let literals = ["On(Robot, Floor)".to_string(), "Dry(Ladder)".to_string(), "Painted(Ladder)".to_string()];

        let result = RobotPaintingState::from_conditions(&literals);

        assert!(matches!(
            result,
            Err(PlanningError::InvalidCondition { literal, .. }) if literal == "Dry(Ladder)"
        ));
    }

    #[test]
    fn rejects_unknown_literals() {
        for literal in ["On(Robot, Roof)", "Painted(Wall)", "Shiny(Ladder)", "On Robot Floor"] {
            let literals = ["On(Robot, Floor)".to_string(), literal.to_string()];

            let result = RobotPaintingState::from_conditions(&literals);

            assert!(
                matches!(result, Err(PlanningError::InvalidCondition { .. })),
                "{literal} should be rejected"
            );
        }
    }
}

mod apply_operator {
    use super::*;

    #[test]
    fn returns_successor_and_keeps_receiver() {
        let operators = RobotPainting::default_operators().unwrap();
        let start = state(&["On(Robot, Floor)"]);

        let next = start.apply_operator(operators.get("climb-ladder").unwrap()).unwrap();

        assert_eq!(next.to_string(), "On(Robot, Ladder) ^ Dry(Ceiling) ^ Dry(Ladder)");
        assert_eq!(start.to_string(), "On(Robot, Floor) ^ Dry(Ceiling) ^ Dry(Ladder)");
    }

    #[test]
    fn reports_first_unmet_precondition() {
        let operators = RobotPainting::default_operators().unwrap();
        let start = state(&["On(Robot, Ladder)", "Painted(Ladder)"]);

        let result = start.apply_operator(operators.get("climb-ladder").unwrap());

        assert_eq!(
            result,
            Err(PlanningError::PreconditionNotMet {
                condition: goal("On(Robot, Floor)")
            })
        );
    }

    #[test]
    fn postconditions_hold_or_precondition_is_reported() {
        let operators = RobotPainting::default_operators().unwrap();

        for start in all_states() {
            for operator in operators.iter() {
                match start.apply_operator(operator) {
                    Ok(next) => {
                        for postcondition in operator.postconditions() {
                            assert!(
                                next.matches_goal_condition(postcondition),
                                "{operator} on '{start}' should yield {postcondition}"
                            );
                        }
                    }
                    Err(PlanningError::PreconditionNotMet { condition }) => {
                        assert!(operator.preconditions().contains(&condition));
                        assert!(!start.matches_goal_condition(&condition));
                    }
                    Err(e) => panic!("unexpected error applying {operator} to '{start}': {e}"),
                }
            }
        }
    }

    #[test]
    fn painted_surfaces_never_dry() {
        let operators = RobotPainting::default_operators().unwrap();

        for start in all_states() {
            for operator in operators.iter() {
                let Ok(next) = start.apply_operator(operator) else {
                    continue;
                };

                for surface in Surface::ALL {
                    let status = next.status(surface);
                    assert!(!(status.is_painted() && status.is_dry()), "{next} is inconsistent");
                    if start.status(surface).is_painted() {
                        assert!(status.is_painted(), "{operator} removed paint from '{start}'");
                    }
                }
            }
        }
    }
}

mod clobbers {
    use super::*;

    #[test]
    fn wet_surface_clobbers_dry_requirement() {
        let painted = state(&["On(Robot, Floor)", "Painted(Ladder)"]);

        assert!(painted.clobbers(&goal("Dry(Ladder)")));
        assert!(!painted.clobbers(&goal("Dry(Ceiling)")));
        assert!(!painted.clobbers(&goal("¬Dry(Ladder)")));
    }

    #[test]
    fn position_and_paint_are_never_clobbered() {
        for state in all_states() {
            for literal in ["On(Robot, Floor)", "On(Robot, Ladder)", "Painted(Ceiling)", "Painted(Ladder)"] {
                assert!(!state.clobbers(&goal(literal)), "'{state}' should not clobber {literal}");
            }
        }
    }
}

#[test]
fn eligible_goals_are_painting_goals() {
    let goals: Vec<Condition> = state(&["On(Robot, Floor)"]).eligible_goal_conditions();

    assert_eq!(goals, vec![goal("Painted(Ceiling)"), goal("Painted(Ladder)")]);
}

#[test]
fn all_states_are_distinct() {
    let states = all_states();

    for (i, a) in states.iter().enumerate() {
        for b in &states[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(states.len(), 18);
}
