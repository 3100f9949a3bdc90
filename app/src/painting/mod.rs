mod state;

#[cfg(test)]
mod tests;

pub use state::{Position, RobotPaintingState, Surface, SurfaceStatus};

use crate::core::condition::Condition;
use crate::core::error::PlanningError;
use crate::core::operator::OperatorRegistry;
use crate::core::state::Domain;

pub const ROBOT: &str = "Robot";

const DEFAULT_OPERATORS: &str = include_str!("operators.json");

/// A robot on the floor or on a ladder paints the ceiling and the ladder.
/// Fresh paint never dries, so a painted ladder can no longer be climbed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RobotPainting;

impl RobotPainting {
    pub fn default_operators() -> anyhow::Result<OperatorRegistry> {
        OperatorRegistry::from_json(&RobotPainting, DEFAULT_OPERATORS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintingLiteral {
    RobotOn(Position),
    Dry(Surface),
    NotDry(Surface),
    Painted(Surface),
}

impl PaintingLiteral {
    pub fn vocabulary() -> Vec<PaintingLiteral> {
        let mut literals = vec![
            PaintingLiteral::RobotOn(Position::Floor),
            PaintingLiteral::RobotOn(Position::Ladder),
        ];
        for surface in Surface::ALL {
            literals.push(PaintingLiteral::Dry(surface));
            literals.push(PaintingLiteral::NotDry(surface));
            literals.push(PaintingLiteral::Painted(surface));
        }
        literals
    }
}

impl TryFrom<&Condition> for PaintingLiteral {
    type Error = PlanningError;

    fn try_from(condition: &Condition) -> Result<Self, Self::Error> {
        let invalid = |reason: String| PlanningError::invalid_condition(condition.to_string(), reason);
        let surface = |name: &str| {
            Surface::from_name(name).ok_or_else(|| invalid(format!("'{name}' must be 'Ceiling' or 'Ladder'")))
        };

        match (condition.is_negated(), condition.predicate(), condition.args()) {
            (false, "On", [subject, object]) if subject == ROBOT => Position::from_name(object)
                .map(PaintingLiteral::RobotOn)
                .ok_or_else(|| invalid("must be 'On(Robot, Floor)' or 'On(Robot, Ladder)'".to_string())),
            (false, "Dry", [object]) => surface(object).map(PaintingLiteral::Dry),
            (true, "Dry", [object]) => surface(object).map(PaintingLiteral::NotDry),
            (false, "Painted", [object]) => surface(object).map(PaintingLiteral::Painted),
            _ => Err(invalid(format!(
                "unknown condition, valid conditions are {}",
                PaintingLiteral::vocabulary()
                    .into_iter()
                    .map(|literal| format!("'{}'", Condition::from(literal)))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl From<PaintingLiteral> for Condition {
    fn from(literal: PaintingLiteral) -> Self {
        match literal {
            PaintingLiteral::RobotOn(position) => Condition::binary("On", ROBOT, position.to_string()),
            PaintingLiteral::Dry(surface) => Condition::unary("Dry", surface.to_string()),
            PaintingLiteral::NotDry(surface) => Condition::unary("Dry", surface.to_string()).negate(),
            PaintingLiteral::Painted(surface) => Condition::unary("Painted", surface.to_string()),
        }
    }
}

impl Domain for RobotPainting {
    type State = RobotPaintingState;

    fn name(&self) -> &str {
        "robot-painting"
    }

    fn parse_condition(&self, literal: &str) -> Result<Condition, PlanningError> {
        let condition = Condition::parse(literal)?;
        PaintingLiteral::try_from(&condition).map(Condition::from)
    }

    //the robot's position drives regression
    fn reverse_search_anchor(&self, preconditions: &[Condition]) -> Option<Condition> {
        preconditions
            .iter()
            .find(|c| matches!(PaintingLiteral::try_from(*c), Ok(PaintingLiteral::RobotOn(_))))
            .cloned()
    }

    //dryness is the only status another plan can take away
    fn conflict_check_condition(&self, preconditions: &[Condition]) -> Option<Condition> {
        preconditions
            .iter()
            .find(|c| matches!(PaintingLiteral::try_from(*c), Ok(PaintingLiteral::Dry(_))))
            .cloned()
    }

    fn state_from_conditions(&self, literals: &[String]) -> Result<RobotPaintingState, PlanningError> {
        RobotPaintingState::from_conditions(literals)
    }
}
