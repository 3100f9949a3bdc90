use std::fmt::Display;

use crate::core::condition::Condition;
use crate::core::error::PlanningError;
use crate::core::operator::Operator;
use crate::core::state::DomainState;

use super::PaintingLiteral;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Position {
    Floor,
    Ladder,
}

impl Position {
    pub const ALL: [Position; 2] = [Position::Floor, Position::Ladder];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|position| position.to_string() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Surface {
    Ceiling,
    Ladder,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Ceiling, Surface::Ladder];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|surface| surface.to_string() == name)
    }
}

/// Paint never dries: a painted surface is always wet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SurfaceStatus {
    painted: bool,
    wet: bool,
}

impl SurfaceStatus {
    pub const DRY: Self = Self {
        painted: false,
        wet: false,
    };
    pub const WET: Self = Self {
        painted: false,
        wet: true,
    };
    pub const PAINTED: Self = Self {
        painted: true,
        wet: true,
    };

    pub fn is_painted(&self) -> bool {
        self.painted
    }

    pub fn is_dry(&self) -> bool {
        !self.wet
    }

    fn closed(self) -> Self {
        Self {
            painted: self.painted,
            wet: self.wet || self.painted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RobotPaintingState {
    position: Position,
    ceiling: SurfaceStatus,
    ladder: SurfaceStatus,
    conditions: Vec<Condition>,
}

#[derive(Default)]
struct SeenLiterals {
    dry: bool,
    not_dry: bool,
    painted: bool,
}

impl RobotPaintingState {
    pub fn new(position: Position, ceiling: SurfaceStatus, ladder: SurfaceStatus) -> Self {
        Self {
            position,
            ceiling,
            ladder,
            conditions: vec![],
        }
        .synchronized()
    }

    /// Builds a state from caller-supplied literals. Exactly one robot
    /// position is required; surfaces without a status literal are dry.
    pub fn from_conditions(literals: &[String]) -> Result<Self, PlanningError> {
        let mut position = None;
        let mut seen: [SeenLiterals; 2] = Default::default();

        for literal in literals {
            let condition = Condition::parse(literal)?;
            let literal = PaintingLiteral::try_from(&condition)?;

            match literal {
                PaintingLiteral::RobotOn(on) => {
                    if position.is_some_and(|current| current != on) {
                        return Err(PlanningError::missing_literal(
                            "There can be only one 'On(Robot, ...)' condition",
                        ));
                    }
                    position = Some(on);
                }
                PaintingLiteral::Dry(surface) => seen[surface as usize].dry = true,
                PaintingLiteral::NotDry(surface) => seen[surface as usize].not_dry = true,
                PaintingLiteral::Painted(surface) => seen[surface as usize].painted = true,
            }
        }

        let Some(position) = position else {
            return Err(PlanningError::missing_literal(
                "Missing 'On(Robot, ...)' condition. Must specify robot position, e.g. 'On(Robot, Floor)'",
            ));
        };

        Ok(Self::new(
            position,
            surface_status(Surface::Ceiling, &seen[Surface::Ceiling as usize])?,
            surface_status(Surface::Ladder, &seen[Surface::Ladder as usize])?,
        ))
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn status(&self, surface: Surface) -> SurfaceStatus {
        match surface {
            Surface::Ceiling => self.ceiling,
            Surface::Ladder => self.ladder,
        }
    }

    fn status_mut(&mut self, surface: Surface) -> &mut SurfaceStatus {
        match surface {
            Surface::Ceiling => &mut self.ceiling,
            Surface::Ladder => &mut self.ladder,
        }
    }

    fn synchronized(mut self) -> Self {
        self.ceiling = self.ceiling.closed();
        self.ladder = self.ladder.closed();

        let mut conditions = vec![Condition::from(PaintingLiteral::RobotOn(self.position))];
        for surface in Surface::ALL {
            let status = self.status(surface);
            if status.is_painted() {
                conditions.push(PaintingLiteral::Painted(surface).into());
            }
            conditions.push(match status.is_dry() {
                true => PaintingLiteral::Dry(surface).into(),
                false => PaintingLiteral::NotDry(surface).into(),
            });
        }

        self.conditions = conditions;
        self
    }
}

fn surface_status(surface: Surface, seen: &SeenLiterals) -> Result<SurfaceStatus, PlanningError> {
    if seen.dry && (seen.painted || seen.not_dry) {
        return Err(PlanningError::invalid_condition(
            Condition::from(PaintingLiteral::Dry(surface)).to_string(),
            format!("the {surface} cannot be dry while it is painted or wet"),
        ));
    }

    Ok(SurfaceStatus {
        painted: seen.painted,
        wet: seen.not_dry,
    })
}

impl DomainState for RobotPaintingState {
    fn condition_set(&self) -> &[Condition] {
        &self.conditions
    }

    fn apply_operator(&self, operator: &Operator) -> Result<Self, PlanningError> {
        self.check_preconditions(operator)?;

        let mut next = self.clone();
        for postcondition in operator.postconditions() {
            match PaintingLiteral::try_from(postcondition)? {
                PaintingLiteral::RobotOn(position) => next.position = position,
                //painted surfaces stay wet, closure restores it below
                PaintingLiteral::Dry(surface) => next.status_mut(surface).wet = false,
                PaintingLiteral::NotDry(surface) => next.status_mut(surface).wet = true,
                PaintingLiteral::Painted(surface) => next.status_mut(surface).painted = true,
            }
        }

        Ok(next.synchronized())
    }

    fn clobbers(&self, condition: &Condition) -> bool {
        match PaintingLiteral::try_from(condition) {
            Ok(PaintingLiteral::Dry(surface)) => !self.status(surface).is_dry(),
            Ok(PaintingLiteral::NotDry(surface)) => self.status(surface).is_dry(),
            Ok(PaintingLiteral::RobotOn(_) | PaintingLiteral::Painted(_)) | Err(_) => false,
        }
    }

    fn eligible_goal_conditions(&self) -> Vec<Condition> {
        Surface::ALL
            .into_iter()
            .map(|surface| PaintingLiteral::Painted(surface).into())
            .collect()
    }
}

impl Display for RobotPaintingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let literals: Vec<String> = self.conditions.iter().map(Condition::to_string).collect();
        write!(f, "{}", literals.join(" ^ "))
    }
}
