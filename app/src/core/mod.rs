pub mod condition;
pub mod error;
pub mod operator;
pub mod plan;
pub mod planner;
pub mod state;

pub use condition::Condition;
pub use error::PlanningError;
pub use operator::{Operator, OperatorRecord, OperatorRegistry};
pub use plan::{Plan, PlanRole};
pub use planner::{DEFAULT_MAX_SEARCH_DEPTH, Planner};
pub use state::{Domain, DomainState};
