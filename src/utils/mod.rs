pub mod constants;
pub mod errors;
pub mod lcm;

pub use constants::{SimulationCode, TieBreak};
pub use errors::{SchedulingError, TaskField, Violation};
pub use lcm::multiple_lcm;
