pub mod models;
pub mod simulation;
pub mod timeline;
pub mod utils;

pub use models::{scheduler, ScheduledInterval, Task, TaskSet, TimeStep};
pub use simulation::{simulate, simulate_with, Schedule};
pub use timeline::Timeline;
pub use utils::{constants, SchedulingError, SimulationCode, TaskField, TieBreak, Violation};
