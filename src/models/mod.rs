mod interval;
pub mod task;
pub mod taskset;
pub mod scheduler;

pub use interval::ScheduledInterval;
pub use task::Task;
pub use taskset::TaskSet;

pub type TimeStep = usize;
