pub mod scheduler;
pub mod edf_scheduler;

pub use scheduler::Scheduler;
pub use edf_scheduler::EarliestDeadlineFirst;
