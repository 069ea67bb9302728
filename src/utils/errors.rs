use std::fmt;

use thiserror::Error;

/// Static task parameter named in a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    ExecutionTime,
    Period,
    DeadlineMultiplier,
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self {
            TaskField::ExecutionTime => "execution_time",
            TaskField::Period => "period",
            TaskField::DeadlineMultiplier => "deadline_multiplier",
        };
        f.write_str(field)
    }
}

/// A single reason a task set was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("the task set contains no tasks")]
    NoTasks,
    #[error("task #{position}: name must not be empty")]
    EmptyName { position: usize },
    #[error("task `{task}`: {field} must be positive")]
    NonPositive { task: String, field: TaskField },
    #[error("task `{task}`: name is declared {count} times")]
    DuplicateName { task: String, count: usize },
    #[error("task `{task}`: relative deadline (period x deadline_multiplier) overflows")]
    DeadlineOverflow { task: String },
    #[error("the hyperperiod of the task set overflows")]
    HyperperiodOverflow,
    #[error("task `{task}`: simulated time or deadlines overflow within the hyperperiod")]
    TimeOverflow { task: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error("invalid task set: {}", join(.0))]
    InvalidTaskSet(Vec<Violation>),
}

impl SchedulingError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            SchedulingError::InvalidTaskSet(violations) => violations,
        }
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
