use crate::TimeStep;

/// Process exit status of the command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCode {
    Completed = 0,
    CompletedWithMisses = 1,
    InvalidTaskSet = 2,
    InputError = 5,
}

/// How `EarliestDeadlineFirst` orders tasks whose absolute deadlines are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The task registered first wins.
    #[default]
    Registration,
    /// The task list is stably re-sorted by deadline every round and keeps that
    /// order, so the winner is whichever task earlier rounds left in front.
    Carried,
}

/// Task set used when no task file is given: `(name, execution_time, period, deadline_multiplier)`.
pub const DEMO_TASKS: [(&str, TimeStep, TimeStep, TimeStep); 3] = [
    ("Task1", 2, 5, 1),
    ("Task2", 3, 7, 1),
    ("Task3", 1, 4, 1),
];
