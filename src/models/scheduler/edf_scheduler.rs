use super::scheduler::Scheduler;
use crate::{Task, TieBreak};

/// Non-preemptive EDF: the task with the nearest absolute deadline runs next.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestDeadlineFirst {
    tie_break: TieBreak,
}

impl EarliestDeadlineFirst {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }
}

impl Scheduler for EarliestDeadlineFirst {
    fn schedule(&self, tasks: &mut [Task]) -> Option<usize> {
        if tasks.is_empty() {
            return None;
        }

        match self.tie_break {
            // min_by_key keeps the first of several equal minima
            TieBreak::Registration => tasks
                .iter()
                .enumerate()
                .min_by_key(|(_, task)| task.deadline())
                .map(|(i, _)| i),
            TieBreak::Carried => {
                tasks.sort_by_key(|task| task.deadline()); // stable
                Some(0)
            }
        }
    }
}
