use std::collections::HashMap;

use super::{Task, TimeStep};
use crate::utils::{multiple_lcm, SchedulingError, TaskField, Violation};

/// Validated, ordered collection of periodic tasks with unique names.
#[derive(Debug, Clone)]
pub struct TaskSet {
    tasks: Vec<Task>,
    index: HashMap<String, usize>, // name -> position in `tasks`
    hyperperiod: TimeStep,
}

impl TaskSet {
    /// Builds the registry, reporting every malformed task at once.
    ///
    /// Tasks keep the order in which they are given; that order is the
    /// registration order used to break deadline ties.
    pub fn new(tasks: Vec<Task>) -> Result<Self, SchedulingError> {
        if tasks.is_empty() {
            return Err(SchedulingError::InvalidTaskSet(vec![Violation::NoTasks]));
        }

        let mut violations = Vec::new();

        for (position, task) in tasks.iter().enumerate() {
            if task.name().trim().is_empty() {
                violations.push(Violation::EmptyName { position: position + 1 });
            }

            let fields = [
                (TaskField::ExecutionTime, task.execution_time()),
                (TaskField::Period, task.period()),
                (TaskField::DeadlineMultiplier, task.deadline_multiplier()),
            ];
            for (field, value) in fields {
                if value == 0 {
                    violations.push(Violation::NonPositive { task: task.name().to_string(), field });
                }
            }

            if task.relative_deadline().is_none() {
                violations.push(Violation::DeadlineOverflow { task: task.name().to_string() });
            }
        }

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut duplicates: Vec<(String, usize)> = Vec::new();
        for (position, task) in tasks.iter().enumerate() {
            if index.contains_key(task.name()) {
                match duplicates.iter_mut().find(|(name, _)| name == task.name()) {
                    Some((_, count)) => *count += 1,
                    None => duplicates.push((task.name().to_string(), 2)),
                }
            } else {
                index.insert(task.name().to_string(), position);
            }
        }
        violations.extend(
            duplicates
                .into_iter()
                .map(|(task, count)| Violation::DuplicateName { task, count }),
        );

        let periods: Vec<TimeStep> = tasks.iter().map(|t| t.period()).collect();
        let hyperperiod = if periods.contains(&0) {
            None
        } else {
            let lcm = multiple_lcm(&periods);
            if lcm.is_none() {
                violations.push(Violation::HyperperiodOverflow);
            }
            lcm
        };

        if let Some(hyperperiod) = hyperperiod.filter(|_| violations.is_empty()) {
            violations.extend(
                tasks
                    .iter()
                    .filter(|task| !fits_in_horizon(task, hyperperiod))
                    .map(|task| Violation::TimeOverflow { task: task.name().to_string() }),
            );
        }

        match hyperperiod {
            Some(hyperperiod) if violations.is_empty() => Ok(Self {
                tasks,
                index,
                hyperperiod,
            }),
            _ => Err(SchedulingError::InvalidTaskSet(violations)),
        }
    }

    pub fn get_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, name: &str) -> Option<&Task> {
        self.index.get(name).map(|&i| &self.tasks[i])
    }

    /// Least common multiple of all periods: the simulation horizon.
    pub fn hyperperiod(&self) -> TimeStep {
        self.hyperperiod
    }

    pub fn utilisation(&self) -> f64 {
        self.tasks.iter().map(|t| t.utilisation()).sum()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Task> {
        self.tasks.iter()
    }
}

/// Whether a run up to `hyperperiod` keeps every time value of `task` in range.
///
/// The last job starts at or before the hyperperiod, and the task runs at most
/// `hyperperiod / execution_time + 1` jobs, each moving its deadline by one period.
fn fits_in_horizon(task: &Task, hyperperiod: TimeStep) -> bool {
    let last_end = hyperperiod.checked_add(task.execution_time());
    let last_deadline = (hyperperiod / task.execution_time() + 1)
        .checked_mul(task.period())
        .zip(task.relative_deadline())
        .and_then(|(advance, relative)| advance.checked_add(relative));
    last_end.is_some() && last_deadline.is_some()
}
