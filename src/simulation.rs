use std::collections::HashMap;

use log::{debug, info, trace, warn};

use crate::scheduler::{EarliestDeadlineFirst, Scheduler};
use crate::{ScheduledInterval, Task, TaskSet, TimeStep};

/// Output of one simulation run over a hyperperiod.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    intervals: Vec<ScheduledInterval>,
    hyperperiod: TimeStep,
    deadline_misses: usize,
}

impl Schedule {
    /// Executed jobs, ordered by start time.
    pub fn intervals(&self) -> &[ScheduledInterval] {
        &self.intervals
    }

    pub fn hyperperiod(&self) -> TimeStep {
        self.hyperperiod
    }

    /// Number of jobs whose end time was past their absolute deadline when they
    /// were scheduled. Non-zero values point at an overloaded task set.
    pub fn deadline_misses(&self) -> usize {
        self.deadline_misses
    }

    pub fn intervals_of<'a>(&'a self, task_name: &'a str) -> impl Iterator<Item = &'a ScheduledInterval> + 'a {
        self.intervals.iter().filter(move |i| i.task_name() == task_name)
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<ScheduledInterval> {
        self.intervals.iter()
    }
}

/// Simulates non-preemptive EDF over one hyperperiod, breaking deadline ties
/// in registration order.
pub fn simulate(taskset: &TaskSet) -> Schedule {
    simulate_with(taskset, &EarliestDeadlineFirst::default())
}

/// Simulates `taskset` over one hyperperiod with the given selection policy.
///
/// The run works on its own copy of the tasks, so `taskset` can be simulated
/// again afterwards and yields the same schedule.
pub fn simulate_with<S: Scheduler>(taskset: &TaskSet, scheduler: &S) -> Schedule {
    let hyperperiod = taskset.hyperperiod();
    let mut tasks: Vec<Task> = taskset.get_tasks().to_vec();
    let mut last_finish: HashMap<String, TimeStep> =
        tasks.iter().map(|task| (task.name().to_string(), 0)).collect();

    let mut intervals = Vec::new();
    let mut deadline_misses = 0;
    let mut time: TimeStep = 0;

    while time <= hyperperiod {
        let Some(index) = scheduler.schedule(&mut tasks) else {
            break;
        };
        let elected = &mut tasks[index];

        // Only keeps a task from starting before its own previous job ended
        let finished = last_finish.get(elected.name()).copied().unwrap_or(0);
        let start = time.max(finished);
        let end = start + elected.execution_time();

        trace!("t={}: slack of {} is {}", time, elected.name(), elected.slack(time));
        debug!(
            "t={}: run {} on [{}, {}) (deadline {})",
            time,
            elected.name(),
            start,
            end,
            elected.deadline()
        );

        if elected.misses_deadline(end) {
            deadline_misses += 1;
            debug!("{} ends at {} past its deadline {}", elected.name(), end, elected.deadline());
        }

        intervals.push(ScheduledInterval::new(elected.name(), start, end));
        time = end;

        elected.complete_job();
        if let Some(finish) = last_finish.get_mut(elected.name()) {
            *finish = time;
        }
    }

    info!(
        "simulated {} jobs of {} tasks over hyperperiod {}",
        intervals.len(),
        tasks.len(),
        hyperperiod
    );
    if deadline_misses > 0 {
        warn!("{} of {} jobs finished past their deadline", deadline_misses, intervals.len());
    }

    Schedule {
        intervals,
        hyperperiod,
        deadline_misses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::DEMO_TASKS;
    use crate::utils::multiple_lcm;
    use crate::TieBreak;

    const GOLDEN_REGISTRATION: &[(&str, TimeStep, TimeStep)] = &[
        ("Task3", 0, 1), ("Task1", 1, 3), ("Task2", 3, 6), ("Task3", 6, 7), ("Task1", 7, 9),
        ("Task3", 9, 10), ("Task2", 10, 13), ("Task1", 13, 15), ("Task3", 15, 16),
        ("Task1", 16, 18), ("Task3", 18, 19), ("Task2", 19, 22), ("Task3", 22, 23),
        ("Task1", 23, 25), ("Task2", 25, 28), ("Task3", 28, 29), ("Task1", 29, 31),
        ("Task3", 31, 32), ("Task1", 32, 34), ("Task2", 34, 37), ("Task3", 37, 38),
        ("Task1", 38, 40), ("Task3", 40, 41), ("Task2", 41, 44), ("Task3", 44, 45),
        ("Task1", 45, 47), ("Task3", 47, 48), ("Task2", 48, 51), ("Task1", 51, 53),
        ("Task3", 53, 54), ("Task1", 54, 56), ("Task2", 56, 59), ("Task3", 59, 60),
        ("Task1", 60, 62), ("Task3", 62, 63), ("Task2", 63, 66), ("Task3", 66, 67),
        ("Task1", 67, 69), ("Task3", 69, 70), ("Task1", 70, 72), ("Task2", 72, 75),
        ("Task3", 75, 76), ("Task1", 76, 78), ("Task3", 78, 79), ("Task2", 79, 82),
        ("Task1", 82, 84), ("Task3", 84, 85), ("Task2", 85, 88), ("Task3", 88, 89),
        ("Task1", 89, 91), ("Task3", 91, 92), ("Task1", 92, 94), ("Task2", 94, 97),
        ("Task3", 97, 98), ("Task1", 98, 100), ("Task3", 100, 101), ("Task2", 101, 104),
        ("Task1", 104, 106), ("Task3", 106, 107), ("Task3", 107, 108), ("Task1", 108, 110),
        ("Task2", 110, 113), ("Task3", 113, 114), ("Task1", 114, 116), ("Task2", 116, 119),
        ("Task3", 119, 120), ("Task1", 120, 122), ("Task3", 122, 123), ("Task2", 123, 126),
        ("Task1", 126, 128), ("Task3", 128, 129), ("Task3", 129, 130), ("Task1", 130, 132),
        ("Task2", 132, 135), ("Task3", 135, 136), ("Task1", 136, 138), ("Task3", 138, 139),
        ("Task2", 139, 142)
    ];

    const GOLDEN_CARRIED: &[(&str, TimeStep, TimeStep)] = &[
        ("Task3", 0, 1), ("Task1", 1, 3), ("Task2", 3, 6), ("Task3", 6, 7), ("Task1", 7, 9),
        ("Task3", 9, 10), ("Task2", 10, 13), ("Task1", 13, 15), ("Task3", 15, 16),
        ("Task3", 16, 17), ("Task1", 17, 19), ("Task2", 19, 22), ("Task3", 22, 23),
        ("Task1", 23, 25), ("Task3", 25, 26), ("Task2", 26, 29), ("Task1", 29, 31),
        ("Task3", 31, 32), ("Task1", 32, 34), ("Task2", 34, 37), ("Task3", 37, 38),
        ("Task3", 38, 39), ("Task1", 39, 41), ("Task2", 41, 44), ("Task3", 44, 45),
        ("Task1", 45, 47), ("Task3", 47, 48), ("Task2", 48, 51), ("Task1", 51, 53),
        ("Task3", 53, 54), ("Task1", 54, 56), ("Task3", 56, 57), ("Task2", 57, 60),
        ("Task3", 60, 61), ("Task1", 61, 63), ("Task2", 63, 66), ("Task3", 66, 67),
        ("Task1", 67, 69), ("Task3", 69, 70), ("Task1", 70, 72), ("Task2", 72, 75),
        ("Task3", 75, 76), ("Task1", 76, 78), ("Task3", 78, 79), ("Task2", 79, 82),
        ("Task3", 82, 83), ("Task1", 83, 85), ("Task3", 85, 86), ("Task2", 86, 89),
        ("Task1", 89, 91), ("Task3", 91, 92), ("Task1", 92, 94), ("Task2", 94, 97),
        ("Task3", 97, 98), ("Task1", 98, 100), ("Task3", 100, 101), ("Task2", 101, 104),
        ("Task3", 104, 105), ("Task1", 105, 107), ("Task3", 107, 108), ("Task1", 108, 110),
        ("Task2", 110, 113), ("Task3", 113, 114), ("Task1", 114, 116), ("Task3", 116, 117),
        ("Task2", 117, 120), ("Task1", 120, 122), ("Task3", 122, 123), ("Task2", 123, 126),
        ("Task3", 126, 127), ("Task1", 127, 129), ("Task3", 129, 130), ("Task1", 130, 132),
        ("Task2", 132, 135), ("Task3", 135, 136), ("Task1", 136, 138), ("Task3", 138, 139),
        ("Task2", 139, 142)
    ];

    fn taskset(params: &[(&str, TimeStep, TimeStep, TimeStep)]) -> TaskSet {
        let tasks = params
            .iter()
            .map(|&(name, c, t, m)| Task::new(name, c, t, m))
            .collect();
        TaskSet::new(tasks).expect("valid task set")
    }

    fn triples(schedule: &Schedule) -> Vec<(&str, TimeStep, TimeStep)> {
        schedule
            .iter()
            .map(|i| (i.task_name(), i.start(), i.end()))
            .collect()
    }

    #[test]
    fn test_three_tasks_golden_registration() {
        let schedule = simulate(&taskset(&DEMO_TASKS));

        assert_eq!(schedule.hyperperiod(), 140);
        assert_eq!(triples(&schedule), GOLDEN_REGISTRATION);
        assert_eq!(schedule.deadline_misses(), 60);
    }

    #[test]
    fn test_three_tasks_golden_carried() {
        let scheduler = EarliestDeadlineFirst::new(TieBreak::Carried);
        let schedule = simulate_with(&taskset(&DEMO_TASKS), &scheduler);

        assert_eq!(triples(&schedule), GOLDEN_CARRIED);
        assert_eq!(schedule.deadline_misses(), 60);
    }

    #[test]
    fn test_deterministic_and_taskset_untouched() {
        let taskset = taskset(&DEMO_TASKS);
        let first = simulate(&taskset);
        let second = simulate(&taskset);

        assert_eq!(first, second);
        assert!(taskset.iter().all(|t| t.deadline() == t.period()));
    }

    #[test]
    fn test_single_task() {
        let schedule = simulate(&taskset(&[("A", 2, 5, 1)]));

        assert_eq!(schedule.hyperperiod(), 5);
        assert_eq!(triples(&schedule), [("A", 0, 2), ("A", 2, 4), ("A", 4, 6)]);
        assert_eq!(schedule.deadline_misses(), 0);
    }

    #[test]
    fn test_tie_break_policies_differ() {
        let params = [("A", 1, 4, 1), ("B", 1, 4, 1)];

        let schedule = simulate(&taskset(&params));
        assert_eq!(
            triples(&schedule),
            [("A", 0, 1), ("B", 1, 2), ("A", 2, 3), ("B", 3, 4), ("A", 4, 5)]
        );

        let scheduler = EarliestDeadlineFirst::new(TieBreak::Carried);
        let schedule = simulate_with(&taskset(&params), &scheduler);
        assert_eq!(
            triples(&schedule),
            [("A", 0, 1), ("B", 1, 2), ("B", 2, 3), ("A", 3, 4), ("A", 4, 5)]
        );
    }

    #[test]
    fn test_deadline_multiplier() {
        let schedule = simulate(&taskset(&[("A", 1, 4, 2), ("B", 2, 6, 1)]));

        assert_eq!(schedule.hyperperiod(), 12);
        assert_eq!(
            triples(&schedule),
            [
                ("B", 0, 2),
                ("A", 2, 3),
                ("A", 3, 4),
                ("B", 4, 6),
                ("A", 6, 7),
                ("B", 7, 9),
                ("A", 9, 10),
                ("A", 10, 11),
                ("B", 11, 13),
            ]
        );
        assert_eq!(schedule.deadline_misses(), 0);
    }

    #[test]
    fn test_overload_is_counted() {
        let schedule = simulate(&taskset(&[("A", 3, 4, 1), ("B", 3, 4, 1)]));

        assert_eq!(triples(&schedule), [("A", 0, 3), ("B", 3, 6)]);
        assert_eq!(schedule.deadline_misses(), 1);
    }

    #[test]
    fn test_schedule_properties() {
        let params = [("A", 2, 6, 1), ("B", 1, 4, 2), ("C", 3, 9, 1), ("D", 1, 3, 1)];
        let taskset = taskset(&params);
        let schedule = simulate(&taskset);
        let horizon = multiple_lcm(&[6, 4, 9, 3]).expect("no overflow");
        let intervals = schedule.intervals();

        assert_eq!(schedule.hyperperiod(), horizon);
        assert!(intervals.windows(2).all(|w| w[0].start() <= w[1].start()));
        assert!(intervals.iter().all(|i| i.start() <= horizon));
        assert!(intervals.last().map_or(false, |i| i.end() > horizon));

        for task in taskset.iter() {
            let own: Vec<&ScheduledInterval> = schedule.intervals_of(task.name()).collect();
            assert!(own.iter().all(|i| i.duration() == task.execution_time()));
            assert!(own.windows(2).all(|w| !w[0].overlaps(w[1])));
            if horizon >= task.deadline_multiplier() * task.period() {
                assert!(!own.is_empty(), "{} never ran", task.name());
            }
        }
    }

    #[test]
    fn test_sets_overflowing_time_never_reach_the_loop() {
        let half = 1 << (TimeStep::BITS - 1);
        let rejected = [
            vec![Task::new("A", 1, half, 1), Task::new("B", half, half, 1)],
            vec![Task::new("A", TimeStep::MAX, 2, 1), Task::new("B", 1, 1, 1)],
        ];

        for tasks in rejected {
            assert!(TaskSet::new(tasks).is_err());
        }
    }

    #[test]
    fn test_large_times_close_to_the_limit() {
        let quarter = 1 << (TimeStep::BITS - 2);
        let schedule = simulate(&taskset(&[("A", quarter, quarter, 1)]));

        assert_eq!(triples(&schedule), [("A", 0, quarter), ("A", quarter, 2 * quarter)]);
        assert_eq!(schedule.deadline_misses(), 0);
    }
}
