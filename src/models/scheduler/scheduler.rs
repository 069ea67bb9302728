use crate::Task;

/// Selection policy driven by the simulator once per decision instant.
pub trait Scheduler {
    /// Returns the index in `tasks` of the task whose job runs next, or `None`
    /// if there is nothing to run.
    ///
    /// Implementations may reorder `tasks`; the returned index refers to the
    /// slice after reordering.
    fn schedule(&self, tasks: &mut [Task]) -> Option<usize>;
}
