use super::TimeStep;

/// One executed job: `task_name` ran on the processor during `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledInterval {
    task_name: String,
    start: TimeStep,
    end: TimeStep,
}

impl ScheduledInterval {
    pub fn new(task_name: impl Into<String>, start: TimeStep, end: TimeStep) -> Self {
        Self {
            task_name: task_name.into(),
            start,
            end,
        }
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn start(&self) -> TimeStep {
        self.start
    }

    pub fn end(&self) -> TimeStep {
        self.end
    }

    pub fn duration(&self) -> TimeStep {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &ScheduledInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
