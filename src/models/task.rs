use super::TimeStep;

#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    name: String,
    execution_time: TimeStep,      // C_i : Execution time of every job.
    period: TimeStep,              // T_i : Period.
    deadline_multiplier: TimeStep, // D_i = T_i * multiplier.
    deadline: TimeStep,            // Absolute deadline of the current job.
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        execution_time: TimeStep,
        period: TimeStep,
        deadline_multiplier: TimeStep,
    ) -> Self {
        Self {
            name: name.into(),
            execution_time,
            period,
            deadline_multiplier,
            // Overflow is rejected when the task joins a TaskSet
            deadline: period.saturating_mul(deadline_multiplier),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn execution_time(&self) -> TimeStep {
        self.execution_time
    }

    pub fn period(&self) -> TimeStep {
        self.period
    }

    pub fn deadline_multiplier(&self) -> TimeStep {
        self.deadline_multiplier
    }

    /// `None` when `period * deadline_multiplier` does not fit in a `TimeStep`.
    pub fn relative_deadline(&self) -> Option<TimeStep> {
        self.period.checked_mul(self.deadline_multiplier)
    }

    pub fn deadline(&self) -> TimeStep {
        self.deadline
    }

    pub fn utilisation(&self) -> f64 {
        self.execution_time as f64 / self.period as f64
    }

    /// Urgency of the current job at time `t`; negative once the deadline has passed.
    pub fn slack(&self, t: TimeStep) -> i128 {
        self.deadline as i128 - t as i128
    }

    pub fn misses_deadline(&self, end_time: TimeStep) -> bool {
        end_time > self.deadline
    }

    /// Rolls the absolute deadline over to the next job.
    pub(crate) fn complete_job(&mut self) {
        self.deadline += self.period;
    }
}
