use crate::{ScheduledInterval, TimeStep};

const TICK_EVERY: TimeStep = 10;

/// Bars of a single task, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    task_name: String,
    bars: Vec<(TimeStep, TimeStep)>,
}

impl TimelineRow {
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// `(start, end)` pairs.
    pub fn bars(&self) -> &[(TimeStep, TimeStep)] {
        &self.bars
    }

    fn is_busy(&self, t: TimeStep) -> bool {
        self.bars.iter().any(|&(start, end)| start <= t && t < end)
    }
}

/// Gantt-style view of a schedule: one row per task, in the order tasks first
/// appear in the interval sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timeline {
    rows: Vec<TimelineRow>,
    end: TimeStep,
}

impl Timeline {
    pub fn from_intervals(intervals: &[ScheduledInterval]) -> Self {
        let mut rows: Vec<TimelineRow> = Vec::new();

        for interval in intervals {
            let bar = (interval.start(), interval.end());
            match rows.iter_mut().find(|row| row.task_name == interval.task_name()) {
                Some(row) => row.bars.push(bar),
                None => rows.push(TimelineRow {
                    task_name: interval.task_name().to_string(),
                    bars: vec![bar],
                }),
            }
        }

        let end = intervals.iter().map(|i| i.end()).max().unwrap_or(0);
        Self { rows, end }
    }

    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }

    /// Latest end time over all bars.
    pub fn end(&self) -> TimeStep {
        self.end
    }

    /// Renders one character per time unit: `#` while the task runs, `.` otherwise,
    /// followed by a time axis labelled every ten units.
    pub fn render(&self) -> String {
        let width = self.rows.iter().map(|row| row.task_name.chars().count()).max().unwrap_or(0);
        let mut out = String::new();

        for row in &self.rows {
            let cells: String = (0..self.end)
                .map(|t| if row.is_busy(t) { '#' } else { '.' })
                .collect();
            out.push_str(&format!("{:<width$} |{}\n", row.task_name, cells));
        }

        let axis: String = (0..self.end)
            .map(|t| if t % TICK_EVERY == 0 { '+' } else { '-' })
            .collect();
        out.push_str(&format!("{:<width$} +{}\n", "", axis));

        let mut labels = String::new();
        let mut t = 0;
        while t < self.end {
            let label = t.to_string();
            if labels.len() < t {
                labels.push_str(&" ".repeat(t - labels.len()));
            }
            labels.push_str(&label);
            t += TICK_EVERY;
        }
        out.push_str(&format!("{:<width$}  {}\n", "", labels));

        out
    }
}
