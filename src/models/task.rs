use super::{DeadlineMiss, Laxity, TimeStep};
use crate::utils::{SchedulingError, MAX_TIMESTEP};

#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    name: String,
    execution_time: TimeStep,    // C_i : Worst-case execution time.
    period: TimeStep,            // T_i : Period.
    relative_deadline: TimeStep, // D_i : Relative deadline.
    arrival_time: TimeStep,      // A_i : First release.
    remaining_time: TimeStep,    // Units left in the current period.
    next_deadline: TimeStep,     // Absolute deadline of the current period.
    next_release: TimeStep,      // Start of the next period.
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        execution_time: TimeStep,
        period: TimeStep,
        relative_deadline: TimeStep,
        arrival_time: TimeStep,
    ) -> Self {
        Self {
            name: name.into(),
            execution_time,
            period,
            relative_deadline,
            arrival_time,
            remaining_time: execution_time,
            next_deadline: arrival_time.saturating_add(relative_deadline),
            next_release: arrival_time.saturating_add(period),
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

    pub fn relative_deadline(&self) -> TimeStep {
        self.relative_deadline
    }

    pub fn arrival_time(&self) -> TimeStep {
        self.arrival_time
    }

    pub fn remaining_time(&self) -> TimeStep {
        self.remaining_time
    }

    pub fn next_deadline(&self) -> TimeStep {
        self.next_deadline
    }

    pub fn next_release(&self) -> TimeStep {
        self.next_release
    }

    /// Start of the current period.
    pub fn period_start(&self) -> TimeStep {
        self.next_release - self.period
    }

    pub fn utilisation(&self) -> f64 {
        self.execution_time as f64 / self.period as f64
    }

    /// Rejects timing parameters the simulation cannot make sense of.
    pub fn validate(&self) -> Result<(), SchedulingError> {
        if self.name.trim().is_empty() {
            return Err(SchedulingError::InvalidInput(
                "task name must not be empty".to_string(),
            ));
        }
        let checks = [
            ("execution time", self.execution_time),
            ("period", self.period),
            ("relative deadline", self.relative_deadline),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(SchedulingError::InvalidInput(format!(
                    "task {}: {} must be strictly positive",
                    self.name, field
                )));
            }
        }
        if self.latest_instant(self.arrival_time).is_none() {
            return Err(SchedulingError::InvalidInput(format!(
                "task {}: arrival, period and deadline do not fit the time range",
                self.name
            )));
        }
        Ok(())
    }

    /// Furthest instant the task state can reference while simulating up to
    /// `until`, `None` past `MAX_TIMESTEP`.
    pub fn latest_instant(&self, until: TimeStep) -> Option<TimeStep> {
        until
            .checked_add(self.period)?
            .checked_add(self.relative_deadline)
            .filter(|&instant| instant <= MAX_TIMESTEP)
    }

    /// Puts the runtime state back to its value before the first release.
    pub fn reset(&mut self) {
        self.remaining_time = self.execution_time;
        self.next_deadline = self.arrival_time.saturating_add(self.relative_deadline);
        self.next_release = self.arrival_time.saturating_add(self.period);
    }

    /// Starts a new period if `t` reached the next release.
    ///
    /// Returns the missed deadline when the period that just ended still had
    /// work left.
    pub fn roll_over(&mut self, t: TimeStep) -> Option<DeadlineMiss> {
        if t < self.next_release {
            return None;
        }

        let missed = (self.remaining_time > 0)
            .then(|| DeadlineMiss::new(self.name.clone(), t, self.next_deadline));

        self.remaining_time = self.execution_time;
        self.next_deadline = self.next_release + self.relative_deadline;
        self.next_release += self.period;

        missed
    }

    /// A task is ready once it arrived, its current period began and it still
    /// has work left in that period.
    pub fn is_ready(&self, t: TimeStep) -> bool {
        self.arrival_time <= t && self.remaining_time > 0 && self.period_start() <= t
    }

    /// Runs the task for one tick.
    pub fn execute(&mut self) {
        debug_assert!(self.remaining_time > 0, "executing a finished task");
        self.remaining_time = self.remaining_time.saturating_sub(1);
    }

    /// Slack at time `t`: time left until the deadline minus the remaining work.
    ///
    /// When the current deadline is already behind `t` (the period has not
    /// rolled over yet), the deadline of the period following `t` is used
    /// instead. A finished task has an infinite laxity.
    pub fn laxity(&self, t: TimeStep) -> Laxity {
        if self.remaining_time == 0 {
            return Laxity::Infinite;
        }

        let t = t as i64;
        let arrival = self.arrival_time as i64;
        let period = self.period as i64;

        let mut time_to_deadline = self.next_deadline as i64 - t;
        if time_to_deadline < 0 {
            let periods_passed = (t - arrival).div_euclid(period);
            let next_period_deadline =
                arrival + (periods_passed + 1) * period + self.relative_deadline as i64;
            time_to_deadline = next_period_deadline - t;
        }

        Laxity::Finite(time_to_deadline - self.remaining_time as i64)
    }
}
