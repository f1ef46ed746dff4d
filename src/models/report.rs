use super::{DeadlineMiss, StateRecord, TimeStep};
use crate::utils::{Policy, TaskState};

/// Receives the output of a simulation run as it is produced.
pub trait TraceSink {
    fn record(&mut self, record: StateRecord);
    fn deadline_missed(&mut self, miss: DeadlineMiss);
}

/// Trace and deadline misses of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    policy: Policy,
    records: Vec<StateRecord>,
    misses: Vec<DeadlineMiss>,
}

impl SimulationReport {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            records: Vec::new(),
            misses: Vec::new(),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn misses(&self) -> &[DeadlineMiss] {
        &self.misses
    }

    pub fn has_missed(&self) -> bool {
        !self.misses.is_empty()
    }

    /// Records of a single tick, in task set order.
    pub fn records_at(&self, time: TimeStep) -> impl Iterator<Item = &StateRecord> {
        self.records.iter().filter(move |record| record.time == time)
    }

    /// Running task of every simulated tick, `None` for an idle processor.
    pub fn schedule(&self) -> Vec<(TimeStep, Option<&str>)> {
        let mut schedule: Vec<(TimeStep, Option<&str>)> = Vec::new();

        for record in &self.records {
            if schedule.last().map(|(time, _)| *time) != Some(record.time) {
                schedule.push((record.time, None));
            }
            if record.state == TaskState::Running {
                if let Some(last) = schedule.last_mut() {
                    last.1 = Some(record.task_name.as_str());
                }
            }
        }

        schedule
    }

    /// Ticks at which `task_name` held the processor.
    pub fn running_ticks(&self, task_name: &str) -> Vec<TimeStep> {
        self.records
            .iter()
            .filter(|record| record.task_name == task_name && record.state == TaskState::Running)
            .map(|record| record.time)
            .collect()
    }

    pub fn into_parts(self) -> (Vec<StateRecord>, Vec<DeadlineMiss>) {
        (self.records, self.misses)
    }
}

impl TraceSink for SimulationReport {
    fn record(&mut self, record: StateRecord) {
        self.records.push(record);
    }

    fn deadline_missed(&mut self, miss: DeadlineMiss) {
        self.misses.push(miss);
    }
}
