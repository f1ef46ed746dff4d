use std::fmt;

use serde::{Serialize, Serializer};

use super::{Task, TimeStep};
use crate::utils::TaskState;

/// Slack of a task; a task with no work left never competes for the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Laxity {
    Finite(i64),
    Infinite,
}

impl fmt::Display for Laxity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Laxity::Finite(value) => write!(f, "{value}"),
            Laxity::Infinite => write!(f, "inf"),
        }
    }
}

impl Serialize for Laxity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Laxity::Finite(value) => serializer.serialize_i64(*value),
            Laxity::Infinite => serializer.serialize_str("inf"),
        }
    }
}

/// State of one task at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateRecord {
    pub task_name: String,
    pub time: TimeStep,
    pub state: TaskState,
    pub deadline: TimeStep,
    pub remaining: TimeStep,
    pub period_start: TimeStep,
    pub period_end: TimeStep,
    pub execution_time: TimeStep,
    pub laxity: Option<Laxity>, // LLF only
}

impl StateRecord {
    /// Snapshot of `task` once the decision for tick `time` has been applied.
    pub fn new(task: &Task, time: TimeStep, state: TaskState, laxity: Option<Laxity>) -> Self {
        Self {
            task_name: task.name().to_string(),
            time,
            state,
            deadline: task.next_deadline(),
            remaining: task.remaining_time(),
            period_start: task.period_start(),
            period_end: task.next_release(),
            execution_time: task.execution_time(),
            laxity,
        }
    }
}

/// A period that ended with work left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineMiss {
    pub task_name: String,
    pub time: TimeStep,     // Tick at which the miss was detected
    pub deadline: TimeStep, // Absolute deadline that was missed
}

impl DeadlineMiss {
    pub fn new(task_name: String, time: TimeStep, deadline: TimeStep) -> Self {
        Self {
            task_name,
            time,
            deadline,
        }
    }
}

impl fmt::Display for DeadlineMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task {} at t={} (deadline {})",
            self.task_name, self.time, self.deadline
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laxity_ordering() {
        assert!(Laxity::Finite(-3) < Laxity::Finite(0));
        assert!(Laxity::Finite(i64::MAX) < Laxity::Infinite);
    }

    #[test]
    fn test_record_snapshot() {
        let mut task = Task::new("A", 2, 5, 4, 1);
        task.execute();
        let record = StateRecord::new(&task, 1, TaskState::Running, None);

        assert_eq!(record.task_name, "A");
        assert_eq!(record.deadline, 5);
        assert_eq!(record.remaining, 1);
        assert_eq!(record.period_start, 1);
        assert_eq!(record.period_end, 6);
        assert_eq!(record.execution_time, 2);
    }

    #[test]
    fn test_record_csv_serialization() {
        let task = Task::new("A", 1, 4, 4, 0);
        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .serialize(StateRecord::new(&task, 0, TaskState::Waiting, Some(Laxity::Finite(3))))
            .unwrap();
        writer
            .serialize(StateRecord::new(&task, 1, TaskState::Idle, Some(Laxity::Infinite)))
            .unwrap();
        writer
            .serialize(StateRecord::new(&task, 2, TaskState::Idle, None))
            .unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "task_name,time,state,deadline,remaining,period_start,period_end,execution_time,laxity"
        );
        assert_eq!(lines[1], "A,0,waiting,4,1,0,4,1,3");
        assert_eq!(lines[2], "A,1,idle,4,1,0,4,1,inf");
        assert_eq!(lines[3], "A,2,idle,4,1,0,4,1,");
    }
}
