use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Tolerance used when comparing the utilisation against 1.
pub const UTILISATION_EPSILON: f64 = 1e-9;

/// Latest instant a simulation may reach; laxities are computed as `i64`.
pub const MAX_TIMESTEP: usize = i64::MAX as usize;

/// Process exit codes of the simulator binary.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SchedulingCode {
    Schedulable = 0,
    DeadlineMissed = 2,
    InvalidInput = 5,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Policy {
    /// Earliest Deadline First
    Edf,
    /// Least Laxity First
    Llf,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Edf => write!(f, "EDF"),
            Policy::Llf => write!(f, "LLF"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "edf" => Ok(Policy::Edf),
            "llf" => Ok(Policy::Llf),
            other => Err(format!("unknown scheduling policy '{other}'")),
        }
    }
}

/// Final key used when the policy comparator cannot separate two tasks.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum TieBreak {
    /// First task of the task set wins
    #[default]
    InputOrder,
    /// Lexicographically smallest task name wins
    Name,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order" => Ok(TieBreak::InputOrder),
            "name" => Ok(TieBreak::Name),
            other => Err(format!("unknown tie-break '{other}'")),
        }
    }
}

/// State of a task at one tick of the trace.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Running,
    Waiting,
    Idle,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Running => write!(f, "running"),
            TaskState::Waiting => write!(f, "waiting"),
            TaskState::Idle => write!(f, "idle"),
        }
    }
}
