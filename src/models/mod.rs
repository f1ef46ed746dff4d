mod record;
mod report;
pub mod task;
pub mod taskset;
pub mod scheduler;

pub use record::{DeadlineMiss, Laxity, StateRecord};
pub use report::{SimulationReport, TraceSink};
pub use task::Task;
pub use taskset::{Feasibility, Horizon, TaskSet};

pub type TimeStep = usize;
