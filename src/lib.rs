//! Discrete-time simulation of EDF and LLF scheduling of periodic tasks on a
//! single processor.

pub mod models;
pub mod simulation;
pub mod utils;

pub use models::{
    scheduler, DeadlineMiss, Feasibility, Horizon, Laxity, SimulationReport, StateRecord, Task,
    TaskSet, TimeStep, TraceSink,
};
pub use simulation::{
    check_feasibility, compute_horizon, run_simulation, run_simulation_with_tie_break, simulate,
};
pub use utils::{constants, errors, lcm, Policy, SchedulingCode, SchedulingError, TaskState, TieBreak};

#[cfg(test)]
mod tests_prop;
