pub mod constants;
pub mod errors;
pub mod lcm;

pub use constants::{Policy, SchedulingCode, TaskState, TieBreak, MAX_TIMESTEP, UTILISATION_EPSILON};
pub use errors::SchedulingError;
pub use lcm::multiple_lcm;
