pub mod scheduler;
pub mod edf_scheduler;
pub mod llf_scheduler;

pub use scheduler::{scheduler_for, Scheduler};
pub use edf_scheduler::EarliestDeadlineFirst;
pub use llf_scheduler::LeastLaxityFirst;
