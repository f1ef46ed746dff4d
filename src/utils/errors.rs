use thiserror::Error;

/// Errors raised before a simulation starts. Deadline misses are not errors,
/// they are reported alongside the trace.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulingError {
    /// Empty task set, non-positive timing parameter or duplicated name
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The hyperperiod does not fit in a `TimeStep`
    #[error("hyperperiod overflows the time representation")]
    HorizonOverflow,
}
