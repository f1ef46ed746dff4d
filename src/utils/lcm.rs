use crate::models::TimeStep;
use crate::utils::SchedulingError;
use gcd::Gcd;

fn lcm(a: TimeStep, b: TimeStep) -> Result<TimeStep, SchedulingError> {
    (a / a.gcd(b))
        .checked_mul(b)
        .ok_or(SchedulingError::HorizonOverflow)
}

/// Least common multiple of all `numbers`, folded left to right.
pub fn multiple_lcm(numbers: &[TimeStep]) -> Result<TimeStep, SchedulingError> {
    if numbers.is_empty() {
        return Err(SchedulingError::InvalidInput(
            "cannot compute the lcm of an empty list of periods".to_string(),
        ));
    }
    if numbers.iter().any(|&n| n == 0) {
        return Err(SchedulingError::InvalidInput(
            "periods must be strictly positive".to_string(),
        ));
    }

    numbers.iter().try_fold(1, |acc, &x| lcm(acc, x))
}
