use crate::models::TimeStep;
use gcd::Gcd;

fn lcm(a: TimeStep, b: TimeStep) -> Option<TimeStep> {
    (a / a.gcd(b)).checked_mul(b)
}

/// Least common multiple of `numbers`, folded left to right.
///
/// Returns `None` if an intermediate value overflows. Callers must not pass zeros.
pub fn multiple_lcm(numbers: &[TimeStep]) -> Option<TimeStep> {
    numbers.iter().try_fold(1, |acc, &x| lcm(acc, x))
}
