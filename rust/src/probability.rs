//! Probability of finishing the project by a target time.
//!
//! The project duration is modelled as a normal variable whose mean is the
//! expected duration and whose variance is the summed variance of the
//! critical tasks.

use thiserror::Error;

use crate::graph::TaskGraph;

/// Errors from probability estimation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbabilityError {
    #[error("Target time must be a finite number, got {0}")]
    InvalidTargetTime(f64),
    /// No spread on the critical path; the normal model is undefined.
    #[error("Critical path variance is zero (expected duration {expected_duration})")]
    ZeroVariance { expected_duration: f64 },
}

/// Chebyshev coefficients for erfc on [0, inf), fractional error ~1.2e-16.
const ERFC_COEFFICIENTS: [f64; 28] = [
    -1.302_653_719_781_709_4,
    6.419_697_923_564_902_6e-1,
    1.947_647_320_418_583_6e-2,
    -9.561_514_786_808_631e-3,
    -9.465_953_444_820_36e-4,
    3.668_394_978_527_61e-4,
    4.252_332_480_690_7e-5,
    -2.027_857_811_253_4e-5,
    -1.624_290_004_647e-6,
    1.303_655_835_580e-6,
    1.562_644_172_2e-8,
    -8.523_809_591_5e-8,
    6.529_054_439e-9,
    5.059_343_495e-9,
    -9.913_641_56e-10,
    -2.273_651_22e-10,
    9.646_791_1e-11,
    2.394_038e-12,
    -6.886_027e-12,
    8.944_87e-13,
    3.130_92e-13,
    -1.127_08e-13,
    3.81e-16,
    7.106e-15,
    -1.523e-15,
    -9.4e-17,
    1.21e-16,
    -2.8e-17,
];

/// Complementary error function for z >= 0.
fn erfc_nonnegative(z: f64) -> f64 {
    let t = 2.0 / (2.0 + z);
    let ty = 4.0 * t - 2.0;
    let mut d = 0.0;
    let mut dd = 0.0;
    for &coefficient in ERFC_COEFFICIENTS[1..].iter().rev() {
        let tmp = d;
        d = ty * d - dd + coefficient;
        dd = tmp;
    }
    t * (-z * z + 0.5 * (ERFC_COEFFICIENTS[0] + ty * d) - dd).exp()
}

/// Complementary error function.
pub fn erfc(x: f64) -> f64 {
    if x >= 0.0 {
        erfc_nonnegative(x)
    } else {
        2.0 - erfc_nonnegative(-x)
    }
}

/// Standard normal cumulative distribution function.
pub fn standard_normal_cdf(z: f64) -> f64 {
    (0.5 * erfc(-z / std::f64::consts::SQRT_2)).clamp(0.0, 1.0)
}

/// Sum of the variances of critical tasks.
pub fn critical_variance(graph: &TaskGraph) -> f64 {
    graph
        .tasks()
        .iter()
        .filter(|t| t.is_critical())
        .map(|t| t.variance)
        .sum()
}

/// Probability of completing within `target_time`.
///
/// Fails with `ZeroVariance` when the critical tasks carry no variance;
/// callers decide how to report that case (see [`degenerate_probability`]).
pub fn completion_probability(
    graph: &TaskGraph,
    expected_duration: f64,
    target_time: f64,
) -> Result<f64, ProbabilityError> {
    if !target_time.is_finite() {
        return Err(ProbabilityError::InvalidTargetTime(target_time));
    }

    let std_dev = critical_variance(graph).sqrt();
    if std_dev == 0.0 {
        return Err(ProbabilityError::ZeroVariance { expected_duration });
    }

    let z = (target_time - expected_duration) / std_dev;
    Ok(standard_normal_cdf(z))
}

/// Probability for a deterministic duration: certain if the target is not
/// earlier than the expected duration, impossible otherwise.
pub fn degenerate_probability(expected_duration: f64, target_time: f64) -> f64 {
    if target_time >= expected_duration {
        1.0
    } else {
        0.0
    }
}
