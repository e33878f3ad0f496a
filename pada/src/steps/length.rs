//! Weinberg step length model.
//!
//! ```text
//! L = K · (a_max − a_min)^(1/4)
//! ```
//!
//! where `K` is an empirical gain proportional to the pedestrian's leg
//! length and `a_max`/`a_min` are the filtered acceleration extremes of the
//! step.

/// Step length in meters from a step's peak and valley magnitudes.
///
/// The swing is clamped at zero, so the result is never negative (or NaN).
///
/// # Example
/// ```
/// use pada::steps::compute_step_length;
///
/// let length = compute_step_length(1.0, -1.0, 0.5);
/// assert!((length - 0.5 * 2.0_f64.powf(0.25)).abs() < 1e-12);
/// assert_eq!(compute_step_length(1.0, -1.0, 0.0), 0.0);
/// ```
#[inline]
pub fn compute_step_length(peak: f64, valley: f64, weinberg_gain: f64) -> f64 {
    let swing = (peak - valley).max(0.0);
    weinberg_gain * swing.powf(0.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quartic_root() {
        assert_relative_eq!(compute_step_length(8.0, -8.0, 1.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(compute_step_length(0.5, -0.5, 0.7), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_non_negative() {
        for i in 0..50 {
            let peak = i as f64 * 0.13;
            let valley = -(i as f64) * 0.07;
            assert!(compute_step_length(peak, valley, 0.55) >= 0.0);
        }
        // Inverted input is clamped rather than producing NaN
        assert_eq!(compute_step_length(-1.0, 1.0, 0.5), 0.0);
    }

    #[test]
    fn test_zero_gain() {
        assert_eq!(compute_step_length(3.0, -2.0, 0.0), 0.0);
        assert_eq!(compute_step_length(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_larger_swing_longer_step() {
        let short = compute_step_length(0.5, -0.5, 0.5);
        let long = compute_step_length(2.0, -2.0, 0.5);
        assert!(long > short);
    }
}
