//! Angle utilities.
//!
//! All angles are in radians, counter-clockwise positive from the +X axis
//! of the floor plan.

use std::f64::consts::{FRAC_PI_4, PI};

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Normalize angle to [-π, π).
///
/// # Example
/// ```
/// use pada::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(PI / 2.0) - PI / 2.0).abs() < 1e-12);
/// assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-12);
/// assert!((normalize_angle(-2.5 * PI) + PI / 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TWO_PI;
    if a >= PI {
        a -= TWO_PI;
    } else if a < -PI {
        a += TWO_PI;
    }
    a
}

/// Signed shortest angular difference from `from` to `to`, in [-π, π).
#[inline]
pub fn angle_diff(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Snap a heading to the nearest multiple of 45°.
///
/// Corridor-aligned buildings make the eight compass octants a useful prior
/// when gyro drift is large.
///
/// # Example
/// ```
/// use pada::core::math::snap_to_octant;
/// use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
///
/// assert!((snap_to_octant(0.7) - FRAC_PI_4).abs() < 1e-12);
/// assert!((snap_to_octant(1.5) - FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn snap_to_octant(angle: f64) -> f64 {
    let octant = (normalize_angle(angle) / FRAC_PI_4).round();
    normalize_angle(octant * FRAC_PI_4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_range() {
        for i in -20..20 {
            let a = normalize_angle(i as f64 * 0.7);
            assert!((-PI..PI).contains(&a), "{} out of range", a);
        }
    }

    #[test]
    fn test_angle_diff_wraps() {
        let diff = angle_diff(-0.9 * PI, 0.9 * PI);
        assert_relative_eq!(diff, -0.2 * PI, epsilon = 1e-9);
    }

    #[test]
    fn test_snap_to_octant() {
        assert_relative_eq!(snap_to_octant(0.1), 0.0, epsilon = 1e-12);
        assert_relative_eq!(snap_to_octant(-1.4), -FRAC_PI_2, epsilon = 1e-12);
        // 3π/4 + a bit stays at 3π/4
        assert_relative_eq!(snap_to_octant(2.4), 3.0 * FRAC_PI_4, epsilon = 1e-12);
        // Just below π snaps to -π after normalization
        assert_relative_eq!(snap_to_octant(3.1).abs(), PI, epsilon = 1e-12);
    }
}
