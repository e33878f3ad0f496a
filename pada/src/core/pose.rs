//! 2D pose of the pedestrian on the floor plan.

use super::math::normalize_angle;

/// Position and heading of a tracked pedestrian.
///
/// `x` and `y` are expressed in the floor plan's position units (see
/// [`crate::floor_plan::PositionUnits`]). `heading` is in radians,
/// counter-clockwise from the +X axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2D {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Heading in radians [-π, π).
    pub heading: f64,
}

impl Pose2D {
    /// Create a new pose. The heading is normalized to [-π, π).
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading: normalize_angle(heading),
        }
    }

    /// Replace the heading, normalizing it.
    #[inline]
    pub fn set_heading(&mut self, heading: f64) {
        self.heading = normalize_angle(heading);
    }

    /// Euclidean distance between the positions of two poses.
    #[inline]
    pub fn distance(&self, other: &Pose2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between this pose's position and `(x, y)`, keeping the heading.
    #[inline]
    pub fn midpoint(&self, x: f64, y: f64) -> Self {
        Self {
            x: (self.x + x) / 2.0,
            y: (self.y + y) / 2.0,
            heading: self.heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_new_normalizes_heading() {
        let pose = Pose2D::new(1.0, 2.0, 3.0 * PI / 2.0);
        assert_relative_eq!(pose.heading, -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint_keeps_heading() {
        let pose = Pose2D::new(0.0, 0.0, 1.0);
        let mid = pose.midpoint(4.0, -2.0);
        assert_relative_eq!(mid.x, 2.0);
        assert_relative_eq!(mid.y, -1.0);
        assert_relative_eq!(mid.heading, 1.0);
    }

    #[test]
    fn test_distance() {
        let a = Pose2D::new(0.0, 0.0, 0.0);
        let b = Pose2D::new(3.0, 4.0, 0.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }
}
