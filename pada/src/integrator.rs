//! Obstacle-aware dead-reckoning integrator.
//!
//! Each step moves the pose by the stride vector, but only onto walkable
//! cells. When the full move is blocked the integrator slides along one
//! axis instead:
//!
//! 1. diagonal `(dx, dy)`
//! 2. vertical `(0, dy)`
//! 3. horizontal `(dx, 0)`
//!
//! If all three land outside the map or on an obstacle the pose stays put
//! and [`StepOutcome::Stayed`] is reported.

use std::sync::Arc;

use crate::core::Pose2D;
use crate::floor_plan::FloorPlan;

/// Which candidate move a step took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Full stride applied
    Diagonal,
    /// Only the y component applied
    Vertical,
    /// Only the x component applied
    Horizontal,
    /// Every candidate blocked; position unchanged
    Stayed,
}

impl StepOutcome {
    /// Whether the position changed.
    pub fn moved(self) -> bool {
        self != StepOutcome::Stayed
    }
}

/// Applies strides to a pose against a shared floor plan.
#[derive(Clone, Debug)]
pub struct PositionIntegrator {
    floor_plan: Arc<FloorPlan>,
}

impl PositionIntegrator {
    /// Create an integrator over `floor_plan`.
    pub fn new(floor_plan: Arc<FloorPlan>) -> Self {
        Self { floor_plan }
    }

    /// Floor plan in use.
    pub fn floor_plan(&self) -> &FloorPlan {
        &self.floor_plan
    }

    /// Move `pose` by a stride of `length_m` meters along `pose.heading`.
    pub fn apply_step(&self, pose: &mut Pose2D, length_m: f64) -> StepOutcome {
        let (dx, dy) = self.floor_plan.displacement(length_m, pose.heading);

        let candidates = [
            (StepOutcome::Diagonal, dx, dy),
            (StepOutcome::Vertical, 0.0, dy),
            (StepOutcome::Horizontal, dx, 0.0),
        ];

        for (outcome, cx, cy) in candidates {
            let (x, y) = (pose.x + cx, pose.y + cy);
            if self.floor_plan.is_walkable(x, y) {
                pose.x = x;
                pose.y = y;
                return outcome;
            }
        }

        log::debug!(
            "Step of {:.3} m from ({:.4}, {:.4}) blocked in every direction",
            length_m,
            pose.x,
            pose.y
        );
        StepOutcome::Stayed
    }
}
