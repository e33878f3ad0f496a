//! One localization pass over an uploaded sensor batch.
//!
//! ```text
//! accel norms ─► AccelerationFilter ─► StepDetector ─┬─► step length ─┐
//!                                                    └─► heading ─────┴─► PositionIntegrator ─► landmark
//! ```
//!
//! The pass is all-or-nothing: the caller's pose is only written back when
//! every step was processed.

use std::sync::Arc;
use std::time::Instant;

use crate::config::PadaConfig;
use crate::core::{Pose2D, SensorBatch, snap_to_octant};
use crate::error::{Error, Result};
use crate::floor_plan::FloorPlan;
use crate::heading::HeadingEstimator;
use crate::integrator::{PositionIntegrator, StepOutcome};
use crate::signal::AccelerationFilter;
use crate::steps::{StepDetector, StepEvent};

/// A processed step and the pose it led to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepUpdate {
    /// Detected step
    pub step: StepEvent,
    /// Candidate move taken
    pub outcome: StepOutcome,
    /// Pose after the step
    pub pose: Pose2D,
}

/// Result of [`Localizer::localize`].
#[derive(Clone, Debug, PartialEq)]
pub struct Localization {
    /// Per-step results in order
    pub steps: Vec<StepUpdate>,
    /// Final pose
    pub pose: Pose2D,
    /// Landmark containing the final pose
    pub landmark: Option<String>,
}

impl Localization {
    /// Whether at least one step was detected.
    pub fn is_stepped(&self) -> bool {
        !self.steps.is_empty()
    }
}

/// Stateless step-to-pose pipeline shared by all sessions.
///
/// Per-session state (pose and heading estimator) is passed in by the caller.
#[derive(Clone, Debug)]
pub struct Localizer {
    filter: AccelerationFilter,
    detector: StepDetector,
    integrator: PositionIntegrator,
    snap_to_octant: bool,
}

impl Localizer {
    /// Build the pipeline from configuration.
    pub fn new(config: &PadaConfig, floor_plan: Arc<FloorPlan>) -> Result<Self> {
        Ok(Self {
            filter: AccelerationFilter::new(&config.signal)?,
            detector: StepDetector::new(&config.steps),
            integrator: PositionIntegrator::new(floor_plan),
            snap_to_octant: config.heading.snap_to_octant,
        })
    }

    /// Floor plan in use.
    pub fn floor_plan(&self) -> &FloorPlan {
        self.integrator.floor_plan()
    }

    /// Detect the steps in `batch` and walk `pose` through them.
    ///
    /// A batch too short to filter yields no steps and leaves the pose
    /// unchanged. Heading errors (e.g. missing orientation columns) abort
    /// the pass without touching `pose`.
    pub fn localize(
        &self,
        batch: &SensorBatch,
        pose: &mut Pose2D,
        heading: &mut dyn HeadingEstimator,
    ) -> Result<Localization> {
        let start = Instant::now();

        let filtered = match self.filter.apply(&batch.accel_norms()) {
            Ok(signal) => signal,
            Err(Error::InsufficientData { len, required }) => {
                log::debug!("Batch of {} samples too short (need {}), no steps", len, required);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let events = self.detector.detect(&filtered);

        let mut current = *pose;
        let mut steps = Vec::with_capacity(events.len());
        for step in events {
            let mut next = heading.next_heading(batch, &step, current.heading)?;
            if self.snap_to_octant {
                next = snap_to_octant(next);
            }
            current.set_heading(next);

            let outcome = self.integrator.apply_step(&mut current, step.step_length);
            log::trace!(
                "Step {}..{} len {:.3} m heading {:.3} -> {:?} ({:.4}, {:.4})",
                step.start_index,
                step.end_index,
                step.step_length,
                current.heading,
                outcome,
                current.x,
                current.y
            );
            steps.push(StepUpdate {
                step,
                outcome,
                pose: current,
            });
        }
        *pose = current;

        let landmark = self
            .floor_plan()
            .landmark_at(current.x, current.y)
            .map(str::to_owned);

        log::debug!(
            "Localized {} samples: {} steps via {} in {:.2} ms",
            batch.len(),
            steps.len(),
            heading.name(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Localization {
            steps,
            pose: current,
            landmark,
        })
    }
}
