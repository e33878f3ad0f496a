//! Absolute orientation heading, relative to the session's first step.

use crate::core::SensorBatch;
use crate::error::Result;
use crate::steps::StepEvent;

use super::HeadingEstimator;

/// Heading from the orientation sensor's azimuth.
///
/// The first step seen after construction or [`reset`](HeadingEstimator::reset)
/// fixes the reference azimuth, so a session always starts walking along
/// the heading it was started with.
#[derive(Clone, Debug, Default)]
pub struct AbsoluteOrientation {
    reference: Option<f64>,
}

impl AbsoluteOrientation {
    /// Create an estimator with no reference yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached reference azimuth (radians), if a step has been seen.
    pub fn reference(&self) -> Option<f64> {
        self.reference
    }
}

impl HeadingEstimator for AbsoluteOrientation {
    fn next_heading(
        &mut self,
        batch: &SensorBatch,
        step: &StepEvent,
        _current: f64,
    ) -> Result<f64> {
        let reading = batch.azimuth_at(step.end_index)?.to_radians();
        let reference = *self.reference.get_or_insert_with(|| {
            log::debug!("Orientation reference set to {:.3} rad", reading);
            reading
        });
        Ok(reading - reference)
    }

    fn reset(&mut self) {
        self.reference = None;
    }

    fn name(&self) -> &'static str {
        "orientation"
    }
}
