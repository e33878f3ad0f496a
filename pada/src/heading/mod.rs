//! Heading estimation for detected steps.
//!
//! Two interchangeable sources produce the heading a step is walked in:
//!
//! - [`GyroIntegration`]: integrates the yaw rate over the step window and
//!   adds it to the running heading. Relative, drifts over time.
//! - [`AbsoluteOrientation`]: reads the device's orientation azimuth at the
//!   end of the step, relative to the azimuth seen on the session's first
//!   step. Replaces the running heading instead of accumulating.
//!
//! A deployment picks one via [`HeadingStrategy`]; sessions own a boxed
//! estimator built by [`create_estimator`].

mod gyro;
mod orientation;

pub use gyro::GyroIntegration;
pub use orientation::AbsoluteOrientation;

use crate::config::{HeadingSection, HeadingStrategy, SignalSection};
use crate::core::SensorBatch;
use crate::error::Result;
use crate::steps::StepEvent;

/// Produces the heading for a step window.
///
/// # Example
///
/// ```
/// use pada::core::{SensorBatch, SensorSample};
/// use pada::heading::{GyroIntegration, HeadingEstimator};
/// use pada::steps::StepEvent;
///
/// // 0.5 rad/s for 100 samples at 100 Hz = 0.5 rad
/// let batch = SensorBatch::new(vec![SensorSample::new([0.0; 3], [0.0, 0.0, 0.5]); 100]);
/// let step = StepEvent {
///     start_index: 0,
///     middle_index: 50,
///     end_index: 100,
///     peak: 1.0,
///     valley: -1.0,
///     step_length: 0.6,
/// };
/// let mut gyro = GyroIntegration::new(100.0);
/// let heading = gyro.next_heading(&batch, &step, 0.25).unwrap();
/// assert!((heading - 0.75).abs() < 1e-9);
/// ```
pub trait HeadingEstimator: Send {
    /// Heading (radians) to walk `step` in, given the heading before it.
    fn next_heading(
        &mut self,
        batch: &SensorBatch,
        step: &StepEvent,
        current: f64,
    ) -> Result<f64>;

    /// Forget any per-session state (cached references).
    fn reset(&mut self);

    /// Name for logging.
    fn name(&self) -> &'static str;
}

/// Build the estimator a deployment is configured for.
pub fn create_estimator(
    heading: &HeadingSection,
    signal: &SignalSection,
) -> Box<dyn HeadingEstimator> {
    match heading.strategy {
        HeadingStrategy::Gyro => Box::new(GyroIntegration::new(signal.sampling_frequency)),
        HeadingStrategy::Orientation => Box::new(AbsoluteOrientation::new()),
    }
}
