//! Gyroscope yaw integration.

use crate::core::SensorBatch;
use crate::error::Result;
use crate::steps::StepEvent;

use super::HeadingEstimator;

/// Adds `Σ yaw_rate · dt` over `[start_index, end_index)` to the running heading.
#[derive(Clone, Debug)]
pub struct GyroIntegration {
    sample_period: f64,
}

impl GyroIntegration {
    /// Create an integrator for the given sampling frequency (Hz).
    pub fn new(sampling_frequency: f64) -> Self {
        Self {
            sample_period: 1.0 / sampling_frequency,
        }
    }

    /// Heading change over a sample window (radians).
    pub fn turn_angle(&self, batch: &SensorBatch, start: usize, end: usize) -> Result<f64> {
        Ok(batch.yaw_rate_sum(start, end)? * self.sample_period)
    }
}

impl HeadingEstimator for GyroIntegration {
    fn next_heading(
        &mut self,
        batch: &SensorBatch,
        step: &StepEvent,
        current: f64,
    ) -> Result<f64> {
        let delta = self.turn_angle(batch, step.start_index, step.end_index)?;
        Ok(current + delta)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "gyro"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SensorSample;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn step(start: usize, end: usize) -> StepEvent {
        StepEvent {
            start_index: start,
            middle_index: (start + end) / 2,
            end_index: end,
            peak: 1.0,
            valley: -1.0,
            step_length: 0.7,
        }
    }

    #[test]
    fn test_quarter_turn() {
        // π/2 rad/s for 1 s at 50 Hz
        let batch = SensorBatch::new(vec![
            SensorSample::new([0.0, 0.0, 9.8], [0.0, 0.0, FRAC_PI_2]);
            60
        ]);
        let mut gyro = GyroIntegration::new(50.0);
        let heading = gyro.next_heading(&batch, &step(5, 55), 0.0).unwrap();
        assert_relative_eq!(heading, FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_only_yaw_axis_counts() {
        let batch = SensorBatch::new(vec![
            SensorSample::new([0.0, 0.0, 9.8], [3.0, -2.0, 0.0]);
            20
        ]);
        let mut gyro = GyroIntegration::new(100.0);
        let heading = gyro.next_heading(&batch, &step(0, 20), 1.0).unwrap();
        assert_relative_eq!(heading, 1.0);
    }

    #[test]
    fn test_window_out_of_range() {
        let batch = SensorBatch::new(vec![SensorSample::default(); 10]);
        let mut gyro = GyroIntegration::new(100.0);
        assert!(gyro.next_heading(&batch, &step(5, 15), 0.0).is_err());
    }
}
