//! Acceleration-norm conditioning for step detection.
//!
//! Walking produces one acceleration swing per step at 1-2 Hz on top of
//! gravity. The filter here removes the gravity offset and everything above
//! the fastest plausible cadence, without shifting peaks in time:
//!
//! 1. optional division by gravity
//! 2. removal of the batch mean (centers the waveform on zero)
//! 3. zero-phase 2nd-order Butterworth low-pass ([`BiquadFilter::filtfilt`])
//!
//! The mean is removed before filtering rather than after; the filter has
//! unity DC gain, so the two orders agree, and a perfectly still batch then
//! filters to an all-zero signal with no spurious zero crossings.
//!
//! The filter needs the complete batch; it is not a streaming filter.

mod biquad;

pub use biquad::{BiquadFilter, PAD_LEN};

use crate::config::SignalSection;
use crate::error::Result;

/// Low-pass filter for acceleration norms, built once per deployment.
#[derive(Clone, Debug)]
pub struct AccelerationFilter {
    filter: BiquadFilter,
    gravity: Option<f64>,
}

impl AccelerationFilter {
    /// Build the filter from configuration.
    pub fn new(config: &SignalSection) -> Result<Self> {
        let filter =
            BiquadFilter::new_lowpass(config.cutoff_step_frequency, config.sampling_frequency)?;
        Ok(Self {
            filter,
            gravity: config.normalize_by_gravity.then_some(config.gravity),
        })
    }

    /// Filter and center an acceleration-norm sequence.
    ///
    /// Returns [`crate::Error::InsufficientData`] when the sequence is too
    /// short to pad.
    pub fn apply(&self, norms: &[f64]) -> Result<Vec<f64>> {
        let scale = self.gravity.map_or(1.0, |g| 1.0 / g);
        let scaled: Vec<f64> = norms.iter().map(|v| v * scale).collect();

        let mean = if scaled.is_empty() {
            0.0
        } else {
            scaled.iter().sum::<f64>() / scaled.len() as f64
        };
        let centered: Vec<f64> = scaled.iter().map(|v| v - mean).collect();

        self.filter.filtfilt(&centered)
    }
}
