//! Second-order IIR section with zero-phase (forward-backward) application.
//!
//! Coefficients follow the transfer function
//!
//! ```text
//!         b0 + b1·z⁻¹ + b2·z⁻²
//! H(z) = ----------------------
//!          1 + a1·z⁻¹ + a2·z⁻²
//! ```
//!
//! and are evaluated in transposed direct form II.

use std::f64::consts::{PI, SQRT_2};

use crate::error::{Error, Result};

/// Samples of odd-extension padding applied at each end: `3 * max(len(a), len(b))`.
pub const PAD_LEN: usize = 9;

/// Second-order section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiquadFilter {
    b: [f64; 3],
    a1: f64,
    a2: f64,
}

impl BiquadFilter {
    /// 2nd-order Butterworth low-pass via the bilinear transform with
    /// frequency pre-warping.
    pub fn new_lowpass(cutoff_hz: f64, sample_rate_hz: f64) -> Result<Self> {
        if !(sample_rate_hz > 0.0) {
            return Err(Error::Config(format!(
                "sample rate must be positive, got {}",
                sample_rate_hz
            )));
        }
        let nyquist = sample_rate_hz / 2.0;
        if !(cutoff_hz > 0.0 && cutoff_hz < nyquist) {
            return Err(Error::Config(format!(
                "cutoff {} Hz must lie in (0, {}) Hz",
                cutoff_hz, nyquist
            )));
        }

        let k = (PI * cutoff_hz / sample_rate_hz).tan();
        let k2 = k * k;
        let norm = 1.0 / (1.0 + SQRT_2 * k + k2);
        let b0 = k2 * norm;

        Ok(Self {
            b: [b0, 2.0 * b0, b0],
            a1: 2.0 * (k2 - 1.0) * norm,
            a2: (1.0 - SQRT_2 * k + k2) * norm,
        })
    }

    /// Numerator coefficients `[b0, b1, b2]`.
    pub fn numerator(&self) -> [f64; 3] {
        self.b
    }

    /// Denominator coefficients `[1, a1, a2]`.
    pub fn denominator(&self) -> [f64; 3] {
        [1.0, self.a1, self.a2]
    }

    /// Gain at 0 Hz.
    pub fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (1.0 + self.a1 + self.a2)
    }

    /// Filter state for a unit step input that has been applied forever.
    ///
    /// Scaling it by the first input sample removes the start-up transient.
    fn steady_state(&self) -> [f64; 2] {
        let [b0, b1, b2] = self.b;
        let r0 = b1 - self.a1 * b0;
        let r1 = b2 - self.a2 * b0;
        let z0 = (r0 + r1) / (1.0 + self.a1 + self.a2);
        [z0, r1 - self.a2 * z0]
    }

    /// Causal filtering pass starting from state `z`.
    fn run(&self, input: impl Iterator<Item = f64>, mut z: [f64; 2]) -> Vec<f64> {
        let [b0, b1, b2] = self.b;
        input
            .map(|x| {
                let y = b0 * x + z[0];
                z[0] = b1 * x - self.a1 * y + z[1];
                z[1] = b2 * x - self.a2 * y;
                y
            })
            .collect()
    }

    /// Zero-phase filtering: forward pass, then backward pass.
    ///
    /// The signal is extended at both ends by point reflection about the end
    /// samples (odd extension, [`PAD_LEN`] samples), which needs more than
    /// [`PAD_LEN`] input samples.
    pub fn filtfilt(&self, signal: &[f64]) -> Result<Vec<f64>> {
        let n = signal.len();
        if n <= PAD_LEN {
            return Err(Error::InsufficientData {
                len: n,
                required: PAD_LEN + 1,
            });
        }

        let first = signal[0];
        let last = signal[n - 1];
        let mut extended = Vec::with_capacity(n + 2 * PAD_LEN);
        extended.extend((1..=PAD_LEN).rev().map(|i| 2.0 * first - signal[i]));
        extended.extend_from_slice(signal);
        extended.extend((1..=PAD_LEN).map(|i| 2.0 * last - signal[n - 1 - i]));

        let zi = self.steady_state();

        let forward = self.run(
            extended.iter().copied(),
            [zi[0] * extended[0], zi[1] * extended[0]],
        );

        let tail = forward[forward.len() - 1];
        let mut backward = self.run(forward.iter().rev().copied(), [zi[0] * tail, zi[1] * tail]);
        backward.reverse();

        Ok(backward[PAD_LEN..PAD_LEN + n].to_vec())
    }
}
