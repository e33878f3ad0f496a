//! Zero-crossing step detector.
//!
//! Operates on the centered, low-pass filtered acceleration norm. One step
//! is one positive half-wave (heel strike, body rising) followed by one
//! negative half-wave:
//!
//! ```text
//!        peak
//!        ╭─╮
//!  ─────╯   ╰─────╮     ╭─────
//!      c0      c1  ╰─╮─╯ c2
//!                   valley
//! ```
//!
//! # Algorithm
//!
//! 1. Zero crossings: indices `i` with `s[i] · s[i+1] < 0`.
//! 2. If the first crossing goes positive→negative it is dropped, so the
//!    sequence starts on a rising edge.
//! 3. `(c0,c1), (c2,c3), …` are positive half-waves; the peak is the first
//!    maximum in `s[c2k..c2k+1]`.
//! 4. `(c1,c2), (c3,c4), …` are negative half-waves; the valley is the first
//!    minimum in `s[c2k+1..c2k+2]`.
//! 5. Peaks must exceed `+threshold`, valleys must fall below `−threshold`.
//! 6. Surviving peaks and valleys are zipped index-wise; step `k` spans
//!    crossings `c2k`, `c2k+1`, `c2k+2`.

use crate::config::StepSection;

use super::length::compute_step_length;

/// A detected step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepEvent {
    /// Zero crossing where the step's positive half-wave begins
    pub start_index: usize,
    /// Zero crossing between the positive and negative half-waves
    pub middle_index: usize,
    /// Zero crossing where the step's negative half-wave ends
    pub end_index: usize,
    /// Filtered peak value
    pub peak: f64,
    /// Filtered valley value
    pub valley: f64,
    /// Weinberg step length (meters)
    pub step_length: f64,
}

/// Indices `i` where the signal changes sign between `i` and `i + 1`.
pub fn zero_crossings(signal: &[f64]) -> Vec<usize> {
    signal
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] * w[1] < 0.0)
        .map(|(i, _)| i)
        .collect()
}

/// Index of the first maximum (`want_max`) or first minimum in `signal[range]`.
fn extremum(signal: &[f64], start: usize, end: usize, want_max: bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for i in start..end {
        let better = match best {
            None => true,
            Some(b) if want_max => signal[i] > signal[b],
            Some(b) => signal[i] < signal[b],
        };
        if better {
            best = Some(i);
        }
    }
    best
}

/// Step detector over one filtered batch.
#[derive(Clone, Debug)]
pub struct StepDetector {
    acceleration_threshold: f64,
    weinberg_gain: f64,
    min_samples: usize,
}

impl StepDetector {
    /// Create a detector from configuration.
    pub fn new(config: &StepSection) -> Self {
        Self {
            acceleration_threshold: config.acceleration_threshold,
            weinberg_gain: config.weinberg_gain,
            min_samples: config.min_samples,
        }
    }

    /// Peak/valley threshold in use.
    pub fn acceleration_threshold(&self) -> f64 {
        self.acceleration_threshold
    }

    /// Detect steps in a filtered, zero-centered acceleration norm.
    ///
    /// Returns steps in chronological order; an empty vector when the
    /// signal is shorter than `min_samples` or never crosses zero.
    pub fn detect(&self, signal: &[f64]) -> Vec<StepEvent> {
        if signal.len() < self.min_samples {
            log::debug!(
                "Batch of {} samples below minimum {}, no steps",
                signal.len(),
                self.min_samples
            );
            return Vec::new();
        }

        let mut crossings = zero_crossings(signal);
        if crossings.is_empty() {
            return Vec::new();
        }

        let first = crossings[0];
        if signal[first] > 0.0 && signal[first + 1] < 0.0 {
            crossings.remove(0);
        }

        let threshold = self.acceleration_threshold;

        // Positive half-waves: (c0,c1), (c2,c3), ...
        let peaks: Vec<usize> = crossings
            .chunks_exact(2)
            .filter_map(|pair| extremum(signal, pair[0], pair[1], true))
            .filter(|&i| signal[i] > threshold)
            .collect();

        // Negative half-waves: (c1,c2), (c3,c4), ...
        let valleys: Vec<usize> = crossings
            .get(1..)
            .unwrap_or_default()
            .chunks_exact(2)
            .filter_map(|pair| extremum(signal, pair[0], pair[1], false))
            .filter(|&i| signal[i] < -threshold)
            .collect();

        let steps: Vec<StepEvent> = peaks
            .iter()
            .zip(valleys.iter())
            .enumerate()
            .map(|(k, (&peak, &valley))| StepEvent {
                start_index: crossings[2 * k],
                middle_index: crossings[2 * k + 1],
                end_index: crossings[2 * k + 2],
                peak: signal[peak],
                valley: signal[valley],
                step_length: compute_step_length(signal[peak], signal[valley], self.weinberg_gain),
            })
            .collect();

        log::trace!(
            "{} crossings, {} peaks, {} valleys -> {} steps",
            crossings.len(),
            peaks.len(),
            valleys.len(),
            steps.len()
        );

        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn detector(threshold: f64) -> StepDetector {
        StepDetector::new(&StepSection {
            acceleration_threshold: threshold,
            ..StepSection::default()
        })
    }

    #[test]
    fn test_zero_crossings() {
        let s = [1.0, -1.0, -2.0, 0.0, 3.0, 1.0, -1.0];
        // 0 is not a sign change on either side
        assert_eq!(zero_crossings(&s), vec![0, 5]);
    }

    #[test]
    fn test_leading_falling_edge_dropped() {
        let s = [
            1.0, -1.0, -2.0, -1.0, 1.0, 2.0, 1.0, -1.0, -2.0, -1.0, 1.0, 2.0,
        ];
        let steps = detector(0.5).detect(&s);
        assert_eq!(steps.len(), 1);
        let step = steps[0];
        assert_eq!(step.start_index, 3);
        assert_eq!(step.middle_index, 6);
        assert_eq!(step.end_index, 9);
        assert_relative_eq!(step.peak, 2.0);
        assert_relative_eq!(step.valley, -2.0);
        assert_relative_eq!(step.step_length, 0.5 * 4.0_f64.powf(0.25), epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_filters_small_swings() {
        let s = [
            -1.0, 1.0, 2.0, 1.0, -1.0, -2.0, -1.0, 1.0, 2.0, 1.0, -1.0, -2.0,
        ];
        assert_eq!(detector(0.5).detect(&s).len(), 1);
        assert!(detector(2.5).detect(&s).is_empty());
    }

    #[test]
    fn test_short_signal_no_steps() {
        let s = [-1.0, 2.0, -2.0, 2.0, -2.0, 2.0, -2.0, 2.0, -2.0];
        assert!(detector(0.1).detect(&s).is_empty());
    }

    #[test]
    fn test_no_crossings_no_steps() {
        assert!(detector(0.001).detect(&[0.5; 40]).is_empty());
        assert!(detector(0.001).detect(&[0.0; 40]).is_empty());
    }

    #[test]
    fn test_indices_ordered() {
        let s: Vec<f64> = (0..300)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 50.0).sin() + 0.01)
            .collect();
        let steps = detector(0.1).detect(&s);
        assert!(!steps.is_empty());
        for step in &steps {
            assert!(step.start_index < step.middle_index);
            assert!(step.middle_index < step.end_index);
        }
        for pair in steps.windows(2) {
            assert!(pair[0].end_index <= pair[1].start_index);
        }
    }
}
