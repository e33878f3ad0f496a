//! Step detection configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Step detector and step length settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepSection {
    /// Minimum |filtered norm| for a peak or valley to count
    #[serde(default = "defaults::acceleration_threshold")]
    pub acceleration_threshold: f64,

    /// Weinberg gain K (proportional to leg length)
    #[serde(default = "defaults::weinberg_gain")]
    pub weinberg_gain: f64,

    /// Batches shorter than this produce no steps
    #[serde(default = "defaults::min_samples")]
    pub min_samples: usize,
}

impl Default for StepSection {
    fn default() -> Self {
        Self {
            acceleration_threshold: defaults::acceleration_threshold(),
            weinberg_gain: defaults::weinberg_gain(),
            min_samples: defaults::min_samples(),
        }
    }
}
