//! Signal filter configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Low-pass filter applied to the acceleration norm
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignalSection {
    /// Sensor sampling frequency (Hz)
    #[serde(default = "defaults::sampling_frequency")]
    pub sampling_frequency: f64,

    /// Filter cutoff: the fastest cadence a pedestrian walks at (Hz)
    #[serde(default = "defaults::cutoff_step_frequency")]
    pub cutoff_step_frequency: f64,

    /// Divide the norm by gravity before filtering
    ///
    /// Off by default: calibrated handsets already report m/s².
    #[serde(default)]
    pub normalize_by_gravity: bool,

    /// Gravity used for normalization (m/s²)
    #[serde(default = "defaults::gravity")]
    pub gravity: f64,
}

impl Default for SignalSection {
    fn default() -> Self {
        Self {
            sampling_frequency: defaults::sampling_frequency(),
            cutoff_step_frequency: defaults::cutoff_step_frequency(),
            normalize_by_gravity: false,
            gravity: defaults::gravity(),
        }
    }
}

impl SignalSection {
    /// Sample period in seconds
    pub fn sample_period(&self) -> f64 {
        1.0 / self.sampling_frequency
    }
}
