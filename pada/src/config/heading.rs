//! Heading estimation configuration section.

use serde::{Deserialize, Serialize};

/// Which heading source a deployment trusts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStrategy {
    /// Integrate the gyroscope yaw rate over each step
    #[default]
    Gyro,
    /// Absolute orientation sensor, relative to the first step of the session
    Orientation,
}

/// Heading settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HeadingSection {
    /// Active strategy
    #[serde(default)]
    pub strategy: HeadingStrategy,

    /// Snap the heading to the nearest 45° after every step
    #[serde(default)]
    pub snap_to_octant: bool,
}
