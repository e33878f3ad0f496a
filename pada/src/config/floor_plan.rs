//! Floor plan configuration section.

use serde::{Deserialize, Serialize};

use crate::floor_plan::PositionUnits;

use super::defaults;

/// Static map inputs and the position frame
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FloorPlanSection {
    /// Obstacle mask text file (one grid row per line)
    #[serde(default = "defaults::obstacle_mask")]
    pub obstacle_mask: String,

    /// Landmark table (TOML). Absent means no landmarks.
    #[serde(default)]
    pub landmarks: Option<String>,

    /// Units positions are expressed in
    #[serde(default)]
    pub units: PositionUnits,

    /// Flip the y axis when mapping positions onto grid cells
    #[serde(default)]
    pub flip_y: bool,

    /// Physical size of one grid cell (meters)
    #[serde(default = "defaults::meters_per_cell")]
    pub meters_per_cell: f64,
}

impl Default for FloorPlanSection {
    fn default() -> Self {
        Self {
            obstacle_mask: defaults::obstacle_mask(),
            landmarks: None,
            units: PositionUnits::default(),
            flip_y: false,
            meters_per_cell: defaults::meters_per_cell(),
        }
    }
}
