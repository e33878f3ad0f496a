//! Floor plan: obstacle mask, landmarks and the position frame.
//!
//! Positions are kept in one of two frames ([`PositionUnits`]):
//!
//! | Units        | Position `x`        | Floor cell `x`  |
//! |--------------|---------------------|-----------------|
//! | `normalized` | fraction of width   | `x · width`     |
//! | `cells`      | grid cells          | `x`             |
//!
//! `y` maps the same way against `height`. With `flip_y` the floor
//! coordinate becomes `height − floor_y`, for masks stored with the origin
//! in the top-left corner.
//!
//! Landmark centers and radii are in position units.

mod grid;
mod landmarks;

pub use grid::OccupancyGrid;
pub use landmarks::{Landmark, LandmarkIndex};

use serde::{Deserialize, Serialize};

use crate::config::FloorPlanSection;
use crate::error::{Error, Result};

/// Units pedestrian positions are expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionUnits {
    /// Fractions of the grid extent, `[0, 1)` inside the map
    Normalized,
    /// Grid cells
    #[default]
    Cells,
}

/// Static map shared by every session.
#[derive(Clone, Debug)]
pub struct FloorPlan {
    grid: OccupancyGrid,
    landmarks: LandmarkIndex,
    units: PositionUnits,
    flip_y: bool,
    meters_per_cell: f64,
}

impl FloorPlan {
    /// Assemble a floor plan from already-loaded parts.
    pub fn new(
        grid: OccupancyGrid,
        landmarks: LandmarkIndex,
        units: PositionUnits,
        flip_y: bool,
        meters_per_cell: f64,
    ) -> Result<Self> {
        if !(meters_per_cell > 0.0) {
            return Err(Error::Config(format!(
                "meters_per_cell must be positive, got {}",
                meters_per_cell
            )));
        }
        Ok(Self {
            grid,
            landmarks,
            units,
            flip_y,
            meters_per_cell,
        })
    }

    /// Load the obstacle mask and landmark table named in `config`.
    pub fn load(config: &FloorPlanSection) -> Result<Self> {
        let grid = OccupancyGrid::load(&config.obstacle_mask)?;
        let landmarks = match &config.landmarks {
            Some(path) => LandmarkIndex::load(path)?,
            None => LandmarkIndex::default(),
        };
        Self::new(
            grid,
            landmarks,
            config.units,
            config.flip_y,
            config.meters_per_cell,
        )
    }

    /// Obstacle grid.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Landmark index.
    pub fn landmarks(&self) -> &LandmarkIndex {
        &self.landmarks
    }

    /// Position units.
    pub fn units(&self) -> PositionUnits {
        self.units
    }

    /// Physical size of a grid cell in meters.
    pub fn meters_per_cell(&self) -> f64 {
        self.meters_per_cell
    }

    /// Map a position onto continuous floor (cell) coordinates.
    pub fn to_floor(&self, x: f64, y: f64) -> (f64, f64) {
        let (fx, fy) = match self.units {
            PositionUnits::Normalized => {
                (x * self.grid.width() as f64, y * self.grid.height() as f64)
            }
            PositionUnits::Cells => (x, y),
        };
        if self.flip_y {
            (fx, self.grid.height() as f64 - fy)
        } else {
            (fx, fy)
        }
    }

    /// Map floor (cell) coordinates back into position units.
    pub fn from_floor(&self, floor_x: f64, floor_y: f64) -> (f64, f64) {
        let floor_y = if self.flip_y {
            self.grid.height() as f64 - floor_y
        } else {
            floor_y
        };
        match self.units {
            PositionUnits::Normalized => (
                floor_x / self.grid.width() as f64,
                floor_y / self.grid.height() as f64,
            ),
            PositionUnits::Cells => (floor_x, floor_y),
        }
    }

    /// Displacement in position units for a stride of `length_m` meters along `heading`.
    pub fn displacement(&self, length_m: f64, heading: f64) -> (f64, f64) {
        let cells = length_m / self.meters_per_cell;
        let (dx, dy) = (cells * heading.cos(), cells * heading.sin());
        match self.units {
            PositionUnits::Normalized => (
                dx / self.grid.width() as f64,
                dy / self.grid.height() as f64,
            ),
            PositionUnits::Cells => (dx, dy),
        }
    }

    /// Whether a position is inside the map on a free cell.
    pub fn is_walkable(&self, x: f64, y: f64) -> bool {
        let (fx, fy) = self.to_floor(x, y);
        self.grid.is_free(fx, fy)
    }

    /// Name of the first landmark containing the position.
    pub fn landmark_at(&self, x: f64, y: f64) -> Option<&str> {
        self.landmarks.first_match(x, y).map(|l| l.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plan(units: PositionUnits, flip_y: bool) -> FloorPlan {
        FloorPlan::new(
            OccupancyGrid::empty(100, 50).with_obstacle(10, 40),
            LandmarkIndex::new(vec![Landmark::new("desk", 0.5, 0.5, 0.1)]),
            units,
            flip_y,
            0.6,
        )
        .unwrap()
    }

    #[test]
    fn test_normalized_frame() {
        let p = plan(PositionUnits::Normalized, false);
        let (fx, fy) = p.to_floor(0.25, 0.5);
        assert_relative_eq!(fx, 25.0);
        assert_relative_eq!(fy, 25.0);
        let (x, y) = p.from_floor(fx, fy);
        assert_relative_eq!(x, 0.25);
        assert_relative_eq!(y, 0.5);
        assert!(!p.is_walkable(0.105, 0.81));
    }

    #[test]
    fn test_flip_y() {
        let p = plan(PositionUnits::Cells, true);
        let (fx, fy) = p.to_floor(10.5, 9.5);
        assert_relative_eq!(fx, 10.5);
        assert_relative_eq!(fy, 40.5);
        assert!(!p.is_walkable(10.5, 9.5));
        let (_, y) = p.from_floor(fx, fy);
        assert_relative_eq!(y, 9.5);
    }

    #[test]
    fn test_displacement_units() {
        let cells = plan(PositionUnits::Cells, false);
        let (dx, dy) = cells.displacement(0.6, 0.0);
        assert_relative_eq!(dx, 1.0);
        assert_relative_eq!(dy, 0.0);

        let norm = plan(PositionUnits::Normalized, false);
        let (dx, dy) = norm.displacement(1.2, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(dx, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dy, 2.0 / 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_landmark_lookup() {
        let p = plan(PositionUnits::Normalized, false);
        assert_eq!(p.landmark_at(0.55, 0.5), Some("desk"));
        assert_eq!(p.landmark_at(0.1, 0.1), None);
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        let result = FloorPlan::new(
            OccupancyGrid::empty(2, 2),
            LandmarkIndex::default(),
            PositionUnits::Cells,
            false,
            0.0,
        );
        assert!(result.is_err());
    }
}
