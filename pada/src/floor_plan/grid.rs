//! Static obstacle mask over the discretized floor plan.

use std::path::Path;

use crate::error::{Error, Result};

/// Immutable boolean occupancy grid; `true` cells are obstacles.
///
/// Cells are addressed `(ix, iy)` with `ix < width` and `iy < height`. In
/// the text format each line is one `ix` row and each token one `iy` column,
/// so the first file dimension is the x extent.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Grid with no obstacles.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build from rows of equal length (`rows[ix][iy]`).
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let width = rows.len();
        let height = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(Error::InvalidFloorPlan("obstacle mask is empty".into()));
        }
        if let Some((ix, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != height) {
            return Err(Error::InvalidFloorPlan(format!(
                "row {} has {} cells, expected {}",
                ix,
                row.len(),
                height
            )));
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse the text mask format.
    ///
    /// Tokens are separated by whitespace or commas and may be `0`/`1`,
    /// `true`/`false` (any case) or any number (non-zero is an obstacle).
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let row = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(|token| parse_cell(token, line_no + 1))
                .collect::<Result<Vec<bool>>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Load a mask file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidFloorPlan(format!("failed to read {}: {}", path.display(), e))
        })?;
        let grid = Self::parse(&text)?;
        log::info!(
            "Loaded obstacle mask {} ({}x{}, {} obstacle cells)",
            path.display(),
            grid.width,
            grid.height,
            grid.obstacle_count()
        );
        Ok(grid)
    }

    /// Mark a cell as obstacle (builder style).
    pub fn with_obstacle(mut self, ix: usize, iy: usize) -> Self {
        if ix < self.width && iy < self.height {
            self.cells[ix * self.height + iy] = true;
        }
        self
    }

    /// Extent along x (number of rows).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent along y (number of columns).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether cell `(ix, iy)` is an obstacle. Out-of-range cells count as obstacles.
    #[inline]
    pub fn is_obstacle(&self, ix: usize, iy: usize) -> bool {
        if ix >= self.width || iy >= self.height {
            return true;
        }
        self.cells[ix * self.height + iy]
    }

    /// Whether a continuous floor coordinate lies inside the grid on a free cell.
    ///
    /// Valid coordinates satisfy `0 ≤ x < width − 0.5` and `0 ≤ y < height − 0.5`.
    pub fn is_free(&self, floor_x: f64, floor_y: f64) -> bool {
        let x_max = self.width as f64 - 0.5;
        let y_max = self.height as f64 - 0.5;
        if !((0.0..x_max).contains(&floor_x) && (0.0..y_max).contains(&floor_y)) {
            return false;
        }
        !self.is_obstacle(floor_x.floor() as usize, floor_y.floor() as usize)
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

fn parse_cell(token: &str, line_no: usize) -> Result<bool> {
    if token.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    token
        .parse::<f64>()
        .map(|v| v != 0.0)
        .map_err(|_| Error::InvalidFloorPlan(format!("line {}: bad cell '{}'", line_no, token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let text = "0 1 0\nFalse,True,false\n# comment\n\n0.000e+00 1.000e+00 0\n";
        let grid = OccupancyGrid::parse(text).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_obstacle(0, 1));
        assert!(grid.is_obstacle(1, 1));
        assert!(grid.is_obstacle(2, 1));
        assert!(!grid.is_obstacle(2, 2));
        assert_eq!(grid.obstacle_count(), 3);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(OccupancyGrid::parse("0 0 0\n0 0\n").is_err());
        assert!(OccupancyGrid::parse("").is_err());
        assert!(OccupancyGrid::parse("0 maybe\n").is_err());
    }

    #[test]
    fn test_bounds() {
        let grid = OccupancyGrid::empty(10, 20);
        assert!(grid.is_free(0.0, 0.0));
        assert!(grid.is_free(9.49, 19.49));
        assert!(!grid.is_free(9.5, 5.0));
        assert!(!grid.is_free(5.0, 19.5));
        assert!(!grid.is_free(-0.01, 5.0));
        assert!(!grid.is_free(5.0, -0.01));
        assert!(!grid.is_free(f64::NAN, 5.0));
    }

    #[test]
    fn test_obstacle_lookup_floors_coordinates() {
        let grid = OccupancyGrid::empty(10, 10).with_obstacle(3, 4);
        assert!(!grid.is_free(3.0, 4.0));
        assert!(!grid.is_free(3.99, 4.99));
        assert!(grid.is_free(4.0, 4.5));
        assert!(grid.is_free(3.5, 3.99));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mask.txt");
        std::fs::write(&path, "0 0\n1 0\n").unwrap();
        let grid = OccupancyGrid::load(&path).unwrap();
        assert!(grid.is_obstacle(1, 0));
        assert!(OccupancyGrid::load(dir.path().join("missing.txt")).is_err());
    }
}
