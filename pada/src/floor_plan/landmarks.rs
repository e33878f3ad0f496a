//! Named circular regions on the floor plan.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named circle in position units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Label reported to clients
    pub name: String,
    /// Center x
    pub x: f64,
    /// Center y
    pub y: f64,
    /// Match radius
    pub radius: f64,
}

impl Landmark {
    /// Create a landmark.
    pub fn new(name: impl Into<String>, x: f64, y: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            radius,
        }
    }

    /// Whether `(x, y)` lies within the radius (inclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.x).hypot(y - self.y) <= self.radius
    }
}

#[derive(Deserialize)]
struct LandmarkFile {
    #[serde(default)]
    landmarks: Vec<Landmark>,
}

/// Ordered landmark list. Earlier entries win when regions overlap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkIndex {
    landmarks: Vec<Landmark>,
}

impl LandmarkIndex {
    /// Build from an ordered list.
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Parse a `[[landmarks]]` TOML table.
    ///
    /// Names end up as bare CSV fields, so they must be non-empty and free
    /// of commas, quotes and control characters.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: LandmarkFile =
            toml::from_str(text).map_err(|e| Error::InvalidFloorPlan(e.to_string()))?;
        for landmark in &file.landmarks {
            if !valid_name(&landmark.name) {
                return Err(Error::InvalidFloorPlan(format!(
                    "landmark name {:?} is not a plain CSV field",
                    landmark.name
                )));
            }
            if !(landmark.radius >= 0.0) {
                return Err(Error::InvalidFloorPlan(format!(
                    "landmark '{}' has invalid radius {}",
                    landmark.name, landmark.radius
                )));
            }
        }
        Ok(Self::new(file.landmarks))
    }

    /// Load a landmark file. A missing file yields an empty index.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Landmark file {} not found, no landmarks", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let index = Self::from_toml(&text)?;
        log::info!("Loaded {} landmarks from {}", index.len(), path.display());
        Ok(index)
    }

    /// First landmark containing `(x, y)`.
    pub fn first_match(&self, x: f64, y: f64) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.contains(x, y))
    }

    /// Number of landmarks.
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

fn valid_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.chars().any(|c| c == ',' || c == '"' || c.is_control())
}
