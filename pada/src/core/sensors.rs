//! Inertial sensor samples as uploaded by the mobile client.
//!
//! A `locate` upload is a CSV table with one header row and one row per
//! sample:
//!
//! ```text
//! acc_x,acc_y,acc_z,gyro_x,gyro_y,gyro_z[,ori_x,ori_y,ori_z]
//! ```
//!
//! Acceleration is in m/s², angular velocity in rad/s, and orientation in
//! degrees with component 0 being the azimuth (yaw).

use crate::error::{Error, Result};

/// Number of columns without orientation.
const IMU_COLUMNS: usize = 6;
/// Number of columns with orientation.
const IMU_ORIENTATION_COLUMNS: usize = 9;

/// One inertial sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorSample {
    /// Acceleration [x, y, z] in m/s².
    pub accel: [f64; 3],
    /// Angular velocity [x, y, z] in rad/s.
    pub gyro: [f64; 3],
    /// Absolute orientation [azimuth, pitch, roll] in degrees, if reported.
    pub orientation: Option<[f64; 3]>,
}

impl SensorSample {
    /// Create a sample without orientation.
    pub fn new(accel: [f64; 3], gyro: [f64; 3]) -> Self {
        Self {
            accel,
            gyro,
            orientation: None,
        }
    }

    /// Attach an orientation reading.
    pub fn with_orientation(mut self, orientation: [f64; 3]) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Magnitude of the acceleration vector.
    #[inline]
    pub fn accel_norm(&self) -> f64 {
        let [x, y, z] = self.accel;
        (x * x + y * y + z * z).sqrt()
    }

    /// Yaw rate (z-axis angular velocity).
    #[inline]
    pub fn yaw_rate(&self) -> f64 {
        self.gyro[2]
    }
}

/// Ordered batch of samples consumed by one localization pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensorBatch {
    samples: Vec<SensorSample>,
}

impl SensorBatch {
    /// Wrap an already-built sample sequence.
    pub fn new(samples: Vec<SensorSample>) -> Self {
        Self { samples }
    }

    /// Parse a CSV upload.
    ///
    /// A leading row containing non-numeric fields is treated as the header
    /// and skipped. Blank lines are ignored.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut samples = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let values: std::result::Result<Vec<f64>, _> =
                fields.iter().map(|f| f.parse::<f64>()).collect();

            let values = match values {
                Ok(values) => values,
                Err(_) if samples.is_empty() => {
                    log::trace!("Skipping header row: {}", line);
                    continue;
                }
                Err(e) => {
                    return Err(Error::Parse(format!(
                        "line {}: invalid number ({})",
                        line_no + 1,
                        e
                    )));
                }
            };

            let sample = match values.len() {
                IMU_COLUMNS => SensorSample::new(
                    [values[0], values[1], values[2]],
                    [values[3], values[4], values[5]],
                ),
                n if n >= IMU_ORIENTATION_COLUMNS => SensorSample::new(
                    [values[0], values[1], values[2]],
                    [values[3], values[4], values[5]],
                )
                .with_orientation([values[6], values[7], values[8]]),
                n => {
                    return Err(Error::Parse(format!(
                        "line {}: expected {} or {} columns, got {}",
                        line_no + 1,
                        IMU_COLUMNS,
                        IMU_ORIENTATION_COLUMNS,
                        n
                    )));
                }
            };
            samples.push(sample);
        }

        Ok(Self { samples })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the batch holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples in order.
    #[inline]
    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    /// Acceleration magnitude of every sample.
    pub fn accel_norms(&self) -> Vec<f64> {
        self.samples.iter().map(SensorSample::accel_norm).collect()
    }

    /// Sum of yaw rates over `[start, end)`.
    pub fn yaw_rate_sum(&self, start: usize, end: usize) -> Result<f64> {
        if start > end || end > self.samples.len() {
            return Err(Error::StepOutOfRange {
                start,
                end,
                len: self.samples.len(),
            });
        }
        Ok(self.samples[start..end]
            .iter()
            .map(SensorSample::yaw_rate)
            .sum())
    }

    /// Orientation azimuth (degrees) at `index`.
    pub fn azimuth_at(&self, index: usize) -> Result<f64> {
        let sample = self.samples.get(index).ok_or(Error::StepOutOfRange {
            start: index,
            end: index + 1,
            len: self.samples.len(),
        })?;
        sample
            .orientation
            .map(|o| o[0])
            .ok_or(Error::MissingOrientation { index })
    }
}

impl From<Vec<SensorSample>> for SensorBatch {
    fn from(samples: Vec<SensorSample>) -> Self {
        Self::new(samples)
    }
}
