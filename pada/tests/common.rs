//! Test utilities for Pada integration tests.
//!
//! Synthetic walking batches: a still lead-in, a sinusoidal vertical
//! acceleration swing (one period per step) and a still tail.

#![allow(dead_code)]

use std::f64::consts::PI;
use std::sync::Arc;

use pada::{FloorPlan, LandmarkIndex, OccupancyGrid, PositionUnits, SensorBatch, SensorSample};

/// Sampling rate used by every synthetic batch (Hz).
pub const SAMPLE_RATE: f64 = 100.0;

/// Gravity offset of the synthetic accelerometer.
pub const GRAVITY: f64 = 9.8;

/// Still samples before and after the swing.
const STILL: usize = 40;

/// Build a walking batch of `steps` steps at `cadence` Hz.
///
/// `amplitude(t)` is the swing amplitude (m/s²) at time `t` seconds into
/// the walk; `yaw_rate` is applied to every sample.
pub fn walking_batch(
    steps: usize,
    cadence: f64,
    amplitude: impl Fn(f64) -> f64,
    yaw_rate: f64,
) -> SensorBatch {
    let swing = (steps as f64 * SAMPLE_RATE / cadence) as usize;
    let samples = (0..STILL + swing + STILL)
        .map(|i| {
            let z = if (STILL..STILL + swing).contains(&i) {
                let t = (i - STILL) as f64 / SAMPLE_RATE;
                GRAVITY + amplitude(t) * (2.0 * PI * cadence * t).sin()
            } else {
                GRAVITY
            };
            SensorSample::new([0.0, 0.0, z], [0.0, 0.0, yaw_rate])
        })
        .collect();
    SensorBatch::new(samples)
}

/// Steady walk: constant 2 m/s² swing at 1.25 steps per second.
pub fn steady_walk(steps: usize, yaw_rate: f64) -> SensorBatch {
    walking_batch(steps, 1.25, |_| 2.0, yaw_rate)
}

/// Batch of a phone lying still.
pub fn still_batch(len: usize) -> SensorBatch {
    SensorBatch::new(vec![
        SensorSample::new([0.0, 0.0, GRAVITY], [0.0; 3]);
        len
    ])
}

/// Render a batch as the CSV a client uploads.
pub fn to_csv(batch: &SensorBatch) -> String {
    let mut csv = String::from("acc_x,acc_y,acc_z,gyro_x,gyro_y,gyro_z\n");
    for s in batch.samples() {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            s.accel[0], s.accel[1], s.accel[2], s.gyro[0], s.gyro[1], s.gyro[2]
        ));
    }
    csv
}

/// Open floor plan in cell units with 0.6 m cells.
pub fn open_plan(width: usize, height: usize) -> Arc<FloorPlan> {
    plan_with(OccupancyGrid::empty(width, height), LandmarkIndex::default())
}

/// Floor plan in cell units with 0.6 m cells over `grid`.
pub fn plan_with(grid: OccupancyGrid, landmarks: LandmarkIndex) -> Arc<FloorPlan> {
    Arc::new(FloorPlan::new(grid, landmarks, PositionUnits::Cells, false, 0.6).unwrap())
}
