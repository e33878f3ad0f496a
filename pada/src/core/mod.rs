//! Core types for the Pada engine.
//!
//! ## Type Categories
//!
//! - [`Pose2D`]: pedestrian position (x, y) and heading on the floor plan
//! - [`SensorSample`] / [`SensorBatch`]: inertial samples uploaded by the client
//! - [`math`]: angle normalization and octant snapping
//!
//! Headings are counter-clockwise positive from the +X axis, in radians.

pub mod math;
mod pose;
mod sensors;

pub use math::{normalize_angle, snap_to_octant};
pub use pose::Pose2D;
pub use sensors::{SensorBatch, SensorSample};
