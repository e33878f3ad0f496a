//! # Pada
//!
//! Pedestrian dead-reckoning engine for indoor positioning.
//!
//! ## Overview
//!
//! A phone uploads batches of inertial samples. Pada turns each batch into
//! a sequence of steps and walks a 2D pose across a building floor plan:
//!
//! - **Signal**: zero-phase Butterworth low-pass over the acceleration norm
//! - **Steps**: zero-crossing detection with Weinberg step length
//! - **Heading**: gyro integration or absolute orientation
//! - **Integrator**: obstacle-aware moves on an occupancy grid
//! - **Landmarks**: first-match lookup of named regions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pada::{FloorPlan, Localizer, PadaConfig, Pose2D, SensorBatch};
//! use pada::heading::create_estimator;
//!
//! let config = PadaConfig::load("pada.toml".as_ref())?;
//! let plan = Arc::new(FloorPlan::load(&config.floor_plan)?);
//! let localizer = Localizer::new(&config, plan)?;
//! let mut heading = create_estimator(&config.heading, &config.signal);
//!
//! let mut pose = Pose2D::new(0.13, 0.52, 0.0);
//! let batch = SensorBatch::from_csv(&upload)?;
//! let result = localizer.localize(&batch, &mut pose, heading.as_mut())?;
//! println!("{} steps, now at ({:.3}, {:.3})", result.steps.len(), pose.x, pose.y);
//! ```
//!
//! ## Coordinate System
//!
//! - X, Y: floor plan axes, in normalized or cell units (see [`PositionUnits`])
//! - Heading: radians in [-π, π), CCW positive from +X

#![warn(missing_docs)]

// Core types
pub mod core;

// Configuration
pub mod config;

// Error handling
pub mod error;

// Acceleration filtering
pub mod signal;

// Step detection and length
pub mod steps;

// Heading strategies
pub mod heading;

// Obstacle mask, landmarks, position frame
pub mod floor_plan;

// Dead reckoning on the floor plan
pub mod integrator;

// Full batch pipeline
pub mod localizer;

pub use config::{HeadingStrategy, PadaConfig};
pub use core::{Pose2D, SensorBatch, SensorSample};
pub use error::{Error, Result};
pub use floor_plan::{FloorPlan, Landmark, LandmarkIndex, OccupancyGrid, PositionUnits};
pub use heading::{HeadingEstimator, create_estimator};
pub use integrator::{PositionIntegrator, StepOutcome};
pub use localizer::{Localization, Localizer, StepUpdate};
pub use steps::{StepDetector, StepEvent};
