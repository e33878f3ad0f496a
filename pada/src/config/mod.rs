//! Engine configuration loading.
//!
//! Loads all engine settings from one TOML document with sensible defaults;
//! every key is optional.
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`SignalSection`] | Sampling rate, low-pass cutoff, gravity normalization |
//! | [`StepSection`] | Peak/valley threshold, Weinberg gain, minimum batch size |
//! | [`HeadingSection`] | Gyro or absolute-orientation heading, octant snapping |
//! | [`FloorPlanSection`] | Obstacle mask, landmarks, position units |
//!
//! ## Example TOML
//!
//! ```toml
//! [signal]
//! sampling_frequency = 100.0
//! cutoff_step_frequency = 2.0
//!
//! [steps]
//! acceleration_threshold = 0.001
//! weinberg_gain = 0.5
//!
//! [heading]
//! strategy = "gyro"        # or "orientation"
//!
//! [floor_plan]
//! obstacle_mask = "data/obstacle_mask.txt"
//! landmarks = "data/landmarks.toml"
//! units = "cells"          # or "normalized"
//! meters_per_cell = 0.6
//! ```

mod defaults;
mod floor_plan;
mod heading;
mod pada;
mod signal;
mod steps;

pub use floor_plan::FloorPlanSection;
pub use heading::{HeadingSection, HeadingStrategy};
pub use pada::PadaConfig;
pub use signal::SignalSection;
pub use steps::StepSection;
