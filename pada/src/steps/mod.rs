//! Step detection and step length estimation.
//!
//! - [`StepDetector`]: zero-crossing peak/valley pairing on the filtered norm
//! - [`compute_step_length`]: Weinberg model from a step's peak and valley

mod detector;
mod length;

pub use detector::{StepDetector, StepEvent, zero_crossings};
pub use length::compute_step_length;
