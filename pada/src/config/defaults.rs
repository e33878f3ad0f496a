//! Default value functions for serde deserialization.

pub fn sampling_frequency() -> f64 {
    100.0
}

pub fn cutoff_step_frequency() -> f64 {
    2.0
}

pub fn gravity() -> f64 {
    9.7
}

pub fn acceleration_threshold() -> f64 {
    0.001
}

pub fn weinberg_gain() -> f64 {
    0.5
}

pub fn min_samples() -> usize {
    10
}

pub fn meters_per_cell() -> f64 {
    0.6
}

pub fn obstacle_mask() -> String {
    "data/obstacle_mask.txt".to_string()
}
