//! Error types for the Pada engine

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pada engine error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Batch too short to pad and filter
    #[error("Insufficient data: {len} samples, need at least {required}")]
    InsufficientData {
        /// Number of samples received
        len: usize,
        /// Minimum number of samples the filter accepts
        required: usize,
    },

    /// Malformed text input (sensor CSV, obstacle mask, pose rows)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Absolute-orientation heading requested from a batch without orientation columns
    #[error("Sample {index} has no orientation reading")]
    MissingOrientation {
        /// Sample offset that was queried
        index: usize,
    },

    /// Step window outside the batch
    #[error("Step window {start}..{end} outside batch of {len} samples")]
    StepOutOfRange {
        /// Window start
        start: usize,
        /// Window end
        end: usize,
        /// Batch length
        len: usize,
    },

    /// Obstacle mask or landmark table rejected
    #[error("Invalid floor plan: {0}")]
    InvalidFloorPlan(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
