//! Error types for PadaServer

use thiserror::Error;

use crate::protocol::ReassemblyError;

/// PadaServer error type
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Reassembly failed: {0}")]
    Reassembly(#[from] ReassemblyError),

    #[error("Engine error: {0}")]
    Engine(#[from] pada::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for ServerError {
    fn from(e: toml::de::Error) -> Self {
        ServerError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
