//! Configuration loading for PadaServer
//!
//! One TOML file configures both the daemon and the engine; the engine's
//! sections (`[signal]`, `[steps]`, `[heading]`, `[floor_plan]`) sit at the
//! top level next to the daemon's own.

use crate::error::{Result, ServerError};
use pada::{PadaConfig, Pose2D};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub reassembly: ReassemblyConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(flatten)]
    pub engine: PadaConfig,
}

/// Socket settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// UDP bind address (default: 0.0.0.0:5000)
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Largest datagram accepted (default: 65536)
    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,

    /// Receive timeout so the loop can notice shutdown (default: 500)
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

/// Chunk reassembly settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReassemblyConfig {
    /// Seconds after the first fragment before a channel is dispatched regardless (default: 3.0)
    #[serde(default = "default_reassembly_timeout")]
    pub timeout_secs: f64,

    /// Largest `total_chunks` a fragment may announce (default: 1024)
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,
}

/// Pose a fresh session starts at
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_initial_x")]
    pub initial_x: f64,
    #[serde(default = "default_initial_y")]
    pub initial_y: f64,
    /// Radians
    #[serde(default)]
    pub initial_heading: f64,
}

/// Output configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory trajectory files are written to
    #[serde(default = "default_trajectory_dir")]
    pub trajectory_dir: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            recv_buffer_size: default_recv_buffer_size(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl Default for ReassemblyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_reassembly_timeout(),
            max_chunks: default_max_chunks(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_x: default_initial_x(),
            initial_y: default_initial_y(),
            initial_heading: 0.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            trajectory_dir: default_trajectory_dir(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0:5000".to_string()
}
fn default_recv_buffer_size() -> usize {
    65536
}
fn default_read_timeout_ms() -> u64 {
    500
}
fn default_reassembly_timeout() -> f64 {
    3.0
}
fn default_max_chunks() -> usize {
    1024
}
fn default_initial_x() -> f64 {
    13.0
}
fn default_initial_y() -> f64 {
    52.0
}
fn default_trajectory_dir() -> String {
    "output".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let timeout = self.reassembly.timeout_secs;
        if !(timeout.is_finite() && timeout > 0.0) {
            return Err(ServerError::Config(format!(
                "reassembly.timeout_secs must be positive and finite, got {}",
                timeout
            )));
        }
        if self.reassembly.max_chunks == 0 {
            return Err(ServerError::Config(
                "reassembly.max_chunks must be non-zero".to_string(),
            ));
        }
        if self.network.recv_buffer_size == 0 {
            return Err(ServerError::Config(
                "network.recv_buffer_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Pose every new session starts at
    pub fn initial_pose(&self) -> Pose2D {
        Pose2D::new(
            self.session.initial_x,
            self.session.initial_y,
            self.session.initial_heading,
        )
    }

    /// Reassembly timeout as a duration
    pub fn reassembly_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.reassembly.timeout_secs)
    }

    /// Socket read timeout as a duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.network.read_timeout_ms.max(1))
    }
}
