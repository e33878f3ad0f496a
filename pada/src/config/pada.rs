//! Main PadaConfig.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::floor_plan::FloorPlanSection;
use super::heading::HeadingSection;
use super::signal::SignalSection;
use super::steps::StepSection;

/// Full engine configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PadaConfig {
    /// Filter settings
    #[serde(default)]
    pub signal: SignalSection,

    /// Step detection and length settings
    #[serde(default)]
    pub steps: StepSection,

    /// Heading strategy
    #[serde(default)]
    pub heading: HeadingSection,

    /// Static map inputs
    #[serde(default)]
    pub floor_plan: FloorPlanSection,
}

impl PadaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
