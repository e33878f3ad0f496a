//! JSON replies

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Landmark name sent when the position is not inside any landmark
pub const NO_LANDMARK: &str = "none";

/// Reply to a `locate` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocateReply {
    #[serde(rename = "isStepped")]
    pub is_stepped: bool,
    pub x: f64,
    pub y: f64,
    pub radian: f64,
    pub landmark: String,
}

/// Reply to an `update` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReply {
    pub x: f64,
    pub y: f64,
    pub radian: f64,
}

/// Any reply the server sends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    /// `start` and `end` acknowledgement
    Ack(bool),
    Locate(LocateReply),
    Update(UpdateReply),
}

impl Reply {
    /// Serialize to the datagram sent back to the client.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
