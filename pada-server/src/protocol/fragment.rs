//! Datagram parsing and client-side splitting

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ServerError};

/// Request channel named in every fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Reset the session pose
    Start,
    /// Sensor batch to localize
    Locate,
    /// External position estimate to fuse
    Update,
    /// Persist and close the trajectory
    End,
}

impl Channel {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Start => "start",
            Channel::Locate => "locate",
            Channel::Update => "update",
            Channel::End => "end",
        }
    }
}

impl FromStr for Channel {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "start" => Ok(Channel::Start),
            "locate" => Ok(Channel::Locate),
            "update" => Ok(Channel::Update),
            "end" => Ok(Channel::End),
            other => Err(ServerError::Protocol(format!("unknown channel '{}'", other))),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One received fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// 1-based chunk index
    pub index: usize,
    /// Number of chunks in the message
    pub total: usize,
    /// Request the message belongs to
    pub channel: Channel,
    /// This chunk's slice of the message text
    pub payload: String,
}

impl Fragment {
    /// Parse a raw datagram.
    pub fn from_bytes(datagram: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(datagram)
            .map_err(|e| ServerError::Protocol(format!("datagram is not UTF-8: {}", e)))?;
        Self::parse(text)
    }

    /// Parse `index/total/channel/payload`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.splitn(4, '/');
        let (Some(index), Some(total), Some(channel), Some(payload)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ServerError::Protocol(format!(
                "expected index/total/channel/payload, got {} bytes",
                text.len()
            )));
        };

        let index: usize = index
            .trim()
            .parse()
            .map_err(|_| ServerError::Protocol(format!("bad chunk index '{}'", index)))?;
        let total: usize = total
            .trim()
            .parse()
            .map_err(|_| ServerError::Protocol(format!("bad chunk count '{}'", total)))?;
        if index == 0 || total == 0 || index > total {
            return Err(ServerError::Protocol(format!(
                "chunk {} of {} out of range",
                index, total
            )));
        }

        Ok(Self {
            index,
            total,
            channel: channel.trim().parse()?,
            payload: payload.to_string(),
        })
    }

    /// Wire representation.
    pub fn encode(&self) -> String {
        format!("{}/{}/{}/{}", self.index, self.total, self.channel, self.payload)
    }
}

/// Split a message into datagrams of at most `chunk_chars` payload characters.
///
/// An empty payload still produces one datagram.
pub fn split_message(channel: Channel, payload: &str, chunk_chars: usize) -> Vec<String> {
    let chars: Vec<char> = payload.chars().collect();
    let pieces: Vec<String> = if chars.is_empty() {
        vec![String::new()]
    } else {
        chars
            .chunks(chunk_chars.max(1))
            .map(|c| c.iter().collect())
            .collect()
    };
    let total = pieces.len();

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, payload)| {
            Fragment {
                index: i + 1,
                total,
                channel,
                payload,
            }
            .encode()
        })
        .collect()
}
