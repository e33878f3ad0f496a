//! Per-client, per-channel message reassembly

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::{Duration, Instant};

use super::fragment::{Channel, Fragment};

/// A message could not be completed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReassemblyError {
    /// The reassembly timeout passed before every chunk arrived
    #[error("{channel} message incomplete: missing chunks {missing:?} of {total}")]
    MissingChunks {
        /// Channel of the discarded message
        channel: Channel,
        /// Chunk count announced by the first fragment
        total: usize,
        /// 1-based indices that never arrived, ascending
        missing: Vec<usize>,
    },

    /// A fragment announced more chunks than the server buffers
    #[error("{channel} message announces {total} chunks, limit is {limit}")]
    TooManyChunks {
        /// Channel of the rejected fragment
        channel: Channel,
        /// Announced chunk count
        total: usize,
        /// Configured `reassembly.max_chunks`
        limit: usize,
    },
}

/// A fully reassembled request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Channel the fragments arrived on
    pub channel: Channel,
    /// Fragment payloads joined in index order
    pub payload: String,
}

#[derive(Debug)]
struct Buffer {
    chunks: BTreeMap<usize, String>,
    expected: usize,
    first_seen: Instant,
}

impl Buffer {
    fn received(&self) -> usize {
        self.chunks.range(1..=self.expected).count()
    }

    fn missing(&self) -> Vec<usize> {
        (1..=self.expected)
            .filter(|i| !self.chunks.contains_key(i))
            .collect()
    }
}

/// Collects fragments per `(client, channel)` until they form a message.
///
/// Timeouts are only evaluated when a fragment for the same key arrives;
/// there is no background sweep. Fragments announcing more than
/// `max_chunks` chunks are rejected before any buffer is touched, which
/// bounds both the stored chunks and the missing-index report.
#[derive(Debug)]
pub struct Reassembler<K> {
    buffers: HashMap<(K, Channel), Buffer>,
    timeout: Duration,
    max_chunks: usize,
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> Reassembler<K> {
    pub fn new(timeout: Duration, max_chunks: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            timeout,
            max_chunks,
        }
    }

    /// Store a fragment. Returns the dispatched message once the key
    /// completes or times out, `None` while still waiting.
    pub fn accept(
        &mut self,
        client: K,
        fragment: Fragment,
        now: Instant,
    ) -> Option<Result<Message, ReassemblyError>> {
        let channel = fragment.channel;
        if fragment.total > self.max_chunks {
            return Some(Err(ReassemblyError::TooManyChunks {
                channel,
                total: fragment.total,
                limit: self.max_chunks,
            }));
        }
        let key = (client, channel);

        let buffer = self.buffers.entry(key.clone()).or_insert_with(|| Buffer {
            chunks: BTreeMap::new(),
            expected: fragment.total,
            first_seen: now,
        });

        if fragment.total != buffer.expected {
            log::warn!(
                "{:?}/{}: chunk {} claims {} chunks, buffer expects {}",
                key.0,
                channel,
                fragment.index,
                fragment.total,
                buffer.expected
            );
        }
        if buffer.chunks.insert(fragment.index, fragment.payload).is_some() {
            log::debug!("{:?}/{}: duplicate chunk {}", key.0, channel, fragment.index);
        }

        let complete = buffer.received() >= buffer.expected;
        let timed_out = now.saturating_duration_since(buffer.first_seen) >= self.timeout;
        if !complete && !timed_out {
            return None;
        }

        let buffer = self.buffers.remove(&key)?;
        let missing = buffer.missing();
        if !missing.is_empty() {
            return Some(Err(ReassemblyError::MissingChunks {
                channel,
                total: buffer.expected,
                missing,
            }));
        }

        let payload = buffer
            .chunks
            .range(1..=buffer.expected)
            .map(|(_, chunk)| chunk.as_str())
            .collect();
        Some(Ok(Message { channel, payload }))
    }

    /// Discard every open buffer of `client`. Returns how many were dropped.
    pub fn drop_client(&mut self, client: &K) -> usize {
        let before = self.buffers.len();
        self.buffers.retain(|(k, _), _| k != client);
        before - self.buffers.len()
    }

    /// Number of partially received messages.
    pub fn open_count(&self) -> usize {
        self.buffers.len()
    }
}
