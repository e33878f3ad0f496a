//! Chunked UDP request protocol
//!
//! # Datagram Format
//!
//! Clients split every request into UTF-8 datagrams:
//!
//! ```text
//! <chunk_index>/<total_chunks>/<channel>/<fragment_payload>
//! ```
//!
//! - **chunk_index**: 1-based position of this fragment
//! - **total_chunks**: number of fragments in the message
//! - **channel**: `start`, `locate`, `update` or `end`
//! - **fragment_payload**: a slice of the message text; may contain `/`
//!
//! Fragments may arrive in any order. A message is dispatched once every
//! fragment has arrived, or when a fragment arrives after the reassembly
//! timeout has elapsed since the first one (an incomplete message is then
//! reported and discarded). Fragments announcing more than
//! `reassembly.max_chunks` chunks are dropped on arrival.
//!
//! # Replies
//!
//! One JSON datagram per dispatched request ([`Reply`]):
//!
//! | Channel  | Reply                                              |
//! |----------|----------------------------------------------------|
//! | `start`  | `true`                                             |
//! | `locate` | `{"isStepped":…,"x":…,"y":…,"radian":…,"landmark":…}` |
//! | `update` | `{"x":…,"y":…,"radian":…}`                         |
//! | `end`    | `true` / `false`                                   |
//!
//! Malformed fragments and incomplete messages get no reply.

mod fragment;
mod reassembly;
mod reply;

pub use fragment::{Channel, Fragment, split_message};
pub use reassembly::{Message, ReassemblyError, Reassembler};
pub use reply::{LocateReply, NO_LANDMARK, Reply, UpdateReply};
