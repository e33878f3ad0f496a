//! PadaServer - indoor positioning daemon
//!
//! Serves pedestrian dead-reckoning positions to mobile clients over UDP.
//! Each client uploads inertial sensor batches in chunked datagrams; the
//! server reassembles them, runs the [`pada`] engine against the client's
//! session and replies with the new position.
//!
//! - [`protocol`]: datagram format, reassembly, JSON replies
//! - [`session`]: per-client pose, heading estimator and trajectory
//! - [`trajectory`]: trajectory CSV export
//! - [`server`]: receive loop

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod session;
pub mod trajectory;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use server::{Dispatcher, Server};
