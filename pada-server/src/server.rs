//! UDP receive loop
//!
//! Single-threaded: each datagram is parsed, reassembled and, once its
//! message completes, handled to the end before the next `recv_from`.
//!
//! ```text
//! recv_from ─► Fragment::parse ─► Reassembler ─► SessionManager ─► send_to
//!                   │ malformed        │ incomplete      │ error
//!                   └── warn, drop     └── warn, drop    └── error, no reply
//! ```
//!
//! The socket read timeout only exists so the loop notices the shutdown flag.

use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use pada::Localizer;

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::protocol::{Channel, Fragment, Reassembler, Reply};
use crate::session::SessionManager;

/// Request routing independent of the socket
pub struct Dispatcher {
    reassembler: Reassembler<SocketAddr>,
    sessions: SessionManager,
}

impl Dispatcher {
    pub fn new(config: &ServerConfig, localizer: Localizer) -> Self {
        Self {
            reassembler: Reassembler::new(
                config.reassembly_timeout(),
                config.reassembly.max_chunks,
            ),
            sessions: SessionManager::new(config, localizer),
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn reassembler(&self) -> &Reassembler<SocketAddr> {
        &self.reassembler
    }

    /// Process one datagram. Returns the reply to send, if any.
    pub fn handle_datagram(
        &mut self,
        datagram: &[u8],
        client: SocketAddr,
        now: Instant,
    ) -> Option<Vec<u8>> {
        let fragment = match Fragment::from_bytes(datagram) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("{}: dropping datagram: {}", client, e);
                return None;
            }
        };

        let message = match self.reassembler.accept(client, fragment, now)? {
            Ok(message) => message,
            Err(e) => {
                log::warn!("{}: {}", client, ServerError::from(e));
                return None;
            }
        };

        let reply = match self.sessions.handle(client, &message) {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("{}: {} request failed: {}", client, message.channel, e);
                return None;
            }
        };

        if message.channel == Channel::End && reply == Reply::Ack(true) {
            let dropped = self.reassembler.drop_client(&client);
            if dropped > 0 {
                log::debug!("{}: discarded {} partial messages", client, dropped);
            }
        }

        match reply.to_bytes() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::error!("{}: failed to encode reply: {}", client, e);
                None
            }
        }
    }
}

/// Bound socket plus dispatcher
pub struct Server {
    socket: UdpSocket,
    dispatcher: Dispatcher,
    recv_buffer_size: usize,
}

impl Server {
    /// Bind the configured address.
    pub fn bind(config: &ServerConfig, localizer: Localizer) -> Result<Self> {
        let addr = &config.network.bind_address;
        let socket = UdpSocket::bind(addr)
            .map_err(|e| ServerError::Config(format!("Failed to bind to {}: {}", addr, e)))?;
        socket.set_read_timeout(Some(config.read_timeout()))?;

        Ok(Self {
            socket,
            dispatcher: Dispatcher::new(config, localizer),
            recv_buffer_size: config.network.recv_buffer_size,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Serve until `running` is cleared.
    pub fn run(&mut self, running: Arc<AtomicBool>) -> Result<()> {
        let mut buf = vec![0u8; self.recv_buffer_size];
        log::info!("Listening on {}", self.local_addr()?);

        while running.load(Ordering::Relaxed) {
            let (len, client) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    continue;
                }
                Err(e) => {
                    log::error!("Receive failed: {}", e);
                    continue;
                }
            };

            if let Some(reply) = self
                .dispatcher
                .handle_datagram(&buf[..len], client, Instant::now())
                && let Err(e) = self.socket.send_to(&reply, client)
            {
                log::error!("{}: failed to send reply: {}", client, e);
            }
        }

        log::info!(
            "Server stopped ({} sessions, {} partial messages discarded)",
            self.dispatcher.sessions.len(),
            self.dispatcher.reassembler.open_count()
        );
        Ok(())
    }
}
