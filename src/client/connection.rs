//! Connection
//!
//! A single TCP connection that performs exactly one round trip.
//!
//! ## Lifecycle
//! ```text
//! Closed ──open()──► Connected ──round_trip()/close()/drop──► Closed
//! ```

use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use bytes::Bytes;

use crate::config::ClientConfig;
use crate::error::{KvError, Result};
use crate::protocol::{read_response, write_request, Framing};

/// Socket lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Closed,
}

/// One client connection, closed when its round trip completes
pub struct Connection {
    /// TCP stream
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: String,

    /// Request/response delimiting
    framing: Framing,

    /// Response ceiling in bytes
    max_response_size: usize,

    state: ConnectionState,
}

impl Connection {
    /// Connect to the configured endpoint
    ///
    /// Each resolved address is tried in turn with the connect timeout;
    /// the last failure is reported if none accepts.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let addr = config.addr();
        let candidates: Vec<SocketAddr> = addr
            .to_socket_addrs()
            .map_err(|source| KvError::Connect {
                addr: addr.clone(),
                source,
            })?
            .collect();

        let mut last_err = None;
        let mut connected = None;

        for candidate in candidates {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&candidate, timeout),
                None => TcpStream::connect(candidate),
            };

            match attempt {
                Ok(stream) => {
                    connected = Some(stream);
                    break;
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", candidate, e);
                    last_err = Some(e);
                }
            }
        }

        let stream = match connected {
            Some(stream) => stream,
            None => {
                let source = last_err.unwrap_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "host resolved to no addresses",
                    )
                });
                return Err(KvError::Connect { addr, source });
            }
        };

        // Disable Nagle's algorithm, requests are single small writes
        stream.set_nodelay(true)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.clone());

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            stream,
            peer_addr,
            framing: config.framing,
            max_response_size: config.max_response_size,
            state: ConnectionState::Connected,
        })
    }

    /// Send one request line and read one response, then close
    pub fn round_trip(mut self, line: &str) -> Result<Bytes> {
        let result = self.exchange(line);
        if let Err(ref e) = result {
            tracing::debug!("Round trip with {} failed: {}", self.peer_addr, e);
        }
        self.shutdown();
        result
    }

    /// Close without sending anything
    pub fn close(mut self) {
        self.shutdown();
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    fn exchange(&mut self, line: &str) -> Result<Bytes> {
        tracing::trace!("Sending to {}: {:?}", self.peer_addr, line);
        write_request(&mut self.stream, line, self.framing)?;
        read_response(&mut self.stream, self.framing, self.max_response_size)
    }

    fn shutdown(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.state = ConnectionState::Closed;

        // The peer may already have closed its side
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            tracing::trace!("Shutdown of {} reported: {}", self.peer_addr, e);
        }
        tracing::debug!("Connection to {} closed", self.peer_addr);
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.shutdown();
    }
}
