//! Client Module
//!
//! Executes commands against a key-value server, one connection per call.
//!
//! ## Flow
//! - Encode the command to a request line
//! - Open a connection, write the line, read one framed response
//! - Close the connection (always, on success and failure)
//! - Decode the response as UTF-8 JSON

mod connection;

pub use connection::{Connection, ConnectionState};

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::protocol::{
    decode_response, decode_response_as, encode_command, validate_line, Command, ParsedResponse,
};

/// Key-value store client
///
/// Holds only configuration; every call opens and closes its own
/// connection, so a `Client` can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create a client, validating the config up front
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Client for `host:port` with default settings
    pub fn with_endpoint(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::new(ClientConfig::builder().host(host).port(port).build())
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a command and parse the response as JSON
    pub fn execute(&self, command: &Command) -> Result<ParsedResponse> {
        let bytes = self.send(&encode_command(command)?)?;
        decode_response(&bytes)
    }

    /// Execute a command and deserialize the response into `T`
    pub fn execute_as<T: DeserializeOwned>(&self, command: &Command) -> Result<T> {
        let bytes = self.send(&encode_command(command)?)?;
        decode_response_as(&bytes)
    }

    /// Execute a pre-formatted request line and parse the response as JSON
    pub fn execute_raw(&self, line: &str) -> Result<ParsedResponse> {
        let bytes = self.send(line)?;
        decode_response(&bytes)
    }

    /// One round trip returning the undecoded response bytes
    pub fn send(&self, line: &str) -> Result<Bytes> {
        validate_line(line)?;

        let connection = Connection::open(&self.config)?;
        let response = connection.round_trip(line)?;

        tracing::debug!(
            "{} -> {} bytes from {}",
            line.split_whitespace().next().unwrap_or_default(),
            response.len(),
            self.config.addr()
        );
        Ok(response)
    }
}

/// Execute a single command against `host:port` with default settings
pub fn execute(host: &str, port: u16, command: &Command) -> Result<ParsedResponse> {
    Client::with_endpoint(host, port)?.execute(command)
}
