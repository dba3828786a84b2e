//! Configuration for kvline
//!
//! Centralized client configuration with sensible defaults.

use std::time::Duration;

use crate::error::{KvError, Result};
use crate::protocol::Framing;

/// Read ceiling of the original single-read client
pub const LEGACY_READ_CEILING: usize = 1024;

/// Default response ceiling for framed reads (64 KB)
pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 64 * 1024;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Server host name or IP address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Wire
    // -------------------------------------------------------------------------
    /// How requests are terminated and responses delimited
    pub framing: Framing,

    /// Largest response accepted (in bytes)
    pub max_response_size: usize,

    // -------------------------------------------------------------------------
    // Timeouts (milliseconds, 0 = none)
    // -------------------------------------------------------------------------
    /// Connect timeout per resolved address
    pub connect_timeout_ms: u64,

    /// Socket read timeout
    pub read_timeout_ms: u64,

    /// Socket write timeout
    pub write_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9999,
            framing: Framing::Document,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Unterminated request, one bounded read of 1024 bytes
    pub fn legacy() -> Self {
        Self {
            framing: Framing::SingleRead,
            max_response_size: LEGACY_READ_CEILING,
            ..Self::default()
        }
    }

    /// `host:port` as passed to the resolver
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the config is usable before any socket is opened
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(KvError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(KvError::Config("port must be in 1..=65535".to_string()));
        }
        if self.max_response_size == 0 {
            return Err(KvError::Config(
                "max_response_size must be greater than zero".to_string(),
            ));
        }
        if self.framing == Framing::LengthPrefixed && self.max_response_size > u32::MAX as usize
        {
            return Err(KvError::Config(format!(
                "max_response_size {} does not fit a 4-byte length prefix",
                self.max_response_size
            )));
        }
        Ok(())
    }

    /// Connect timeout, `None` when disabled
    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    /// Read timeout, `None` when disabled
    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    /// Write timeout, `None` when disabled
    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the framing mode
    pub fn framing(mut self, framing: Framing) -> Self {
        self.config.framing = framing;
        self
    }

    /// Set the response ceiling (in bytes)
    pub fn max_response_size(mut self, size: usize) -> Self {
        self.config.max_response_size = size;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set connect, read and write timeouts at once
    pub fn timeout_ms(self, ms: u64) -> Self {
        self.connect_timeout_ms(ms)
            .read_timeout_ms(ms)
            .write_timeout_ms(ms)
    }

    /// Finish building the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
