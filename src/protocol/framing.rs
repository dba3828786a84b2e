//! Framing
//!
//! Writes one request and reads exactly one complete response.
//!
//! ## Modes
//! - `Document`: unterminated request; response read until one complete
//!   JSON value or EOF
//! - `Line`: request terminated by `\n`; response read until `\n` or EOF
//! - `LengthPrefixed`: 4-byte big-endian length before each message
//! - `SingleRead`: unterminated request; one bounded `read` for the response

use std::fmt;
use std::io::{ErrorKind, Read, Write};
use std::str::FromStr;

use bytes::{Bytes, BytesMut};
use serde::de::IgnoredAny;

use crate::error::{KvError, Result};

/// Length prefix size: 4 bytes, big-endian
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Chunk size for delimiter scanning
const READ_CHUNK_SIZE: usize = 4096;

/// How a request is terminated and a response delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Raw request, response ends with the first complete JSON value
    #[default]
    Document,

    /// Newline-terminated request and response
    Line,

    /// 4-byte big-endian length prefix on both sides
    LengthPrefixed,

    /// Raw request, single bounded read for the response
    SingleRead,
}

impl Framing {
    /// Name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Framing::Document => "document",
            Framing::Line => "line",
            Framing::LengthPrefixed => "length-prefixed",
            Framing::SingleRead => "single-read",
        }
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framing {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "document" | "json" => Ok(Framing::Document),
            "line" => Ok(Framing::Line),
            "length-prefixed" | "length" => Ok(Framing::LengthPrefixed),
            "single-read" | "single" => Ok(Framing::SingleRead),
            other => Err(KvError::Config(format!(
                "unknown framing {:?} (expected document, line, length-prefixed or single-read)",
                other
            ))),
        }
    }
}

// =============================================================================
// Request
// =============================================================================

/// Write a request line to a stream using the given framing
pub fn write_request<W: Write>(writer: &mut W, line: &str, framing: Framing) -> Result<()> {
    let payload = line.as_bytes();

    match framing {
        Framing::Line => {
            writer.write_all(payload)?;
            writer.write_all(b"\n")?;
        }
        Framing::LengthPrefixed => {
            let len = u32::try_from(payload.len()).map_err(|_| {
                KvError::Protocol(format!(
                    "Request too large for length prefix: {} bytes",
                    payload.len()
                ))
            })?;
            writer.write_all(&len.to_be_bytes())?;
            writer.write_all(payload)?;
        }
        Framing::Document | Framing::SingleRead => {
            writer.write_all(payload)?;
        }
    }

    writer.flush()?;
    tracing::trace!(bytes = payload.len(), %framing, "request written");
    Ok(())
}

// =============================================================================
// Response
// =============================================================================

/// Read one complete response from a stream
///
/// Fails with `ConnectionClosed` if the peer sends nothing, and with
/// `ResponseTooLarge` if the payload exceeds `max_size`.
pub fn read_response<R: Read>(reader: &mut R, framing: Framing, max_size: usize) -> Result<Bytes> {
    let payload = match framing {
        Framing::Document => read_document(reader, max_size)?,
        Framing::Line => read_line(reader, max_size)?,
        Framing::LengthPrefixed => read_length_prefixed(reader, max_size)?,
        Framing::SingleRead => read_single(reader, max_size)?,
    };

    tracing::trace!(bytes = payload.len(), %framing, "response read");
    Ok(payload)
}

/// Read until the first `\n` or EOF, stripping the terminator
fn read_line<R: Read>(reader: &mut R, max_size: usize) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(READ_CHUNK_SIZE.min(max_size.saturating_add(1)));
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            if buf.is_empty() {
                return Err(KvError::ConnectionClosed);
            }
            break;
        }

        if let Some(pos) = chunk[..n].iter().position(|&b| b == b'\n') {
            buf.extend_from_slice(&chunk[..pos]);
            break;
        }

        buf.extend_from_slice(&chunk[..n]);

        // A trailing `\r` may still be half of a `\r\n` terminator
        let limit = if buf.last() == Some(&b'\r') {
            max_size.saturating_add(1)
        } else {
            max_size
        };
        if buf.len() > limit {
            return Err(KvError::ResponseTooLarge { limit: max_size });
        }
    }

    if buf.last() == Some(&b'\r') {
        buf.truncate(buf.len() - 1);
    }
    if buf.len() > max_size {
        return Err(KvError::ResponseTooLarge { limit: max_size });
    }

    Ok(buf.freeze())
}

/// How far a buffer gets towards one JSON value
enum Scan {
    /// A self-delimiting value ends at this offset
    Complete(usize),
    /// A top-level number ends at the buffer end and may still grow
    Tentative(usize),
    /// More bytes are needed
    Incomplete,
    /// Not JSON; decoding reports the error
    Invalid,
}

fn scan_document(buf: &[u8]) -> Scan {
    let mut values = serde_json::Deserializer::from_slice(buf).into_iter::<IgnoredAny>();

    match values.next() {
        Some(Ok(_)) => {
            let end = values.byte_offset();
            let first = buf.iter().find(|b| !b.is_ascii_whitespace());
            if end == buf.len() && matches!(first, Some(b'-' | b'0'..=b'9')) {
                Scan::Tentative(end)
            } else {
                Scan::Complete(end)
            }
        }
        Some(Err(e)) if e.is_eof() => Scan::Incomplete,
        Some(Err(_)) => Scan::Invalid,
        None => Scan::Incomplete,
    }
}

/// Read until one complete JSON value has arrived or the peer closes
///
/// Bytes after the value are discarded. A top-level number that ends
/// exactly at the buffer end is accepted once the peer closes or the
/// read times out.
fn read_document<R: Read>(reader: &mut R, max_size: usize) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(READ_CHUNK_SIZE.min(max_size.saturating_add(1)));
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    let mut tentative = None;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                match tentative {
                    Some(end) => {
                        buf.truncate(end);
                        return Ok(buf.freeze());
                    }
                    None => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            if buf.is_empty() {
                return Err(KvError::ConnectionClosed);
            }
            return Ok(buf.freeze());
        }

        buf.extend_from_slice(&chunk[..n]);

        match scan_document(&buf) {
            Scan::Complete(end) => {
                if end > max_size {
                    return Err(KvError::ResponseTooLarge { limit: max_size });
                }
                buf.truncate(end);
                return Ok(buf.freeze());
            }
            Scan::Invalid if buf.len() <= max_size => return Ok(buf.freeze()),
            Scan::Tentative(end) => tentative = Some(end),
            Scan::Incomplete | Scan::Invalid => tentative = None,
        }

        if buf.len() > max_size {
            return Err(KvError::ResponseTooLarge { limit: max_size });
        }
    }
}

/// Read a 4-byte big-endian length, then exactly that many bytes
fn read_length_prefixed<R: Read>(reader: &mut R, max_size: usize) -> Result<Bytes> {
    let mut header = [0u8; LENGTH_PREFIX_SIZE];
    let mut filled = 0;

    // EOF before the first header byte is a closed connection, not a short read
    while filled < LENGTH_PREFIX_SIZE {
        match reader.read(&mut header[filled..]) {
            Ok(0) if filled == 0 => return Err(KvError::ConnectionClosed),
            Ok(0) => {
                return Err(KvError::Io(std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!(
                        "Incomplete length prefix: expected {} bytes, got {}",
                        LENGTH_PREFIX_SIZE, filled
                    ),
                )))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let payload_len = u32::from_be_bytes(header) as usize;
    if payload_len > max_size {
        return Err(KvError::ResponseTooLarge { limit: max_size });
    }

    let mut payload = BytesMut::zeroed(payload_len);
    reader.read_exact(&mut payload)?;

    Ok(payload.freeze())
}

/// Exactly one read of at most `max_size` bytes
fn read_single<R: Read>(reader: &mut R, max_size: usize) -> Result<Bytes> {
    let mut buf = BytesMut::zeroed(max_size);

    let n = loop {
        match reader.read(&mut buf) {
            Ok(n) => break n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    };

    if n == 0 {
        return Err(KvError::ConnectionClosed);
    }

    buf.truncate(n);
    Ok(buf.freeze())
}
