//! Protocol codec
//!
//! Encoding and decoding of request lines.
//!
//! ## Line Format
//! ```text
//! ┌──────┬───┬───────┬───┬──────────────────────┐
//! │ Verb │ ␠ │  Key  │ ␠ │ JSON value (SET only) │
//! └──────┴───┴───────┴───┴──────────────────────┘
//! ```

use serde_json::Value;

use crate::error::{KvError, Result};
use super::{Command, CommandType};

// =============================================================================
// Validation
// =============================================================================

/// Check that a key can be written as a single protocol token
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvError::Protocol("key must not be empty".to_string()));
    }
    if let Some(c) = key.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(KvError::Protocol(format!(
            "key {:?} contains forbidden character {:?}",
            key, c
        )));
    }
    Ok(())
}

/// Check that a pre-formatted request fits on one line
pub fn validate_line(line: &str) -> Result<()> {
    if line.trim().is_empty() {
        return Err(KvError::Protocol("request line must not be empty".to_string()));
    }
    if line.contains(['\r', '\n']) {
        return Err(KvError::Protocol(
            "request line must not contain a line delimiter".to_string(),
        ));
    }
    Ok(())
}

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to its request line (without terminator)
///
/// Format: `GET <key>` or `SET <key> <compact-json>`
pub fn encode_command(command: &Command) -> Result<String> {
    validate_key(command.key())?;

    let line = match command {
        Command::Get { key } => format!("{} {}", CommandType::Get, key),
        Command::Set { key, value } => {
            // Compact serialization never emits a raw newline
            let json = serde_json::to_string(value)?;
            format!("{} {} {}", CommandType::Set, key, json)
        }
    };

    Ok(line)
}

/// Decode a request line back into a command
///
/// A single trailing `\n` or `\r\n` is ignored. Verbs are matched
/// case-insensitively.
pub fn decode_command(line: &str) -> Result<Command> {
    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);
    validate_line(line)?;

    let line = line.trim_start();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let rest = rest.trim_start();

    if verb.eq_ignore_ascii_case(CommandType::Get.as_str()) {
        decode_get_command(rest)
    } else if verb.eq_ignore_ascii_case(CommandType::Set.as_str()) {
        decode_set_command(rest)
    } else {
        Err(KvError::Protocol(format!("Unknown command verb: {:?}", verb)))
    }
}

/// Decode GET arguments
fn decode_get_command(args: &str) -> Result<Command> {
    let key = args.trim_end();
    if key.is_empty() {
        return Err(KvError::Protocol("GET command: missing key".to_string()));
    }
    if key.contains(char::is_whitespace) {
        return Err(KvError::Protocol(format!(
            "GET command: unexpected arguments after key in {:?}",
            key
        )));
    }
    Command::get(key)
}

/// Decode SET arguments
fn decode_set_command(args: &str) -> Result<Command> {
    let (key, json) = args.split_once(char::is_whitespace).ok_or_else(|| {
        if args.is_empty() {
            KvError::Protocol("SET command: missing key".to_string())
        } else {
            KvError::Protocol("SET command: missing value".to_string())
        }
    })?;

    let json = json.trim();
    if json.is_empty() {
        return Err(KvError::Protocol("SET command: missing value".to_string()));
    }

    let value: Value = serde_json::from_str(json)?;
    Command::set(key, value)
}
