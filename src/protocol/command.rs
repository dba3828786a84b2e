//! Command definitions
//!
//! Represents requests sent to the server.

use std::fmt;

use serde_json::Value;

use crate::error::Result;
use super::codec::validate_key;

/// Command verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Get,
    Set,
}

impl CommandType {
    /// Verb as written on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Get => "GET",
            CommandType::Set => "SET",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the document stored under a key
    Get { key: String },

    /// Store a JSON document under a key
    Set { key: String, value: Value },
}

impl Command {
    /// Build a GET, rejecting keys that cannot be written on one line
    pub fn get(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Command::Get { key })
    }

    /// Build a SET, rejecting keys that cannot be written on one line
    pub fn set(key: impl Into<String>, value: Value) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Command::Set { key, value })
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Get { .. } => CommandType::Get,
            Command::Set { .. } => CommandType::Set,
        }
    }

    /// Key this command addresses
    pub fn key(&self) -> &str {
        match self {
            Command::Get { key } | Command::Set { key, .. } => key,
        }
    }
}
