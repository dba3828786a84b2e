//! Response decoding
//!
//! Turns raw response bytes into a JSON document.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// A decoded response document
pub type ParsedResponse = Value;

/// Decode response bytes as UTF-8, then parse them as JSON
pub fn decode_response(bytes: &[u8]) -> Result<ParsedResponse> {
    decode_response_as(bytes)
}

/// Decode response bytes into a caller-chosen type
pub fn decode_response_as<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let text = std::str::from_utf8(bytes)?;
    let value = serde_json::from_str(text)?;
    Ok(value)
}
