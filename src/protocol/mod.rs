//! Protocol Module
//!
//! Defines the textual wire protocol spoken to the key-value server.
//!
//! ## Request Lines
//! ```text
//! GET <key>
//! SET <key> <json-document>
//! ```
//!
//! Keys are non-empty and contain no whitespace. SET values are written as
//! compact JSON, so a request is always a single line.
//!
//! ## Framing
//! ```text
//! Document        GET projects                      -> {"title":"p1"}   (one complete value)
//! Line            GET projects\n                    -> {"title":"p1"}\n
//! LengthPrefixed  [len:4 BE] GET projects           -> [len:4 BE] {"title":"p1"}
//! SingleRead      GET projects                      -> one read of <= ceiling bytes
//! ```
//!
//! ## Response
//! A UTF-8 JSON document (object, array, string, number, boolean or null).

mod command;
mod codec;
mod framing;
mod response;

pub use command::{Command, CommandType};
pub use codec::{decode_command, encode_command, validate_key, validate_line};
pub use framing::{read_response, write_request, Framing, LENGTH_PREFIX_SIZE};
pub use response::{decode_response, decode_response_as, ParsedResponse};
