//! # kvline
//!
//! A line-oriented TCP client for JSON key-value stores:
//! - Tagged `GET` / `SET` commands encoded as single request lines
//! - Exactly one round trip per connection, closed on every path
//! - JSON-document, newline, length-prefixed or legacy single-read framing
//! - Responses decoded as UTF-8 and parsed as JSON
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                               │
//! │              execute(&Command) -> JSON value                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │ Connection  │
//!   │ (GET / SET) │          │ (1 round    │
//!   └─────────────┘          │   trip)     │
//!                            └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │   Framing   │
//!                           │ + JSON      │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use kvline::{Client, ClientConfig, Command};
//!
//! let client = Client::new(ClientConfig::default())?;
//! let projects = client.execute(&Command::get("projects")?)?;
//! println!("{}", projects);
//! # Ok::<(), kvline::KvError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, KvError, Result};
pub use config::ClientConfig;
pub use client::{execute, Client};
pub use protocol::{Command, Framing, ParsedResponse};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvline
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
