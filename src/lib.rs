//! # cqi
//!
//! A client for the corpus query interface (CQi) of the IMS Open Corpus
//! Workbench:
//! - Byte-exact binary codec for the CQi wire types
//! - Blocking TCP transport with an inactivity timeout
//! - One typed method per protocol operation
//! - Typed status values and server errors
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Model snapshots (optional)                   │
//! │          Corpus / Attributes / Subcorpus                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Client (dispatcher)                         │
//! │          opcode + arguments ──► one response                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────────┐
//!   │   Request   │          │ Response         │
//!   │  (encode)   │          │ (classify/decode)│
//!   └──────┬──────┘          └────────┬─────────┘
//!          │                          │
//!          ▼                          ▼
//!   ┌─────────────────────────────────────────┐
//!   │       Transport (TCP, exact reads)      │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use cqi::{Client, Config};
//!
//! # fn main() -> cqi::Result<()> {
//! let mut client = Client::new(Config::builder().host("127.0.0.1").build());
//! client.connect()?;
//! let corpora = client.corpus_list_corpora()?;
//! println!("{:?}", corpora);
//! client.disconnect()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod model;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CqiError, ProtocolError, Result};
pub use config::Config;
pub use client::Client;
pub use protocol::{ErrorKind, Field, ServerError, Status, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
