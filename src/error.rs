//! Error types for the CQi client
//!
//! Provides a unified error type for all operations. Failures fall into
//! three groups: transport (socket level), protocol (the byte stream made
//! no sense) and server (the server answered with an error code).

use std::time::Duration;

use thiserror::Error;

use crate::protocol::ServerError;

/// Result type alias using CqiError
pub type Result<T> = std::result::Result<T, CqiError>;

/// Unified error type for CQi operations
#[derive(Debug, Error)]
pub enum CqiError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Could not connect to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Timed out after {timeout:?} of inactivity ({received} of {expected} bytes received)")]
    Timeout {
        timeout: Duration,
        expected: usize,
        received: usize,
    },

    #[error("Connection closed by server ({received} of {expected} bytes received)")]
    ConnectionClosed { expected: usize, received: usize },

    #[error("Not connected")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

impl CqiError {
    /// Whether the connection is left in an undefined state.
    ///
    /// After a fatal error the remaining bytes of the response (if any) can
    /// no longer be framed, so the connection must not be reused. Server
    /// errors are complete responses and leave the connection usable.
    pub fn is_fatal(&self) -> bool {
        match self {
            CqiError::Connection { .. }
            | CqiError::Transport(_)
            | CqiError::Timeout { .. }
            | CqiError::ConnectionClosed { .. }
            | CqiError::Protocol(_) => true,
            // Encode-side failures are raised before anything is sent, so
            // this only matters for the decode side.
            CqiError::Encoding(_) => true,
            CqiError::NotConnected | CqiError::Server(_) => false,
        }
    }

    /// The server error, if this is one
    pub fn as_server_error(&self) -> Option<&ServerError> {
        match self {
            CqiError::Server(e) => Some(e),
            _ => None,
        }
    }
}

/// The byte stream did not follow the protocol.
///
/// Usually a version mismatch between client and server, or corruption.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown status code: 0x{0:04x}")]
    UnknownStatus(u16),

    #[error("unknown data type: 0x{0:04x}")]
    UnknownDataType(u16),

    #[error("unknown response category: 0x{0:04x}")]
    UnknownCategory(u16),

    #[error("negative length on the wire: {0}")]
    NegativeLength(i32),

    #[error("table of {rows}x{columns} cells cannot be represented")]
    MalformedTable { rows: usize, columns: usize },

    #[error("unexpected response to {opcode}: expected {expected}, got {actual}")]
    UnexpectedResponse {
        opcode: &'static str,
        expected: &'static str,
        actual: String,
    },
}
