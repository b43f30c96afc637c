//! Network Module
//!
//! TCP transport for the client.
//!
//! ## Model
//! - One socket per client, exclusively owned
//! - Strictly half-duplex: one request, then its response
//! - Blocking I/O with an inactivity timeout on reads

mod transport;

pub use transport::Transport;
