//! Byte Transport
//!
//! Owns the TCP stream of one connection. Writes go out whole; reads
//! accumulate partial socket reads until the requested count is reached.
//!
//! ## Inactivity timeout
//! The timeout is applied to each underlying socket read rather than to the
//! whole `recv_exact` call. Every read that delivers bytes restarts the
//! clock, so only a silent server trips it.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use bytes::{Bytes, BytesMut};

use crate::config::Config;
use crate::error::{CqiError, Result};
use crate::protocol::ByteSource;

/// Bytes asked of the socket beyond the current need, so small reads share
/// one syscall
const READ_AHEAD: usize = 4096;

/// One TCP connection to a CQi server
pub struct Transport {
    /// Socket, `None` once closed
    stream: Option<TcpStream>,

    /// Bytes read from the socket but not yet handed out
    buffer: BytesMut,

    /// Inactivity timeout used by the `ByteSource` impl
    timeout: Option<Duration>,

    /// Upper bound on a single socket read
    max_read_size: usize,

    /// Peer address for logging
    peer_addr: String,
}

impl Transport {
    /// Open a connection to `host:port`
    pub fn connect(config: &Config) -> Result<Self> {
        let addr = config.addr();
        let stream = TcpStream::connect((config.host.as_str(), config.port)).map_err(|source| {
            CqiError::Connection {
                addr: addr.clone(),
                source,
            }
        })?;
        tracing::debug!("Connected to {}", addr);
        Self::from_stream(stream, config)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Requests are small and each one waits for its answer
        stream.set_nodelay(true)?;

        Ok(Self {
            stream: Some(stream),
            buffer: BytesMut::new(),
            timeout: config.inactivity_timeout,
            max_read_size: config.max_read_size.max(1),
            peer_addr,
        })
    }

    /// Write the whole buffer
    pub fn send_all(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(CqiError::NotConnected)?;
        stream.write_all(bytes)?;
        stream.flush()?;
        tracing::trace!("Sent {} bytes to {}", bytes.len(), self.peer_addr);
        Ok(())
    }

    /// Block until exactly `n` bytes are available.
    ///
    /// Fails with [`CqiError::Timeout`] if no byte arrives for `timeout`
    /// (`None` waits forever), and with [`CqiError::ConnectionClosed`] if
    /// the server closes the stream first.
    pub fn recv_exact(&mut self, n: usize, timeout: Option<Duration>) -> Result<Bytes> {
        if n == 0 {
            return Ok(Bytes::new());
        }
        let stream = self.stream.as_mut().ok_or(CqiError::NotConnected)?;

        if self.buffer.len() < n {
            // A zero duration is rejected by the socket API
            let read_timeout = timeout.map(|t| t.max(Duration::from_millis(1)));
            stream.set_read_timeout(read_timeout)?;
        }

        while self.buffer.len() < n {
            let filled = self.buffer.len();
            let chunk = (n - filled).max(READ_AHEAD).min(self.max_read_size);
            self.buffer.resize(filled + chunk, 0);

            match stream.read(&mut self.buffer[filled..]) {
                Ok(0) => {
                    self.buffer.truncate(filled);
                    return Err(CqiError::ConnectionClosed {
                        expected: n,
                        received: filled,
                    });
                }
                Ok(read) => self.buffer.truncate(filled + read),
                Err(e) => {
                    self.buffer.truncate(filled);
                    match e.kind() {
                        ErrorKind::Interrupted => continue,
                        // Unix reports WouldBlock, Windows TimedOut
                        ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                            return Err(CqiError::Timeout {
                                timeout: timeout.unwrap_or_default(),
                                expected: n,
                                received: filled,
                            });
                        }
                        _ => return Err(CqiError::Transport(e)),
                    }
                }
            }
        }

        Ok(self.buffer.split_to(n).freeze())
    }

    /// Release the socket. Calling it again is a no-op.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            // The peer may already be gone
            let _ = stream.shutdown(Shutdown::Both);
            self.buffer.clear();
            tracing::debug!("Closed connection to {}", self.peer_addr);
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl ByteSource for Transport {
    fn recv_exact(&mut self, n: usize) -> Result<Bytes> {
        let timeout = self.timeout;
        Transport::recv_exact(self, n, timeout)
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.close();
    }
}
