//! Configuration for the CQi client
//!
//! Centralized configuration with sensible defaults. All settings are fixed
//! at construction time.

use std::time::Duration;

/// Default CQPserver port
pub const DEFAULT_PORT: u16 = 4877;

/// Default protocol version
pub const DEFAULT_VERSION: &str = "0.1";

/// Main configuration for a CQi connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server host name or address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum time without any byte arriving while a response is read.
    /// `None` waits indefinitely.
    ///
    /// The timer restarts whenever a partial read delivers bytes, so a large
    /// response trickling in slowly never times out as long as it keeps moving.
    pub inactivity_timeout: Option<Duration>,

    /// Upper bound on the bytes requested from the socket per read call
    pub max_read_size: usize,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// CQi protocol version spoken by this client
    pub version: String,

    /// Username sent in the connect handshake
    pub username: String,

    /// Password sent in the connect handshake
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            inactivity_timeout: None,
            max_read_size: 64 * 1024, // 64 KB
            version: DEFAULT_VERSION.to_string(),
            username: "anonymous".to_string(),
            password: String::new(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` for display and connecting
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the inactivity timeout
    pub fn inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.config.inactivity_timeout = Some(timeout);
        self
    }

    /// Set the inactivity timeout (in milliseconds); 0 waits indefinitely
    pub fn inactivity_timeout_ms(mut self, ms: u64) -> Self {
        self.config.inactivity_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        self
    }

    /// Set the maximum number of bytes per socket read
    pub fn max_read_size(mut self, size: usize) -> Self {
        self.config.max_read_size = size.max(1);
        self
    }

    /// Set the protocol version string
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Set the handshake credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = username.into();
        self.config.password = password.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
