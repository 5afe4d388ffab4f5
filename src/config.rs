//! Server configuration

use std::net::SocketAddr;

// Two thirds of 10000, rounded up.
const DEFAULT_PORT: u16 = 6667;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Load config from environment variables.
    ///
    /// `UNDERCUT_ADDR` takes a full socket address (e.g. `127.0.0.1:4000`);
    /// unset or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let addr = match std::env::var("UNDERCUT_ADDR") {
            Ok(raw) => match raw.parse() {
                Ok(addr) => addr,
                Err(e) => {
                    tracing::warn!("invalid UNDERCUT_ADDR {raw:?} ({e}), using default");
                    Self::default_addr()
                }
            },
            Err(_) => Self::default_addr(),
        };
        Self { addr }
    }

    fn default_addr() -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
    }
}
