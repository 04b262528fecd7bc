//! Configuration for the aegisd server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8787;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the server binds to.
    pub listen_addr: SocketAddr,
    /// Connection string for the record store (a SQLite database path).
    pub database_path: PathBuf,
    /// Whether permissive CORS is applied (the demo client is a browser SPA).
    pub cors_enabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid listen address: {0}")]
    InvalidAddr(#[from] std::net::AddrParseError),
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT)
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aegisd")
        .join("submissions.db")
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `AEGISD_LISTEN` and `AEGISD_DB` override the defaults; `AEGISD_CORS`
    /// set to `0` or `false` disables CORS.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match std::env::var("AEGISD_LISTEN") {
            Ok(raw) => raw.parse::<SocketAddr>()?,
            Err(_) => default_listen_addr(),
        };

        let database_path = std::env::var("AEGISD_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_database_path());

        let cors_enabled = std::env::var("AEGISD_CORS")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Ok(Self {
            listen_addr,
            database_path,
            cors_enabled,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            database_path: default_database_path(),
            cors_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_loopback() {
        let config = Config::default();
        assert!(config.listen_addr.ip().is_loopback());
        assert_eq!(config.listen_addr.port(), DEFAULT_PORT);
        assert!(config.cors_enabled);
    }

    #[test]
    fn default_database_path_is_namespaced() {
        let config = Config::default();
        assert!(config.database_path.ends_with("aegisd/submissions.db"));
    }
}
