//! Daemon configuration

use crate::error::{DaemonError, DaemonResult};
use std::net::SocketAddr;

/// Runtime configuration for the daemon
#[derive(Clone, Debug)]
pub struct DaemonConfig {
    /// Address the REST API binds to
    pub listen_addr: SocketAddr,
    /// Seed demo projects and accounts on startup
    pub seed_demo_data: bool,
}

impl DaemonConfig {
    pub fn from_cli(listen: &str, seed_demo_data: bool) -> DaemonResult<Self> {
        let listen_addr = listen
            .parse()
            .map_err(|_| DaemonError::Config(format!("invalid listen address: {listen}")))?;
        Ok(Self {
            listen_addr,
            seed_demo_data,
        })
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            listen_addr: ([127, 0, 0, 1], 8080).into(),
            seed_demo_data: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_listen_address() {
        let config = DaemonConfig::from_cli("0.0.0.0:9000", true).unwrap();
        assert_eq!(config.listen_addr.port(), 9000);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_rejects_bad_address() {
        assert!(DaemonConfig::from_cli("not-an-addr", false).is_err());
    }
}
