use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;

/// Application settings, read from `FARM_`-prefixed environment variables
/// (i.e. `FARM_PORT=9000`). A `.env` file is honoured when present.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Directory holding the prebuilt frontend bundle.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Timeout for the online/offline reachability probe.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// Timeout for buffered fetches from a printer (thumbnails).
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    // mode=rwc creates farm.db on first run
    "sqlite:farm.db?mode=rwc".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    2
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            database_url: default_database_url(),
            static_dir: default_static_dir(),
            probe_timeout_secs: default_probe_timeout_secs(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        envy::prefixed("FARM_")
            .from_env()
            .context("Failed to read settings from environment")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.bind_address, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_bind_port_8000() {
        let settings = Settings::default();
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.socket_addr().unwrap().port(), 8000);
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let settings = Settings {
            bind_address: "not an address".to_string(),
            ..Settings::default()
        };
        assert!(settings.socket_addr().is_err());
    }
}
