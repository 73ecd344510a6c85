// File: src/settings.rs
// Purpose: Server settings from the environment (.env aware)

use anyhow::{Context, Result};
use std::env;

/// Where the server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerSettings {
    /// Read `PUNTOS_HOST` and `PUNTOS_PORT`, after loading `.env` if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::var("PUNTOS_HOST").ok(), env::var("PUNTOS_PORT").ok())
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match port {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PUNTOS_PORT is not a port number: {:?}", raw))?,
            None => defaults.port,
        };

        Ok(Self {
            host: host.filter(|h| !h.trim().is_empty()).unwrap_or(defaults.host),
            port,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let settings = ServerSettings::from_vars(None, None).unwrap();
        assert_eq!(settings, ServerSettings::default());
        assert_eq!(settings.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let settings =
            ServerSettings::from_vars(Some("0.0.0.0".to_string()), Some(" 8080 ".to_string())).unwrap();
        assert_eq!(settings.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_bad_port_is_an_error() {
        assert!(ServerSettings::from_vars(None, Some("ochenta".to_string())).is_err());
    }
}
