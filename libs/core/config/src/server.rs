use crate::{ConfigError, FromEnv, env_or_default};
use std::net::Ipv4Addr;

/// Where the HTTP server binds.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Bind address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads `HOST` (default 0.0.0.0, all interfaces) and `PORT`
    /// (default 8080). A `PORT` that is not a valid u16 is an error,
    /// not a fallback.
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port =
            env_or_default("PORT", "8080")
                .parse()
                .map_err(|e| ConfigError::ParseError {
                    key: "PORT".to_string(),
                    details: format!("{}", e),
                })?;

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
        }
    }
}
