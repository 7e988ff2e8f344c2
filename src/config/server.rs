use crate::core::Result;

use super::env_or;

/// Server configuration for the HTTP invocation surface
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            env_or("SERVER_HOST", "0.0.0.0".to_string())?,
            env_or("SERVER_PORT", 8080)?,
        ))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
