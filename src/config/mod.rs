use crate::core::{AppError, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub mod database;
pub mod mail;
pub mod server;

pub use database::DatabaseConfig;
pub use mail::MailConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// In-process sweep trigger
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Seconds between scheduled sweeps; 0 disables the in-process trigger
    pub sweep_interval_secs: u64,
}

impl SchedulerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            sweep_interval_secs: env_or("REPORT_SWEEP_INTERVAL_SECS", 3600)?,
        })
    }

    pub fn enabled(&self) -> bool {
        self.sweep_interval_secs > 0
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            mail: MailConfig::from_env()?,
            scheduler: SchedulerConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections < self.database.pool_size {
            return Err(AppError::Configuration(format!(
                "DATABASE_MAX_CONNECTIONS ({}) must be at least DATABASE_POOL_SIZE ({})",
                self.database.max_connections, self.database.pool_size
            )));
        }

        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "SERVER_PORT must be greater than 0".to_string(),
            ));
        }

        self.mail.validate().map_err(AppError::Configuration)?;

        Ok(())
    }
}

/// Read an optional variable and parse it, falling back to `default` when unset
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}: '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}

/// Read a variable that must be present and non-empty
pub(crate) fn env_required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Configuration(format!("{} not set", key))),
    }
}
