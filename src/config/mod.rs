// Configuration layer - environment-driven settings and logging bootstrap
pub mod logging;

pub use logging::{init_logging, LoggingConfig, LoggingError};

use std::env;

/// Application configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET_KEY` is required; everything else falls back to a
    /// development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            get("DATABASE_URL").unwrap_or_else(|| "sqlite://clinicseek.db?mode=rwc".to_string());

        let jwt_secret =
            get("JWT_SECRET_KEY").ok_or(ConfigError::MissingVariable("JWT_SECRET_KEY"))?;

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
        })
    }
}
