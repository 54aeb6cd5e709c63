use crate::core::{Environment, GatewayError, LogFormat, Result};
use std::env;
use std::time::Duration;

/// Default timeout for a single SOAP request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Clone)]
pub struct Config {
    pub merchant_id: String,
    pub password: String,
    pub environment: Environment,
    pub timeout_secs: u64,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            merchant_id: env::var("MPAY24_MERCHANT_ID")
                .map_err(|_| GatewayError::configuration("MPAY24_MERCHANT_ID not set"))?,
            password: env::var("MPAY24_PASSWORD")
                .map_err(|_| GatewayError::configuration("MPAY24_PASSWORD not set"))?,
            environment: env::var("MPAY24_ENVIRONMENT")
                .map(|value| value.parse())
                .unwrap_or(Ok(Environment::Production))?,
            timeout_secs: env::var("MPAY24_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| GatewayError::configuration("Invalid MPAY24_TIMEOUT_SECS"))?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT")
                .map(|value| LogFormat::parse(&value))
                .unwrap_or_default(),
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(GatewayError::configuration("Merchant id must not be empty"));
        }

        if self.password.is_empty() {
            return Err(GatewayError::configuration("Password must not be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(GatewayError::configuration(
                "Timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("merchant_id", &self.merchant_id)
            .field("password", &"<redacted>")
            .field("environment", &self.environment)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}
