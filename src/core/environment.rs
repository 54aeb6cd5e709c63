use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::GatewayError;

/// mPAY24 system a facade is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Integration,
    Test,
    #[default]
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Integration,
        Environment::Test,
        Environment::Production,
    ];

    /// SOAP endpoint of this environment
    pub fn endpoint(&self) -> &'static str {
        match self {
            Environment::Integration => "https://it.mpay24.com/app/bin/etpproxy_v15",
            Environment::Test => "https://test.mpay24.com/app/bin/etpproxy_v15",
            Environment::Production => "https://www.mpay24.com/app/bin/etpproxy_v15",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Integration => write!(f, "integration"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integration" => Ok(Environment::Integration),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(GatewayError::configuration(format!(
                "Unknown environment '{}', expected integration, test or production",
                other
            ))),
        }
    }
}
