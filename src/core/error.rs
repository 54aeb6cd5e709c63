use reqwest::StatusCode;

/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Every failure the facade or its collaborators can surface
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    /// Rejected locally before anything was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network failure, timeout, or client construction failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status without a SOAP fault body
    #[error("HTTP error {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// SOAP fault returned by the gateway (usually authentication)
    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },

    /// The gateway answered with status ERROR
    #[error("Gateway rejected request ({return_code}): {message}")]
    Rejected {
        return_code: String,
        message: String,
    },

    /// Response could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Request document could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// Helper functions for common error scenarios
impl GatewayError {
    pub fn validation(msg: impl Into<String>) -> Self {
        GatewayError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        GatewayError::Configuration(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        GatewayError::MalformedResponse(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        GatewayError::Serialization(msg.into())
    }

    pub fn rejected(return_code: impl Into<String>, message: impl Into<String>) -> Self {
        GatewayError::Rejected {
            return_code: return_code.into(),
            message: message.into(),
        }
    }

    /// Whether the gateway itself refused the request, as opposed to the
    /// request never reaching it
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GatewayError::Rejected { .. } | GatewayError::SoapFault { .. }
        )
    }
}

impl From<quick_xml::DeError> for GatewayError {
    fn from(err: quick_xml::DeError) -> Self {
        GatewayError::MalformedResponse(err.to_string())
    }
}
