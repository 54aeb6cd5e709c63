use crate::core::Environment;

/// Merchant account credentials, fixed for the lifetime of a facade
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    merchant_id: String,
    password: String,
    environment: Environment,
}

impl Credentials {
    /// Build credentials, normalizing a user id (`u12345`) to its merchant id
    pub fn new(
        merchant_id: impl AsRef<str>,
        password: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            merchant_id: normalize_merchant_id(merchant_id.as_ref()).to_string(),
            password: password.into(),
            environment,
        }
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// SOAP user name: the merchant id with the user indicator prepended
    pub fn soap_user(&self) -> String {
        format!("u{}", self.merchant_id)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("password", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Strip a single leading `u`/`U` user indicator
pub fn normalize_merchant_id(merchant_id: &str) -> &str {
    merchant_id
        .strip_prefix(['u', 'U'])
        .unwrap_or(merchant_id)
}
