use serde::{Deserialize, Serialize};

use super::payment_type::PaymentType;

/// Request for a payment token (card data entered in a gateway-hosted iframe)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub payment_type: PaymentType,
    pub template_set: Option<String>,
    pub style: Option<String>,
    pub customer_id: Option<String>,
    pub profile_id: Option<String>,
    /// Domain the iframe will be embedded in
    pub domain: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    pub api_key: Option<String>,
    pub redirect_location: Option<String>,
    pub return_code: Option<String>,
}
