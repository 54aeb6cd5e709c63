use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{GatewayError, Result};

pub const DEFAULT_CURRENCY: &str = "EUR";

/// Payment to be initiated, either on the payment page or directly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Merchant transaction id (Tid)
    pub transaction_id: String,

    /// Amount in major units
    pub amount: Decimal,

    /// ISO 4217 currency code
    pub currency: String,

    pub success_url: Option<String>,
    pub error_url: Option<String>,
    pub confirmation_url: Option<String>,
    pub cancel_url: Option<String>,

    /// Two-letter language of the payment page
    pub language: Option<String>,

    /// Reserve only; capture later with `capture`
    pub manual_clearing: Option<bool>,

    /// Store the payment data as a profile of the customer
    pub save_payment_data: Option<bool>,

    pub description: Option<String>,
}

impl PaymentRequest {
    pub fn new(transaction_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            success_url: None,
            error_url: None,
            confirmation_url: None,
            cancel_url: None,
            language: None,
            manual_clearing: None,
            save_payment_data: None,
            description: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set success, error and confirmation URLs at once
    pub fn with_urls(
        mut self,
        success_url: impl Into<String>,
        error_url: impl Into<String>,
        confirmation_url: impl Into<String>,
    ) -> Self {
        self.success_url = Some(success_url.into());
        self.error_url = Some(error_url.into());
        self.confirmation_url = Some(confirmation_url.into());
        self
    }

    pub fn with_manual_clearing(mut self, manual_clearing: bool) -> Self {
        self.manual_clearing = Some(manual_clearing);
        self
    }
}

/// Buyer of a payment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Merchant-side customer id, used as the key for stored profiles
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub billing_address: Option<Address>,

    /// Offer the customer's stored profiles on the payment page
    pub use_profile: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub street: String,
    pub street2: Option<String>,
    pub zip: String,
    pub city: String,
    /// ISO 3166-1 alpha-2
    pub country_code: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingCart {
    pub description: Option<String>,
    pub items: Vec<ShoppingCartItem>,
    pub sub_total: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub shipping_costs: Option<Decimal>,
    pub tax: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingCartItem {
    pub number: Option<u32>,
    pub product_number: Option<String>,
    pub description: String,
    pub quantity: u32,
    pub item_price: Decimal,
    /// Line total; `quantity * item_price` when absent
    pub price: Option<Decimal>,
}

impl ShoppingCartItem {
    pub fn new(description: impl Into<String>, quantity: u32, item_price: Decimal) -> Self {
        Self {
            number: None,
            product_number: None,
            description: description.into(),
            quantity,
            item_price,
            price: None,
        }
    }

    /// Line total; fails when `quantity * item_price` overflows
    pub fn total(&self) -> Result<Decimal> {
        match self.price {
            Some(price) => Ok(price),
            None => self
                .item_price
                .checked_mul(Decimal::from(self.quantity))
                .ok_or_else(|| {
                    GatewayError::serialization(format!(
                        "Line total of '{}' out of range",
                        self.description
                    ))
                }),
        }
    }
}

/// Look and feel of the payment page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylingOptions {
    pub template_set: Option<String>,
    pub language: Option<String>,
    /// CSS applied to the whole order
    pub style: Option<String>,
    pub logo_style: Option<String>,
    pub page_style: Option<String>,
    pub footer_style: Option<String>,
}
