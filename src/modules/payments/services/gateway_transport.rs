use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::Result;
use crate::modules::payments::models::{
    Address, MpayTid, NotClearedQuery, Payment, PaymentData, PaymentType, PaymentTypeData,
    ProfileQuery, Refund, ShoppingCart, Token, TokenRequest, TransactionLookup,
};

/// One method per gateway action; implementations own the wire protocol
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Register an order (mdxi document) and get the payment page location
    async fn select_payment(&self, mdxi: &str) -> Result<Payment>;

    /// Start a server-to-server payment
    async fn accept_payment(&self, request: AcceptPayment) -> Result<Payment>;

    async fn transaction_history(&self, mpay_tid: MpayTid) -> Result<Vec<Payment>>;

    async fn transaction_status(&self, lookup: &TransactionLookup) -> Result<Payment>;

    /// Refund; full amount when `amount` is absent
    async fn manual_credit(
        &self,
        mpay_tid: MpayTid,
        state_id: Option<u64>,
        amount: Option<Decimal>,
    ) -> Result<Refund>;

    /// Cancel a reservation
    async fn manual_reverse(&self, mpay_tid: MpayTid) -> Result<()>;

    /// Capture a reservation; full amount when `amount` is absent
    async fn manual_clear(&self, mpay_tid: MpayTid, amount: Option<Decimal>) -> Result<Payment>;

    async fn create_payment_token(&self, request: &TokenRequest) -> Result<Token>;

    async fn list_not_cleared(&self, query: &NotClearedQuery) -> Result<Vec<Payment>>;

    async fn list_profiles(&self, query: &ProfileQuery) -> Result<Vec<PaymentData>>;

    async fn delete_profile(&self, customer_id: &str, profile_id: &str) -> Result<()>;
}

/// Everything the accept-payment action needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptPayment {
    pub transaction_id: String,
    pub payment_type: PaymentType,
    pub payment: PaymentSystemData,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub order: OrderSummary,
    pub success_url: Option<String>,
    pub error_url: Option<String>,
    pub confirmation_url: Option<String>,
}

/// Amount and payment-method data of a direct payment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSystemData {
    pub amount: Decimal,
    pub currency: String,
    pub manual_clearing: Option<bool>,
    pub use_profile: Option<bool>,
    pub language: Option<String>,
    pub method: PaymentTypeData,
}

/// Order details attached to a direct payment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderSummary {
    pub description: Option<String>,
    pub shopping_cart: Option<ShoppingCart>,
    pub billing: Option<Address>,
}

impl OrderSummary {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.shopping_cart.is_none() && self.billing.is_none()
    }
}
