use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info};

use super::gateway_transport::{AcceptPayment, GatewayTransport};
use super::mapper;
use super::order_document::{MdxiOrderBuilder, OrderDocumentBuilder};
use super::soap::SoapTransport;
use crate::config::Config;
use crate::core::{Environment, Result};
use crate::modules::payments::models::{
    Credentials, Customer, MpayTid, NotClearedQuery, Payment, PaymentData, PaymentRequest,
    PaymentTypeData, ProfileQuery, Refund, ShoppingCart, StylingOptions, Token, TokenRequest,
    TransactionLookup,
};

/// Optional parts of a payment page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentPageOptions {
    pub customer: Option<Customer>,
    pub shopping_cart: Option<ShoppingCart>,
    pub styling: Option<StylingOptions>,
}

impl PaymentPageOptions {
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn with_shopping_cart(mut self, shopping_cart: ShoppingCart) -> Self {
        self.shopping_cart = Some(shopping_cart);
        self
    }

    pub fn with_styling(mut self, styling: StylingOptions) -> Self {
        self.styling = Some(styling);
        self
    }
}

/// Optional parts of a direct payment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentOptions {
    pub customer: Option<Customer>,
    pub shopping_cart: Option<ShoppingCart>,
}

impl PaymentOptions {
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn with_shopping_cart(mut self, shopping_cart: ShoppingCart) -> Self {
        self.shopping_cart = Some(shopping_cart);
        self
    }
}

/// Partial refunds; the default refunds everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefundOptions {
    /// Refund against a specific state (e.g. one of several captures)
    pub state_id: Option<u64>,
    pub amount: Option<Decimal>,
}

impl RefundOptions {
    pub fn amount(amount: Decimal) -> Self {
        Self {
            state_id: None,
            amount: Some(amount),
        }
    }
}

/// Entry point for all mPAY24 operations of one merchant account
///
/// Create once per merchant and share; every method awaits exactly one
/// transport call and keeps no state between calls.
pub struct PaymentGatewayFacade {
    credentials: Credentials,
    transport: Arc<dyn GatewayTransport>,
    document_builder: Arc<dyn OrderDocumentBuilder>,
}

impl PaymentGatewayFacade {
    /// Connect to mPAY24 over SOAP
    ///
    /// A leading `u`/`U` of `merchant_id` (user id form) is stripped.
    pub fn new(
        merchant_id: impl AsRef<str>,
        password: impl Into<String>,
        environment: Environment,
    ) -> Result<Self> {
        let credentials = Credentials::new(merchant_id, password, environment);
        let transport = SoapTransport::new(credentials.clone(), None)?;
        Ok(Self::with_collaborators(
            credentials,
            Arc::new(transport),
            Arc::new(MdxiOrderBuilder),
        ))
    }

    /// Connect to the production system
    pub fn production(merchant_id: impl AsRef<str>, password: impl Into<String>) -> Result<Self> {
        Self::new(merchant_id, password, Environment::Production)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let credentials = Credentials::new(
            &config.merchant_id,
            config.password.clone(),
            config.environment,
        );
        let transport = SoapTransport::new(credentials.clone(), Some(config.timeout()))?;
        Ok(Self::with_collaborators(
            credentials,
            Arc::new(transport),
            Arc::new(MdxiOrderBuilder),
        ))
    }

    pub fn with_collaborators(
        credentials: Credentials,
        transport: Arc<dyn GatewayTransport>,
        document_builder: Arc<dyn OrderDocumentBuilder>,
    ) -> Self {
        Self {
            credentials,
            transport,
            document_builder,
        }
    }

    pub fn merchant_id(&self) -> &str {
        self.credentials.merchant_id()
    }

    pub fn environment(&self) -> Environment {
        self.credentials.environment()
    }

    /// Register the order and return the payment page location
    pub async fn payment_page(
        &self,
        request: &PaymentRequest,
        options: PaymentPageOptions,
    ) -> Result<Payment> {
        info!(
            merchant_id = %self.merchant_id(),
            tid = %request.transaction_id,
            amount = %request.amount,
            currency = %request.currency,
            "Creating payment page"
        );

        let result = async {
            let mdxi = self.document_builder.build_order(
                request,
                options.customer.as_ref(),
                options.shopping_cart.as_ref(),
                options.styling.as_ref(),
            )?;
            self.transport.select_payment(&mdxi).await
        }
        .await;
        self.log_outcome("payment_page", result)
    }

    /// Pay server-to-server with the given payment method
    pub async fn payment(
        &self,
        request: &PaymentRequest,
        payment_type_data: &PaymentTypeData,
        options: PaymentOptions,
    ) -> Result<Payment> {
        let payment_type = payment_type_data.payment_type();

        info!(
            merchant_id = %self.merchant_id(),
            tid = %request.transaction_id,
            payment_type = %payment_type,
            amount = %request.amount,
            "Creating payment"
        );

        let customer = options.customer.as_ref();
        let accept = AcceptPayment {
            transaction_id: request.transaction_id.clone(),
            payment_type,
            payment: mapper::map_payment_system_data(request, payment_type_data),
            customer_id: mapper::customer_id(customer),
            customer_name: mapper::customer_name(customer),
            order: mapper::map_order(request, customer, options.shopping_cart.as_ref()),
            success_url: request.success_url.clone(),
            error_url: request.error_url.clone(),
            confirmation_url: request.confirmation_url.clone(),
        };

        let result = self.transport.accept_payment(accept).await;
        self.log_outcome("payment", result)
    }

    /// All state changes of a transaction
    pub async fn payment_history(&self, mpay_tid: impl Into<MpayTid>) -> Result<Vec<Payment>> {
        let mpay_tid = mpay_tid.into();
        info!(merchant_id = %self.merchant_id(), mpay_tid = %mpay_tid, "Fetching payment history");

        let result = self.transport.transaction_history(mpay_tid).await;
        self.log_outcome("payment_history", result)
    }

    /// Current state of a transaction, by mPAYTID, merchant tid, or payment
    pub async fn payment_status(&self, lookup: impl Into<TransactionLookup>) -> Result<Payment> {
        let lookup = lookup.into();
        info!(merchant_id = %self.merchant_id(), lookup = %lookup, "Fetching payment status");

        let result = self.transport.transaction_status(&lookup).await;
        self.log_outcome("payment_status", result)
    }

    pub async fn refund(
        &self,
        mpay_tid: impl Into<MpayTid>,
        options: RefundOptions,
    ) -> Result<Refund> {
        let mpay_tid = mpay_tid.into();
        info!(
            merchant_id = %self.merchant_id(),
            mpay_tid = %mpay_tid,
            state_id = ?options.state_id,
            amount = ?options.amount,
            "Refunding payment"
        );

        let result = self
            .transport
            .manual_credit(mpay_tid, options.state_id, options.amount)
            .await;
        self.log_outcome("refund", result)
    }

    /// Release a reservation
    pub async fn cancel(&self, mpay_tid: impl Into<MpayTid>) -> Result<()> {
        let mpay_tid = mpay_tid.into();
        info!(merchant_id = %self.merchant_id(), mpay_tid = %mpay_tid, "Cancelling payment");

        let result = self.transport.manual_reverse(mpay_tid).await;
        self.log_outcome("cancel", result)
    }

    /// Capture a reservation, fully when `amount` is `None`
    pub async fn capture(
        &self,
        mpay_tid: impl Into<MpayTid>,
        amount: Option<Decimal>,
    ) -> Result<Payment> {
        let mpay_tid = mpay_tid.into();
        info!(
            merchant_id = %self.merchant_id(),
            mpay_tid = %mpay_tid,
            amount = ?amount,
            "Capturing payment"
        );

        let result = self.transport.manual_clear(mpay_tid, amount).await;
        self.log_outcome("capture", result)
    }

    pub async fn token(&self, request: &TokenRequest) -> Result<Token> {
        info!(
            merchant_id = %self.merchant_id(),
            payment_type = %request.payment_type,
            "Creating payment token"
        );

        let result = self.transport.create_payment_token(request).await;
        self.log_outcome("token", result)
    }

    pub async fn uncaptured_payments(&self, query: &NotClearedQuery) -> Result<Vec<Payment>> {
        info!(merchant_id = %self.merchant_id(), query = ?query, "Listing uncaptured payments");

        let result = self.transport.list_not_cleared(query).await;
        self.log_outcome("uncaptured_payments", result)
    }

    pub async fn stored_payment_data_list(&self, query: &ProfileQuery) -> Result<Vec<PaymentData>> {
        info!(merchant_id = %self.merchant_id(), query = ?query, "Listing stored profiles");

        let result = self.transport.list_profiles(query).await;
        self.log_outcome("stored_payment_data_list", result)
    }

    pub async fn delete_stored_payment_data(
        &self,
        customer_id: &str,
        profile_id: &str,
    ) -> Result<()> {
        info!(
            merchant_id = %self.merchant_id(),
            customer_id = %customer_id,
            profile_id = %profile_id,
            "Deleting stored profile"
        );

        let result = self.transport.delete_profile(customer_id, profile_id).await;
        self.log_outcome("delete_stored_payment_data", result)
    }

    fn log_outcome<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => info!(
                merchant_id = %self.merchant_id(),
                operation = operation,
                "mPAY24 operation succeeded"
            ),
            Err(e) => error!(
                merchant_id = %self.merchant_id(),
                operation = operation,
                error = %e,
                "mPAY24 operation failed"
            ),
        }
        result
    }
}
