pub mod requests;
pub mod responses;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::core::amount::to_minor_units;
use crate::core::{GatewayError, Result};
use crate::modules::payments::models::{
    Credentials, MpayTid, NotClearedQuery, Payment, PaymentData, ProfileQuery, Refund, Token,
    TokenRequest, TransactionLookup,
};
use super::gateway_transport::{AcceptPayment, GatewayTransport};
use requests::{
    envelope, AcceptPaymentBody, CreatePaymentToken, DeleteProfile, ListNotCleared, ListProfiles,
    ManualClear, ManualCredit, ManualReverse, SelectPayment, TransactionHistory,
    TransactionStatus,
};
use responses::EtpResponse;

/// mPAY24 ETP SOAP client
///
/// Implements GatewayTransport over HTTPS with basic auth. The endpoint is
/// taken from the credentials' environment.
/// API Documentation: https://docs.mpay24.com/docs/etp
pub struct SoapTransport {
    client: Client,
    credentials: Credentials,
    endpoint: String,
}

impl SoapTransport {
    /// Create a new SOAP transport
    ///
    /// # Arguments
    /// * `credentials` - normalized merchant credentials
    /// * `timeout` - per-request timeout (defaults to 30 seconds)
    pub fn new(credentials: Credentials, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
            .build()?;

        Ok(Self {
            client,
            endpoint: credentials.environment().endpoint().to_string(),
            credentials,
        })
    }

    /// Point the transport at another URL, e.g. a local mock server
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn merchant_id(&self) -> &str {
        self.credentials.merchant_id()
    }

    /// Send one ETP operation and decode its response
    async fn call<T: Serialize>(&self, operation: &str, body: &T) -> Result<EtpResponse> {
        let payload = envelope(operation, body)?;

        debug!(
            operation = %operation,
            merchant_id = %self.merchant_id(),
            "Sending ETP request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(self.credentials.soap_user(), Some(self.credentials.password()))
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(
                    operation = %operation,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    error = %e,
                    "mPAY24 unreachable"
                );
                GatewayError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Some(fault) = responses::decode_fault(&body) {
                return Err(GatewayError::SoapFault {
                    code: fault.code,
                    message: fault.message,
                });
            }
            return Err(GatewayError::Http { status, body });
        }

        let decoded = responses::decode(&body)?;

        debug!(
            operation = %operation,
            return_code = %decoded.return_code,
            "ETP request succeeded"
        );

        Ok(decoded)
    }
}

#[async_trait]
impl GatewayTransport for SoapTransport {
    async fn select_payment(&self, mdxi: &str) -> Result<Payment> {
        let body = SelectPayment {
            merchant_id: self.merchant_id(),
            mdxi,
        };
        self.call("SelectPayment", &body)
            .await?
            .into_redirect_payment()
    }

    async fn accept_payment(&self, request: AcceptPayment) -> Result<Payment> {
        let body = AcceptPaymentBody::new(self.merchant_id(), &request)?;
        self.call("AcceptPayment", &body)
            .await?
            .into_redirect_payment()
    }

    async fn transaction_history(&self, mpay_tid: MpayTid) -> Result<Vec<Payment>> {
        let body = TransactionHistory {
            merchant_id: self.merchant_id(),
            mpay_tid: mpay_tid.get(),
        };
        Ok(self
            .call("TransactionHistory", &body)
            .await?
            .into_history(mpay_tid))
    }

    async fn transaction_status(&self, lookup: &TransactionLookup) -> Result<Payment> {
        let body = TransactionStatus::new(self.merchant_id(), lookup);
        self.call("TransactionStatus", &body)
            .await?
            .into_status_payment()
    }

    async fn manual_credit(
        &self,
        mpay_tid: MpayTid,
        state_id: Option<u64>,
        amount: Option<Decimal>,
    ) -> Result<Refund> {
        let body = ManualCredit {
            merchant_id: self.merchant_id(),
            mpay_tid: mpay_tid.get(),
            state_id,
            amount: amount.map(to_minor_units).transpose()?,
        };
        Ok(self
            .call("ManualCredit", &body)
            .await?
            .into_refund(mpay_tid))
    }

    async fn manual_reverse(&self, mpay_tid: MpayTid) -> Result<()> {
        let body = ManualReverse {
            merchant_id: self.merchant_id(),
            mpay_tid: mpay_tid.get(),
        };
        self.call("ManualReverse", &body).await?;
        Ok(())
    }

    async fn manual_clear(&self, mpay_tid: MpayTid, amount: Option<Decimal>) -> Result<Payment> {
        let amount = amount.map(to_minor_units).transpose()?;
        let body = ManualClear::new(self.merchant_id(), mpay_tid, amount);
        Ok(self
            .call("ManualClear", &body)
            .await?
            .into_cleared_payment(mpay_tid))
    }

    async fn create_payment_token(&self, request: &TokenRequest) -> Result<Token> {
        let body = CreatePaymentToken::new(self.merchant_id(), request);
        self.call("CreatePaymentToken", &body).await?.into_token()
    }

    async fn list_not_cleared(&self, query: &NotClearedQuery) -> Result<Vec<Payment>> {
        let body = ListNotCleared::new(self.merchant_id(), query);
        Ok(self.call("ListNotCleared", &body).await?.into_not_cleared())
    }

    async fn list_profiles(&self, query: &ProfileQuery) -> Result<Vec<PaymentData>> {
        let body = ListProfiles::new(self.merchant_id(), query);
        Ok(self.call("ListProfiles", &body).await?.into_profiles())
    }

    async fn delete_profile(&self, customer_id: &str, profile_id: &str) -> Result<()> {
        let body = DeleteProfile {
            merchant_id: self.merchant_id(),
            customer_id,
            profile_id,
        };
        self.call("DeleteProfile", &body).await?;
        Ok(())
    }
}
