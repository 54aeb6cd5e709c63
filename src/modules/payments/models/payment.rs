use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::{GatewayError, Result};

/// Numeric transaction id assigned by mPAY24 (mPAYTID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MpayTid(pub u64);

impl MpayTid {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MpayTid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MpayTid {
    fn from(value: u64) -> Self {
        MpayTid(value)
    }
}

impl From<&Payment> for MpayTid {
    fn from(payment: &Payment) -> Self {
        payment.mpay_tid
    }
}

/// Identifies one transaction for a status lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionLookup {
    MpayTid(MpayTid),
    /// Merchant transaction id (Tid)
    TransactionId(String),
}

impl TransactionLookup {
    /// Build a lookup from two optional identifiers; exactly one must be set
    pub fn from_parts(mpay_tid: Option<u64>, transaction_id: Option<String>) -> Result<Self> {
        match (mpay_tid, transaction_id) {
            (Some(tid), None) => Ok(TransactionLookup::MpayTid(MpayTid(tid))),
            (None, Some(id)) => Ok(TransactionLookup::TransactionId(id)),
            (None, None) => Err(GatewayError::validation(
                "Status lookup needs an mPAYTID or a transaction id",
            )),
            (Some(_), Some(_)) => Err(GatewayError::validation(
                "Status lookup takes either an mPAYTID or a transaction id, not both",
            )),
        }
    }
}

impl From<MpayTid> for TransactionLookup {
    fn from(value: MpayTid) -> Self {
        TransactionLookup::MpayTid(value)
    }
}

impl From<u64> for TransactionLookup {
    fn from(value: u64) -> Self {
        TransactionLookup::MpayTid(MpayTid(value))
    }
}

impl From<&Payment> for TransactionLookup {
    fn from(payment: &Payment) -> Self {
        TransactionLookup::MpayTid(payment.mpay_tid)
    }
}

impl From<&str> for TransactionLookup {
    fn from(value: &str) -> Self {
        TransactionLookup::TransactionId(value.to_string())
    }
}

impl From<String> for TransactionLookup {
    fn from(value: String) -> Self {
        TransactionLookup::TransactionId(value)
    }
}

impl fmt::Display for TransactionLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionLookup::MpayTid(tid) => write!(f, "mpaytid:{}", tid),
            TransactionLookup::TransactionId(id) => write!(f, "tid:{}", id),
        }
    }
}

/// Transaction state as reported by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    Init,
    Reserved,
    Billed,
    Reversed,
    Credited,
    Suspended,
    Error,
    Withdrawn,
    Unknown(String),
}

impl FromStr for TransactionState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "INIT" => TransactionState::Init,
            "RESERVED" => TransactionState::Reserved,
            "BILLED" => TransactionState::Billed,
            "REVERSED" => TransactionState::Reversed,
            "CREDITED" => TransactionState::Credited,
            "SUSPENDED" => TransactionState::Suspended,
            "ERROR" => TransactionState::Error,
            "WITHDRAWN" => TransactionState::Withdrawn,
            other => TransactionState::Unknown(other.to_string()),
        })
    }
}

impl TransactionState {
    /// Funds are reserved but not yet captured
    pub fn is_capturable(&self) -> bool {
        matches!(self, TransactionState::Reserved)
    }
}

/// A payment as seen by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub mpay_tid: MpayTid,
    pub transaction_id: Option<String>,
    pub state: Option<TransactionState>,
    pub return_code: Option<String>,
    /// Where to send the customer (payment page or 3DS / PayPal redirect)
    pub redirect_location: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub payment_type: Option<String>,
    pub brand: Option<String>,
    pub state_id: Option<u64>,
    /// Every name/value pair the gateway returned for the transaction
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

impl Payment {
    pub fn new(mpay_tid: impl Into<MpayTid>) -> Self {
        Self {
            mpay_tid: mpay_tid.into(),
            transaction_id: None,
            state: None,
            return_code: None,
            redirect_location: None,
            amount: None,
            currency: None,
            payment_type: None,
            brand: None,
            state_id: None,
            parameters: BTreeMap::new(),
        }
    }

    /// Customer must be redirected to complete the payment
    pub fn requires_redirect(&self) -> bool {
        self.redirect_location.is_some()
    }
}

/// Result of a refund (manual credit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    pub mpay_tid: MpayTid,
    pub state_id: Option<u64>,
    pub return_code: Option<String>,
}
