use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    MpayTid,
    TransactionId,
    Amount,
    Time,
}

impl SortField {
    pub fn code(&self) -> &'static str {
        match self {
            SortField::MpayTid => "MPAYTID",
            SortField::TransactionId => "TID",
            SortField::Amount => "AMOUNT",
            SortField::Time => "TIME",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortType {
    Asc,
    Desc,
}

impl SortType {
    pub fn code(&self) -> &'static str {
        match self {
            SortType::Asc => "ASC",
            SortType::Desc => "DESC",
        }
    }
}

/// Listing of reserved, not yet captured payments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotClearedQuery {
    pub begin: Option<u64>,
    pub size: Option<u64>,
    pub sort_field: Option<SortField>,
    pub sort_type: Option<SortType>,
    /// Include transactions still being processed
    pub list_in_progress: Option<bool>,
}

/// Listing of stored payment profiles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileQuery {
    pub customer_id: Option<String>,
    /// Only profiles whose card expires by this date
    pub expired_by: Option<NaiveDate>,
    pub begin: Option<u64>,
    pub size: Option<u64>,
}

impl ProfileQuery {
    pub fn for_customer(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            ..Default::default()
        }
    }
}

/// A stored payment profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentData {
    pub customer_id: String,
    pub profile_id: Option<String>,
    pub payment_type: Option<String>,
    pub brand: Option<String>,
    /// Masked card number or IBAN
    pub identifier: Option<String>,
    /// YYMM
    pub expiry: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
