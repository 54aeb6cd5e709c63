//! ETP response decoding.
//!
//! Namespace prefixes are stripped before deserializing so the same structs
//! accept `SOAP-ENV:`, `soapenv:` and `soap:` envelopes.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::core::amount::from_minor_units;
use crate::core::{GatewayError, Result};
use crate::modules::payments::models::{
    MpayTid, Payment, PaymentData, Refund, Token, TransactionState,
};

const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Body")]
    body: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    #[serde(rename = "$value")]
    content: BodyContent,
}

#[derive(Debug, Deserialize)]
enum BodyContent {
    Fault(SoapFault),
    SelectPaymentResponse(EtpResponse),
    AcceptPaymentResponse(EtpResponse),
    TransactionHistoryResponse(EtpResponse),
    TransactionStatusResponse(EtpResponse),
    ManualCreditResponse(EtpResponse),
    ManualReverseResponse(EtpResponse),
    ManualClearResponse(EtpResponse),
    CreatePaymentTokenResponse(EtpResponse),
    ListNotClearedResponse(EtpResponse),
    ListProfilesResponse(EtpResponse),
    DeleteProfileResponse(EtpResponse),
}

#[derive(Debug, Deserialize)]
pub struct SoapFault {
    #[serde(rename = "faultcode", default)]
    pub code: String,
    #[serde(rename = "faultstring", default)]
    pub message: String,
}

/// Union of the fields any ETP response carries
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EtpResponse {
    pub status: String,
    #[serde(rename = "returnCode")]
    pub return_code: String,
    #[serde(rename = "errNo")]
    pub err_no: Option<String>,
    #[serde(rename = "errText")]
    pub err_text: Option<String>,
    #[serde(rename = "mpayTID")]
    pub mpay_tid: Option<u64>,
    #[serde(rename = "stateID")]
    pub state_id: Option<u64>,
    pub location: Option<String>,
    pub token: Option<String>,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
    pub parameter: Vec<Parameter>,
    #[serde(rename = "transactionHistory")]
    pub history: Vec<HistoryEntry>,
    pub transaction: Vec<TransactionEntry>,
    pub profile: Vec<ProfileEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    #[serde(rename = "stateID")]
    pub state_id: Option<u64>,
    #[serde(rename = "tStatus")]
    pub t_status: Option<String>,
    pub amount: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransactionEntry {
    #[serde(rename = "mpayTID")]
    pub mpay_tid: u64,
    pub tid: Option<String>,
    #[serde(rename = "stateID")]
    pub state_id: Option<u64>,
    #[serde(rename = "tStatus")]
    pub t_status: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    #[serde(rename = "pType")]
    pub p_type: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileEntry {
    #[serde(rename = "customerID")]
    pub customer_id: String,
    pub updated: Option<String>,
    pub payment: Option<ProfilePayment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfilePayment {
    #[serde(rename = "profileID")]
    pub profile_id: Option<String>,
    #[serde(rename = "pType")]
    pub p_type: Option<String>,
    pub brand: Option<String>,
    pub identifier: Option<String>,
    pub expiry: Option<String>,
}

/// Drop namespace prefixes from element tags; attributes and text stay as they are
pub fn strip_prefixes(xml: &str) -> String {
    ["SOAP-ENV:", "soapenv:", "soap:", "env:", "etp:"]
        .iter()
        .fold(xml.to_string(), |acc, prefix| {
            acc.replace(&format!("</{}", prefix), "</")
                .replace(&format!("<{}", prefix), "<")
        })
}

/// Decode a SOAP fault body, if the document is one
pub fn decode_fault(xml: &str) -> Option<SoapFault> {
    let envelope: Envelope = quick_xml::de::from_str(&strip_prefixes(xml)).ok()?;
    match envelope.body.content {
        BodyContent::Fault(fault) => Some(fault),
        _ => None,
    }
}

/// Decode an ETP response and turn `status=ERROR` into a rejection
pub fn decode(xml: &str) -> Result<EtpResponse> {
    let envelope: Envelope = quick_xml::de::from_str(&strip_prefixes(xml))?;

    let response = match envelope.body.content {
        BodyContent::Fault(fault) => {
            return Err(GatewayError::SoapFault {
                code: fault.code,
                message: fault.message,
            })
        }
        BodyContent::SelectPaymentResponse(r)
        | BodyContent::AcceptPaymentResponse(r)
        | BodyContent::TransactionHistoryResponse(r)
        | BodyContent::TransactionStatusResponse(r)
        | BodyContent::ManualCreditResponse(r)
        | BodyContent::ManualReverseResponse(r)
        | BodyContent::ManualClearResponse(r)
        | BodyContent::CreatePaymentTokenResponse(r)
        | BodyContent::ListNotClearedResponse(r)
        | BodyContent::ListProfilesResponse(r)
        | BodyContent::DeleteProfileResponse(r) => r,
    };

    if !response.status.eq_ignore_ascii_case(STATUS_OK) {
        let message = response
            .err_text
            .clone()
            .unwrap_or_else(|| format!("status {}", response.status));
        return Err(GatewayError::rejected(response.return_code, message));
    }

    Ok(response)
}

impl EtpResponse {
    fn require_mpay_tid(&self) -> Result<MpayTid> {
        self.mpay_tid
            .map(MpayTid)
            .ok_or_else(|| GatewayError::malformed("Response carries no mpayTID"))
    }

    /// SelectPayment / AcceptPayment
    pub fn into_redirect_payment(self) -> Result<Payment> {
        let mut payment = Payment::new(self.require_mpay_tid()?);
        payment.return_code = Some(self.return_code);
        payment.redirect_location = self.location;
        Ok(payment)
    }

    /// TransactionStatus: everything lives in name/value parameters
    pub fn into_status_payment(self) -> Result<Payment> {
        let parameters: BTreeMap<String, String> = self
            .parameter
            .into_iter()
            .map(|p| (p.name.to_ascii_uppercase(), p.value))
            .collect();

        let mpay_tid = parameters
            .get("MPAYTID")
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| GatewayError::malformed(format!("Invalid MPAYTID: {}", e)))?
            .or(self.mpay_tid)
            .ok_or_else(|| GatewayError::malformed("Status response carries no MPAYTID"))?;

        let amount = parameters
            .get("PRICE")
            .or_else(|| parameters.get("AMOUNT"))
            .map(|v| v.parse::<i64>())
            .transpose()
            .map_err(|e| GatewayError::malformed(format!("Invalid amount: {}", e)))?
            .map(from_minor_units);

        let mut payment = Payment::new(mpay_tid);
        payment.transaction_id = parameters.get("TID").cloned();
        payment.state = parameters
            .get("STATUS")
            .or_else(|| parameters.get("TSTATUS"))
            .and_then(|v| v.parse::<TransactionState>().ok());
        payment.return_code = Some(self.return_code);
        payment.amount = amount;
        payment.currency = parameters.get("CURRENCY").cloned();
        payment.payment_type = parameters.get("P_TYPE").cloned();
        payment.brand = parameters.get("BRAND").cloned();
        payment.state_id = parameters
            .get("STATE_ID")
            .and_then(|v| v.parse().ok())
            .or(self.state_id);
        payment.parameters = parameters;
        Ok(payment)
    }

    /// TransactionHistory: one payment snapshot per state
    pub fn into_history(self, mpay_tid: MpayTid) -> Vec<Payment> {
        self.history
            .into_iter()
            .map(|entry| {
                let mut payment = Payment::new(mpay_tid);
                payment.state_id = entry.state_id;
                payment.state = entry
                    .t_status
                    .and_then(|s| s.parse::<TransactionState>().ok());
                payment.amount = entry.amount.map(from_minor_units);
                payment
            })
            .collect()
    }

    /// ManualClear: the gateway only confirms the new state
    pub fn into_cleared_payment(self, mpay_tid: MpayTid) -> Payment {
        let mut payment = Payment::new(self.mpay_tid.map(MpayTid).unwrap_or(mpay_tid));
        payment.state_id = self.state_id;
        payment.return_code = Some(self.return_code);
        payment
    }

    pub fn into_refund(self, mpay_tid: MpayTid) -> Refund {
        Refund {
            mpay_tid: self.mpay_tid.map(MpayTid).unwrap_or(mpay_tid),
            state_id: self.state_id,
            return_code: Some(self.return_code),
        }
    }

    pub fn into_token(self) -> Result<Token> {
        let token = self
            .token
            .ok_or_else(|| GatewayError::malformed("Token response carries no token"))?;
        Ok(Token {
            token,
            api_key: self.api_key,
            redirect_location: self.location,
            return_code: Some(self.return_code),
        })
    }

    pub fn into_not_cleared(self) -> Vec<Payment> {
        self.transaction
            .into_iter()
            .map(|entry| {
                let mut payment = Payment::new(entry.mpay_tid);
                payment.transaction_id = entry.tid;
                payment.state_id = entry.state_id;
                payment.state = entry
                    .t_status
                    .and_then(|s| s.parse::<TransactionState>().ok());
                payment.amount = entry.amount.map(from_minor_units);
                payment.currency = entry.currency;
                payment.payment_type = entry.p_type;
                payment.brand = entry.brand;
                payment
            })
            .collect()
    }

    pub fn into_profiles(self) -> Vec<PaymentData> {
        self.profile
            .into_iter()
            .map(|entry| {
                let payment = entry.payment.unwrap_or_default();
                let updated_at = entry
                    .updated
                    .as_deref()
                    .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
                    .map(|dt| dt.with_timezone(&chrono::Utc));
                PaymentData {
                    customer_id: entry.customer_id,
                    profile_id: payment.profile_id,
                    payment_type: payment.p_type,
                    brand: payment.brand,
                    identifier: payment.identifier,
                    expiry: payment.expiry,
                    updated_at,
                }
            })
            .collect()
    }
}
