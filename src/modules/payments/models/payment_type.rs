use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire payment type code (`pType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    #[default]
    #[serde(rename = "CC")]
    CreditCard,
    #[serde(rename = "ELV")]
    DirectDebit,
    Paypal,
    Token,
    Profile,
    Eps,
}

impl PaymentType {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentType::CreditCard => "CC",
            PaymentType::DirectDebit => "ELV",
            PaymentType::Paypal => "PAYPAL",
            PaymentType::Token => "TOKEN",
            PaymentType::Profile => "PROFILE",
            PaymentType::Eps => "EPS",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment-method specific data for a direct payment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentTypeData {
    CreditCard {
        brand: Option<String>,
        pan: String,
        /// YYMM
        expiry: String,
        cvc: Option<String>,
        auth_3ds: bool,
    },
    DirectDebit {
        iban: String,
        bic: Option<String>,
        mandate_id: Option<String>,
        date_of_signature: Option<NaiveDate>,
    },
    Paypal {
        commit: bool,
    },
    Token {
        token: String,
        auth_3ds: bool,
    },
    Profile {
        profile_id: Option<String>,
        auth_3ds: bool,
    },
    Eps {
        bic: Option<String>,
    },
}

impl PaymentTypeData {
    pub fn payment_type(&self) -> PaymentType {
        match self {
            PaymentTypeData::CreditCard { .. } => PaymentType::CreditCard,
            PaymentTypeData::DirectDebit { .. } => PaymentType::DirectDebit,
            PaymentTypeData::Paypal { .. } => PaymentType::Paypal,
            PaymentTypeData::Token { .. } => PaymentType::Token,
            PaymentTypeData::Profile { .. } => PaymentType::Profile,
            PaymentTypeData::Eps { .. } => PaymentType::Eps,
        }
    }
}

// Card numbers and IBANs must not end up in logs.
impl fmt::Debug for PaymentTypeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentTypeData::CreditCard { brand, expiry, auth_3ds, .. } => f
                .debug_struct("CreditCard")
                .field("brand", brand)
                .field("pan", &"<redacted>")
                .field("expiry", expiry)
                .field("auth_3ds", auth_3ds)
                .finish(),
            PaymentTypeData::DirectDebit { bic, mandate_id, .. } => f
                .debug_struct("DirectDebit")
                .field("iban", &"<redacted>")
                .field("bic", bic)
                .field("mandate_id", mandate_id)
                .finish(),
            PaymentTypeData::Paypal { commit } => {
                f.debug_struct("Paypal").field("commit", commit).finish()
            }
            PaymentTypeData::Token { auth_3ds, .. } => f
                .debug_struct("Token")
                .field("token", &"<redacted>")
                .field("auth_3ds", auth_3ds)
                .finish(),
            PaymentTypeData::Profile { profile_id, auth_3ds } => f
                .debug_struct("Profile")
                .field("profile_id", profile_id)
                .field("auth_3ds", auth_3ds)
                .finish(),
            PaymentTypeData::Eps { bic } => f.debug_struct("Eps").field("bic", bic).finish(),
        }
    }
}
