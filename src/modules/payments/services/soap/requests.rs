//! ETP request bodies. Amounts go over the wire in cents.

use serde::Serialize;

use crate::core::amount::to_minor_units;
use crate::core::{GatewayError, Result};
use crate::modules::payments::models::{
    Address, MpayTid, NotClearedQuery, PaymentTypeData, ProfileQuery, ShoppingCart, TokenRequest,
    TransactionLookup,
};
use crate::modules::payments::services::gateway_transport::{
    AcceptPayment, OrderSummary, PaymentSystemData,
};

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const ETP_NS: &str = "https://www.mpay24.com/soap/etp/1.5/ETP.wsdl";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Serialize `body` as `<etp:{operation}>` and wrap it into a SOAP envelope
pub fn envelope<T: Serialize>(operation: &str, body: &T) -> Result<String> {
    let root = format!("etp:{}", operation);
    let content = quick_xml::se::to_string_with_root(&root, body)
        .map_err(|e| GatewayError::serialization(format!("{}: {}", operation, e)))?;

    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><soapenv:Envelope xmlns:soapenv="{}" xmlns:etp="{}" xmlns:xsi="{}"><soapenv:Header/><soapenv:Body>{}</soapenv:Body></soapenv:Envelope>"#,
        SOAP_ENV_NS, ETP_NS, XSI_NS, content
    ))
}

#[derive(Debug, Serialize)]
pub struct SelectPayment<'a> {
    #[serde(rename = "merchantID")]
    pub merchant_id: &'a str,
    pub mdxi: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AcceptPaymentBody<'a> {
    #[serde(rename = "merchantID")]
    merchant_id: &'a str,
    tid: &'a str,
    #[serde(rename = "pType")]
    p_type: &'static str,
    payment: SoapPayment<'a>,
    #[serde(rename = "customerID", skip_serializing_if = "Option::is_none")]
    customer_id: Option<&'a str>,
    #[serde(rename = "customerName", skip_serializing_if = "Option::is_none")]
    customer_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<SoapOrder<'a>>,
    #[serde(rename = "successURL", skip_serializing_if = "Option::is_none")]
    success_url: Option<&'a str>,
    #[serde(rename = "errorURL", skip_serializing_if = "Option::is_none")]
    error_url: Option<&'a str>,
    #[serde(rename = "confirmationURL", skip_serializing_if = "Option::is_none")]
    confirmation_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

impl<'a> AcceptPaymentBody<'a> {
    pub fn new(merchant_id: &'a str, request: &'a AcceptPayment) -> Result<Self> {
        let order = if request.order.is_empty() {
            None
        } else {
            Some(SoapOrder::new(&request.order)?)
        };

        Ok(Self {
            merchant_id,
            tid: &request.transaction_id,
            p_type: request.payment_type.code(),
            payment: SoapPayment::new(&request.payment)?,
            customer_id: request.customer_id.as_deref(),
            customer_name: request.customer_name.as_deref(),
            order,
            success_url: request.success_url.as_deref(),
            error_url: request.error_url.as_deref(),
            confirmation_url: request.confirmation_url.as_deref(),
            language: request.payment.language.as_deref(),
        })
    }
}

/// Flattened `etp:Payment*` element; `xsi:type` selects the method
#[derive(Debug, Default, Serialize)]
struct SoapPayment<'a> {
    #[serde(rename = "@xsi:type")]
    xsi_type: &'static str,
    amount: i64,
    currency: &'a str,
    #[serde(rename = "manualClearing", skip_serializing_if = "Option::is_none")]
    manual_clearing: Option<bool>,
    #[serde(rename = "useProfile", skip_serializing_if = "Option::is_none")]
    use_profile: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cvc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iban: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bic: Option<&'a str>,
    #[serde(rename = "mandateID", skip_serializing_if = "Option::is_none")]
    mandate_id: Option<&'a str>,
    #[serde(rename = "dateOfSignature", skip_serializing_if = "Option::is_none")]
    date_of_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    #[serde(rename = "profileID", skip_serializing_if = "Option::is_none")]
    profile_id: Option<&'a str>,
    #[serde(rename = "auth3DS", skip_serializing_if = "Option::is_none")]
    auth_3ds: Option<bool>,
}

impl<'a> SoapPayment<'a> {
    fn new(data: &'a PaymentSystemData) -> Result<Self> {
        let base = SoapPayment {
            amount: to_minor_units(data.amount)?,
            currency: &data.currency,
            manual_clearing: data.manual_clearing,
            use_profile: data.use_profile,
            ..Default::default()
        };

        let payment = match &data.method {
            PaymentTypeData::CreditCard {
                brand,
                pan,
                expiry,
                cvc,
                auth_3ds,
            } => SoapPayment {
                xsi_type: "etp:PaymentCC",
                brand: brand.as_deref(),
                identifier: Some(pan.as_str()),
                expiry: Some(expiry.as_str()),
                cvc: cvc.as_deref(),
                auth_3ds: Some(*auth_3ds),
                ..base
            },
            PaymentTypeData::DirectDebit {
                iban,
                bic,
                mandate_id,
                date_of_signature,
            } => SoapPayment {
                xsi_type: "etp:PaymentELV",
                iban: Some(iban.as_str()),
                bic: bic.as_deref(),
                mandate_id: mandate_id.as_deref(),
                date_of_signature: date_of_signature.map(|d| d.format("%Y-%m-%d").to_string()),
                ..base
            },
            PaymentTypeData::Paypal { commit } => SoapPayment {
                xsi_type: "etp:PaymentPAYPAL",
                commit: Some(*commit),
                ..base
            },
            PaymentTypeData::Token { token, auth_3ds } => SoapPayment {
                xsi_type: "etp:PaymentTOKEN",
                token: Some(token.as_str()),
                auth_3ds: Some(*auth_3ds),
                ..base
            },
            PaymentTypeData::Profile {
                profile_id,
                auth_3ds,
            } => SoapPayment {
                xsi_type: "etp:PaymentPROFILE",
                profile_id: profile_id.as_deref(),
                auth_3ds: Some(*auth_3ds),
                ..base
            },
            PaymentTypeData::Eps { bic } => SoapPayment {
                xsi_type: "etp:PaymentEPS",
                bic: bic.as_deref(),
                ..base
            },
        };

        Ok(payment)
    }
}

#[derive(Debug, Serialize)]
struct SoapOrder<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "shoppingCart", skip_serializing_if = "Option::is_none")]
    shopping_cart: Option<SoapShoppingCart<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing: Option<SoapAddress<'a>>,
}

impl<'a> SoapOrder<'a> {
    fn new(order: &'a OrderSummary) -> Result<Self> {
        Ok(Self {
            description: order.description.as_deref(),
            shopping_cart: order
                .shopping_cart
                .as_ref()
                .map(SoapShoppingCart::new)
                .transpose()?,
            billing: order.billing.as_ref().map(SoapAddress::from),
        })
    }
}

#[derive(Debug, Serialize)]
struct SoapShoppingCart<'a> {
    item: Vec<SoapItem<'a>>,
    #[serde(rename = "shippingCosts", skip_serializing_if = "Option::is_none")]
    shipping_costs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax: Option<i64>,
}

impl<'a> SoapShoppingCart<'a> {
    fn new(cart: &'a ShoppingCart) -> Result<Self> {
        let item = cart
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Ok(SoapItem {
                    number: item.number.unwrap_or(index as u32 + 1),
                    product_nr: item.product_number.as_deref(),
                    description: &item.description,
                    quantity: item.quantity,
                    amount: to_minor_units(item.total()?)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            item,
            shipping_costs: cart.shipping_costs.map(to_minor_units).transpose()?,
            discount: cart.discount.map(to_minor_units).transpose()?,
            tax: cart.tax.map(to_minor_units).transpose()?,
        })
    }
}

#[derive(Debug, Serialize)]
struct SoapItem<'a> {
    number: u32,
    #[serde(rename = "productNr", skip_serializing_if = "Option::is_none")]
    product_nr: Option<&'a str>,
    description: &'a str,
    quantity: u32,
    amount: i64,
}

#[derive(Debug, Serialize)]
struct SoapAddress<'a> {
    name: &'a str,
    street: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    street2: Option<&'a str>,
    zip: &'a str,
    city: &'a str,
    #[serde(rename = "countryCode")]
    country_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

impl<'a> From<&'a Address> for SoapAddress<'a> {
    fn from(address: &'a Address) -> Self {
        Self {
            name: &address.name,
            street: &address.street,
            street2: address.street2.as_deref(),
            zip: &address.zip,
            city: &address.city,
            country_code: &address.country_code,
            email: address.email.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionHistory<'a> {
    #[serde(rename = "merchantID")]
    pub merchant_id: &'a str,
    #[serde(rename = "mpayTID")]
    pub mpay_tid: u64,
}

#[derive(Debug, Serialize)]
pub struct TransactionStatus<'a> {
    #[serde(rename = "merchantID")]
    merchant_id: &'a str,
    #[serde(rename = "mpayTID", skip_serializing_if = "Option::is_none")]
    mpay_tid: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tid: Option<&'a str>,
}

impl<'a> TransactionStatus<'a> {
    pub fn new(merchant_id: &'a str, lookup: &'a TransactionLookup) -> Self {
        let (mpay_tid, tid) = match lookup {
            TransactionLookup::MpayTid(mpay_tid) => (Some(mpay_tid.get()), None),
            TransactionLookup::TransactionId(tid) => (None, Some(tid.as_str())),
        };
        Self {
            merchant_id,
            mpay_tid,
            tid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ManualCredit<'a> {
    #[serde(rename = "merchantID")]
    pub merchant_id: &'a str,
    #[serde(rename = "mpayTID")]
    pub mpay_tid: u64,
    #[serde(rename = "stateID", skip_serializing_if = "Option::is_none")]
    pub state_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ManualReverse<'a> {
    #[serde(rename = "merchantID")]
    pub merchant_id: &'a str,
    #[serde(rename = "mpayTID")]
    pub mpay_tid: u64,
}

#[derive(Debug, Serialize)]
pub struct ManualClear<'a> {
    #[serde(rename = "merchantID")]
    pub merchant_id: &'a str,
    #[serde(rename = "clearingDetails")]
    pub clearing_details: ClearingDetails,
}

#[derive(Debug, Serialize)]
pub struct ClearingDetails {
    #[serde(rename = "mpayTID")]
    pub mpay_tid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

impl<'a> ManualClear<'a> {
    pub fn new(merchant_id: &'a str, mpay_tid: MpayTid, amount: Option<i64>) -> Self {
        Self {
            merchant_id,
            clearing_details: ClearingDetails {
                mpay_tid: mpay_tid.get(),
                amount,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentToken<'a> {
    #[serde(rename = "merchantID")]
    merchant_id: &'a str,
    #[serde(rename = "pType")]
    p_type: &'static str,
    #[serde(rename = "templateSet", skip_serializing_if = "Option::is_none")]
    template_set: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a str>,
    #[serde(rename = "customerID", skip_serializing_if = "Option::is_none")]
    customer_id: Option<&'a str>,
    #[serde(rename = "profileID", skip_serializing_if = "Option::is_none")]
    profile_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

impl<'a> CreatePaymentToken<'a> {
    pub fn new(merchant_id: &'a str, request: &'a TokenRequest) -> Self {
        Self {
            merchant_id,
            p_type: request.payment_type.code(),
            template_set: request.template_set.as_deref(),
            style: request.style.as_deref(),
            customer_id: request.customer_id.as_deref(),
            profile_id: request.profile_id.as_deref(),
            domain: request.domain.as_deref(),
            language: request.language.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListNotCleared<'a> {
    #[serde(rename = "merchantID")]
    merchant_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    begin: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(rename = "sortField", skip_serializing_if = "Option::is_none")]
    sort_field: Option<&'static str>,
    #[serde(rename = "sortType", skip_serializing_if = "Option::is_none")]
    sort_type: Option<&'static str>,
    #[serde(rename = "listInProgress", skip_serializing_if = "Option::is_none")]
    list_in_progress: Option<bool>,
}

impl<'a> ListNotCleared<'a> {
    pub fn new(merchant_id: &'a str, query: &NotClearedQuery) -> Self {
        Self {
            merchant_id,
            begin: query.begin,
            size: query.size,
            sort_field: query.sort_field.map(|f| f.code()),
            sort_type: query.sort_type.map(|t| t.code()),
            list_in_progress: query.list_in_progress,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListProfiles<'a> {
    #[serde(rename = "merchantID")]
    merchant_id: &'a str,
    #[serde(rename = "customerID", skip_serializing_if = "Option::is_none")]
    customer_id: Option<&'a str>,
    #[serde(rename = "expiredBy", skip_serializing_if = "Option::is_none")]
    expired_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    begin: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

impl<'a> ListProfiles<'a> {
    pub fn new(merchant_id: &'a str, query: &'a ProfileQuery) -> Self {
        Self {
            merchant_id,
            customer_id: query.customer_id.as_deref(),
            expired_by: query.expired_by.map(|d| d.format("%Y-%m-%d").to_string()),
            begin: query.begin,
            size: query.size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteProfile<'a> {
    #[serde(rename = "merchantID")]
    pub merchant_id: &'a str,
    #[serde(rename = "customerID")]
    pub customer_id: &'a str,
    #[serde(rename = "profileID")]
    pub profile_id: &'a str,
}
