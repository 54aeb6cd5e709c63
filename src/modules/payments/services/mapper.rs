//! Maps facade value objects into the transport's accept-payment objects.

use super::gateway_transport::{OrderSummary, PaymentSystemData};
use crate::modules::payments::models::{
    Address, Customer, PaymentRequest, PaymentTypeData, ShoppingCart,
};

pub fn map_payment_system_data(
    request: &PaymentRequest,
    type_data: &PaymentTypeData,
) -> PaymentSystemData {
    PaymentSystemData {
        amount: request.amount,
        currency: request.currency.clone(),
        manual_clearing: request.manual_clearing,
        use_profile: request.save_payment_data,
        language: request.language.clone(),
        method: type_data.clone(),
    }
}

pub fn map_order(
    request: &PaymentRequest,
    customer: Option<&Customer>,
    shopping_cart: Option<&ShoppingCart>,
) -> OrderSummary {
    OrderSummary {
        description: request.description.clone(),
        shopping_cart: shopping_cart.cloned(),
        billing: customer.and_then(billing_address),
    }
}

/// Billing address with the customer's email filled in when it has none
fn billing_address(customer: &Customer) -> Option<Address> {
    let mut address = customer.billing_address.clone()?;
    if address.email.is_none() {
        address.email = customer.email.clone();
    }
    Some(address)
}

pub fn customer_id(customer: Option<&Customer>) -> Option<String> {
    customer.and_then(|c| c.id.clone())
}

pub fn customer_name(customer: Option<&Customer>) -> Option<String> {
    customer.and_then(|c| c.name.clone())
}
