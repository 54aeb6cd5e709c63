use serde::Serialize;

use crate::core::amount::format_price;
use crate::core::{GatewayError, Result};
use crate::modules::payments::models::{Customer, PaymentRequest, ShoppingCart, StylingOptions};

/// Builds the serialized order document for the payment page
pub trait OrderDocumentBuilder: Send + Sync {
    fn build_order(
        &self,
        request: &PaymentRequest,
        customer: Option<&Customer>,
        shopping_cart: Option<&ShoppingCart>,
        styling: Option<&StylingOptions>,
    ) -> Result<String>;
}

/// mdxi `<Order>` document builder
#[derive(Debug, Clone, Copy, Default)]
pub struct MdxiOrderBuilder;

impl OrderDocumentBuilder for MdxiOrderBuilder {
    fn build_order(
        &self,
        request: &PaymentRequest,
        customer: Option<&Customer>,
        shopping_cart: Option<&ShoppingCart>,
        styling: Option<&StylingOptions>,
    ) -> Result<String> {
        let order = MdxiOrder::new(request, customer, shopping_cart, styling)?;

        let xml = quick_xml::se::to_string_with_root("Order", &order)
            .map_err(|e| GatewayError::serialization(format!("mdxi order: {}", e)))?;

        Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>{}", xml))
    }
}

#[derive(Debug, Serialize)]
struct MdxiOrder<'a> {
    #[serde(rename = "@Style", skip_serializing_if = "Option::is_none")]
    style: Option<&'a str>,
    #[serde(rename = "@LogoStyle", skip_serializing_if = "Option::is_none")]
    logo_style: Option<&'a str>,
    #[serde(rename = "@PageStyle", skip_serializing_if = "Option::is_none")]
    page_style: Option<&'a str>,
    #[serde(rename = "@FooterStyle", skip_serializing_if = "Option::is_none")]
    footer_style: Option<&'a str>,
    #[serde(rename = "UserField", skip_serializing_if = "Option::is_none")]
    user_field: Option<&'a str>,
    #[serde(rename = "Tid")]
    tid: &'a str,
    #[serde(rename = "TemplateSet", skip_serializing_if = "Option::is_none")]
    template_set: Option<MdxiTemplateSet<'a>>,
    #[serde(rename = "ShoppingCart", skip_serializing_if = "Option::is_none")]
    shopping_cart: Option<MdxiShoppingCart<'a>>,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Currency")]
    currency: &'a str,
    #[serde(rename = "Customer", skip_serializing_if = "Option::is_none")]
    customer: Option<MdxiCustomer<'a>>,
    #[serde(rename = "BillingAddr", skip_serializing_if = "Option::is_none")]
    billing_addr: Option<MdxiAddress<'a>>,
    #[serde(rename = "URL")]
    url: MdxiUrl<'a>,
}

#[derive(Debug, Serialize)]
struct MdxiTemplateSet<'a> {
    #[serde(rename = "@Language", skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(rename = "$text")]
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct MdxiShoppingCart<'a> {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "Item")]
    items: Vec<MdxiItem<'a>>,
    #[serde(rename = "SubTotal", skip_serializing_if = "Option::is_none")]
    sub_total: Option<String>,
    #[serde(rename = "Discount", skip_serializing_if = "Option::is_none")]
    discount: Option<String>,
    #[serde(rename = "ShippingCosts", skip_serializing_if = "Option::is_none")]
    shipping_costs: Option<String>,
    #[serde(rename = "Tax", skip_serializing_if = "Option::is_none")]
    tax: Option<String>,
}

#[derive(Debug, Serialize)]
struct MdxiItem<'a> {
    #[serde(rename = "Number")]
    number: u32,
    #[serde(rename = "ProductNr", skip_serializing_if = "Option::is_none")]
    product_number: Option<&'a str>,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "ItemPrice")]
    item_price: String,
    #[serde(rename = "Price")]
    price: String,
}

#[derive(Debug, Serialize)]
struct MdxiCustomer<'a> {
    #[serde(rename = "@Id", skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(rename = "@UseProfile", skip_serializing_if = "Option::is_none")]
    use_profile: Option<bool>,
    #[serde(rename = "$text")]
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct MdxiAddress<'a> {
    #[serde(rename = "@Mode")]
    mode: &'static str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Street")]
    street: &'a str,
    #[serde(rename = "Street2", skip_serializing_if = "Option::is_none")]
    street2: Option<&'a str>,
    #[serde(rename = "Zip")]
    zip: &'a str,
    #[serde(rename = "City")]
    city: &'a str,
    #[serde(rename = "Country")]
    country: MdxiCountry<'a>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct MdxiCountry<'a> {
    #[serde(rename = "@Code")]
    code: &'a str,
}

#[derive(Debug, Serialize)]
struct MdxiUrl<'a> {
    #[serde(rename = "Success", skip_serializing_if = "Option::is_none")]
    success: Option<&'a str>,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(rename = "Confirmation", skip_serializing_if = "Option::is_none")]
    confirmation: Option<&'a str>,
    #[serde(rename = "Cancel", skip_serializing_if = "Option::is_none")]
    cancel: Option<&'a str>,
}

impl<'a> MdxiOrder<'a> {
    fn new(
        request: &'a PaymentRequest,
        customer: Option<&'a Customer>,
        shopping_cart: Option<&'a ShoppingCart>,
        styling: Option<&'a StylingOptions>,
    ) -> Result<Self> {
        let language = styling
            .and_then(|s| s.language.as_deref())
            .or(request.language.as_deref());

        let template_set = styling
            .and_then(|s| s.template_set.as_deref())
            .map(|name| MdxiTemplateSet { language, name });

        Ok(Self {
            style: styling.and_then(|s| s.style.as_deref()),
            logo_style: styling.and_then(|s| s.logo_style.as_deref()),
            page_style: styling.and_then(|s| s.page_style.as_deref()),
            footer_style: styling.and_then(|s| s.footer_style.as_deref()),
            user_field: request.description.as_deref(),
            tid: &request.transaction_id,
            template_set,
            shopping_cart: shopping_cart.map(MdxiShoppingCart::new).transpose()?,
            price: format_price(request.amount),
            currency: &request.currency,
            customer: customer.and_then(MdxiCustomer::from_customer),
            billing_addr: customer.and_then(MdxiAddress::from_customer),
            url: MdxiUrl {
                success: request.success_url.as_deref(),
                error: request.error_url.as_deref(),
                confirmation: request.confirmation_url.as_deref(),
                cancel: request.cancel_url.as_deref(),
            },
        })
    }
}

impl<'a> MdxiShoppingCart<'a> {
    fn new(cart: &'a ShoppingCart) -> Result<Self> {
        let items = cart
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Ok(MdxiItem {
                    number: item.number.unwrap_or(index as u32 + 1),
                    product_number: item.product_number.as_deref(),
                    description: &item.description,
                    quantity: item.quantity,
                    item_price: format_price(item.item_price),
                    price: format_price(item.total()?),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            description: cart.description.as_deref(),
            items,
            sub_total: cart.sub_total.map(format_price),
            discount: cart.discount.map(format_price),
            shipping_costs: cart.shipping_costs.map(format_price),
            tax: cart.tax.map(format_price),
        })
    }
}

impl<'a> MdxiCustomer<'a> {
    // An anonymous customer without id adds nothing to the document.
    fn from_customer(customer: &'a Customer) -> Option<Self> {
        if customer.id.is_none() && customer.name.is_none() {
            return None;
        }
        Some(Self {
            id: customer.id.as_deref(),
            use_profile: customer.use_profile,
            name: customer.name.as_deref().unwrap_or_default(),
        })
    }
}

impl<'a> MdxiAddress<'a> {
    /// Billing address; the customer's email fills in when the address has none
    fn from_customer(customer: &'a Customer) -> Option<Self> {
        let address = customer.billing_address.as_ref()?;
        Some(Self {
            mode: "ReadWrite",
            name: &address.name,
            street: &address.street,
            street2: address.street2.as_deref(),
            zip: &address.zip,
            city: &address.city,
            country: MdxiCountry {
                code: &address.country_code,
            },
            email: address.email.as_deref().or(customer.email.as_deref()),
        })
    }
}
