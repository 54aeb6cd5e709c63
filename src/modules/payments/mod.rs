pub mod models;
pub mod services;

pub use models::*;
pub use services::{
    GatewayTransport, MdxiOrderBuilder, OrderDocumentBuilder, PaymentGatewayFacade,
    PaymentOptions, PaymentPageOptions, RefundOptions, SoapTransport,
};
