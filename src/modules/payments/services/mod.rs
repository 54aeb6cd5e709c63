pub mod facade;
pub mod gateway_transport;
pub mod mapper;
pub mod order_document;
pub mod soap;

pub use facade::{PaymentGatewayFacade, PaymentOptions, PaymentPageOptions, RefundOptions};
pub use gateway_transport::{AcceptPayment, GatewayTransport, OrderSummary, PaymentSystemData};
pub use order_document::{MdxiOrderBuilder, OrderDocumentBuilder};
pub use soap::SoapTransport;
