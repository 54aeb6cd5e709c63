pub mod credentials;
pub mod listing;
pub mod payment;
pub mod payment_request;
pub mod payment_type;
pub mod token;

pub use credentials::{normalize_merchant_id, Credentials};
pub use listing::{NotClearedQuery, PaymentData, ProfileQuery, SortField, SortType};
pub use payment::{MpayTid, Payment, Refund, TransactionLookup, TransactionState};
pub use payment_request::{
    Address, Customer, PaymentRequest, ShoppingCart, ShoppingCartItem, StylingOptions,
};
pub use payment_type::{PaymentType, PaymentTypeData};
pub use token::{Token, TokenRequest};
