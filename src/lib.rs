//! mPAY24 Payment Gateway Client Library
//!
//! A facade over the mPAY24 ETP SOAP interface: payment page, direct payments,
//! status and history queries, refund, capture, cancel, tokenization and
//! stored payment profiles.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::core::{Environment, GatewayError, Result};
pub use modules::payments;
pub use modules::payments::PaymentGatewayFacade;
