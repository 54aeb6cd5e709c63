// Test data factory
//
// Builds realistic requests so individual tests only spell out what they
// actually assert on.

use mpay24::payments::{
    Address, Customer, PaymentRequest, PaymentTypeData, ShoppingCart, ShoppingCartItem,
    StylingOptions,
};
use rust_decimal_macros::dec;

pub struct TestDataFactory;

impl TestDataFactory {
    pub fn payment_request(transaction_id: &str) -> PaymentRequest {
        PaymentRequest::new(transaction_id, dec!(12.34)).with_urls(
            "https://shop.example/success",
            "https://shop.example/error",
            "https://shop.example/confirm",
        )
    }

    pub fn credit_card() -> PaymentTypeData {
        PaymentTypeData::CreditCard {
            brand: Some("VISA".to_string()),
            pan: "4444333322221111".to_string(),
            expiry: "2712".to_string(),
            cvc: Some("123".to_string()),
            auth_3ds: false,
        }
    }

    pub fn customer() -> Customer {
        Customer {
            id: Some("customer-1".to_string()),
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            billing_address: Some(Address {
                name: "Jane Doe".to_string(),
                street: "Ringstrasse 1".to_string(),
                street2: None,
                zip: "1010".to_string(),
                city: "Vienna".to_string(),
                country_code: "AT".to_string(),
                email: None,
            }),
            use_profile: None,
        }
    }

    pub fn shopping_cart() -> ShoppingCart {
        ShoppingCart {
            description: Some("Order 1".to_string()),
            items: vec![
                ShoppingCartItem::new("Coffee beans", 2, dec!(4.50)),
                ShoppingCartItem::new("Mug", 1, dec!(3.34)),
            ],
            ..Default::default()
        }
    }

    pub fn styling() -> StylingOptions {
        StylingOptions {
            template_set: Some("WEB".to_string()),
            language: Some("EN".to_string()),
            ..Default::default()
        }
    }
}
