// Integration tests for PaymentGatewayFacade delegation
//
// Every operation family must reach exactly one transport action with the
// arguments the caller gave, absent values staying absent.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use helpers::{Call, RecordingDocumentBuilder, RecordingTransport, TestDataFactory};
use mpay24::payments::{
    Credentials, MpayTid, NotClearedQuery, PaymentOptions, PaymentType, ProfileQuery,
    RefundOptions, SortField, SortType, TokenRequest, TransactionLookup,
};
use mpay24::{Environment, GatewayError, PaymentGatewayFacade};
use rust_decimal_macros::dec;

fn facade(transport: Arc<RecordingTransport>) -> PaymentGatewayFacade {
    PaymentGatewayFacade::with_collaborators(
        Credentials::new("u93975", "secret", Environment::Test),
        transport,
        RecordingDocumentBuilder::new(),
    )
}

#[tokio::test]
async fn test_direct_payment_without_customer() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());
    let request = TestDataFactory::payment_request("T1");

    let payment = facade
        .payment(&request, &TestDataFactory::credit_card(), PaymentOptions::default())
        .await
        .unwrap();
    assert_eq!(payment.mpay_tid, MpayTid(2));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let Call::AcceptPayment(accept) = &calls[0] else {
        panic!("expected AcceptPayment, got {:?}", calls[0]);
    };
    assert_eq!(accept.transaction_id, "T1");
    assert_eq!(accept.payment_type, PaymentType::CreditCard);
    assert_eq!(accept.customer_id, None);
    assert_eq!(accept.customer_name, None);
    assert_eq!(accept.payment.amount, dec!(12.34));
    assert_eq!(accept.success_url.as_deref(), Some("https://shop.example/success"));
    assert_eq!(accept.error_url.as_deref(), Some("https://shop.example/error"));
    assert_eq!(
        accept.confirmation_url.as_deref(),
        Some("https://shop.example/confirm")
    );
    assert!(accept.order.is_empty());
}

#[tokio::test]
async fn test_direct_payment_with_customer_and_cart() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());
    let request = TestDataFactory::payment_request("T2");
    let options = PaymentOptions::default()
        .with_customer(TestDataFactory::customer())
        .with_shopping_cart(TestDataFactory::shopping_cart());

    facade
        .payment(&request, &TestDataFactory::credit_card(), options)
        .await
        .unwrap();

    let Call::AcceptPayment(accept) = &transport.calls()[0] else {
        panic!("expected AcceptPayment");
    };
    assert_eq!(accept.customer_id.as_deref(), Some("customer-1"));
    assert_eq!(accept.customer_name.as_deref(), Some("Jane Doe"));
    assert_eq!(accept.order.billing.as_ref().unwrap().city, "Vienna");
    assert_eq!(accept.order.shopping_cart.as_ref().unwrap().items.len(), 2);
}

#[tokio::test]
async fn test_status_lookup_variants() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());
    let existing = helpers::stub_payment(77);

    facade.payment_status(42u64).await.unwrap();
    facade.payment_status("T1").await.unwrap();
    facade.payment_status(&existing).await.unwrap();

    assert_eq!(
        transport.calls(),
        vec![
            Call::TransactionStatus(TransactionLookup::MpayTid(MpayTid(42))),
            Call::TransactionStatus(TransactionLookup::TransactionId("T1".to_string())),
            Call::TransactionStatus(TransactionLookup::MpayTid(MpayTid(77))),
        ]
    );
}

#[tokio::test]
async fn test_status_lookup_without_identifier_is_rejected_before_transport() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());

    let result = match TransactionLookup::from_parts(None, None) {
        Ok(lookup) => facade.payment_status(lookup).await.map(|_| ()),
        Err(e) => Err(e),
    };

    assert!(matches!(result, Err(GatewayError::Validation(_))));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_history_by_id_and_by_payment_are_equivalent() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());

    facade.payment_history(9u64).await.unwrap();
    facade
        .payment_history(&helpers::stub_payment(9))
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls[0], Call::TransactionHistory(MpayTid(9)));
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn test_refund_defaults_and_partial() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());

    facade.refund(5u64, RefundOptions::default()).await.unwrap();
    facade
        .refund(5u64, RefundOptions::amount(dec!(1.50)))
        .await
        .unwrap();
    let refund = facade
        .refund(
            &helpers::stub_payment(5),
            RefundOptions {
                state_id: Some(3),
                amount: Some(dec!(2)),
            },
        )
        .await
        .unwrap();
    assert_eq!(refund.state_id, Some(3));

    assert_eq!(
        transport.calls(),
        vec![
            Call::ManualCredit(MpayTid(5), None, None),
            Call::ManualCredit(MpayTid(5), None, Some(dec!(1.50))),
            Call::ManualCredit(MpayTid(5), Some(3), Some(dec!(2))),
        ]
    );
}

#[tokio::test]
async fn test_cancel_delegates_to_manual_reverse() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());

    facade.cancel(42u64).await.unwrap();
    assert_eq!(transport.calls(), vec![Call::ManualReverse(MpayTid(42))]);
}

#[tokio::test]
async fn test_cancel_failure_surfaces_gateway_error() {
    let transport = RecordingTransport::failing();
    let facade = facade(transport.clone());

    let err = facade.cancel(42u64).await.unwrap_err();
    assert!(matches!(err, GatewayError::Rejected { .. }));
    assert_eq!(transport.calls(), vec![Call::ManualReverse(MpayTid(42))]);

    // The facade is unchanged and keeps working with the same credentials.
    assert_eq!(facade.merchant_id(), "93975");
    assert_eq!(facade.environment(), Environment::Test);
}

#[tokio::test]
async fn test_capture_full_and_partial() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());

    facade.capture(8u64, None).await.unwrap();
    facade.capture(&helpers::stub_payment(8), Some(dec!(3))).await.unwrap();

    assert_eq!(
        transport.calls(),
        vec![
            Call::ManualClear(MpayTid(8), None),
            Call::ManualClear(MpayTid(8), Some(dec!(3))),
        ]
    );
}

#[tokio::test]
async fn test_token_and_listings_are_passed_through() {
    let transport = RecordingTransport::new();
    let facade = facade(transport.clone());

    let token_request = TokenRequest {
        customer_id: Some("customer-1".to_string()),
        language: Some("DE".to_string()),
        ..Default::default()
    };
    let not_cleared = NotClearedQuery {
        begin: Some(0),
        size: Some(50),
        sort_field: Some(SortField::Amount),
        sort_type: Some(SortType::Desc),
        list_in_progress: Some(false),
    };
    let profiles = ProfileQuery::for_customer("customer-1");

    let token = facade.token(&token_request).await.unwrap();
    assert_eq!(token.token, "tok");
    assert_eq!(facade.uncaptured_payments(&not_cleared).await.unwrap().len(), 2);
    assert!(facade
        .stored_payment_data_list(&profiles)
        .await
        .unwrap()
        .is_empty());
    facade
        .delete_stored_payment_data("customer-1", "profile-1")
        .await
        .unwrap();

    assert_eq!(
        transport.calls(),
        vec![
            Call::CreatePaymentToken(token_request),
            Call::ListNotCleared(not_cleared),
            Call::ListProfiles(profiles),
            Call::DeleteProfile("customer-1".to_string(), "profile-1".to_string()),
        ]
    );
}
