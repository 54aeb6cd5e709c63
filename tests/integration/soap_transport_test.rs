// Integration tests for SoapTransport against a local mock server
//
// Checks the envelope that goes out (auth, merchant id, operation) and how
// gateway answers map to results and GatewayError variants.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use helpers::TestDataFactory;
use chrono::NaiveDate;
use mpay24::payments::{
    Credentials, GatewayTransport, MdxiOrderBuilder, MpayTid, PaymentOptions, ProfileQuery,
    RefundOptions, SoapTransport, TransactionLookup, TransactionState,
};
use mpay24::{Environment, GatewayError, PaymentGatewayFacade};
use rust_decimal_macros::dec;
use wiremock::matchers::{body_string_contains, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("u93975:secret")
const BASIC_AUTH: &str = "Basic dTkzOTc1OnNlY3JldA==";

fn soap_response(body: &str) -> ResponseTemplate {
    soap_response_with_status(200, body)
}

fn soap_response_with_status(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("content-type", "text/xml; charset=utf-8")
        .set_body_string(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:etp="https://www.mpay24.com/soap/etp/1.5/ETP.wsdl"><SOAP-ENV:Body>{}</SOAP-ENV:Body></SOAP-ENV:Envelope>"#,
            body
        ))
}

fn transport(server: &MockServer) -> SoapTransport {
    SoapTransport::new(Credentials::new("U93975", "secret", Environment::Test), None)
        .unwrap()
        .with_endpoint(server.uri())
}

#[tokio::test]
async fn test_select_payment_returns_redirect_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("<etp:SelectPayment><merchantID>93975</merchantID>"))
        .respond_with(soap_response(
            "<etp:SelectPaymentResponse><status>OK</status><returnCode>REDIRECT</returnCode>\
             <mpayTID>1001</mpayTID><location>https://test.mpay24.com/pay/1001</location>\
             </etp:SelectPaymentResponse>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let payment = transport(&server)
        .select_payment("<Order><Tid>T1</Tid></Order>")
        .await
        .unwrap();

    assert_eq!(payment.mpay_tid, MpayTid(1001));
    assert_eq!(
        payment.redirect_location.as_deref(),
        Some("https://test.mpay24.com/pay/1001")
    );
}

#[tokio::test]
async fn test_mdxi_document_is_escaped_inside_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("<mdxi>&lt;Order/"))
        .respond_with(soap_response(
            "<etp:SelectPaymentResponse><status>OK</status><returnCode>REDIRECT</returnCode>\
             <mpayTID>1</mpayTID></etp:SelectPaymentResponse>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    transport(&server).select_payment("<Order/>").await.unwrap();
}

#[tokio::test]
async fn test_status_by_transaction_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("<tid>T1</tid>"))
        .respond_with(soap_response(
            "<etp:TransactionStatusResponse><status>OK</status><returnCode>OK</returnCode>\
             <parameter><name>MPAYTID</name><value>55</value></parameter>\
             <parameter><name>STATUS</name><value>RESERVED</value></parameter>\
             <parameter><name>PRICE</name><value>1234</value></parameter>\
             </etp:TransactionStatusResponse>",
        ))
        .mount(&server)
        .await;

    let payment = transport(&server)
        .transaction_status(&TransactionLookup::from("T1"))
        .await
        .unwrap();

    assert_eq!(payment.mpay_tid, MpayTid(55));
    assert_eq!(payment.state, Some(TransactionState::Reserved));
    assert_eq!(payment.amount, Some(dec!(12.34)));
}

#[tokio::test]
async fn test_error_status_becomes_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(soap_response(
            "<etp:ManualReverseResponse><status>ERROR</status><returnCode>NOT_FOUND</returnCode>\
             </etp:ManualReverseResponse>",
        ))
        .mount(&server)
        .await;

    let err = transport(&server)
        .manual_reverse(MpayTid(42))
        .await
        .unwrap_err();

    match err {
        GatewayError::Rejected { return_code, .. } => assert_eq!(return_code, "NOT_FOUND"),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fault_on_http_500_becomes_soap_fault() {
    let server = MockServer::start().await;
    let fault = soap_response_with_status(
        500,
        "<SOAP-ENV:Fault><faultcode>SOAP-ENV:Client</faultcode>\
         <faultstring>Access denied</faultstring></SOAP-ENV:Fault>",
    );
    Mock::given(method("POST"))
        .respond_with(fault)
        .mount(&server)
        .await;

    let err = transport(&server)
        .manual_reverse(MpayTid(42))
        .await
        .unwrap_err();

    assert!(
        matches!(err, GatewayError::SoapFault { ref message, .. } if message == "Access denied")
    );
    assert!(err.is_rejection());
}

#[tokio::test]
async fn test_plain_http_error_without_fault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = transport(&server)
        .list_profiles(&ProfileQuery::default())
        .await
        .unwrap_err();

    match err {
        GatewayError::Http { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let transport = SoapTransport::new(Credentials::new("1", "pw", Environment::Test), None)
        .unwrap()
        .with_endpoint("http://127.0.0.1:9/etp");

    let err = transport.manual_reverse(MpayTid(1)).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
    assert!(!err.is_rejection());
}

#[tokio::test]
async fn test_manual_clear_sends_cents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(
            "<clearingDetails><mpayTID>42</mpayTID><amount>1050</amount></clearingDetails>",
        ))
        .respond_with(soap_response(
            "<etp:ManualClearResponse><status>OK</status><returnCode>PENDING</returnCode>\
             <stateID>2</stateID></etp:ManualClearResponse>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let payment = transport(&server)
        .manual_clear(MpayTid(42), Some(dec!(10.50)))
        .await
        .unwrap();

    assert_eq!(payment.mpay_tid, MpayTid(42));
    assert_eq!(payment.state_id, Some(2));
    assert_eq!(payment.return_code.as_deref(), Some("PENDING"));
}

#[tokio::test]
async fn test_facade_direct_payment_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("<tid>T1</tid><pType>CC</pType>"))
        .and(body_string_contains("<amount>1234</amount>"))
        .respond_with(soap_response(
            "<etp:AcceptPaymentResponse><status>OK</status><returnCode>OK</returnCode>\
             <mpayTID>900</mpayTID></etp:AcceptPaymentResponse>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials::new("u93975", "secret", Environment::Test);
    let facade = PaymentGatewayFacade::with_collaborators(
        credentials.clone(),
        Arc::new(SoapTransport::new(credentials, None).unwrap().with_endpoint(server.uri())),
        Arc::new(MdxiOrderBuilder),
    );

    let payment = facade
        .payment(
            &TestDataFactory::payment_request("T1"),
            &TestDataFactory::credit_card(),
            PaymentOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(payment.mpay_tid, MpayTid(900));
    assert!(!payment.requires_redirect());
}

#[tokio::test]
async fn test_refund_sends_state_and_cents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(
            "<etp:ManualCredit><merchantID>93975</merchantID><mpayTID>42</mpayTID>\
             <stateID>3</stateID><amount>250</amount></etp:ManualCredit>",
        ))
        .respond_with(soap_response(
            "<etp:ManualCreditResponse><status>OK</status><returnCode>OK</returnCode>\
             <stateID>4</stateID></etp:ManualCreditResponse>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials::new("93975", "secret", Environment::Test);
    let facade = PaymentGatewayFacade::with_collaborators(
        credentials.clone(),
        Arc::new(SoapTransport::new(credentials, None).unwrap().with_endpoint(server.uri())),
        Arc::new(MdxiOrderBuilder),
    );

    let refund = facade
        .refund(
            42u64,
            RefundOptions {
                state_id: Some(3),
                amount: Some(dec!(2.50)),
            },
        )
        .await
        .unwrap();

    assert_eq!(refund.mpay_tid, MpayTid(42));
    assert_eq!(refund.state_id, Some(4));
    assert_eq!(refund.return_code.as_deref(), Some("OK"));
}

#[tokio::test]
async fn test_list_profiles_sends_query_and_decodes_entries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(
            "<etp:ListProfiles><merchantID>93975</merchantID><customerID>customer-1</customerID>\
             <expiredBy>2027-12-31</expiredBy><begin>0</begin><size>10</size></etp:ListProfiles>",
        ))
        .respond_with(soap_response(
            "<etp:ListProfilesResponse><status>OK</status><returnCode>OK</returnCode>\
             <profile><customerID>customer-1</customerID>\
             <payment><profileID>p-1</profileID><pType>CC</pType><brand>VISA</brand></payment>\
             </profile>\
             <profile><customerID>customer-1</customerID>\
             <payment><profileID>p-2</profileID><pType>ELV</pType></payment>\
             </profile></etp:ListProfilesResponse>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let query = ProfileQuery {
        customer_id: Some("customer-1".to_string()),
        expired_by: NaiveDate::from_ymd_opt(2027, 12, 31),
        begin: Some(0),
        size: Some(10),
    };
    let profiles = transport(&server).list_profiles(&query).await.unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].profile_id.as_deref(), Some("p-1"));
    assert_eq!(profiles[0].brand.as_deref(), Some("VISA"));
    assert_eq!(profiles[1].payment_type.as_deref(), Some("ELV"));
}

#[tokio::test]
async fn test_delete_profile_sends_both_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(
            "<customerID>customer-1</customerID><profileID>p-1</profileID></etp:DeleteProfile>",
        ))
        .respond_with(soap_response(
            "<etp:DeleteProfileResponse><status>OK</status><returnCode>OK</returnCode>\
             </etp:DeleteProfileResponse>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    transport(&server)
        .delete_profile("customer-1", "p-1")
        .await
        .unwrap();
}
