//! Fixtures shared by the per connector test modules.

use std::{marker::PhantomData, str::FromStr};

use cards::CardNumber;
use common_enums::{AttemptStatus, CaptureMethod, CountryAlpha2, Currency, RefundStatus};
use common_utils::{pii::Email, request::RequestContent, types::MinorUnit};
use domain_types::{
    connector_flow::{Authorize, Capture, PSync, RSync, Refund, Void},
    connector_types::{
        BrowserInformation, PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsResponseData, PaymentsSyncData, RefundFlowData,
        RefundSyncData, RefundsData, RefundsResponseData, ResponseId,
    },
    payment_address::{Address, AddressDetails, PaymentAddress, PhoneDetails},
    payment_method_data::{Card, CardToken, PaymentMethodData},
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::{ConnectorParams, Connectors},
};
use hyperswitch_masking::{ExposeInterface, Secret};
use interfaces::connector_integration_v2::ConnectorIntegrationV2;

pub(crate) const CARD_NUMBER: &str = "4111111111111111";
pub(crate) const CVC: &str = "123";

fn params(name: &str) -> ConnectorParams {
    ConnectorParams {
        base_url: format!("https://{name}.test/"),
        secondary_base_url: Some(format!("https://auth.{name}.test/")),
    }
}

pub(crate) fn connectors() -> Connectors {
    Connectors {
        checkout: params("checkout"),
        decidir: params("decidir"),
        elavon: params("elavon"),
        eurobank: params("eurobank"),
        eway: params("eway"),
        firstdata: params("firstdata"),
        hps: params("hps"),
        iveri: params("iveri"),
        litle: params("litle"),
        priority: params("priority"),
        safecharge: params("safecharge"),
        simetrik: params("simetrik"),
    }
}

pub(crate) fn secret(value: &str) -> Secret<String> {
    Secret::new(value.to_string())
}

pub(crate) fn header_key(api_key: &str) -> ConnectorAuthType {
    ConnectorAuthType::HeaderKey {
        api_key: secret(api_key),
    }
}

pub(crate) fn body_key(api_key: &str, key1: &str) -> ConnectorAuthType {
    ConnectorAuthType::BodyKey {
        api_key: secret(api_key),
        key1: secret(key1),
    }
}

pub(crate) fn signature_key(api_key: &str, key1: &str, api_secret: &str) -> ConnectorAuthType {
    ConnectorAuthType::SignatureKey {
        api_key: secret(api_key),
        key1: secret(key1),
        api_secret: secret(api_secret),
    }
}

pub(crate) fn card() -> Card {
    Card {
        card_number: CardNumber::from_str(CARD_NUMBER).unwrap(),
        card_exp_month: secret("9"),
        card_exp_year: secret("2030"),
        card_cvc: secret(CVC),
        card_holder_name: Some(secret("Longbob Longsen")),
        card_network: None,
    }
}

pub(crate) fn card_token(token: &str) -> PaymentMethodData {
    PaymentMethodData::CardToken(CardToken {
        token: secret(token),
        card_exp_month: Some(secret("9")),
        card_exp_year: Some(secret("2030")),
        card_holder_name: Some(secret("Longbob Longsen")),
    })
}

pub(crate) fn billing_address() -> AddressDetails {
    AddressDetails {
        city: Some("Ottawa".to_string()),
        country: Some(CountryAlpha2::CA),
        line1: Some(secret("456 My Street")),
        line2: Some(secret("Apt 1")),
        line3: None,
        zip: Some(secret("K1C2N6")),
        state: Some(secret("ON")),
        first_name: Some(secret("Jim")),
        last_name: Some(secret("Smith")),
    }
}

pub(crate) fn payment_address() -> PaymentAddress {
    PaymentAddress::new(
        Some(Address {
            address: Some(billing_address()),
            phone: Some(PhoneDetails {
                number: Some(secret("5555555555")),
                country_code: Some("+1".to_string()),
            }),
            email: Some(Email::from_str("jim@example.com").unwrap()),
        }),
        None,
    )
}

pub(crate) fn payment_flow_data() -> PaymentFlowData {
    PaymentFlowData {
        status: AttemptStatus::Pending,
        payment_id: "pay_1001".to_string(),
        attempt_id: "pay_1001_1".to_string(),
        description: Some("Store purchase".to_string()),
        address: payment_address(),
        connector_request_reference_id: "order_1001".to_string(),
        test_mode: Some(true),
        connectors: connectors(),
        access_token: None,
        connector_meta_data: None,
        raw_connector_response: None,
    }
}

pub(crate) fn refund_flow_data() -> RefundFlowData {
    RefundFlowData {
        status: RefundStatus::Pending,
        refund_id: Some("ref_2001".to_string()),
        connector_request_reference_id: "order_1001".to_string(),
        connectors: connectors(),
        access_token: None,
        test_mode: Some(true),
        raw_connector_response: None,
    }
}

pub(crate) fn authorize_data(
    payment_method_data: PaymentMethodData,
    capture_method: Option<CaptureMethod>,
) -> PaymentsAuthorizeData {
    PaymentsAuthorizeData {
        payment_method_data,
        minor_amount: MinorUnit::new(1000),
        currency: Currency::USD,
        capture_method,
        email: Some(Email::from_str("jim@example.com").unwrap()),
        customer_name: Some(secret("Jim Smith")),
        customer_id: Some("cust_42".to_string()),
        browser_info: Some(BrowserInformation {
            ip_address: Some(Secret::new("127.0.0.1".to_string())),
            user_agent: Some("Mozilla/5.0".to_string()),
            accept_header: None,
            language: Some("en-US".to_string()),
        }),
        merchant_order_reference_id: Some("order_1001".to_string()),
        statement_descriptor: None,
        metadata: None,
    }
}

pub(crate) fn router_data<F, C, Req, Resp>(
    resource_common_data: C,
    connector_auth_type: ConnectorAuthType,
    request: Req,
) -> RouterDataV2<F, C, Req, Resp> {
    RouterDataV2 {
        flow: PhantomData,
        resource_common_data,
        connector_auth_type,
        request,
        response: Err(ErrorResponse::default()),
    }
}

pub(crate) fn authorize(
    auth: ConnectorAuthType,
    capture_method: Option<CaptureMethod>,
) -> RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData> {
    router_data(
        payment_flow_data(),
        auth,
        authorize_data(PaymentMethodData::Card(card()), capture_method),
    )
}

pub(crate) fn capture(
    auth: ConnectorAuthType,
    authorization: &str,
    amount: i64,
) -> RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData> {
    router_data(
        payment_flow_data(),
        auth,
        PaymentsCaptureData {
            minor_amount_to_capture: MinorUnit::new(amount),
            currency: Currency::USD,
            connector_transaction_id: ResponseId::ConnectorTransactionId(authorization.to_string()),
            connector_metadata: None,
        },
    )
}

pub(crate) fn void(
    auth: ConnectorAuthType,
    authorization: &str,
) -> RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData> {
    router_data(
        payment_flow_data(),
        auth,
        PaymentVoidData {
            connector_transaction_id: authorization.to_string(),
            cancellation_reason: Some("requested_by_customer".to_string()),
            minor_amount: Some(MinorUnit::new(1000)),
            currency: Some(Currency::USD),
            connector_metadata: None,
        },
    )
}

pub(crate) fn psync(
    auth: ConnectorAuthType,
    authorization: &str,
) -> RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData> {
    router_data(
        payment_flow_data(),
        auth,
        PaymentsSyncData {
            connector_transaction_id: ResponseId::ConnectorTransactionId(authorization.to_string()),
            capture_method: Some(CaptureMethod::Automatic),
            minor_amount: MinorUnit::new(1000),
            currency: Currency::USD,
            connector_metadata: None,
        },
    )
}

pub(crate) fn refund(
    auth: ConnectorAuthType,
    authorization: &str,
    amount: i64,
) -> RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData> {
    router_data(
        refund_flow_data(),
        auth,
        RefundsData {
            refund_id: "ref_2001".to_string(),
            connector_transaction_id: authorization.to_string(),
            minor_refund_amount: MinorUnit::new(amount),
            minor_payment_amount: MinorUnit::new(1000),
            currency: Currency::USD,
            reason: Some("customer request".to_string()),
            connector_metadata: None,
        },
    )
}

pub(crate) fn rsync(
    auth: ConnectorAuthType,
    authorization: &str,
    connector_refund_id: &str,
) -> RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData> {
    router_data(
        refund_flow_data(),
        auth,
        RefundSyncData {
            connector_transaction_id: authorization.to_string(),
            connector_refund_id: connector_refund_id.to_string(),
            reason: None,
            connector_metadata: None,
        },
    )
}

pub(crate) fn http_response(status_code: u16, body: &str) -> Response {
    Response {
        headers: None,
        response: bytes::Bytes::from(body.to_string()),
        status_code,
    }
}

/// Wire form of a request body, secrets exposed.
pub(crate) fn body_string(content: Option<RequestContent>) -> String {
    content
        .map(|content| content.get_inner_value().expose())
        .unwrap_or_default()
}

/// Percent decoded form field value.
pub(crate) fn form_value(body: &str, key: &str) -> Option<String> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(body)
        .ok()?
        .into_iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
}

/// Serialized wire body of the request `connector` builds for `router_data`.
pub(crate) fn request_body<C, F, FCD, Req, Resp>(
    connector: &C,
    router_data: &RouterDataV2<F, FCD, Req, Resp>,
) -> String
where
    C: ConnectorIntegrationV2<F, FCD, Req, Resp>,
{
    body_string(connector.get_request_body(router_data).unwrap())
}

/// Runs a canned processor answer through the connector's response handling.
pub(crate) fn handle_response<C, F, FCD, Req, Resp>(
    connector: &C,
    router_data: &RouterDataV2<F, FCD, Req, Resp>,
    status_code: u16,
    body: &str,
) -> RouterDataV2<F, FCD, Req, Resp>
where
    C: ConnectorIntegrationV2<F, FCD, Req, Resp>,
{
    connector
        .handle_response_v2(router_data, None, http_response(status_code, body))
        .unwrap()
}
