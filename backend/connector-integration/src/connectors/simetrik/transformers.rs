use common_enums::{AttemptStatus, CardNetwork, Currency, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    pii::Email,
    types::FloatMajorUnit,
};
use domain_types::{
    card_verification::{AvsResult, CvvResult},
    connector_flow::{Authorize, Capture, CreateAccessToken, Refund, Void},
    connector_types::{
        AccessTokenRequestData, AccessTokenResponseData, PaymentFlowData, PaymentVoidData,
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsResponseData, RefundFlowData,
        RefundsData, RefundsResponseData, ResponseId,
    },
    errors,
    payment_address::AddressDetails,
    payment_method_data::{Card, PaymentMethodData},
    router_data::ErrorResponse,
    router_data_v2::RouterDataV2,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::SimetrikRouterData;
use crate::{types::ResponseRouterData, utils};

const CONNECTOR: &str = "simetrik";
const SUCCESS_CODE: &str = "S001";
const GRANT_TYPE: &str = "client_credentials";

type Error = error_stack::Report<errors::ConnectorError>;

#[derive(Debug, Serialize)]
pub struct SimetrikAccessTokenRequest {
    pub client_id: Secret<String>,
    pub client_secret: Secret<String>,
    pub audience: String,
    pub grant_type: &'static str,
}

impl
    TryFrom<
        SimetrikRouterData<
            RouterDataV2<
                CreateAccessToken,
                PaymentFlowData,
                AccessTokenRequestData,
                AccessTokenResponseData,
            >,
        >,
    > for SimetrikAccessTokenRequest
{
    type Error = Error;
    fn try_from(
        item: SimetrikRouterData<
            RouterDataV2<
                CreateAccessToken,
                PaymentFlowData,
                AccessTokenRequestData,
                AccessTokenResponseData,
            >,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        Ok(Self {
            client_id: request.client_id.clone(),
            client_secret: request.client_secret.clone(),
            audience: request
                .audience
                .clone()
                .ok_or_else(utils::missing_field_err("audience"))?,
            grant_type: GRANT_TYPE,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimetrikAccessTokenResponse {
    pub access_token: Secret<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
}

impl
    TryFrom<
        ResponseRouterData<
            SimetrikAccessTokenResponse,
            RouterDataV2<
                CreateAccessToken,
                PaymentFlowData,
                AccessTokenRequestData,
                AccessTokenResponseData,
            >,
        >,
    >
    for RouterDataV2<CreateAccessToken, PaymentFlowData, AccessTokenRequestData, AccessTokenResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SimetrikAccessTokenResponse,
            RouterDataV2<
                CreateAccessToken,
                PaymentFlowData,
                AccessTokenRequestData,
                AccessTokenResponseData,
            >,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            response: Ok(AccessTokenResponseData {
                access_token: item.response.access_token,
                token_type: item.response.token_type,
                expires_in: item.response.expires_in,
            }),
            ..item.router_data
        })
    }
}

/// Routing block every call carries next to the payload.
#[derive(Debug, Clone, Serialize)]
pub struct ForwardRoute {
    pub trace_id: String,
    pub psp_extra_fields: Value,
}

impl ForwardRoute {
    fn new(psp_extra_fields: Option<Value>) -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
            psp_extra_fields: psp_extra_fields.unwrap_or_else(empty_object),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct SimetrikAmount {
    pub total_amount: FloatMajorUnit,
    pub currency: Currency,
    pub vat: Option<f64>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SimetrikUser {
    pub id: Option<String>,
    pub email: Option<Email>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SimetrikOrder {
    pub id: String,
    pub description: Option<String>,
    pub installments: u32,
    pub datetime_local_transaction: String,
    pub amount: SimetrikAmount,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SimetrikBillingAddress {
    pub name: Option<Secret<String>>,
    pub line1: Option<Secret<String>>,
    pub line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub country: Option<String>,
}

impl From<&AddressDetails> for SimetrikBillingAddress {
    fn from(address: &AddressDetails) -> Self {
        Self {
            name: address.get_full_name(),
            line1: address.line1.clone(),
            line2: address.line2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip: address.zip.clone(),
            country: address.country.map(|country| country.to_string()),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SimetrikCard {
    pub number: Secret<String>,
    pub exp_month: u8,
    pub exp_year: u16,
    pub security_code: Secret<String>,
    #[serde(rename = "type")]
    pub card_type: Option<&'static str>,
    pub holder_first_name: Option<Secret<String>>,
    pub holder_last_name: Option<Secret<String>>,
    pub billing_address: Option<SimetrikBillingAddress>,
}

fn card_type(network: CardNetwork) -> &'static str {
    match network {
        CardNetwork::Visa => "visa",
        CardNetwork::Mastercard => "master",
        CardNetwork::AmericanExpress => "american_express",
        CardNetwork::Discover => "discover",
        CardNetwork::DinersClub => "diners_club",
        CardNetwork::Jcb => "jcb",
        CardNetwork::Maestro => "maestro",
        CardNetwork::CartesBancaires => "cartes_bancaires",
    }
}

impl SimetrikCard {
    fn try_from_card(card: &Card, billing: Option<&AddressDetails>) -> Result<Self, Error> {
        let exp_month = card
            .card_exp_month
            .peek()
            .trim()
            .parse::<u8>()
            .change_context(errors::ConnectorError::InvalidDataFormat {
                field_name: "card_exp_month",
            })?;
        let exp_year = card
            .get_expiry_year_4_digit()
            .peek()
            .parse::<u16>()
            .change_context(errors::ConnectorError::InvalidDataFormat {
                field_name: "card_exp_year",
            })?;
        let (holder_first_name, holder_last_name) = card.get_first_and_last_name();
        Ok(Self {
            number: Secret::new(card.card_number.get_card_no()),
            exp_month,
            exp_year,
            security_code: card.card_cvc.clone(),
            card_type: card.get_card_network().map(card_type),
            holder_first_name,
            holder_last_name,
            billing_address: billing.map(SimetrikBillingAddress::from),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SimetrikPaymentMethod {
    pub card: SimetrikCard,
}

#[derive(Debug, Serialize)]
pub struct PaymentPayload {
    pub user: SimetrikUser,
    pub order: SimetrikOrder,
    pub payment_method: SimetrikPaymentMethod,
    pub acquire_extra_options: Value,
}

#[derive(Debug, Serialize)]
pub struct SimetrikPaymentsRequest {
    pub forward_route: ForwardRoute,
    pub forward_payload: PaymentPayload,
}

fn metadata_value(request: &PaymentsAuthorizeData, key: &str) -> Option<Value> {
    request
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.get(key))
        .cloned()
}

fn local_transaction_time() -> Result<String, Error> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .change_context(errors::ConnectorError::RequestEncodingFailed)
}

impl
    TryFrom<
        SimetrikRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for SimetrikPaymentsRequest
{
    type Error = Error;
    fn try_from(
        item: SimetrikRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let card = match &request.payment_method_data {
            PaymentMethodData::Card(card) => card,
            PaymentMethodData::CardToken(_) => Err(errors::ConnectorError::NotImplemented(
                utils::get_unimplemented_payment_method_error_message(CONNECTOR),
            ))?,
        };
        let total_amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        let installments = request
            .get_metadata_string("installments")
            .map(|value| {
                value.parse::<u32>().change_context(errors::ConnectorError::InvalidDataFormat {
                    field_name: "installments",
                })
            })
            .transpose()?
            .unwrap_or(1);
        let vat = metadata_value(request, "vat").and_then(|vat| vat.as_f64());

        Ok(Self {
            forward_route: ForwardRoute::new(metadata_value(request, "psp_extra_fields")),
            forward_payload: PaymentPayload {
                user: SimetrikUser {
                    id: request.customer_id.clone(),
                    email: request.email.clone(),
                },
                order: SimetrikOrder {
                    id: router_data
                        .resource_common_data
                        .connector_request_reference_id
                        .clone(),
                    description: utils::truncate_optional(
                        router_data.resource_common_data.description.as_deref(),
                        255,
                    ),
                    installments,
                    datetime_local_transaction: local_transaction_time()?,
                    amount: SimetrikAmount {
                        total_amount,
                        currency: request.currency,
                        vat,
                    },
                },
                payment_method: SimetrikPaymentMethod {
                    card: SimetrikCard::try_from_card(
                        card,
                        router_data.resource_common_data.get_optional_billing_address(),
                    )?,
                },
                acquire_extra_options: metadata_value(request, "acquire_extra_options")
                    .unwrap_or_else(empty_object),
            },
        })
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SimetrikTransaction {
    pub id: String,
    pub comment: Option<String>,
}

/// Capture, void and refund all reference the original transaction.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct FollowUpPayload {
    pub amount: Option<SimetrikAmount>,
    pub transaction: SimetrikTransaction,
    pub acquire_extra_options: Value,
}

#[derive(Debug, Serialize)]
pub struct SimetrikFollowUpRequest {
    pub forward_route: ForwardRoute,
    pub forward_payload: FollowUpPayload,
}

pub type SimetrikCaptureRequest = SimetrikFollowUpRequest;
pub type SimetrikVoidRequest = SimetrikFollowUpRequest;
pub type SimetrikRefundRequest = SimetrikFollowUpRequest;

impl SimetrikFollowUpRequest {
    fn new(authorization: String, amount: Option<SimetrikAmount>, comment: Option<String>) -> Self {
        Self {
            forward_route: ForwardRoute::new(None),
            forward_payload: FollowUpPayload {
                amount,
                transaction: SimetrikTransaction {
                    id: authorization,
                    comment,
                },
                acquire_extra_options: empty_object(),
            },
        }
    }
}

impl
    TryFrom<
        SimetrikRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for SimetrikFollowUpRequest
{
    type Error = Error;
    fn try_from(
        item: SimetrikRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let total_amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self::new(
            request.connector_transaction_id.get_connector_transaction_id()?,
            Some(SimetrikAmount {
                total_amount,
                currency: request.currency,
                vat: None,
            }),
            None,
        ))
    }
}

impl
    TryFrom<
        SimetrikRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for SimetrikFollowUpRequest
{
    type Error = Error;
    fn try_from(
        item: SimetrikRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(Self::new(
            item.router_data.request.connector_transaction_id.clone(),
            None,
            None,
        ))
    }
}

impl
    TryFrom<
        SimetrikRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for SimetrikFollowUpRequest
{
    type Error = Error;
    fn try_from(
        item: SimetrikRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let total_amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self::new(
            request.connector_transaction_id.clone(),
            Some(SimetrikAmount {
                total_amount,
                currency: request.currency,
                vat: None,
            }),
            request.reason.clone(),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimetrikResponse {
    pub code: String,
    pub message: Option<String>,
    pub trace_id: Option<String>,
    pub simetrik_authorization_id: Option<String>,
    pub avs_result: Option<String>,
    pub cvv_result: Option<String>,
    pub psp_response: Option<Value>,
}

pub type SimetrikPaymentsResponse = SimetrikResponse;
pub type SimetrikCaptureResponse = SimetrikResponse;
pub type SimetrikVoidResponse = SimetrikResponse;
pub type SimetrikRefundResponse = SimetrikResponse;

/// OAuth failures come back in the identity provider's own shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimetrikAuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimetrikErrorResponse {
    Payment(SimetrikResponse),
    Auth(SimetrikAuthErrorResponse),
}

impl SimetrikErrorResponse {
    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        match self {
            Self::Payment(response) => response.error_response(status_code),
            Self::Auth(response) => ErrorResponse {
                reason: response.error_description.clone(),
                standard_error_code: Some(StandardErrorCode::ConfigError),
                ..ErrorResponse::decline(
                    response.error.clone(),
                    response
                        .error_description
                        .clone()
                        .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                    status_code,
                )
            },
        }
    }
}

fn standard_error_code(code: &str) -> Option<StandardErrorCode> {
    match code {
        "R101" => Some(StandardErrorCode::IncorrectNumber),
        "R102" => Some(StandardErrorCode::InvalidNumber),
        "R103" => Some(StandardErrorCode::InvalidExpiryDate),
        "R104" => Some(StandardErrorCode::InvalidCvc),
        "R105" => Some(StandardErrorCode::ExpiredCard),
        "R106" => Some(StandardErrorCode::IncorrectCvc),
        "R107" => Some(StandardErrorCode::IncorrectPin),
        "R201" => Some(StandardErrorCode::IncorrectZip),
        "R202" => Some(StandardErrorCode::IncorrectAddress),
        "R301" => Some(StandardErrorCode::CardDeclined),
        "R302" | "R305" | "R306" | "R307" => Some(StandardErrorCode::ProcessingError),
        "R303" => Some(StandardErrorCode::CallIssuer),
        "R304" => Some(StandardErrorCode::PickupCard),
        "R401" => Some(StandardErrorCode::ConfigError),
        "R402" => Some(StandardErrorCode::TestModeLiveCard),
        "R403" => Some(StandardErrorCode::UnsupportedFeature),
        _ => None,
    }
}

impl SimetrikResponse {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let code = if self.code.trim().is_empty() {
            NO_ERROR_CODE.to_string()
        } else {
            self.code.clone()
        };
        ErrorResponse {
            connector_transaction_id: self.simetrik_authorization_id.clone(),
            standard_error_code: standard_error_code(&code),
            ..ErrorResponse::decline(
                code,
                self.message
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                status_code,
            )
        }
    }
}

fn payment_router_data<F, Req>(
    response: SimetrikResponse,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    http_code: u16,
    approved_status: AttemptStatus,
    failed_status: AttemptStatus,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    if !response.is_success() {
        tracing::info!(
            code = %response.code,
            trace_id = ?response.trace_id,
            "simetrik transaction failed"
        );
        return Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(failed_status),
            response: Err(response.error_response(http_code)),
            ..router_data
        });
    }

    let authorization = response
        .simetrik_authorization_id
        .clone()
        .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?;
    Ok(RouterDataV2 {
        resource_common_data: router_data.resource_common_data.set_status(approved_status),
        response: Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(authorization),
            connector_metadata: response.psp_response.clone(),
            network_txn_id: None,
            connector_response_reference_id: response.trace_id.clone(),
            avs_result: AvsResult::from_code(response.avs_result.as_deref()),
            cvv_result: CvvResult::from_code(response.cvv_result.as_deref()),
            message: response.message.clone(),
            status_code: http_code,
        }),
        ..router_data
    })
}

impl
    TryFrom<
        ResponseRouterData<
            SimetrikPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SimetrikPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let approved =
            if utils::is_auto_capture(item.router_data.request.capture_method, CONNECTOR)? {
                AttemptStatus::Charged
            } else {
                AttemptStatus::Authorized
            };
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            approved,
            AttemptStatus::Failure,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            SimetrikCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SimetrikCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            AttemptStatus::Charged,
            AttemptStatus::CaptureFailed,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            SimetrikVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SimetrikVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            AttemptStatus::Voided,
            AttemptStatus::VoidFailed,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            SimetrikRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SimetrikRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let result = match response.simetrik_authorization_id.clone() {
            Some(connector_refund_id) if response.is_success() => Ok(RefundsResponseData {
                connector_refund_id,
                refund_status: RefundStatus::Success,
                status_code: http_code,
            }),
            _ => Err(response.error_response(http_code)),
        };
        let status = if result.is_ok() {
            RefundStatus::Success
        } else {
            RefundStatus::Failure
        };
        Ok(RouterDataV2 {
            resource_common_data: RefundFlowData {
                status,
                ..router_data.resource_common_data
            },
            response: result,
            ..router_data
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_codes_map_to_standard_errors() {
        assert_eq!(standard_error_code("R101"), Some(StandardErrorCode::IncorrectNumber));
        assert_eq!(standard_error_code("R301"), Some(StandardErrorCode::CardDeclined));
        assert_eq!(standard_error_code("R304"), Some(StandardErrorCode::PickupCard));
        assert_eq!(standard_error_code("R403"), Some(StandardErrorCode::UnsupportedFeature));
        assert_eq!(standard_error_code("S001"), None);
    }

    #[test]
    fn network_names_follow_gateway_vocabulary() {
        assert_eq!(card_type(CardNetwork::Mastercard), "master");
        assert_eq!(card_type(CardNetwork::AmericanExpress), "american_express");
    }

    #[test]
    fn auth_errors_parse_before_falling_back() {
        let parsed: SimetrikErrorResponse = serde_json::from_str(
            r#"{"error":"access_denied","error_description":"Unauthorized"}"#,
        )
        .unwrap();
        let error = parsed.error_response(401);
        assert_eq!(error.code, "access_denied");
        assert_eq!(error.message, "Unauthorized");
    }
}
