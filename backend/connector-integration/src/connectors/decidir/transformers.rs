use common_enums::{AttemptStatus, Currency, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    pii::Email,
    types::MinorUnit,
};
use domain_types::{
    card_verification::AvsResult,
    connector_flow::{Authorize, Capture, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, RefundFlowData, RefundsData, RefundsResponseData, ResponseId,
    },
    errors,
    payment_method_data::PaymentMethodData,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::DecidirRouterData;
use crate::{types::ResponseRouterData, utils};

const CONNECTOR: &str = "decidir";

type Error = error_stack::Report<errors::ConnectorError>;

/// Visa, the acquirer default when the merchant does not pick a payment method.
const DEFAULT_PAYMENT_METHOD_ID: u32 = 1;

pub struct DecidirAuthType {
    pub(super) api_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for DecidirAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::HeaderKey { api_key } | ConnectorAuthType::BodyKey { api_key, .. } => {
                Ok(Self {
                    api_key: api_key.to_owned(),
                })
            }
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct DecidirCardData {
    pub card_number: cards::CardNumber,
    pub card_expiration_month: Secret<String>,
    pub card_expiration_year: Secret<String>,
    pub security_code: Secret<String>,
    pub card_holder_name: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct DecidirCustomer {
    pub id: Option<String>,
    pub email: Option<Email>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct DecidirPaymentsRequest {
    pub site_transaction_id: String,
    pub payment_method_id: u32,
    pub card_data: Option<DecidirCardData>,
    pub token: Option<Secret<String>>,
    pub bin: Option<String>,
    pub amount: MinorUnit,
    pub currency: Currency,
    pub installments: u32,
    pub payment_type: String,
    pub establishment_name: Option<String>,
    pub description: Option<String>,
    pub sub_payments: Vec<serde_json::Value>,
    pub customer: Option<DecidirCustomer>,
}

fn metadata_number(request: &PaymentsAuthorizeData, key: &str, default: u32) -> Result<u32, Error> {
    request
        .get_metadata_string(key)
        .map(|value| {
            value
                .parse::<u32>()
                .change_context(errors::ConnectorError::InvalidDataFormat { field_name: "metadata" })
                .attach_printable_lazy(|| format!("{key} is not a number"))
        })
        .unwrap_or(Ok(default))
}

impl TryFrom<DecidirRouterData<RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>>
    for DecidirPaymentsRequest
{
    type Error = Error;
    fn try_from(
        item: DecidirRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        // the site decides between sale and pre-authorization, only the capture method is checked
        utils::is_auto_capture(request.capture_method, CONNECTOR)?;

        let (card_data, token, bin) = match &request.payment_method_data {
            PaymentMethodData::Card(card) => (
                Some(DecidirCardData {
                    card_number: card.card_number.clone(),
                    card_expiration_month: card.get_expiry_month_2_digit(),
                    card_expiration_year: card.get_card_expiry_year_2_digit()?,
                    security_code: card.card_cvc.clone(),
                    card_holder_name: card.card_holder_name.clone(),
                }),
                None,
                Some(card.card_number.get_card_isin()),
            ),
            PaymentMethodData::CardToken(token) => (None, Some(token.token.clone()), None),
        };

        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;

        Ok(Self {
            site_transaction_id: utils::truncate(
                &router_data.resource_common_data.connector_request_reference_id,
                40,
            ),
            payment_method_id: metadata_number(
                request,
                "payment_method_id",
                DEFAULT_PAYMENT_METHOD_ID,
            )?,
            card_data,
            token,
            bin,
            amount,
            currency: request.currency,
            installments: metadata_number(request, "installments", 1)?,
            payment_type: "single".to_string(),
            establishment_name: utils::truncate_optional(
                request.get_metadata_string("establishment_name").as_deref(),
                25,
            ),
            description: router_data.resource_common_data.description.clone(),
            sub_payments: Vec::new(),
            customer: Some(DecidirCustomer {
                id: request.customer_id.clone(),
                email: request.email.clone(),
            }),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DecidirAmountRequest {
    pub amount: MinorUnit,
}

pub type DecidirCaptureRequest = DecidirAmountRequest;
pub type DecidirRefundRequest = DecidirAmountRequest;

impl TryFrom<DecidirRouterData<RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>>>
    for DecidirAmountRequest
{
    type Error = Error;
    fn try_from(
        item: DecidirRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self { amount })
    }
}

impl TryFrom<DecidirRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for DecidirAmountRequest
{
    type Error = Error;
    fn try_from(
        item: DecidirRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self { amount })
    }
}

/// A void is a refund without an amount.
#[derive(Debug, Serialize)]
pub struct DecidirVoidRequest {}

impl TryFrom<DecidirRouterData<RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>>
    for DecidirVoidRequest
{
    type Error = Error;
    fn try_from(
        _item: DecidirRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(Self {})
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecidirPaymentStatus {
    Approved,
    PreApproved,
    Accredited,
    Rejected,
    Review,
    Annulled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecidirErrorReason {
    pub id: i64,
    pub description: Option<String>,
    pub additional_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecidirStatusError {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub reason: Option<DecidirErrorReason>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DecidirStatusDetails {
    pub ticket: Option<String>,
    pub card_authorization_code: Option<String>,
    pub address_validation_code: Option<String>,
    pub error: Option<DecidirStatusError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecidirValidationError {
    pub code: String,
    pub param: String,
}

/// Payment documents and the validation error envelope share one shape.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DecidirResponse {
    pub id: Option<i64>,
    pub site_transaction_id: Option<String>,
    pub status: Option<DecidirPaymentStatus>,
    pub amount: Option<MinorUnit>,
    pub status_details: Option<DecidirStatusDetails>,
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub validation_errors: Option<Vec<DecidirValidationError>>,
}

pub type DecidirPaymentsResponse = DecidirResponse;
pub type DecidirCaptureResponse = DecidirResponse;
pub type DecidirVoidResponse = DecidirResponse;
pub type DecidirRefundResponse = DecidirResponse;

/// Issuer reason ids reported in `status_details.error.reason.id`.
fn standard_error_code(reason_id: i64) -> Option<StandardErrorCode> {
    match reason_id {
        -1 | 12 | 28 | 96 | 97 => Some(StandardErrorCode::ProcessingError),
        1 | 2 | 76 => Some(StandardErrorCode::CallIssuer),
        3 => Some(StandardErrorCode::ConfigError),
        4 | 7 | 43 => Some(StandardErrorCode::PickupCard),
        5 | 45 | 47 | 48 | 51 | 53 | 56 | 57 => Some(StandardErrorCode::CardDeclined),
        14 | 39 | 46 => Some(StandardErrorCode::InvalidNumber),
        38 | 55 => Some(StandardErrorCode::IncorrectPin),
        49 => Some(StandardErrorCode::InvalidExpiryDate),
        54 => Some(StandardErrorCode::ExpiredCard),
        _ => None,
    }
}

impl DecidirResponse {
    fn transaction_id(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    fn reason(&self) -> Option<&DecidirErrorReason> {
        self.status_details
            .as_ref()
            .and_then(|details| details.error.as_ref())
            .and_then(|error| error.reason.as_ref())
    }

    /// `code: param` pairs of a rejected request, comma separated.
    fn validation_message(&self) -> Option<String> {
        self.validation_errors.as_ref().map(|errors| {
            errors
                .iter()
                .map(|error| format!("{}: {}", error.code, error.param))
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        if let Some(message) = self.validation_message() {
            return ErrorResponse {
                code: self
                    .error_type
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
                message,
                reason: self.message.clone(),
                status_code,
                ..Default::default()
            };
        }
        match self.reason() {
            Some(reason) => ErrorResponse {
                reason: reason.additional_description.clone(),
                connector_transaction_id: self.transaction_id(),
                standard_error_code: standard_error_code(reason.id),
                ..ErrorResponse::decline(
                    reason.id.to_string(),
                    reason
                        .description
                        .clone()
                        .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                    status_code,
                )
            },
            None => ErrorResponse {
                code: self
                    .error_type
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
                message: self
                    .message
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                connector_transaction_id: self.transaction_id(),
                status_code,
                ..Default::default()
            },
        }
    }

    fn transaction_response(&self, status_code: u16) -> Result<PaymentsResponseData, Error> {
        let transaction_id = self
            .transaction_id()
            .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?;
        let details = self.status_details.clone().unwrap_or_default();
        Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(transaction_id),
            connector_metadata: serde_json::to_value(self).ok(),
            network_txn_id: details.ticket,
            connector_response_reference_id: details.card_authorization_code,
            avs_result: AvsResult::from_code(details.address_validation_code.as_deref()),
            cvv_result: None,
            message: self.status.map(|status| format!("{status:?}")),
            status_code,
        })
    }
}

fn payment_router_data<F, Req>(
    item: ResponseRouterData<DecidirResponse, RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>>,
    status_of: impl FnOnce(DecidirPaymentStatus) -> Option<AttemptStatus>,
    failed_status: AttemptStatus,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    let ResponseRouterData {
        response,
        router_data,
        http_code,
    } = item;
    match response.status.and_then(status_of) {
        Some(status) => Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(status),
            response: Ok(response.transaction_response(http_code)?),
            ..router_data
        }),
        None => {
            tracing::info!(
                status = ?response.status,
                reason_id = ?response.reason().map(|reason| reason.id),
                "decidir payment not approved"
            );
            Ok(RouterDataV2 {
                resource_common_data: router_data.resource_common_data.set_status(failed_status),
                response: Err(response.error_response(http_code)),
                ..router_data
            })
        }
    }
}

impl
    TryFrom<
        ResponseRouterData<
            DecidirPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            DecidirPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        payment_router_data(
            item,
            |status| match status {
                DecidirPaymentStatus::Approved | DecidirPaymentStatus::Accredited => {
                    Some(AttemptStatus::Charged)
                }
                DecidirPaymentStatus::PreApproved => Some(AttemptStatus::Authorized),
                DecidirPaymentStatus::Review => Some(AttemptStatus::Pending),
                _ => None,
            },
            AttemptStatus::Failure,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            DecidirCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            DecidirCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        payment_router_data(
            item,
            |status| match status {
                DecidirPaymentStatus::Approved | DecidirPaymentStatus::Accredited => {
                    Some(AttemptStatus::Charged)
                }
                _ => None,
            },
            AttemptStatus::CaptureFailed,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            DecidirVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            DecidirVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        payment_router_data(
            item,
            |status| match status {
                DecidirPaymentStatus::Approved | DecidirPaymentStatus::Annulled => {
                    Some(AttemptStatus::Voided)
                }
                _ => None,
            },
            AttemptStatus::VoidFailed,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            DecidirRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            DecidirRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let refund_status = match response.status {
            Some(DecidirPaymentStatus::Approved) | Some(DecidirPaymentStatus::Accredited) => {
                RefundStatus::Success
            }
            Some(DecidirPaymentStatus::Review) => RefundStatus::Pending,
            _ => RefundStatus::Failure,
        };
        let result = if refund_status == RefundStatus::Failure {
            Err(response.error_response(http_code))
        } else {
            Ok(RefundsResponseData {
                connector_refund_id: response
                    .transaction_id()
                    .ok_or(errors::ConnectorError::MissingConnectorRefundID)?,
                refund_status,
                status_code: http_code,
            })
        };
        Ok(RouterDataV2 {
            resource_common_data: RefundFlowData {
                status: refund_status,
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
    fn reason_ids_map_to_standard_codes() {
        assert_eq!(standard_error_code(3), Some(StandardErrorCode::ConfigError));
        assert_eq!(standard_error_code(54), Some(StandardErrorCode::ExpiredCard));
        assert_eq!(standard_error_code(76), Some(StandardErrorCode::CallIssuer));
        assert_eq!(standard_error_code(1000), None);
    }

    #[test]
    fn unknown_status_deserializes() {
        let response: DecidirResponse =
            serde_json::from_str(r#"{"id": 1, "status": "something_new"}"#).unwrap();
        assert_eq!(response.status, Some(DecidirPaymentStatus::Unknown));
    }
}
