use cards::CardNumber;
use common_enums::{AttemptStatus, CaptureMethod, Currency, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    errors::CustomResult,
    pii::{Email, IpAddress},
    types::MinorUnit,
};
use domain_types::{
    card_verification::{AvsResult, CvvResult},
    connector_flow::{Authorize, Capture, PSync, RSync, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, PaymentsSyncData, RefundFlowData, RefundSyncData, RefundsData,
        RefundsResponseData, ResponseId,
    },
    errors::ConnectorError,
    payment_method_data::PaymentMethodData,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::CheckoutRouterData;
use crate::{types::ResponseRouterData, utils};

const CONNECTOR: &str = "checkout";

type Error = error_stack::Report<ConnectorError>;

pub struct CheckoutAuthType {
    pub(super) api_secret: Secret<String>,
    pub(super) processing_channel_id: Option<Secret<String>>,
}

impl TryFrom<&ConnectorAuthType> for CheckoutAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::SignatureKey {
                api_secret, key1, ..
            } => Ok(Self {
                api_secret: api_secret.to_owned(),
                processing_channel_id: Some(key1.to_owned()),
            }),
            ConnectorAuthType::HeaderKey { api_key } => Ok(Self {
                api_secret: api_key.to_owned(),
                processing_channel_id: None,
            }),
            _ => Err(report!(ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct CheckoutAddress {
    pub address_line1: Option<Secret<String>>,
    pub address_line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub country: Option<common_enums::CountryAlpha2>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct CardSource {
    pub number: CardNumber,
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
    pub cvv: Option<Secret<String>>,
    pub name: Option<Secret<String>>,
    pub billing_address: Option<CheckoutAddress>,
}

#[derive(Debug, Serialize)]
pub struct IdSource {
    pub id: Secret<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PaymentSource {
    Card(CardSource),
    /// Instrument stored at Checkout.com (`src_...`).
    Id(IdSource),
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct CheckoutCustomer {
    pub email: Option<Email>,
    pub name: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct CheckoutPaymentsRequest {
    pub source: PaymentSource,
    pub amount: MinorUnit,
    pub currency: Currency,
    pub reference: String,
    pub capture: bool,
    pub description: Option<String>,
    pub processing_channel_id: Option<Secret<String>>,
    pub customer: Option<CheckoutCustomer>,
    pub payment_ip: Option<Secret<String, IpAddress>>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutMeta {
    pub psync_flow: CheckoutPaymentIntent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub enum CheckoutPaymentIntent {
    Capture,
    Authorize,
}

fn to_connector_meta(
    connector_meta: Option<serde_json::Value>,
) -> CustomResult<CheckoutMeta, ConnectorError> {
    connector_meta
        .map(|meta| {
            serde_json::from_value::<CheckoutMeta>(meta)
                .map_err(|_| report!(ConnectorError::ResponseDeserializationFailed))
        })
        .unwrap_or(Ok(CheckoutMeta {
            psync_flow: CheckoutPaymentIntent::Capture,
        }))
}

fn connector_meta(psync_flow: CheckoutPaymentIntent) -> serde_json::Value {
    serde_json::json!(CheckoutMeta { psync_flow })
}

impl TryFrom<CheckoutRouterData<RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>>
    for CheckoutPaymentsRequest
{
    type Error = Error;
    fn try_from(
        item: CheckoutRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let auth = CheckoutAuthType::try_from(&router_data.connector_auth_type)?;
        let capture = utils::is_auto_capture(request.capture_method, CONNECTOR)?;

        let billing_address = router_data
            .resource_common_data
            .get_optional_billing_address()
            .map(|billing| CheckoutAddress {
                address_line1: billing.line1.clone(),
                address_line2: billing.line2.clone(),
                city: billing.city.clone(),
                state: billing.state.clone(),
                zip: billing.zip.clone(),
                country: billing.country,
            });

        let source = match &request.payment_method_data {
            PaymentMethodData::Card(card) => PaymentSource::Card(CardSource {
                number: card.card_number.clone(),
                expiry_month: card.card_exp_month.clone(),
                expiry_year: card.get_expiry_year_4_digit(),
                cvv: Some(card.card_cvc.clone()),
                name: card.card_holder_name.clone(),
                billing_address,
            }),
            PaymentMethodData::CardToken(token) => PaymentSource::Id(IdSource {
                id: token.token.clone(),
            }),
        };

        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(ConnectorError::AmountConversionFailed)?;

        Ok(Self {
            source,
            amount,
            currency: request.currency,
            reference: router_data
                .resource_common_data
                .connector_request_reference_id
                .clone(),
            capture,
            description: router_data.resource_common_data.description.clone(),
            processing_channel_id: auth.processing_channel_id,
            customer: Some(CheckoutCustomer {
                email: request.email.clone(),
                name: request.customer_name.clone(),
            }),
            payment_ip: request.get_ip_address_as_optional(),
            metadata: request.metadata.clone(),
        })
    }
}

#[derive(Default, Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum CheckoutPaymentStatus {
    Authorized,
    #[default]
    Pending,
    #[serde(rename = "Card Verified")]
    CardVerified,
    Declined,
    Captured,
    #[serde(rename = "Retry Scheduled")]
    RetryScheduled,
    Voided,
    #[serde(rename = "Partially Captured")]
    PartiallyCaptured,
    #[serde(rename = "Partially Refunded")]
    PartiallyRefunded,
    Refunded,
    Canceled,
    Expired,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Balances {
    pub available_to_capture: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ResponseSource {
    pub avs_check: Option<String>,
    pub cvv_check: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct CheckoutPaymentsResponse {
    pub id: String,
    pub action_id: Option<String>,
    pub amount: Option<MinorUnit>,
    pub currency: Option<String>,
    pub approved: Option<bool>,
    pub status: CheckoutPaymentStatus,
    pub auth_code: Option<String>,
    pub response_code: Option<String>,
    pub response_summary: Option<String>,
    pub reference: Option<String>,
    pub scheme_id: Option<String>,
    pub balances: Option<Balances>,
    pub source: Option<ResponseSource>,
}

pub type CheckoutAuthorizeResponse = CheckoutPaymentsResponse;
pub type CheckoutPSyncResponse = CheckoutPaymentsResponse;

fn attempt_status_for(status: CheckoutPaymentStatus, intent: CheckoutPaymentIntent) -> AttemptStatus {
    match status {
        CheckoutPaymentStatus::Authorized => {
            if intent == CheckoutPaymentIntent::Capture {
                AttemptStatus::Pending
            } else {
                AttemptStatus::Authorized
            }
        }
        CheckoutPaymentStatus::Captured
        | CheckoutPaymentStatus::PartiallyRefunded
        | CheckoutPaymentStatus::Refunded => AttemptStatus::Charged,
        CheckoutPaymentStatus::PartiallyCaptured => AttemptStatus::PartialCharged,
        CheckoutPaymentStatus::Declined
        | CheckoutPaymentStatus::Expired
        | CheckoutPaymentStatus::Canceled => AttemptStatus::Failure,
        CheckoutPaymentStatus::Pending => AttemptStatus::AuthenticationPending,
        CheckoutPaymentStatus::CardVerified | CheckoutPaymentStatus::RetryScheduled => {
            AttemptStatus::Pending
        }
        CheckoutPaymentStatus::Voided => AttemptStatus::Voided,
    }
}

/// An authorization with nothing left to capture has been fully captured.
fn attempt_status_for_balances(status: CheckoutPaymentStatus, balances: Balances) -> AttemptStatus {
    match status {
        CheckoutPaymentStatus::Authorized if balances.available_to_capture == 0 => {
            AttemptStatus::Charged
        }
        CheckoutPaymentStatus::Authorized => AttemptStatus::Authorized,
        other => attempt_status_for(other, CheckoutPaymentIntent::Authorize),
    }
}

/// Issuer response codes (`response_code`) onto the shared decline vocabulary.
fn standard_error_code(response_code: &str) -> Option<StandardErrorCode> {
    match response_code {
        "20014" | "30014" => Some(StandardErrorCode::InvalidNumber),
        "20054" | "30033" | "30054" => Some(StandardErrorCode::ExpiredCard),
        "20087" | "20082" => Some(StandardErrorCode::IncorrectCvc),
        "20055" | "20075" => Some(StandardErrorCode::IncorrectPin),
        "20013" => Some(StandardErrorCode::InvalidAmount),
        "20001" | "20002" => Some(StandardErrorCode::CallIssuer),
        "30004" | "30041" | "30043" => Some(StandardErrorCode::PickupCard),
        "20012" | "20091" | "20096" => Some(StandardErrorCode::ProcessingError),
        "20005" | "20046" | "20051" | "20057" | "20059" | "20062" | "20083" => {
            Some(StandardErrorCode::CardDeclined)
        }
        _ => None,
    }
}

/// Validation error codes of a rejected request.
fn standard_error_code_for_validation(error_code: &str) -> Option<StandardErrorCode> {
    match error_code {
        "card_number_invalid" => Some(StandardErrorCode::InvalidNumber),
        "card_expired" => Some(StandardErrorCode::ExpiredCard),
        "card_expiry_month_invalid" | "card_expiry_year_invalid" => {
            Some(StandardErrorCode::InvalidExpiryDate)
        }
        "cvv_invalid" => Some(StandardErrorCode::InvalidCvc),
        "amount_invalid" => Some(StandardErrorCode::InvalidAmount),
        "processing_channel_id_required" | "processing_channel_id_invalid" => {
            Some(StandardErrorCode::ConfigError)
        }
        _ => None,
    }
}

fn cvv_code(cvv_check: &str) -> &str {
    match cvv_check {
        "Y" => "M",
        "N" => "N",
        "X" => "X",
        "U" => "U",
        _ => "P",
    }
}

impl CheckoutPaymentsResponse {
    fn is_declined(&self, status: AttemptStatus) -> bool {
        status == AttemptStatus::Failure || self.approved == Some(false)
    }

    fn error_response(&self, status_code: u16) -> ErrorResponse {
        let code = self
            .response_code
            .clone()
            .unwrap_or_else(|| NO_ERROR_CODE.to_string());
        ErrorResponse {
            reason: self.response_summary.clone(),
            connector_transaction_id: Some(self.id.clone()),
            standard_error_code: self.response_code.as_deref().and_then(standard_error_code),
            ..ErrorResponse::decline(
                code,
                self.response_summary
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                status_code,
            )
        }
    }

    fn transaction_response(
        &self,
        psync_flow: CheckoutPaymentIntent,
        status_code: u16,
    ) -> PaymentsResponseData {
        let source = self.source.clone().unwrap_or_default();
        PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(self.id.clone()),
            connector_metadata: Some(connector_meta(psync_flow)),
            network_txn_id: self.scheme_id.clone(),
            connector_response_reference_id: Some(
                self.reference.clone().unwrap_or_else(|| self.id.clone()),
            ),
            avs_result: AvsResult::from_code(source.avs_check.as_deref()),
            cvv_result: CvvResult::from_code(source.cvv_check.as_deref().map(cvv_code)),
            message: self.response_summary.clone(),
            status_code,
        }
    }
}

impl
    TryFrom<
        ResponseRouterData<
            CheckoutAuthorizeResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            CheckoutAuthorizeResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = item;

        let psync_flow = match router_data.request.capture_method {
            Some(CaptureMethod::Manual) | Some(CaptureMethod::ManualMultiple) => {
                CheckoutPaymentIntent::Authorize
            }
            _ => CheckoutPaymentIntent::Capture,
        };
        let mut status = attempt_status_for(response.status, psync_flow);

        if response.is_declined(status) {
            status = AttemptStatus::Failure;
            tracing::info!(
                response_code = ?response.response_code,
                "checkout payment declined"
            );
            router_data.response = Err(response.error_response(http_code));
        } else {
            router_data.response = Ok(response.transaction_response(psync_flow, http_code));
        }
        router_data.resource_common_data.status = status;
        Ok(router_data)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            CheckoutPSyncResponse,
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    > for RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            CheckoutPSyncResponse,
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = item;

        let checkout_meta = to_connector_meta(router_data.request.connector_metadata.clone())?;
        let status = match response.balances {
            Some(balances) => attempt_status_for_balances(response.status, balances),
            None => attempt_status_for(response.status, checkout_meta.psync_flow),
        };

        router_data.resource_common_data.status = status;
        router_data.response = if status == AttemptStatus::Failure {
            Err(response.error_response(http_code))
        } else {
            Ok(response.transaction_response(checkout_meta.psync_flow, http_code))
        };
        Ok(router_data)
    }
}

#[derive(Debug, Serialize)]
pub enum CaptureType {
    Final,
    NonFinal,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct PaymentCaptureRequest {
    pub amount: Option<MinorUnit>,
    pub capture_type: Option<CaptureType>,
    pub processing_channel_id: Option<Secret<String>>,
    pub reference: Option<String>,
}

impl TryFrom<CheckoutRouterData<RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>>>
    for PaymentCaptureRequest
{
    type Error = Error;
    fn try_from(
        item: CheckoutRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let auth = CheckoutAuthType::try_from(&router_data.connector_auth_type)?;
        let amount = item
            .connector
            .amount_converter
            .convert(
                router_data.request.minor_amount_to_capture,
                router_data.request.currency,
            )
            .change_context(ConnectorError::AmountConversionFailed)?;
        Ok(Self {
            amount: Some(amount),
            capture_type: Some(CaptureType::Final),
            processing_channel_id: auth.processing_channel_id,
            reference: Some(
                router_data
                    .resource_common_data
                    .connector_request_reference_id
                    .clone(),
            ),
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PaymentCaptureResponse {
    pub action_id: String,
    pub reference: Option<String>,
}

impl
    TryFrom<
        ResponseRouterData<
            PaymentCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            PaymentCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = item;

        // 202 Accepted is the only answer meaning the capture was queued
        let status = if http_code == 202 {
            AttemptStatus::Charged
        } else {
            AttemptStatus::Pending
        };
        let resource_id = router_data
            .request
            .connector_transaction_id
            .get_connector_transaction_id()
            .unwrap_or_else(|_| response.action_id.clone());

        router_data.resource_common_data.status = status;
        router_data.response = Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(resource_id),
            connector_metadata: Some(connector_meta(CheckoutPaymentIntent::Capture)),
            network_txn_id: None,
            connector_response_reference_id: Some(response.action_id),
            avs_result: None,
            cvv_result: None,
            message: None,
            status_code: http_code,
        });
        Ok(router_data)
    }
}

#[derive(Clone, Default, Debug, Eq, PartialEq, Serialize)]
pub struct PaymentVoidRequest {
    pub reference: String,
}

impl TryFrom<CheckoutRouterData<RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>>
    for PaymentVoidRequest
{
    type Error = Error;
    fn try_from(
        item: CheckoutRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            reference: item.router_data.request.connector_transaction_id.clone(),
        })
    }
}

#[derive(Clone, Default, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct PaymentVoidResponse {
    pub action_id: String,
    pub reference: Option<String>,
}

impl
    TryFrom<
        ResponseRouterData<
            PaymentVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            PaymentVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = item;

        if http_code == 202 {
            router_data.resource_common_data.status = AttemptStatus::Voided;
            router_data.response = Ok(PaymentsResponseData::TransactionResponse {
                resource_id: ResponseId::ConnectorTransactionId(
                    router_data.request.connector_transaction_id.clone(),
                ),
                connector_metadata: Some(connector_meta(CheckoutPaymentIntent::Authorize)),
                network_txn_id: None,
                connector_response_reference_id: Some(response.action_id),
                avs_result: None,
                cvv_result: None,
                message: None,
                status_code: http_code,
            });
        } else {
            router_data.resource_common_data.status = AttemptStatus::VoidFailed;
            router_data.response = Err(ErrorResponse {
                connector_transaction_id: Some(router_data.request.connector_transaction_id.clone()),
                ..ErrorResponse::decline(NO_ERROR_CODE, "Void was not accepted", http_code)
            });
        }
        Ok(router_data)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RefundRequest {
    pub amount: Option<MinorUnit>,
    pub reference: String,
}

impl TryFrom<CheckoutRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for RefundRequest
{
    type Error = Error;
    fn try_from(
        item: CheckoutRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(ConnectorError::AmountConversionFailed)?;
        Ok(Self {
            amount: Some(amount),
            reference: request.refund_id.clone(),
        })
    }
}

#[derive(Deserialize, Debug, Serialize)]
pub struct RefundResponse {
    pub action_id: String,
    pub reference: Option<String>,
}

impl
    TryFrom<
        ResponseRouterData<
            RefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            RefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = item;

        let refund_status = if http_code == 202 {
            RefundStatus::Success
        } else {
            RefundStatus::Failure
        };
        router_data.resource_common_data.status = refund_status;
        router_data.response = Ok(RefundsResponseData {
            connector_refund_id: response.action_id,
            refund_status,
            status_code: http_code,
        });
        Ok(router_data)
    }
}

/// One entry of `GET /payments/{id}/actions`.
#[derive(Deserialize, Debug, Serialize)]
pub struct ActionResponse {
    #[serde(rename = "id")]
    pub action_id: String,
    #[serde(rename = "type")]
    pub action_type: Option<String>,
    pub amount: MinorUnit,
    pub approved: Option<bool>,
    pub reference: Option<String>,
    pub response_code: Option<String>,
    pub response_summary: Option<String>,
}

impl From<&ActionResponse> for RefundStatus {
    fn from(item: &ActionResponse) -> Self {
        match item.approved {
            Some(true) => Self::Success,
            Some(false) => Self::Failure,
            None => Self::Pending,
        }
    }
}

pub type CheckoutRefundSyncResponse = Vec<ActionResponse>;

impl
    TryFrom<
        ResponseRouterData<
            CheckoutRefundSyncResponse,
            RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>,
        >,
    > for RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            CheckoutRefundSyncResponse,
            RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = item;

        let action = response
            .iter()
            .find(|action| action.action_id == router_data.request.connector_refund_id)
            .ok_or(ConnectorError::MissingConnectorRefundID)?;
        let refund_status = RefundStatus::from(action);

        router_data.resource_common_data.status = refund_status;
        router_data.response = Ok(RefundsResponseData {
            connector_refund_id: action.action_id.clone(),
            refund_status,
            status_code: http_code,
        });
        Ok(router_data)
    }
}

#[derive(Default, Debug, Deserialize, Serialize)]
pub struct CheckoutErrorResponse {
    pub request_id: Option<String>,
    pub error_type: Option<String>,
    pub error_codes: Option<Vec<String>>,
}

impl CheckoutErrorResponse {
    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let codes = self.error_codes.clone().unwrap_or_default();
        ErrorResponse {
            code: self
                .error_type
                .clone()
                .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
            message: if codes.is_empty() {
                NO_ERROR_MESSAGE.to_string()
            } else {
                codes.join(", ")
            },
            reason: self.request_id.clone(),
            status_code,
            standard_error_code: codes
                .iter()
                .find_map(|code| standard_error_code_for_validation(code)),
            ..Default::default()
        }
    }
}
