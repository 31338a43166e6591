use common_enums::{AttemptStatus, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    types::StringMajorUnit,
};
use domain_types::{
    card_verification::{AvsResult, CvvResult},
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

use super::PriorityRouterData;
use crate::{types::ResponseRouterData, utils};

const CONNECTOR: &str = "priority";

type Error = error_stack::Report<errors::ConnectorError>;

pub struct PriorityAuthType {
    pub(super) api_key: Secret<String>,
    pub(super) api_secret: Secret<String>,
    pub(super) merchant_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for PriorityAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Ok(Self {
                api_key: api_key.to_owned(),
                api_secret: key1.to_owned(),
                merchant_id: api_secret.to_owned(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Sale,
    Return,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAccount {
    pub card_present: bool,
    pub entry_mode: &'static str,
    pub number: Secret<String>,
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
    pub cvv: Secret<String>,
    pub avs_street: Option<Secret<String>>,
    pub avs_zip: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityPaymentsRequest {
    pub merchant_id: Secret<String>,
    pub amount: StringMajorUnit,
    pub auth_only: bool,
    pub is_auth: bool,
    pub payment_type: PaymentType,
    pub tender_type: &'static str,
    pub source: &'static str,
    pub invoice: String,
    pub meta: Option<String>,
    pub should_get_credit_card_level: bool,
    pub should_vault_card: bool,
    pub tax_exempt: bool,
    pub card_account: Option<CardAccount>,
    pub payment_token: Option<Secret<String>>,
}

impl
    TryFrom<
        PriorityRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for PriorityPaymentsRequest
{
    type Error = Error;
    fn try_from(
        item: PriorityRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let auth = PriorityAuthType::try_from(&router_data.connector_auth_type)?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        let auth_only = !utils::is_auto_capture(request.capture_method, CONNECTOR)?;

        let billing = router_data
            .resource_common_data
            .get_optional_billing_address();
        let (card_account, payment_token) = match &request.payment_method_data {
            PaymentMethodData::Card(card) => (
                Some(CardAccount {
                    card_present: false,
                    entry_mode: "Keyed",
                    number: Secret::new(card.card_number.get_card_no()),
                    expiry_month: card.get_expiry_month_2_digit(),
                    expiry_year: card.get_card_expiry_year_2_digit()?,
                    cvv: card.card_cvc.clone(),
                    avs_street: billing.and_then(|address| address.line1.clone()),
                    avs_zip: billing.and_then(|address| address.zip.clone()),
                }),
                None,
            ),
            PaymentMethodData::CardToken(token) => (None, Some(token.token.clone())),
        };

        Ok(Self {
            merchant_id: auth.merchant_id,
            amount,
            auth_only,
            is_auth: true,
            payment_type: PaymentType::Sale,
            tender_type: "Card",
            source: "API",
            invoice: utils::truncate(
                &router_data.resource_common_data.connector_request_reference_id,
                25,
            ),
            meta: utils::truncate_optional(
                router_data.resource_common_data.description.as_deref(),
                100,
            ),
            should_get_credit_card_level: true,
            should_vault_card: false,
            tax_exempt: false,
            card_account,
            payment_token,
        })
    }
}

/// What the authorization leaves behind for capturing and returning it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PriorityPaymentMetadata {
    pub payment_token: Option<String>,
    pub auth_code: Option<String>,
}

fn payment_metadata(metadata: Option<&serde_json::Value>) -> Result<PriorityPaymentMetadata, Error> {
    let metadata = metadata.ok_or_else(utils::missing_field_err("connector_metadata"))?;
    serde_json::from_value(metadata.clone()).change_context(
        errors::ConnectorError::InvalidDataFormat {
            field_name: "connector_metadata",
        },
    )
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCaptureRequest {
    pub merchant_id: Secret<String>,
    pub amount: StringMajorUnit,
    pub auth_code: Option<String>,
    pub payment_token: String,
    pub payment_type: PaymentType,
    pub tender_type: &'static str,
    pub source: &'static str,
    pub invoice: String,
    pub should_get_credit_card_level: bool,
}

impl
    TryFrom<
        PriorityRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for PriorityCaptureRequest
{
    type Error = Error;
    fn try_from(
        item: PriorityRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let auth = PriorityAuthType::try_from(&router_data.connector_auth_type)?;
        let metadata = payment_metadata(request.connector_metadata.as_ref())?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self {
            merchant_id: auth.merchant_id,
            amount,
            auth_code: metadata.auth_code,
            payment_token: metadata
                .payment_token
                .ok_or_else(utils::missing_field_err("payment_token"))?,
            payment_type: PaymentType::Sale,
            tender_type: "Card",
            source: "API",
            invoice: utils::truncate(
                &router_data.resource_common_data.connector_request_reference_id,
                25,
            ),
            should_get_credit_card_level: true,
        })
    }
}

/// Returns are new payments with a negative amount.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityRefundRequest {
    pub merchant_id: Secret<String>,
    pub amount: String,
    pub payment_token: String,
    pub payment_type: PaymentType,
    pub tender_type: &'static str,
    pub source: &'static str,
    pub invoice: String,
}

impl
    TryFrom<
        PriorityRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>,
    > for PriorityRefundRequest
{
    type Error = Error;
    fn try_from(
        item: PriorityRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let auth = PriorityAuthType::try_from(&router_data.connector_auth_type)?;
        let metadata = payment_metadata(request.connector_metadata.as_ref())?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self {
            merchant_id: auth.merchant_id,
            amount: format!("-{}", amount.get_amount_as_string()),
            payment_token: metadata
                .payment_token
                .ok_or_else(utils::missing_field_err("payment_token"))?,
            payment_type: PaymentType::Return,
            tender_type: "Card",
            source: "API",
            invoice: utils::truncate(&request.refund_id, 25),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityPaymentStatus {
    Approved,
    Declined,
    Pending,
    Settled,
    Voided,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityRisk {
    pub avs_response_code: Option<String>,
    pub avs_response: Option<String>,
    pub cvv_response_code: Option<String>,
    pub cvv_response: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityPaymentResponse {
    pub id: u64,
    pub status: PriorityPaymentStatus,
    pub auth_code: Option<String>,
    pub auth_message: Option<String>,
    pub payment_token: Option<String>,
    pub reference: Option<String>,
    pub risk: Option<PriorityRisk>,
}

pub type PriorityPaymentsResponse = PriorityPaymentResponse;
pub type PriorityCaptureResponse = PriorityPaymentResponse;
pub type PriorityRefundResponse = PriorityPaymentResponse;

/// Cancelling answers `204 No Content`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PriorityVoidResponse {}

/// Error document for rejected requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityErrorResponse {
    pub error_code: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

impl PriorityErrorResponse {
    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let reason = (!self.details.is_empty()).then(|| self.details.join(", "));
        ErrorResponse {
            status_code,
            code: self
                .error_code
                .clone()
                .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
            message: self
                .message
                .clone()
                .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
            reason,
            standard_error_code: match self.error_code.as_deref() {
                Some("ValidationError") => Some(StandardErrorCode::ProcessingError),
                Some("UnauthorizedError") | Some("Unauthorized") => {
                    Some(StandardErrorCode::ConfigError)
                }
                _ => None,
            },
            ..Default::default()
        }
    }
}

/// Issuer texts with a standard meaning, matched case-insensitively.
const DECLINE_MESSAGES: &[(&str, StandardErrorCode)] = &[
    ("insufficient funds", StandardErrorCode::CardDeclined),
    ("do not honor", StandardErrorCode::CardDeclined),
    ("invalid card number", StandardErrorCode::InvalidNumber),
    ("invalid account", StandardErrorCode::InvalidNumber),
    ("expired card", StandardErrorCode::ExpiredCard),
    ("invalid expiration", StandardErrorCode::InvalidExpiryDate),
    ("cvv", StandardErrorCode::IncorrectCvc),
    ("pick up card", StandardErrorCode::PickupCard),
    ("call issuer", StandardErrorCode::CallIssuer),
    ("invalid amount", StandardErrorCode::InvalidAmount),
];

fn standard_error_code(message: &str) -> Option<StandardErrorCode> {
    let message = message.to_ascii_lowercase();
    DECLINE_MESSAGES
        .iter()
        .find(|(text, _)| message.contains(text))
        .map(|(_, code)| *code)
}

impl PriorityPaymentResponse {
    pub fn is_approved(&self) -> bool {
        matches!(
            self.status,
            PriorityPaymentStatus::Approved | PriorityPaymentStatus::Settled
        )
    }

    fn message(&self) -> Option<String> {
        self.auth_message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let message = self.message().unwrap_or_else(|| NO_ERROR_MESSAGE.to_string());
        ErrorResponse {
            connector_transaction_id: Some(self.id.to_string()),
            standard_error_code: standard_error_code(&message),
            ..ErrorResponse::decline(
                serde_json::to_value(&self.status)
                    .ok()
                    .and_then(|status| status.as_str().map(str::to_string))
                    .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
                message,
                status_code,
            )
        }
    }
}

fn payment_router_data<F, Req>(
    response: PriorityPaymentResponse,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    http_code: u16,
    approved_status: AttemptStatus,
    failed_status: AttemptStatus,
) -> RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData> {
    let status = match response.status {
        PriorityPaymentStatus::Pending => AttemptStatus::Pending,
        _ if response.is_approved() => approved_status,
        _ => failed_status,
    };
    if status == failed_status {
        tracing::info!(id = response.id, status = ?response.status, "priority payment not approved");
        return RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(status),
            response: Err(response.error_response(http_code)),
            ..router_data
        };
    }

    let risk = response.risk.clone().unwrap_or_default();
    let metadata = PriorityPaymentMetadata {
        payment_token: response.payment_token.clone(),
        auth_code: response.auth_code.clone(),
    };
    RouterDataV2 {
        resource_common_data: router_data.resource_common_data.set_status(status),
        response: Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(response.id.to_string()),
            connector_metadata: serde_json::to_value(metadata).ok(),
            network_txn_id: None,
            connector_response_reference_id: response.auth_code.clone(),
            avs_result: AvsResult::from_code(risk.avs_response_code.as_deref()),
            cvv_result: CvvResult::from_code(risk.cvv_response_code.as_deref()),
            message: response.message(),
            status_code: http_code,
        }),
        ..router_data
    }
}

impl
    TryFrom<
        ResponseRouterData<
            PriorityPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            PriorityPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let approved = if utils::is_auto_capture(item.router_data.request.capture_method, CONNECTOR)? {
            AttemptStatus::Charged
        } else {
            AttemptStatus::Authorized
        };
        Ok(payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            approved,
            AttemptStatus::Failure,
        ))
    }
}

impl
    TryFrom<
        ResponseRouterData<
            PriorityCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            PriorityCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            AttemptStatus::Charged,
            AttemptStatus::CaptureFailed,
        ))
    }
}

impl
    TryFrom<
        ResponseRouterData<
            PriorityVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            PriorityVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let transaction_id = router_data.request.connector_transaction_id.clone();
        Ok(RouterDataV2 {
            resource_common_data: router_data
                .resource_common_data
                .set_status(AttemptStatus::Voided),
            response: Ok(PaymentsResponseData::TransactionResponse {
                resource_id: ResponseId::ConnectorTransactionId(transaction_id),
                connector_metadata: None,
                network_txn_id: None,
                connector_response_reference_id: None,
                avs_result: None,
                cvv_result: None,
                message: None,
                status_code: item.http_code,
            }),
            ..router_data
        })
    }
}

impl
    TryFrom<
        ResponseRouterData<
            PriorityRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            PriorityRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let refund_status = match response.status {
            PriorityPaymentStatus::Pending => RefundStatus::Pending,
            _ if response.is_approved() => RefundStatus::Success,
            _ => RefundStatus::Failure,
        };
        let result = if refund_status == RefundStatus::Failure {
            Err(response.error_response(http_code))
        } else {
            Ok(RefundsResponseData {
                connector_refund_id: response.id.to_string(),
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
    fn decline_texts_map_to_standard_codes() {
        assert_eq!(
            standard_error_code("Insufficient Funds"),
            Some(StandardErrorCode::CardDeclined)
        );
        assert_eq!(
            standard_error_code("CVV2 Mismatch"),
            Some(StandardErrorCode::IncorrectCvc)
        );
        assert_eq!(standard_error_code("Partial approval"), None);
    }

    #[test]
    fn unknown_status_is_not_approved() {
        let response: PriorityPaymentResponse =
            serde_json::from_str(r#"{"id":1,"status":"UnderReview"}"#).unwrap();
        assert_eq!(response.status, PriorityPaymentStatus::Unknown);
        assert!(!response.is_approved());
    }
}
