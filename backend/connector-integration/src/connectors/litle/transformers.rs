use common_enums::{AttemptStatus, CardNetwork, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    errors::CustomResult,
    pii::Email,
    types::MinorUnit,
};
use domain_types::{
    card_verification::{AvsResult, CvvResult},
    connector_flow::{Authorize, Capture, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, RefundFlowData, RefundsData, RefundsResponseData, ResponseId,
    },
    errors,
    payment_method_data::{Card, PaymentMethodData},
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::LitleRouterData;
use crate::{
    connectors::macros::GetXmlDocument,
    types::ResponseRouterData,
    utils::{self, xml_utils},
};

const CONNECTOR: &str = "litle";
const SCHEMA_VERSION: &str = "9.4";
const XMLNS: &str = "http://www.litle.com/schema";
const REPORT_GROUP: &str = "Default Report Group";
const APPROVED: &str = "000";

type Error = error_stack::Report<errors::ConnectorError>;

pub struct LitleAuthType {
    pub(super) user: Secret<String>,
    pub(super) password: Secret<String>,
    pub(super) merchant_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for LitleAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Ok(Self {
                user: api_key.to_owned(),
                password: key1.to_owned(),
                merchant_id: api_secret.to_owned(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

/// Transaction element names, also the middle part of the authorization value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum LitleTxnKind {
    Sale,
    Authorization,
    Capture,
    AuthReversal,
    Void,
    Credit,
}

#[derive(Debug, Serialize)]
pub struct Authentication {
    pub user: Secret<String>,
    pub password: Secret<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillToAddress {
    pub name: Option<Secret<String>>,
    pub address_line1: Option<Secret<String>>,
    pub address_line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub country: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LitleCard {
    #[serde(rename = "type")]
    pub card_type: String,
    pub number: Secret<String>,
    pub exp_date: Secret<String>,
    pub card_validation_num: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LitleToken {
    pub litle_token: Secret<String>,
    pub exp_date: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTxn {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@reportGroup")]
    pub report_group: &'static str,
    #[serde(rename = "@customerId")]
    pub customer_id: Option<String>,
    pub order_id: String,
    pub amount: MinorUnit,
    pub order_source: &'static str,
    pub bill_to_address: Option<BillToAddress>,
    pub card: Option<LitleCard>,
    pub token: Option<LitleToken>,
}

/// Capture, reversal, void and credit all reference the original `litleTxnId`.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceTxn {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@reportGroup")]
    pub report_group: &'static str,
    pub litle_txn_id: String,
    pub amount: Option<MinorUnit>,
}

/// `<litleOnlineRequest>`; exactly one transaction element is set.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LitleRequest {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "@version")]
    pub version: &'static str,
    #[serde(rename = "@merchantId")]
    pub merchant_id: Secret<String>,
    pub authentication: Authentication,
    pub sale: Option<PaymentTxn>,
    pub authorization: Option<PaymentTxn>,
    pub capture: Option<ReferenceTxn>,
    pub auth_reversal: Option<ReferenceTxn>,
    pub void: Option<ReferenceTxn>,
    pub credit: Option<ReferenceTxn>,
}

pub type LitlePaymentsRequest = LitleRequest;
pub type LitleCaptureRequest = LitleRequest;
pub type LitleVoidRequest = LitleRequest;
pub type LitleRefundRequest = LitleRequest;

impl GetXmlDocument for LitleRequest {
    fn get_xml_document(&self) -> CustomResult<String, errors::ConnectorError> {
        Ok(xml_utils::to_xml_document("litleOnlineRequest", self)?)
    }
}

impl LitleRequest {
    fn new(auth_type: &ConnectorAuthType) -> Result<Self, Error> {
        let auth = LitleAuthType::try_from(auth_type)?;
        Ok(Self {
            xmlns: XMLNS,
            version: SCHEMA_VERSION,
            merchant_id: auth.merchant_id,
            authentication: Authentication {
                user: auth.user,
                password: auth.password,
            },
            sale: None,
            authorization: None,
            capture: None,
            auth_reversal: None,
            void: None,
            credit: None,
        })
    }
}

/// `litleTxnId;kind;amount`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitleAuthorization {
    pub litle_txn_id: String,
    pub kind: LitleTxnKind,
    pub amount: MinorUnit,
}

impl LitleAuthorization {
    pub fn parse(authorization: &str) -> Result<Self, Error> {
        let invalid = || errors::ConnectorError::InvalidDataFormat {
            field_name: "connector_transaction_id",
        };
        let parts = utils::split_authorization(authorization, ';', 3)?;
        let [litle_txn_id, kind, amount] = parts.as_slice() else {
            return Err(invalid().into());
        };
        let kind = kind.parse::<LitleTxnKind>().change_context(invalid())?;
        let amount = amount
            .parse::<i64>()
            .map(MinorUnit::new)
            .change_context(invalid())?;
        Ok(Self {
            litle_txn_id: litle_txn_id.clone(),
            kind,
            amount,
        })
    }

    pub fn encode(&self) -> String {
        format!(
            "{};{};{}",
            self.litle_txn_id,
            self.kind,
            self.amount.get_amount_as_i64()
        )
    }
}

fn card_type(card: &Card) -> Result<String, Error> {
    let code = match card.get_card_network() {
        Some(CardNetwork::Visa) => "VI",
        Some(CardNetwork::Mastercard) => "MC",
        Some(CardNetwork::AmericanExpress) => "AX",
        Some(CardNetwork::Discover) => "DI",
        Some(CardNetwork::Jcb) => "JC",
        Some(CardNetwork::DinersClub) => "DC",
        _ => Err(errors::ConnectorError::NotSupported {
            message: "card network".to_string(),
            connector: CONNECTOR,
        })?,
    };
    Ok(code.to_string())
}

impl
    TryFrom<
        LitleRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for LitleRequest
{
    type Error = Error;
    fn try_from(
        item: LitleRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;

        let (card, token) = match &request.payment_method_data {
            PaymentMethodData::Card(card) => (
                Some(LitleCard {
                    card_type: card_type(card)?,
                    number: Secret::new(card.card_number.get_card_no()),
                    exp_date: card.get_expiry_date_as_mmyy()?,
                    card_validation_num: Some(card.card_cvc.clone())
                        .filter(|cvc| !cvc.peek().is_empty()),
                }),
                None,
            ),
            PaymentMethodData::CardToken(token) => {
                let exp_date = match (&token.card_exp_month, &token.card_exp_year) {
                    (Some(month), Some(year)) => {
                        let year = year.peek();
                        Some(Secret::new(format!(
                            "{:0>2}{}",
                            month.peek(),
                            year.get(year.len().saturating_sub(2)..).unwrap_or_default()
                        )))
                    }
                    _ => None,
                };
                (
                    None,
                    Some(LitleToken {
                        litle_token: token.token.clone(),
                        exp_date,
                    }),
                )
            }
        };

        let billing = router_data
            .resource_common_data
            .address
            .get_payment_billing();
        let bill_to_address = billing.map(|billing| {
            let details = billing.address.as_ref();
            BillToAddress {
                name: details.and_then(|details| details.get_full_name()),
                address_line1: details.and_then(|details| details.line1.clone()),
                address_line2: details.and_then(|details| details.line2.clone()),
                city: details.and_then(|details| details.city.clone()),
                state: details.and_then(|details| details.state.clone()),
                zip: details.and_then(|details| details.zip.clone()),
                country: details
                    .and_then(|details| details.country)
                    .map(|country| country.to_string()),
                email: request.email.clone().or_else(|| billing.email.clone()),
                phone: billing
                    .phone
                    .as_ref()
                    .and_then(|phone| phone.number.clone()),
            }
        });

        let txn = PaymentTxn {
            id: utils::truncate(&router_data.resource_common_data.attempt_id, 25),
            report_group: REPORT_GROUP,
            customer_id: utils::truncate_optional(request.customer_id.as_deref(), 50),
            order_id: utils::truncate(
                &router_data.resource_common_data.connector_request_reference_id,
                25,
            ),
            amount,
            order_source: "ecommerce",
            bill_to_address,
            card,
            token,
        };

        let mut litle_request = Self::new(&router_data.connector_auth_type)?;
        if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            litle_request.sale = Some(txn);
        } else {
            litle_request.authorization = Some(txn);
        }
        Ok(litle_request)
    }
}

impl
    TryFrom<
        LitleRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for LitleRequest
{
    type Error = Error;
    fn try_from(
        item: LitleRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let authorization =
            LitleAuthorization::parse(&request.connector_transaction_id.get_connector_transaction_id()?)?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;

        let mut litle_request = Self::new(&router_data.connector_auth_type)?;
        litle_request.capture = Some(ReferenceTxn {
            id: utils::truncate(&router_data.resource_common_data.attempt_id, 25),
            report_group: REPORT_GROUP,
            litle_txn_id: authorization.litle_txn_id,
            amount: Some(amount),
        });
        Ok(litle_request)
    }
}

impl
    TryFrom<
        LitleRouterData<RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>,
    > for LitleRequest
{
    type Error = Error;
    fn try_from(
        item: LitleRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let authorization = LitleAuthorization::parse(&router_data.request.connector_transaction_id)?;
        let reference = ReferenceTxn {
            id: utils::truncate(&router_data.resource_common_data.attempt_id, 25),
            report_group: REPORT_GROUP,
            litle_txn_id: authorization.litle_txn_id,
            amount: None,
        };

        let mut litle_request = Self::new(&router_data.connector_auth_type)?;
        // Open authorizations are reversed, settled transactions are voided.
        if authorization.kind == LitleTxnKind::Authorization {
            litle_request.auth_reversal = Some(reference);
        } else {
            litle_request.void = Some(reference);
        }
        Ok(litle_request)
    }
}

impl TryFrom<LitleRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for LitleRequest
{
    type Error = Error;
    fn try_from(
        item: LitleRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let authorization = LitleAuthorization::parse(&request.connector_transaction_id)?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;

        let mut litle_request = Self::new(&router_data.connector_auth_type)?;
        litle_request.credit = Some(ReferenceTxn {
            id: utils::truncate(&request.refund_id, 25),
            report_group: REPORT_GROUP,
            litle_txn_id: authorization.litle_txn_id,
            amount: Some(amount),
        });
        Ok(litle_request)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudResult {
    pub avs_result: Option<String>,
    pub card_validation_result: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LitleTxnResponse {
    pub litle_txn_id: Option<String>,
    pub order_id: Option<String>,
    pub response: Option<String>,
    pub message: Option<String>,
    pub auth_code: Option<String>,
    pub fraud_result: Option<FraudResult>,
}

/// `<litleOnlineResponse>` content.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LitleResponse {
    #[serde(rename = "@response")]
    pub response: Option<String>,
    #[serde(rename = "@message")]
    pub message: Option<String>,
    pub sale_response: Option<LitleTxnResponse>,
    pub authorization_response: Option<LitleTxnResponse>,
    pub capture_response: Option<LitleTxnResponse>,
    pub auth_reversal_response: Option<LitleTxnResponse>,
    pub void_response: Option<LitleTxnResponse>,
    pub credit_response: Option<LitleTxnResponse>,
}

pub type LitlePaymentsResponse = LitleResponse;
pub type LitleCaptureResponse = LitleResponse;
pub type LitleVoidResponse = LitleResponse;
pub type LitleRefundResponse = LitleResponse;

/// Two digit AVS codes translated to the standard letters.
const AVS_CODES: &[(&str, &str)] = &[
    ("00", "Y"),
    ("01", "X"),
    ("02", "D"),
    ("10", "Z"),
    ("11", "W"),
    ("12", "A"),
    ("13", "A"),
    ("14", "P"),
    ("20", "N"),
    ("30", "S"),
    ("31", "R"),
    ("32", "U"),
    ("33", "R"),
    ("34", "I"),
    ("40", "E"),
];

pub fn standard_avs_code(code: &str) -> Option<&'static str> {
    AVS_CODES
        .iter()
        .find(|(litle, _)| *litle == code)
        .map(|(_, letter)| *letter)
}

fn standard_error_code(code: &str) -> Option<StandardErrorCode> {
    match code {
        "101" | "102" => Some(StandardErrorCode::ProcessingError),
        "110" | "349" | "358" => Some(StandardErrorCode::CardDeclined),
        "120" | "121" => Some(StandardErrorCode::CallIssuer),
        "301" | "302" => Some(StandardErrorCode::InvalidNumber),
        "303" => Some(StandardErrorCode::PickupCard),
        "305" => Some(StandardErrorCode::ExpiredCard),
        "320" => Some(StandardErrorCode::InvalidExpiryDate),
        "352" => Some(StandardErrorCode::InvalidCvc),
        "321" | "370" => Some(StandardErrorCode::ConfigError),
        "336" => Some(StandardErrorCode::InvalidAmount),
        _ => None,
    }
}

impl LitleResponse {
    /// The transaction answer for `kind`, if the envelope carried one.
    pub fn transaction(&self, kind: LitleTxnKind) -> Option<&LitleTxnResponse> {
        match kind {
            LitleTxnKind::Sale => self.sale_response.as_ref(),
            LitleTxnKind::Authorization => self.authorization_response.as_ref(),
            LitleTxnKind::Capture => self.capture_response.as_ref(),
            LitleTxnKind::AuthReversal => self.auth_reversal_response.as_ref(),
            LitleTxnKind::Void => self.void_response.as_ref(),
            LitleTxnKind::Credit => self.credit_response.as_ref(),
        }
    }

    /// Whichever transaction answer is present.
    pub fn any_transaction(&self) -> Option<&LitleTxnResponse> {
        self.sale_response
            .as_ref()
            .or(self.authorization_response.as_ref())
            .or(self.capture_response.as_ref())
            .or(self.auth_reversal_response.as_ref())
            .or(self.void_response.as_ref())
            .or(self.credit_response.as_ref())
    }

    fn envelope_accepted(&self) -> bool {
        self.response.as_deref() == Some("0")
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        match self.any_transaction().filter(|_| self.envelope_accepted()) {
            Some(txn) => {
                let code = txn
                    .response
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_CODE.to_string());
                ErrorResponse {
                    connector_transaction_id: txn.litle_txn_id.clone(),
                    standard_error_code: standard_error_code(&code),
                    ..ErrorResponse::decline(
                        code,
                        txn.message
                            .clone()
                            .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                        status_code,
                    )
                }
            }
            // Schema or credential problems are reported on the envelope itself.
            None => ErrorResponse {
                standard_error_code: Some(StandardErrorCode::ProcessingError),
                ..ErrorResponse::decline(
                    self.response
                        .clone()
                        .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
                    self.message
                        .clone()
                        .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                    status_code,
                )
            },
        }
    }
}

/// Approved transaction answer for `kind`, or `None` when it was declined.
fn approved_transaction(response: &LitleResponse, kind: LitleTxnKind) -> Option<&LitleTxnResponse> {
    response
        .transaction(kind)
        .filter(|_| response.envelope_accepted())
        .filter(|txn| txn.response.as_deref() == Some(APPROVED))
}

fn payment_router_data<F, Req>(
    response: LitleResponse,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    http_code: u16,
    kind: LitleTxnKind,
    amount: MinorUnit,
    approved_status: AttemptStatus,
    failed_status: AttemptStatus,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    let Some(txn) = approved_transaction(&response, kind) else {
        tracing::info!(
            envelope = ?response.response,
            kind = %kind,
            "litle transaction not approved"
        );
        return Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(failed_status),
            response: Err(response.error_response(http_code)),
            ..router_data
        });
    };

    let litle_txn_id = txn
        .litle_txn_id
        .clone()
        .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?;
    let authorization = LitleAuthorization {
        litle_txn_id,
        kind,
        amount,
    };
    let fraud = txn.fraud_result.clone().unwrap_or_default();
    let avs_code = fraud.avs_result.as_deref().and_then(standard_avs_code);

    Ok(RouterDataV2 {
        resource_common_data: router_data.resource_common_data.set_status(approved_status),
        response: Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(authorization.encode()),
            connector_metadata: None,
            network_txn_id: None,
            connector_response_reference_id: txn
                .auth_code
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            avs_result: AvsResult::from_code(avs_code),
            cvv_result: CvvResult::from_code(fraud.card_validation_result.as_deref()),
            message: txn.message.clone(),
            status_code: http_code,
        }),
        ..router_data
    })
}

impl
    TryFrom<
        ResponseRouterData<
            LitlePaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            LitlePaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = request.minor_amount;
        let (kind, approved) = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            (LitleTxnKind::Sale, AttemptStatus::Charged)
        } else {
            (LitleTxnKind::Authorization, AttemptStatus::Authorized)
        };
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            kind,
            amount,
            approved,
            AttemptStatus::Failure,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            LitleCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            LitleCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let amount = item.router_data.request.minor_amount_to_capture;
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            LitleTxnKind::Capture,
            amount,
            AttemptStatus::Charged,
            AttemptStatus::CaptureFailed,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            LitleVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            LitleVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let original = LitleAuthorization::parse(&item.router_data.request.connector_transaction_id)?;
        let kind = if original.kind == LitleTxnKind::Authorization {
            LitleTxnKind::AuthReversal
        } else {
            LitleTxnKind::Void
        };
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            kind,
            original.amount,
            AttemptStatus::Voided,
            AttemptStatus::VoidFailed,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            LitleRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            LitleRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let (status, result) = match approved_transaction(&response, LitleTxnKind::Credit) {
            Some(txn) => {
                let litle_txn_id = txn
                    .litle_txn_id
                    .clone()
                    .ok_or(errors::ConnectorError::MissingConnectorRefundID)?;
                let authorization = LitleAuthorization {
                    litle_txn_id,
                    kind: LitleTxnKind::Credit,
                    amount: router_data.request.minor_refund_amount,
                };
                (
                    RefundStatus::Success,
                    Ok(RefundsResponseData {
                        connector_refund_id: authorization.encode(),
                        refund_status: RefundStatus::Success,
                        status_code: http_code,
                    }),
                )
            }
            None => (RefundStatus::Failure, Err(response.error_response(http_code))),
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
