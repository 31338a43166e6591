use bytes::Bytes;
use common_enums::{AttemptStatus, Currency, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    errors::CustomResult,
    types::MinorUnit,
};
use domain_types::{
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
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::IveriRouterData;
use crate::{
    connectors::macros::GetXmlDocument,
    types::ResponseRouterData,
    utils::{self, xml_utils},
};

const CONNECTOR: &str = "iveri";

type Error = error_stack::Report<errors::ConnectorError>;

pub struct IveriAuthType {
    pub(super) certificate_id: Secret<String>,
    pub(super) application_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for IveriAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                certificate_id: api_key.to_owned(),
                application_id: key1.to_owned(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IveriCommand {
    Debit,
    Authorisation,
    Void,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IveriMode {
    Test,
    Live,
}

impl From<bool> for IveriMode {
    fn from(test_mode: bool) -> Self {
        if test_mode {
            Self::Test
        } else {
            Self::Live
        }
    }
}

/// `<Transaction>` inside the V_XML request.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct IveriTransaction {
    #[serde(rename = "@ApplicationID")]
    pub application_id: Secret<String>,
    #[serde(rename = "@Command")]
    pub command: IveriCommand,
    #[serde(rename = "@Mode")]
    pub mode: IveriMode,
    #[serde(rename = "Amount")]
    pub amount: MinorUnit,
    #[serde(rename = "Currency")]
    pub currency: Currency,
    #[serde(rename = "MerchantReference")]
    pub merchant_reference: String,
    #[serde(rename = "OriginalRequestID")]
    pub original_request_id: Option<String>,
    #[serde(rename = "AuthorisationCode")]
    pub authorisation_code: Option<String>,
    #[serde(rename = "PAN")]
    pub pan: Option<Secret<String>>,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: Option<Secret<String>>,
    #[serde(rename = "CardSecurityCode")]
    pub card_security_code: Option<Secret<String>>,
    #[serde(rename = "ElectronicCommerceIndicator")]
    pub electronic_commerce_indicator: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct IveriRequest {
    #[serde(rename = "@Version")]
    pub version: &'static str,
    #[serde(rename = "@CertificateID")]
    pub certificate_id: Secret<String>,
    #[serde(rename = "@Direction")]
    pub direction: &'static str,
    #[serde(rename = "Transaction")]
    pub transaction: IveriTransaction,
}

pub type IveriPaymentsRequest = IveriRequest;
pub type IveriCaptureRequest = IveriRequest;
pub type IveriVoidRequest = IveriRequest;
pub type IveriRefundRequest = IveriRequest;

impl GetXmlDocument for IveriRequest {
    /// The V_XML document travels escaped as the text of `<request>`.
    fn get_xml_document(&self) -> CustomResult<String, errors::ConnectorError> {
        let v_xml = xml_utils::to_xml_element("V_XML", self)?;
        Ok(format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <soap:Envelope xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
             xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <soap:Body>\
             <Execute xmlns=\"http://iveri.com/\">\
             <validateRequest>true</validateRequest>\
             <protocol>V_XML</protocol>\
             <protocolVersion>2.0</protocolVersion>\
             <request>{}</request>\
             </Execute>\
             </soap:Body>\
             </soap:Envelope>",
            quick_xml::escape::escape(v_xml.as_str())
        ))
    }
}

impl IveriRequest {
    fn new(auth: IveriAuthType, transaction: IveriTransaction) -> Self {
        Self {
            version: "2.0",
            certificate_id: auth.certificate_id,
            direction: "Request",
            transaction,
        }
    }
}

/// `RequestID|MerchantReference|AuthorisationCode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IveriAuthorization {
    pub request_id: String,
    pub merchant_reference: String,
    pub authorisation_code: String,
}

impl IveriAuthorization {
    pub fn parse(authorization: &str) -> Result<Self, Error> {
        let mut parts = utils::split_authorization(authorization, '|', 3)?.into_iter();
        let mut next = || parts.next().unwrap_or_default();
        Ok(Self {
            request_id: next(),
            merchant_reference: next(),
            authorisation_code: next(),
        })
    }

    fn encode(&self) -> String {
        format!(
            "{}|{}|{}",
            self.request_id, self.merchant_reference, self.authorisation_code
        )
    }
}

/// Follow-up transaction referencing an earlier authorization.
fn follow_up(
    auth_type: &ConnectorAuthType,
    command: IveriCommand,
    test_mode: bool,
    authorization: &str,
    amount: MinorUnit,
    currency: Currency,
) -> Result<IveriRequest, Error> {
    let auth = IveriAuthType::try_from(auth_type)?;
    let authorization = IveriAuthorization::parse(authorization)?;
    let transaction = IveriTransaction {
        application_id: auth.application_id.clone(),
        command,
        mode: IveriMode::from(test_mode),
        amount,
        currency,
        merchant_reference: authorization.merchant_reference,
        original_request_id: Some(authorization.request_id),
        authorisation_code: Some(authorization.authorisation_code)
            .filter(|code| !code.is_empty()),
        pan: None,
        expiry_date: None,
        card_security_code: None,
        electronic_commerce_indicator: None,
    };
    Ok(IveriRequest::new(auth, transaction))
}

impl
    TryFrom<
        IveriRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for IveriRequest
{
    type Error = Error;
    fn try_from(
        item: IveriRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let auth = IveriAuthType::try_from(&router_data.connector_auth_type)?;
        let card = match &request.payment_method_data {
            PaymentMethodData::Card(card) => card,
            PaymentMethodData::CardToken(_) => Err(errors::ConnectorError::NotImplemented(
                utils::get_unimplemented_payment_method_error_message(CONNECTOR),
            ))?,
        };
        let command = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            IveriCommand::Debit
        } else {
            IveriCommand::Authorisation
        };
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        let expiry_date = Secret::new(format!(
            "{}{}",
            card.get_expiry_month_2_digit().peek(),
            card.get_expiry_year_4_digit().peek()
        ));

        let transaction = IveriTransaction {
            application_id: auth.application_id.clone(),
            command,
            mode: IveriMode::from(router_data.resource_common_data.is_test_mode()),
            amount,
            currency: request.currency,
            merchant_reference: utils::truncate(
                &router_data.resource_common_data.connector_request_reference_id,
                64,
            ),
            original_request_id: None,
            authorisation_code: None,
            pan: Some(Secret::new(card.card_number.get_card_no())),
            expiry_date: Some(expiry_date),
            card_security_code: Some(card.card_cvc.clone()),
            electronic_commerce_indicator: Some("SecureChannel"),
        };
        Ok(Self::new(auth, transaction))
    }
}

impl
    TryFrom<
        IveriRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for IveriRequest
{
    type Error = Error;
    fn try_from(
        item: IveriRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        follow_up(
            &router_data.connector_auth_type,
            IveriCommand::Debit,
            router_data.resource_common_data.is_test_mode(),
            &request.connector_transaction_id.get_connector_transaction_id()?,
            amount,
            request.currency,
        )
    }
}

impl
    TryFrom<
        IveriRouterData<RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>,
    > for IveriRequest
{
    type Error = Error;
    fn try_from(
        item: IveriRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let amount = request
            .minor_amount
            .ok_or_else(utils::missing_field_err("minor_amount"))?;
        let currency = request
            .currency
            .ok_or_else(utils::missing_field_err("currency"))?;
        follow_up(
            &router_data.connector_auth_type,
            IveriCommand::Void,
            router_data.resource_common_data.is_test_mode(),
            &request.connector_transaction_id,
            amount,
            currency,
        )
    }
}

impl TryFrom<IveriRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for IveriRequest
{
    type Error = Error;
    fn try_from(
        item: IveriRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        follow_up(
            &router_data.connector_auth_type,
            IveriCommand::Credit,
            router_data.resource_common_data.is_test_mode(),
            &request.connector_transaction_id,
            amount,
            request.currency,
        )
    }
}

/// Unwraps the SOAP envelope, then parses the escaped V_XML payload and
/// returns its `<Transaction>` content as JSON.
///
/// Credential and validation errors come back as a bare `<Result>` directly
/// under `<V_XML>`; the `V_XML` content is returned for those.
pub fn unwrap_v_xml(response_bytes: Bytes) -> Result<Bytes, errors::ConnectorError> {
    let execute = xml_utils::preprocess_xml_response_at(response_bytes, &["Body", "ExecuteResponse"])?;
    let execute: serde_json::Value = serde_json::from_slice(&execute)
        .map_err(|_| errors::ConnectorError::ResponseDeserializationFailed)?;
    let v_xml = execute
        .get("ExecuteResult")
        .and_then(serde_json::Value::as_str)
        .ok_or(errors::ConnectorError::ResponseDeserializationFailed)?;

    let document = xml_utils::xml_to_json(v_xml.trim())?;
    let root_content = document
        .as_object()
        .and_then(|document| document.values().next())
        .ok_or(errors::ConnectorError::ResponseDeserializationFailed)?;
    let payload = match xml_utils::select_path(root_content, &["Transaction"]) {
        Some(transaction) => transaction,
        None => {
            tracing::info!("iveri answered without a transaction element");
            root_content
        }
    };
    serde_json::to_vec(payload)
        .map(Bytes::from)
        .map_err(|_| errors::ConnectorError::ResponseDeserializationFailed)
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IveriResult {
    #[serde(rename = "@Status")]
    pub status: Option<String>,
    #[serde(rename = "@Code")]
    pub code: Option<String>,
    #[serde(rename = "@Description")]
    pub description: Option<String>,
    #[serde(rename = "@AcquirerCode")]
    pub acquirer_code: Option<String>,
    #[serde(rename = "@AcquirerDescription")]
    pub acquirer_description: Option<String>,
}

/// Response `<Transaction>` content.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IveriResponse {
    #[serde(rename = "@RequestID")]
    pub request_id: Option<String>,
    #[serde(rename = "Result")]
    pub result: IveriResult,
    #[serde(rename = "MerchantReference")]
    pub merchant_reference: Option<String>,
    #[serde(rename = "AuthorisationCode")]
    pub authorisation_code: Option<String>,
    #[serde(rename = "TransactionIndex")]
    pub transaction_index: Option<String>,
    #[serde(rename = "AcquirerReference")]
    pub acquirer_reference: Option<String>,
}

pub type IveriPaymentsResponse = IveriResponse;
pub type IveriCaptureResponse = IveriResponse;
pub type IveriVoidResponse = IveriResponse;
pub type IveriRefundResponse = IveriResponse;

/// Result codes with a standard meaning.
fn standard_error_code(code: &str) -> Option<StandardErrorCode> {
    match code {
        "4" => Some(StandardErrorCode::CallIssuer),
        "5" => Some(StandardErrorCode::CardDeclined),
        "9" | "255" => Some(StandardErrorCode::ProcessingError),
        "11" => Some(StandardErrorCode::InvalidAmount),
        "14" => Some(StandardErrorCode::PickupCard),
        "15" => Some(StandardErrorCode::ExpiredCard),
        "20" | "21" => Some(StandardErrorCode::InvalidNumber),
        "22" => Some(StandardErrorCode::InvalidExpiryDate),
        "23" => Some(StandardErrorCode::InvalidCvc),
        "255-CVV" => Some(StandardErrorCode::IncorrectCvc),
        _ => None,
    }
}

impl IveriResponse {
    /// `0` is success and `1` a warning on a processed transaction; `-1` is an error.
    pub fn is_success(&self) -> bool {
        matches!(self.result.status.as_deref(), Some("0") | Some("1"))
    }

    pub fn authorization(&self) -> Option<String> {
        let authorization = IveriAuthorization {
            request_id: self.request_id.clone()?,
            merchant_reference: self.merchant_reference.clone().unwrap_or_default(),
            authorisation_code: self.authorisation_code.clone().unwrap_or_default(),
        };
        Some(authorization.encode())
    }

    pub fn message(&self) -> Option<String> {
        self.result
            .description
            .clone()
            .filter(|description| !description.is_empty())
            .or_else(|| self.is_success().then(|| "Succeeded".to_string()))
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let code = self
            .result
            .code
            .clone()
            .unwrap_or_else(|| NO_ERROR_CODE.to_string());
        ErrorResponse {
            reason: self.result.acquirer_description.clone(),
            connector_transaction_id: self.authorization(),
            standard_error_code: standard_error_code(&code),
            ..ErrorResponse::decline(
                code,
                self.message().unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                status_code,
            )
        }
    }
}

fn payment_router_data<F, Req>(
    response: IveriResponse,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    http_code: u16,
    approved_status: AttemptStatus,
    failed_status: AttemptStatus,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    if !response.is_success() {
        tracing::info!(
            status = ?response.result.status,
            code = ?response.result.code,
            "iveri transaction failed"
        );
        return Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(failed_status),
            response: Err(response.error_response(http_code)),
            ..router_data
        });
    }
    if response.result.status.as_deref() == Some("1") {
        tracing::warn!(code = ?response.result.code, "iveri transaction succeeded with warning");
    }
    let authorization = response
        .authorization()
        .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?;
    Ok(RouterDataV2 {
        resource_common_data: router_data.resource_common_data.set_status(approved_status),
        response: Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(authorization),
            connector_metadata: serde_json::to_value(&response).ok(),
            network_txn_id: None,
            connector_response_reference_id: response.transaction_index.clone(),
            avs_result: None,
            cvv_result: None,
            message: response.message(),
            status_code: http_code,
        }),
        ..router_data
    })
}

impl
    TryFrom<
        ResponseRouterData<
            IveriPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            IveriPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let approved = if utils::is_auto_capture(item.router_data.request.capture_method, CONNECTOR)? {
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
            IveriCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            IveriCaptureResponse,
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
            IveriVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            IveriVoidResponse,
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
            IveriRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            IveriRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let (status, result) = if response.is_success() {
            let connector_refund_id = response
                .authorization()
                .ok_or(errors::ConnectorError::MissingConnectorRefundID)?;
            (
                RefundStatus::Success,
                Ok(RefundsResponseData {
                    connector_refund_id,
                    refund_status: RefundStatus::Success,
                    status_code: http_code,
                }),
            )
        } else {
            (RefundStatus::Failure, Err(response.error_response(http_code)))
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
