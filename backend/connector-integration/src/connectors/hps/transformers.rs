use common_enums::{AttemptStatus, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    errors::CustomResult,
    pii::Email,
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
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::HpsRouterData;
use crate::{
    connectors::macros::GetXmlDocument,
    types::ResponseRouterData,
    utils::{self, xml_utils},
};

const CONNECTOR: &str = "hps";

/// Issuer codes that count as approved once the gateway accepted the request.
const ISSUER_SUCCESS_CODES: &[&str] = &["0", "00", "85", "10"];

type Error = error_stack::Report<errors::ConnectorError>;

pub struct HpsAuthType {
    pub(super) secret_api_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for HpsAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::HeaderKey { api_key } => Ok(Self {
                secret_api_key: api_key.to_owned(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HpsHeader {
    #[serde(rename = "SecretAPIKey")]
    pub secret_api_key: Secret<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardHolderData {
    pub card_holder_first_name: Option<Secret<String>>,
    pub card_holder_last_name: Option<Secret<String>>,
    pub card_holder_email: Option<Email>,
    pub card_holder_phone: Option<Secret<String>>,
    pub card_holder_addr: Option<Secret<String>>,
    pub card_holder_city: Option<String>,
    pub card_holder_state: Option<Secret<String>>,
    pub card_holder_zip: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdditionalTxnFields {
    pub description: Option<String>,
    pub invoice_nbr: Option<String>,
    #[serde(rename = "CustomerID")]
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManualEntry {
    pub card_nbr: Secret<String>,
    pub exp_month: Secret<String>,
    pub exp_year: Secret<String>,
    #[serde(rename = "CVV2")]
    pub cvv2: Secret<String>,
    pub card_present: &'static str,
    pub reader_present: &'static str,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenData {
    pub token_value: Secret<String>,
    pub exp_month: Option<Secret<String>>,
    pub exp_year: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardData {
    pub manual_entry: Option<ManualEntry>,
    pub token_data: Option<TokenData>,
    pub token_request: &'static str,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentBlock {
    pub allow_dup: &'static str,
    pub amt: StringMajorUnit,
    pub card_holder_data: Option<CardHolderData>,
    pub additional_txn_fields: Option<AdditionalTxnFields>,
    pub card_data: CardData,
}

#[derive(Debug, Serialize)]
pub struct PaymentTransaction {
    #[serde(rename = "Block1")]
    pub block1: PaymentBlock,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddToBatch {
    pub gateway_txn_id: String,
    pub amt: StringMajorUnit,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreditVoid {
    pub gateway_txn_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReturnBlock {
    pub allow_dup: &'static str,
    pub amt: StringMajorUnit,
    pub gateway_txn_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreditReturn {
    #[serde(rename = "Block1")]
    pub block1: ReturnBlock,
}

/// One of the POS gateway services; exactly one field is set.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HpsTransaction {
    pub credit_sale: Option<PaymentTransaction>,
    pub credit_auth: Option<PaymentTransaction>,
    pub credit_add_to_batch: Option<AddToBatch>,
    pub credit_void: Option<CreditVoid>,
    pub credit_return: Option<CreditReturn>,
}

#[derive(Debug)]
pub struct HpsRequest {
    pub header: HpsHeader,
    pub transaction: HpsTransaction,
}

pub type HpsPaymentsRequest = HpsRequest;
pub type HpsCaptureRequest = HpsRequest;
pub type HpsVoidRequest = HpsRequest;
pub type HpsRefundRequest = HpsRequest;

impl GetXmlDocument for HpsRequest {
    fn get_xml_document(&self) -> CustomResult<String, errors::ConnectorError> {
        let header = xml_utils::to_xml_element("Header", &self.header)?;
        let transaction = xml_utils::to_xml_element("Transaction", &self.transaction)?;
        Ok(format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <soap:Body>\
             <PosRequest xmlns=\"http://Hps.Exchange.PosGateway\">\
             <Ver1.0>{header}{transaction}</Ver1.0>\
             </PosRequest>\
             </soap:Body>\
             </soap:Envelope>"
        ))
    }
}

fn header_for(auth_type: &ConnectorAuthType) -> Result<HpsHeader, Error> {
    let auth = HpsAuthType::try_from(auth_type)?;
    Ok(HpsHeader {
        secret_api_key: auth.secret_api_key,
    })
}

impl TryFrom<HpsRouterData<RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>>
    for HpsRequest
{
    type Error = Error;
    fn try_from(
        item: HpsRouterData<
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

        let card_data = match &request.payment_method_data {
            PaymentMethodData::Card(card) => CardData {
                manual_entry: Some(ManualEntry {
                    card_nbr: Secret::new(card.card_number.get_card_no()),
                    exp_month: card.get_expiry_month_2_digit(),
                    exp_year: card.get_expiry_year_4_digit(),
                    cvv2: card.card_cvc.clone(),
                    card_present: "N",
                    reader_present: "N",
                }),
                token_data: None,
                token_request: "N",
            },
            PaymentMethodData::CardToken(token) => CardData {
                manual_entry: None,
                token_data: Some(TokenData {
                    token_value: token.token.clone(),
                    exp_month: token.card_exp_month.clone(),
                    exp_year: token.card_exp_year.clone(),
                }),
                token_request: "N",
            },
        };

        let billing = router_data.resource_common_data.address.get_payment_billing();
        let details = billing.and_then(|billing| billing.address.as_ref());
        let card_holder_data = details.map(|details| CardHolderData {
            card_holder_first_name: details.first_name.clone(),
            card_holder_last_name: details.last_name.clone(),
            card_holder_email: request.email.clone(),
            card_holder_phone: billing
                .and_then(|billing| billing.phone.as_ref())
                .and_then(|phone| phone.number.clone()),
            card_holder_addr: details.get_combined_address_line(),
            card_holder_city: details.city.clone(),
            card_holder_state: details.state.clone(),
            card_holder_zip: details
                .zip
                .as_ref()
                .map(|zip| Secret::new(utils::truncate(&zip.peek().replace(' ', ""), 9))),
        });

        let block1 = PaymentBlock {
            allow_dup: "Y",
            amt: amount,
            card_holder_data,
            additional_txn_fields: Some(AdditionalTxnFields {
                description: utils::truncate_optional(
                    router_data.resource_common_data.description.as_deref(),
                    100,
                ),
                invoice_nbr: Some(utils::truncate(
                    &router_data.resource_common_data.connector_request_reference_id,
                    50,
                )),
                customer_id: utils::truncate_optional(request.customer_id.as_deref(), 50),
            }),
            card_data,
        };

        let transaction = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            HpsTransaction {
                credit_sale: Some(PaymentTransaction { block1 }),
                ..Default::default()
            }
        } else {
            HpsTransaction {
                credit_auth: Some(PaymentTransaction { block1 }),
                ..Default::default()
            }
        };

        Ok(Self {
            header: header_for(&router_data.connector_auth_type)?,
            transaction,
        })
    }
}

impl TryFrom<HpsRouterData<RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>>>
    for HpsRequest
{
    type Error = Error;
    fn try_from(
        item: HpsRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self {
            header: header_for(&item.router_data.connector_auth_type)?,
            transaction: HpsTransaction {
                credit_add_to_batch: Some(AddToBatch {
                    gateway_txn_id: request.connector_transaction_id.get_connector_transaction_id()?,
                    amt: amount,
                }),
                ..Default::default()
            },
        })
    }
}

impl TryFrom<HpsRouterData<RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>>
    for HpsRequest
{
    type Error = Error;
    fn try_from(
        item: HpsRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            header: header_for(&item.router_data.connector_auth_type)?,
            transaction: HpsTransaction {
                credit_void: Some(CreditVoid {
                    gateway_txn_id: item.router_data.request.connector_transaction_id.clone(),
                }),
                ..Default::default()
            },
        })
    }
}

impl TryFrom<HpsRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for HpsRequest
{
    type Error = Error;
    fn try_from(
        item: HpsRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self {
            header: header_for(&item.router_data.connector_auth_type)?,
            transaction: HpsTransaction {
                credit_return: Some(CreditReturn {
                    block1: ReturnBlock {
                        allow_dup: "Y",
                        amt: amount,
                        gateway_txn_id: request.connector_transaction_id.clone(),
                    },
                }),
                ..Default::default()
            },
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HpsResponseHeader {
    pub gateway_txn_id: Option<String>,
    pub gateway_rsp_code: Option<String>,
    pub gateway_rsp_msg: Option<String>,
}

/// Issuer level result inside `<Transaction><CreditSale>` and friends.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HpsTransactionResult {
    #[serde(rename = "RspCode")]
    pub rsp_code: Option<String>,
    #[serde(rename = "RspText")]
    pub rsp_text: Option<String>,
    #[serde(rename = "AuthCode")]
    pub auth_code: Option<String>,
    #[serde(rename = "AVSRsltCode")]
    pub avs_rslt_code: Option<String>,
    #[serde(rename = "CVVRsltCode")]
    pub cvv_rslt_code: Option<String>,
    #[serde(rename = "RefNbr")]
    pub ref_nbr: Option<String>,
}

/// Content of `<Ver1.0>` in the POS gateway answer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HpsResponse {
    pub header: HpsResponseHeader,
    pub transaction: Option<serde_json::Value>,
}

pub type HpsPaymentsResponse = HpsResponse;
pub type HpsCaptureResponse = HpsResponse;
pub type HpsVoidResponse = HpsResponse;
pub type HpsRefundResponse = HpsResponse;

fn gateway_error_code(code: &str) -> Option<StandardErrorCode> {
    match code {
        "-2" => Some(StandardErrorCode::ConfigError),
        "1" | "30" => Some(StandardErrorCode::ProcessingError),
        _ => None,
    }
}

fn issuer_error_code(code: &str) -> Option<StandardErrorCode> {
    match code {
        "14" => Some(StandardErrorCode::InvalidNumber),
        "54" => Some(StandardErrorCode::ExpiredCard),
        "55" | "75" => Some(StandardErrorCode::IncorrectPin),
        "04" | "07" | "41" | "43" => Some(StandardErrorCode::PickupCard),
        "05" | "51" | "57" | "61" | "62" | "65" => Some(StandardErrorCode::CardDeclined),
        "01" | "02" => Some(StandardErrorCode::CallIssuer),
        "N7" | "EB" => Some(StandardErrorCode::IncorrectCvc),
        "13" => Some(StandardErrorCode::InvalidAmount),
        "12" | "91" | "96" => Some(StandardErrorCode::ProcessingError),
        _ => None,
    }
}

impl HpsResponse {
    pub fn transaction_result(&self) -> Option<HpsTransactionResult> {
        let service = self.transaction.as_ref()?.as_object()?.values().next()?;
        service
            .is_object()
            .then(|| serde_json::from_value(service.clone()).ok())
            .flatten()
    }

    fn gateway_accepted(&self) -> bool {
        self.header.gateway_rsp_code.as_deref() == Some("0")
    }

    pub fn is_success(&self) -> bool {
        self.gateway_accepted()
            && self
                .transaction_result()
                .and_then(|result| result.rsp_code)
                .map_or(true, |code| ISSUER_SUCCESS_CODES.contains(&code.as_str()))
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let issuer = self.transaction_result().unwrap_or_default();
        let (code, message, standard_error_code) = if !self.gateway_accepted() {
            let code = self
                .header
                .gateway_rsp_code
                .clone()
                .unwrap_or_else(|| NO_ERROR_CODE.to_string());
            let standard = gateway_error_code(&code);
            (code, self.header.gateway_rsp_msg.clone(), standard)
        } else {
            let code = issuer
                .rsp_code
                .clone()
                .unwrap_or_else(|| NO_ERROR_CODE.to_string());
            let standard = issuer_error_code(&code);
            (code, issuer.rsp_text.clone(), standard)
        };
        ErrorResponse {
            reason: self.header.gateway_rsp_msg.clone(),
            connector_transaction_id: self.header.gateway_txn_id.clone(),
            standard_error_code,
            ..ErrorResponse::decline(
                code,
                message.unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                status_code,
            )
        }
    }

    fn transaction_response(&self, status_code: u16) -> Result<PaymentsResponseData, Error> {
        let gateway_txn_id = self
            .header
            .gateway_txn_id
            .clone()
            .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?;
        let issuer = self.transaction_result();
        let issuer_ref = issuer.as_ref();
        Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(gateway_txn_id),
            connector_metadata: serde_json::to_value(self).ok(),
            network_txn_id: None,
            connector_response_reference_id: issuer_ref.and_then(|result| result.auth_code.clone()),
            // "0" means AVS was not requested
            avs_result: AvsResult::from_code(
                issuer_ref
                    .and_then(|result| result.avs_rslt_code.as_deref())
                    .filter(|code| *code != "0"),
            ),
            cvv_result: CvvResult::from_code(
                issuer_ref.and_then(|result| result.cvv_rslt_code.as_deref()),
            ),
            message: issuer_ref
                .and_then(|result| result.rsp_text.clone())
                .or_else(|| self.header.gateway_rsp_msg.clone()),
            status_code,
        })
    }
}

fn payment_router_data<F, Req>(
    response: HpsResponse,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    http_code: u16,
    approved_status: AttemptStatus,
    failed_status: AttemptStatus,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    if response.is_success() {
        Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(approved_status),
            response: Ok(response.transaction_response(http_code)?),
            ..router_data
        })
    } else {
        tracing::info!(
            gateway_rsp_code = ?response.header.gateway_rsp_code,
            "heartland transaction not approved"
        );
        Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(failed_status),
            response: Err(response.error_response(http_code)),
            ..router_data
        })
    }
}

impl
    TryFrom<
        ResponseRouterData<
            HpsPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            HpsPaymentsResponse,
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
            HpsCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            HpsCaptureResponse,
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
            HpsVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            HpsVoidResponse,
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
            HpsRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            HpsRefundResponse,
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
                .header
                .gateway_txn_id
                .clone()
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
