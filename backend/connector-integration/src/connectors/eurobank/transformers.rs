use common_enums::{AttemptStatus, Currency, RefundStatus};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    pii::Email,
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
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::EurobankRouterData;
use crate::{
    types::ResponseRouterData,
    utils::{self, xml_utils},
};

const CONNECTOR: &str = "eurobank";

type Error = error_stack::Report<errors::ConnectorError>;

pub struct EurobankAuthType {
    pub(super) merchant_id: Secret<String>,
    pub(super) password: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for EurobankAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                merchant_id: api_key.to_owned(),
                password: key1.to_owned(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum MessageType {
    Purchase,
    PreAuth,
    Capture,
    Refund,
    Cancel,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Authentication {
    #[serde(rename = "MerchantID")]
    pub merchant_id: Secret<String>,
    pub password: Secret<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderInfo {
    pub amount: MinorUnit,
    pub merchant_ref: String,
    pub merchant_desc: Option<String>,
    /// ISO-4217 numeric code
    pub currency: &'static str,
    pub customer_email: Option<Email>,
}

#[derive(Debug, Serialize)]
pub struct PaymentInfo {
    #[serde(rename = "CCN")]
    pub ccn: Secret<String>,
    #[serde(rename = "Expdate")]
    pub expdate: Secret<String>,
    #[serde(rename = "CVCCVV")]
    pub cvc_cvv: Secret<String>,
    #[serde(rename = "InstallmentOffset")]
    pub installment_offset: u32,
    #[serde(rename = "InstallmentPeriod")]
    pub installment_period: u32,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    #[serde(rename = "Type")]
    pub message_type: MessageType,
    pub authentication: Authentication,
    pub order_info: OrderInfo,
    pub payment_info: Option<PaymentInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct JProxyPayLink {
    pub message: Message,
}

/// ProxyPay reads the document from the `APACScommand` form field.
#[derive(Debug, Serialize)]
pub struct EurobankRequest {
    #[serde(rename = "APACScommand")]
    pub apacs_command: Secret<String>,
}

pub type EurobankPaymentsRequest = EurobankRequest;
pub type EurobankCaptureRequest = EurobankRequest;
pub type EurobankVoidRequest = EurobankRequest;
pub type EurobankRefundRequest = EurobankRequest;

impl EurobankRequest {
    fn new(
        message_type: MessageType,
        auth_type: &ConnectorAuthType,
        order_info: OrderInfo,
        payment_info: Option<PaymentInfo>,
    ) -> Result<Self, Error> {
        let auth = EurobankAuthType::try_from(auth_type)?;
        let document = JProxyPayLink {
            message: Message {
                message_type,
                authentication: Authentication {
                    merchant_id: auth.merchant_id,
                    password: auth.password,
                },
                order_info,
                payment_info,
            },
        };
        Ok(Self {
            apacs_command: Secret::new(xml_utils::to_xml_element("JProxyPayLink", &document)?),
        })
    }
}

fn referencing_order(merchant_ref: String, amount: MinorUnit, currency: Currency) -> OrderInfo {
    OrderInfo {
        amount,
        merchant_ref,
        merchant_desc: None,
        currency: currency.iso_4217(),
        customer_email: None,
    }
}

impl TryFrom<EurobankRouterData<RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>>
    for EurobankRequest
{
    type Error = Error;
    fn try_from(
        item: EurobankRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let message_type = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            MessageType::Purchase
        } else {
            MessageType::PreAuth
        };

        let card = match &request.payment_method_data {
            PaymentMethodData::Card(card) => card,
            PaymentMethodData::CardToken(_) => Err(errors::ConnectorError::NotImplemented(
                utils::get_unimplemented_payment_method_error_message(CONNECTOR),
            ))?,
        };
        let installments = request
            .get_metadata_string("installments")
            .map(|value| value.parse::<u32>())
            .transpose()
            .change_context(errors::ConnectorError::InvalidDataFormat {
                field_name: "metadata.installments",
            })?
            .unwrap_or(0);

        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;

        let order_info = OrderInfo {
            amount,
            merchant_ref: utils::truncate(
                &router_data.resource_common_data.connector_request_reference_id,
                50,
            ),
            merchant_desc: utils::truncate_optional(
                router_data.resource_common_data.description.as_deref(),
                250,
            ),
            currency: request.currency.iso_4217(),
            customer_email: request.email.clone(),
        };
        let payment_info = PaymentInfo {
            ccn: Secret::new(card.card_number.get_card_no()),
            expdate: card.get_expiry_date_as_mmyy()?,
            cvc_cvv: card.card_cvc.clone(),
            installment_offset: 0,
            installment_period: installments,
        };

        Self::new(
            message_type,
            &router_data.connector_auth_type,
            order_info,
            Some(payment_info),
        )
    }
}

impl TryFrom<EurobankRouterData<RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>>>
    for EurobankRequest
{
    type Error = Error;
    fn try_from(
        item: EurobankRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Self::new(
            MessageType::Capture,
            &item.router_data.connector_auth_type,
            referencing_order(
                request.connector_transaction_id.get_connector_transaction_id()?,
                amount,
                request.currency,
            ),
            None,
        )
    }
}

impl TryFrom<EurobankRouterData<RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>>
    for EurobankRequest
{
    type Error = Error;
    fn try_from(
        item: EurobankRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let minor_amount = request.minor_amount.ok_or_else(utils::missing_field_err("amount"))?;
        let currency = request.currency.ok_or_else(utils::missing_field_err("currency"))?;
        let amount = item
            .connector
            .amount_converter
            .convert(minor_amount, currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Self::new(
            MessageType::Cancel,
            &item.router_data.connector_auth_type,
            referencing_order(request.connector_transaction_id.clone(), amount, currency),
            None,
        )
    }
}

impl TryFrom<EurobankRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for EurobankRequest
{
    type Error = Error;
    fn try_from(
        item: EurobankRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Self::new(
            MessageType::Refund,
            &item.router_data.connector_auth_type,
            referencing_order(request.connector_transaction_id.clone(), amount, request.currency),
            None,
        )
    }
}

/// `<RESPONSE>` document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct EurobankResponse {
    pub errorcode: Option<String>,
    pub errormessage: Option<String>,
    pub reference: Option<String>,
    pub proxypayref: Option<String>,
    pub sequence: Option<String>,
}

pub type EurobankPaymentsResponse = EurobankResponse;
pub type EurobankCaptureResponse = EurobankResponse;
pub type EurobankVoidResponse = EurobankResponse;
pub type EurobankRefundResponse = EurobankResponse;

impl EurobankResponse {
    pub fn is_success(&self) -> bool {
        self.errorcode.as_deref().map(str::trim) == Some("0")
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let message = self
            .errormessage
            .clone()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string());
        ErrorResponse {
            connector_transaction_id: self.proxypayref.clone(),
            ..ErrorResponse::decline(
                self.errorcode
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
                message,
                status_code,
            )
        }
    }

    fn transaction_response(&self, merchant_ref: String, status_code: u16) -> PaymentsResponseData {
        PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(merchant_ref),
            connector_metadata: serde_json::to_value(self).ok(),
            network_txn_id: None,
            connector_response_reference_id: self.proxypayref.clone(),
            avs_result: None,
            cvv_result: None,
            message: self.errormessage.clone().filter(|message| !message.is_empty()),
            status_code,
        }
    }
}

fn payment_router_data<F, Req>(
    item: ResponseRouterData<EurobankResponse, RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>>,
    merchant_ref: String,
    approved_status: AttemptStatus,
    failed_status: AttemptStatus,
) -> RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData> {
    let ResponseRouterData {
        response,
        router_data,
        http_code,
    } = item;
    if response.is_success() {
        RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(approved_status),
            response: Ok(response.transaction_response(merchant_ref, http_code)),
            ..router_data
        }
    } else {
        tracing::info!(errorcode = ?response.errorcode, "eurobank request rejected");
        RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(failed_status),
            response: Err(response.error_response(http_code)),
            ..router_data
        }
    }
}

impl
    TryFrom<
        ResponseRouterData<
            EurobankPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EurobankPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let approved = if utils::is_auto_capture(item.router_data.request.capture_method, CONNECTOR)? {
            AttemptStatus::Charged
        } else {
            AttemptStatus::Authorized
        };
        let merchant_ref = utils::truncate(
            &item.router_data.resource_common_data.connector_request_reference_id,
            50,
        );
        Ok(payment_router_data(item, merchant_ref, approved, AttemptStatus::Failure))
    }
}

impl
    TryFrom<
        ResponseRouterData<
            EurobankCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EurobankCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let merchant_ref = item
            .router_data
            .request
            .connector_transaction_id
            .get_connector_transaction_id()?;
        Ok(payment_router_data(
            item,
            merchant_ref,
            AttemptStatus::Charged,
            AttemptStatus::CaptureFailed,
        ))
    }
}

impl
    TryFrom<
        ResponseRouterData<
            EurobankVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EurobankVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let merchant_ref = item.router_data.request.connector_transaction_id.clone();
        Ok(payment_router_data(
            item,
            merchant_ref,
            AttemptStatus::Voided,
            AttemptStatus::VoidFailed,
        ))
    }
}

impl
    TryFrom<
        ResponseRouterData<
            EurobankRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EurobankRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let (refund_status, result) = if response.is_success() {
            let connector_refund_id = response
                .proxypayref
                .clone()
                .filter(|reference| !reference.is_empty())
                .unwrap_or_else(|| router_data.request.refund_id.clone());
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
                status: refund_status,
                ..router_data.resource_common_data
            },
            response: result,
            ..router_data
        })
    }
}
