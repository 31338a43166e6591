use common_enums::{AttemptStatus, Currency, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    pii::{Email, IpAddress},
    types::StringMajorUnit,
};
use domain_types::{
    card_verification::{AvsResult, CvvResult},
    connector_flow::{Authorize, Capture, PSync, RSync, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, PaymentsSyncData, RefundFlowData, RefundSyncData, RefundsData,
        RefundsResponseData, ResponseId,
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

use super::ElavonRouterData;
use crate::{
    types::ResponseRouterData,
    utils::{self, xml_utils},
};

const CONNECTOR: &str = "elavon";

type Error = error_stack::Report<errors::ConnectorError>;

#[derive(Debug, Clone)]
pub struct ElavonAuthType {
    pub(super) ssl_merchant_id: Secret<String>,
    pub(super) ssl_user_id: Secret<String>,
    pub(super) ssl_pin: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for ElavonAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Ok(Self {
                ssl_merchant_id: api_key.clone(),
                ssl_user_id: key1.clone(),
                ssl_pin: api_secret.clone(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    CcSale,
    CcAuthOnly,
    CcComplete,
    CcReturn,
    CcVoid,
    TxnQuery,
}

/// The `<txn>` document. Element order follows the Converge examples.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ElavonTransaction {
    pub ssl_merchant_id: Secret<String>,
    pub ssl_user_id: Secret<String>,
    pub ssl_pin: Secret<String>,
    pub ssl_transaction_type: TransactionType,
    pub ssl_txn_id: Option<String>,
    pub ssl_amount: Option<StringMajorUnit>,
    pub ssl_transaction_currency: Option<Currency>,
    pub ssl_card_number: Option<Secret<String>>,
    pub ssl_token: Option<Secret<String>>,
    pub ssl_exp_date: Option<Secret<String>>,
    pub ssl_cvv2cvc2_indicator: Option<u8>,
    pub ssl_cvv2cvc2: Option<Secret<String>>,
    pub ssl_first_name: Option<Secret<String>>,
    pub ssl_last_name: Option<Secret<String>>,
    pub ssl_avs_address: Option<Secret<String>>,
    pub ssl_address2: Option<Secret<String>>,
    pub ssl_city: Option<String>,
    pub ssl_state: Option<Secret<String>>,
    pub ssl_avs_zip: Option<Secret<String>>,
    pub ssl_country: Option<String>,
    pub ssl_phone: Option<Secret<String>>,
    pub ssl_email: Option<Email>,
    pub ssl_cardholder_ip: Option<Secret<String, IpAddress>>,
    pub ssl_description: Option<String>,
    pub ssl_invoice_number: Option<String>,
    pub ssl_customer_code: Option<String>,
}

impl ElavonTransaction {
    fn new(ssl_transaction_type: TransactionType, auth: ElavonAuthType) -> Self {
        Self {
            ssl_merchant_id: auth.ssl_merchant_id,
            ssl_user_id: auth.ssl_user_id,
            ssl_pin: auth.ssl_pin,
            ssl_transaction_type,
            ssl_txn_id: None,
            ssl_amount: None,
            ssl_transaction_currency: None,
            ssl_card_number: None,
            ssl_token: None,
            ssl_exp_date: None,
            ssl_cvv2cvc2_indicator: None,
            ssl_cvv2cvc2: None,
            ssl_first_name: None,
            ssl_last_name: None,
            ssl_avs_address: None,
            ssl_address2: None,
            ssl_city: None,
            ssl_state: None,
            ssl_avs_zip: None,
            ssl_country: None,
            ssl_phone: None,
            ssl_email: None,
            ssl_cardholder_ip: None,
            ssl_description: None,
            ssl_invoice_number: None,
            ssl_customer_code: None,
        }
    }

    fn referencing(
        ssl_transaction_type: TransactionType,
        auth: &ConnectorAuthType,
        ssl_txn_id: String,
    ) -> Result<Self, Error> {
        let auth = ElavonAuthType::try_from(auth)?;
        Ok(Self {
            ssl_txn_id: Some(ssl_txn_id),
            ..Self::new(ssl_transaction_type, auth)
        })
    }
}

fn truncate_secret(value: Option<&Secret<String>>, max_chars: usize) -> Option<Secret<String>> {
    value.map(|value| Secret::new(utils::truncate(value.peek(), max_chars)))
}

// Converge reads the document from the `xmldata` form field.
macro_rules! xmldata_requests {
    ($($request:ident),+) => {
        $(
            #[derive(Debug, Serialize)]
            pub struct $request {
                pub xmldata: Secret<String>,
            }

            impl $request {
                fn from_transaction(transaction: &ElavonTransaction) -> Result<Self, Error> {
                    Ok(Self {
                        xmldata: Secret::new(xml_utils::to_xml_element("txn", transaction)?),
                    })
                }
            }
        )+
    };
}

xmldata_requests!(
    ElavonPaymentsRequest,
    ElavonCaptureRequest,
    ElavonVoidRequest,
    ElavonRefundRequest,
    ElavonPSyncRequest,
    ElavonRSyncRequest
);

impl
    TryFrom<
        ElavonRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for ElavonPaymentsRequest
{
    type Error = Error;

    fn try_from(
        item: ElavonRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let auth = ElavonAuthType::try_from(&router_data.connector_auth_type)?;

        let transaction_type = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            TransactionType::CcSale
        } else {
            TransactionType::CcAuthOnly
        };
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;

        let mut transaction = ElavonTransaction::new(transaction_type, auth);
        transaction.ssl_amount = Some(amount);
        transaction.ssl_transaction_currency = Some(request.currency);

        let (first_name, last_name) = match &request.payment_method_data {
            PaymentMethodData::Card(card) => {
                transaction.ssl_card_number = Some(Secret::new(card.card_number.get_card_no()));
                transaction.ssl_exp_date = Some(card.get_expiry_date_as_mmyy()?);
                if !card.card_cvc.peek().is_empty() {
                    transaction.ssl_cvv2cvc2_indicator = Some(1);
                    transaction.ssl_cvv2cvc2 = Some(card.card_cvc.clone());
                }
                card.get_first_and_last_name()
            }
            PaymentMethodData::CardToken(token) => {
                transaction.ssl_token = Some(token.token.clone());
                (None, None)
            }
        };
        transaction.ssl_first_name = truncate_secret(first_name.as_ref(), 20);
        transaction.ssl_last_name = truncate_secret(last_name.as_ref(), 30);

        if let Some(billing) = router_data.resource_common_data.get_optional_billing_address() {
            transaction.ssl_avs_address = truncate_secret(billing.line1.as_ref(), 30);
            transaction.ssl_address2 = truncate_secret(billing.line2.as_ref(), 30);
            transaction.ssl_city = utils::truncate_optional(billing.city.as_deref(), 30);
            transaction.ssl_state = truncate_secret(billing.state.as_ref(), 30);
            transaction.ssl_avs_zip = billing.zip.as_ref().map(|zip| {
                let zip: String = zip.peek().chars().filter(char::is_ascii_alphanumeric).collect();
                Secret::new(utils::truncate(&zip, 9))
            });
            transaction.ssl_country = billing.country.map(|country| country.to_alpha3().to_string());
        }
        transaction.ssl_phone = router_data
            .resource_common_data
            .address
            .get_payment_billing()
            .and_then(|billing| billing.phone.as_ref())
            .and_then(|phone| truncate_secret(phone.number.as_ref(), 20));
        transaction.ssl_email = request.email.clone();
        transaction.ssl_cardholder_ip = request.get_ip_address_as_optional();
        transaction.ssl_description = utils::truncate_optional(
            router_data.resource_common_data.description.as_deref(),
            255,
        );
        transaction.ssl_invoice_number = Some(utils::truncate(
            request
                .merchant_order_reference_id
                .as_deref()
                .unwrap_or(&router_data.resource_common_data.connector_request_reference_id),
            25,
        ));
        transaction.ssl_customer_code = utils::truncate_optional(request.customer_id.as_deref(), 17);

        Self::from_transaction(&transaction)
    }
}

impl
    TryFrom<
        ElavonRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for ElavonCaptureRequest
{
    type Error = Error;

    fn try_from(
        item: ElavonRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        let mut transaction = ElavonTransaction::referencing(
            TransactionType::CcComplete,
            &item.router_data.connector_auth_type,
            request.connector_transaction_id.get_connector_transaction_id()?,
        )?;
        transaction.ssl_amount = Some(amount);
        Self::from_transaction(&transaction)
    }
}

impl
    TryFrom<
        ElavonRouterData<RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>,
    > for ElavonVoidRequest
{
    type Error = Error;

    fn try_from(
        item: ElavonRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let transaction = ElavonTransaction::referencing(
            TransactionType::CcVoid,
            &item.router_data.connector_auth_type,
            item.router_data.request.connector_transaction_id.clone(),
        )?;
        Self::from_transaction(&transaction)
    }
}

impl
    TryFrom<
        ElavonRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>,
    > for ElavonRefundRequest
{
    type Error = Error;

    fn try_from(
        item: ElavonRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        let mut transaction = ElavonTransaction::referencing(
            TransactionType::CcReturn,
            &item.router_data.connector_auth_type,
            request.connector_transaction_id.clone(),
        )?;
        transaction.ssl_amount = Some(amount);
        Self::from_transaction(&transaction)
    }
}

impl
    TryFrom<
        ElavonRouterData<RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>>,
    > for ElavonPSyncRequest
{
    type Error = Error;

    fn try_from(
        item: ElavonRouterData<
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let transaction = ElavonTransaction::referencing(
            TransactionType::TxnQuery,
            &item.router_data.connector_auth_type,
            item.router_data
                .request
                .connector_transaction_id
                .get_connector_transaction_id()?,
        )?;
        Self::from_transaction(&transaction)
    }
}

impl
    TryFrom<
        ElavonRouterData<RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>>,
    > for ElavonRSyncRequest
{
    type Error = Error;

    fn try_from(
        item: ElavonRouterData<
            RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let transaction = ElavonTransaction::referencing(
            TransactionType::TxnQuery,
            &item.router_data.connector_auth_type,
            item.router_data.request.connector_refund_id.clone(),
        )?;
        Self::from_transaction(&transaction)
    }
}

/// Flattened `<txn>` answer. Gateway level failures carry `errorCode`
/// instead of `ssl_result`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElavonResponse {
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "errorName")]
    pub error_name: Option<String>,
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
    pub ssl_result: Option<String>,
    pub ssl_result_message: Option<String>,
    pub ssl_txn_id: Option<String>,
    pub ssl_approval_code: Option<String>,
    pub ssl_avs_response: Option<String>,
    pub ssl_cvv2_response: Option<String>,
    pub ssl_token: Option<Secret<String>>,
    pub ssl_transaction_type: Option<String>,
    pub ssl_trans_status: Option<String>,
    pub ssl_amount: Option<String>,
}

pub type ElavonPaymentsResponse = ElavonResponse;
pub type ElavonCaptureResponse = ElavonResponse;
pub type ElavonVoidResponse = ElavonResponse;
pub type ElavonRefundResponse = ElavonResponse;
pub type ElavonPSyncResponse = ElavonResponse;
pub type ElavonRSyncResponse = ElavonResponse;

fn standard_error_code(
    error_code: Option<&str>,
    result_message: Option<&str>,
) -> Option<StandardErrorCode> {
    match error_code {
        Some("5000") => return Some(StandardErrorCode::InvalidNumber),
        Some("5001") => return Some(StandardErrorCode::InvalidExpiryDate),
        _ => {}
    }
    let message = result_message?.trim().to_ascii_uppercase();
    match message.as_str() {
        "DECLINED" | "DECLINED-HELP 9999" | "DECLINED CVV2" => Some(StandardErrorCode::CardDeclined),
        "EXPIRED CARD" => Some(StandardErrorCode::ExpiredCard),
        "PICK UP CARD" => Some(StandardErrorCode::PickupCard),
        "CALL AUTH CENTER" | "CALL REF" => Some(StandardErrorCode::CallIssuer),
        "INVALID CARD" | "CARD NOT ALLOWED" => Some(StandardErrorCode::InvalidNumber),
        "AMOUNT ERROR" => Some(StandardErrorCode::InvalidAmount),
        "INCORRECT PIN" => Some(StandardErrorCode::IncorrectPin),
        _ => None,
    }
}

impl ElavonResponse {
    pub fn is_approved(&self) -> bool {
        self.error_code.is_none() && self.ssl_result.as_deref() == Some("0")
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let code = self
            .error_code
            .clone()
            .or_else(|| self.ssl_result.clone())
            .unwrap_or_else(|| NO_ERROR_CODE.to_string());
        let message = self
            .error_message
            .clone()
            .or_else(|| self.ssl_result_message.clone())
            .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string());
        ErrorResponse {
            reason: self
                .error_name
                .clone()
                .or_else(|| self.ssl_result_message.clone()),
            connector_transaction_id: self.ssl_txn_id.clone(),
            standard_error_code: standard_error_code(
                self.error_code.as_deref(),
                self.ssl_result_message.as_deref(),
            ),
            ..ErrorResponse::decline(code, message, status_code)
        }
    }

    fn transaction_response(&self, status_code: u16) -> Result<PaymentsResponseData, Error> {
        let txn_id = self
            .ssl_txn_id
            .clone()
            .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?;
        Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(txn_id),
            connector_metadata: serde_json::to_value(self).ok(),
            network_txn_id: None,
            connector_response_reference_id: self.ssl_approval_code.clone(),
            avs_result: AvsResult::from_code(self.ssl_avs_response.as_deref()),
            cvv_result: CvvResult::from_code(self.ssl_cvv2_response.as_deref()),
            message: self.ssl_result_message.clone(),
            status_code,
        })
    }

    /// Status of a queried payment from its settlement state.
    fn payment_status(&self) -> AttemptStatus {
        let transaction_type = self
            .ssl_transaction_type
            .as_deref()
            .unwrap_or_default()
            .to_ascii_uppercase();
        match self.ssl_trans_status.as_deref() {
            Some("STL") => AttemptStatus::Charged,
            Some("PEN") if transaction_type == "AUTHONLY" => AttemptStatus::Authorized,
            Some("PEN") => AttemptStatus::Charged,
            Some("OPN") => AttemptStatus::Authorized,
            Some("PST") | Some("FPR") | Some("PRE") => AttemptStatus::Failure,
            _ => AttemptStatus::Pending,
        }
    }

    fn refund_status(&self) -> RefundStatus {
        match self.ssl_trans_status.as_deref() {
            Some("STL") | Some("PEN") => RefundStatus::Success,
            Some("PST") | Some("FPR") | Some("PRE") => RefundStatus::Failure,
            _ => RefundStatus::Pending,
        }
    }
}

fn payment_router_data<F, Req>(
    item: ResponseRouterData<ElavonResponse, RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>>,
    approved_status: impl FnOnce(&ElavonResponse) -> AttemptStatus,
    failed_status: AttemptStatus,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    let ResponseRouterData {
        response,
        router_data,
        http_code,
    } = item;
    if response.is_approved() {
        let status = approved_status(&response);
        Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(status),
            response: Ok(response.transaction_response(http_code)?),
            ..router_data
        })
    } else {
        tracing::info!(
            error_code = ?response.error_code,
            ssl_result = ?response.ssl_result,
            "elavon transaction not approved"
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
            ElavonPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            ElavonPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let status = if utils::is_auto_capture(item.router_data.request.capture_method, CONNECTOR)? {
            AttemptStatus::Charged
        } else {
            AttemptStatus::Authorized
        };
        payment_router_data(item, |_| status, AttemptStatus::Failure)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            ElavonCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            ElavonCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        payment_router_data(item, |_| AttemptStatus::Charged, AttemptStatus::CaptureFailed)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            ElavonVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            ElavonVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        payment_router_data(item, |_| AttemptStatus::Voided, AttemptStatus::VoidFailed)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            ElavonPSyncResponse,
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    > for RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            ElavonPSyncResponse,
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        // txnquery answers without ssl_result; a missing error code means it was found
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        if response.error_code.is_some() {
            return Ok(Self {
                response: Err(response.error_response(http_code)),
                ..router_data
            });
        }
        let status = response.payment_status();
        Ok(Self {
            resource_common_data: router_data.resource_common_data.set_status(status),
            response: Ok(response.transaction_response(http_code)?),
            ..router_data
        })
    }
}

fn refund_router_data<F, Req>(
    item: ResponseRouterData<ElavonResponse, RouterDataV2<F, RefundFlowData, Req, RefundsResponseData>>,
    status_of: impl FnOnce(&ElavonResponse) -> Option<RefundStatus>,
) -> Result<RouterDataV2<F, RefundFlowData, Req, RefundsResponseData>, Error> {
    let ResponseRouterData {
        response,
        router_data,
        http_code,
    } = item;
    match status_of(&response) {
        Some(refund_status) => {
            let connector_refund_id = response
                .ssl_txn_id
                .clone()
                .ok_or(errors::ConnectorError::MissingConnectorRefundID)?;
            Ok(RouterDataV2 {
                resource_common_data: RefundFlowData {
                    status: refund_status,
                    ..router_data.resource_common_data
                },
                response: Ok(RefundsResponseData {
                    connector_refund_id,
                    refund_status,
                    status_code: http_code,
                }),
                ..router_data
            })
        }
        None => Ok(RouterDataV2 {
            resource_common_data: RefundFlowData {
                status: RefundStatus::Failure,
                ..router_data.resource_common_data
            },
            response: Err(response.error_response(http_code)),
            ..router_data
        }),
    }
}

impl
    TryFrom<
        ResponseRouterData<
            ElavonRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            ElavonRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        refund_router_data(item, |response| {
            response.is_approved().then_some(RefundStatus::Success)
        })
    }
}

impl
    TryFrom<
        ResponseRouterData<
            ElavonRSyncResponse,
            RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>,
        >,
    > for RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            ElavonRSyncResponse,
            RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        refund_router_data(item, |response| {
            response
                .error_code
                .is_none()
                .then(|| response.refund_status())
        })
    }
}
