use common_enums::{AttemptStatus, CaptureMethod, Currency, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    pii::{Email, IpAddress},
    types::MinorUnit,
};
use domain_types::{
    connector_flow::{Authorize, Capture, PSync, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, PaymentsSyncData, RefundFlowData, RefundsData, RefundsResponseData,
        ResponseId,
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

use super::EwayRouterData;
use crate::{types::ResponseRouterData, utils};

const CONNECTOR: &str = "eway";

type Error = error_stack::Report<errors::ConnectorError>;

pub struct EwayAuthType {
    pub(super) api_key: Secret<String>,
    pub(super) password: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for EwayAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                api_key: api_key.to_owned(),
                password: key1.to_owned(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

/// Rapid response message codes and their texts.
static MESSAGES: &[(&str, &str)] = &[
    ("A2000", "Transaction Approved"),
    ("A2008", "Honour With Identification"),
    ("A2010", "Approved For Partial Amount"),
    ("A2011", "Approved, VIP"),
    ("A2016", "Approved, Update Track 3"),
    ("D4401", "Refer to Issuer"),
    ("D4402", "Refer to Issuer, special"),
    ("D4403", "No Merchant"),
    ("D4404", "Pick Up Card"),
    ("D4405", "Do Not Honour"),
    ("D4406", "Error"),
    ("D4407", "Pick Up Card, Special"),
    ("D4409", "Request In Progress"),
    ("D4412", "Invalid Transaction"),
    ("D4413", "Invalid Amount"),
    ("D4414", "Invalid Card Number"),
    ("D4415", "No Issuer"),
    ("D4419", "Re-enter Last Transaction"),
    ("D4421", "No Action Taken"),
    ("D4422", "Suspected Malfunction"),
    ("D4423", "Unacceptable Transaction Fees"),
    ("D4425", "Unable to Locate Record On File"),
    ("D4430", "Format Error"),
    ("D4431", "Bank Not Supported By Switch"),
    ("D4433", "Expired Card, Capture"),
    ("D4434", "Suspected Fraud, Retain Card"),
    ("D4435", "Card Acceptor, Contact Acquirer, Retain Card"),
    ("D4436", "Restricted Card, Retain Card"),
    ("D4437", "Contact Acquirer Security Department, Retain Card"),
    ("D4438", "PIN Tries Exceeded, Capture"),
    ("D4439", "No Credit Account"),
    ("D4440", "Function Not Supported"),
    ("D4441", "Lost Card"),
    ("D4442", "No Universal Account"),
    ("D4443", "Stolen Card"),
    ("D4444", "No Investment Account"),
    ("D4451", "Insufficient Funds"),
    ("D4452", "No Cheque Account"),
    ("D4453", "No Savings Account"),
    ("D4454", "Expired Card"),
    ("D4455", "Incorrect PIN"),
    ("D4456", "No Card Record"),
    ("D4457", "Function Not Permitted to Cardholder"),
    ("D4458", "Function Not Permitted to Terminal"),
    ("D4459", "Suspected Fraud"),
    ("D4460", "Acceptor Contact Acquirer"),
    ("D4461", "Exceeds Withdrawal Limit"),
    ("D4462", "Restricted Card"),
    ("D4463", "Security Violation"),
    ("D4464", "Original Amount Incorrect"),
    ("D4466", "Acceptor Contact Acquirer, Security"),
    ("D4467", "Capture Card"),
    ("D4475", "PIN Tries Exceeded"),
    ("D4482", "CVV Validation Error"),
    ("D4490", "Cut off In Progress"),
    ("D4491", "Card Issuer Unavailable"),
    ("D4492", "Unable To Route Transaction"),
    ("D4493", "Cannot Complete, Violation Of The Law"),
    ("D4494", "Duplicate Transaction"),
    ("D4496", "System Error"),
    ("D4499", "Invalid Transaction for Auth/Void"),
    ("S5000", "System Error"),
    ("S5085", "Started 3dSecure"),
    ("S5086", "Routed 3dSecure"),
    ("S5087", "Completed 3dSecure"),
    ("S5099", "Incomplete (Access Code in progress/incomplete)"),
    ("V6000", "Validation error"),
    ("V6001", "Invalid CustomerIP"),
    ("V6002", "Invalid DeviceID"),
    ("V6010", "Invalid TransactionType, account not certified for eCome only MOTO or Recurring available"),
    ("V6011", "Invalid Payment TotalAmount"),
    ("V6021", "EWAY_CARDHOLDERNAME Required"),
    ("V6022", "EWAY_CARDNUMBER Required"),
    ("V6023", "EWAY_CARDCVN Required"),
    ("V6033", "Invalid Expiry Date"),
    ("V6040", "Invalid TokenCustomerID"),
    ("V6100", "Invalid EWAY_CARDNAME"),
    ("V6101", "Invalid EWAY_CARDEXPIRYMONTH"),
    ("V6102", "Invalid EWAY_CARDEXPIRYYEAR"),
    ("V6106", "Invalid EWAY_CARDCVN"),
    ("V6110", "Invalid EWAY_CARDNUMBER"),
    ("V6111", "Unauthorised API Access, Account Not PCI Certified"),
];

fn message_for(code: &str) -> String {
    MESSAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| (*text).to_string())
        .unwrap_or_else(|| code.to_string())
}

fn standard_error_code(code: &str) -> Option<StandardErrorCode> {
    match code {
        "D4405" | "D4451" | "D4457" | "D4461" | "D4462" | "D4436" => {
            Some(StandardErrorCode::CardDeclined)
        }
        "D4433" | "D4454" => Some(StandardErrorCode::ExpiredCard),
        "D4414" | "D4456" | "V6110" | "V6022" => Some(StandardErrorCode::InvalidNumber),
        "D4404" | "D4407" | "D4434" | "D4441" | "D4443" | "D4467" => {
            Some(StandardErrorCode::PickupCard)
        }
        "D4401" | "D4402" => Some(StandardErrorCode::CallIssuer),
        "D4438" | "D4455" | "D4475" => Some(StandardErrorCode::IncorrectPin),
        "D4413" | "D4464" | "V6011" => Some(StandardErrorCode::InvalidAmount),
        "D4482" => Some(StandardErrorCode::IncorrectCvc),
        "V6023" | "V6106" => Some(StandardErrorCode::InvalidCvc),
        "V6033" | "V6101" | "V6102" => Some(StandardErrorCode::InvalidExpiryDate),
        "D4406" | "D4422" | "D4491" | "D4496" | "S5000" => Some(StandardErrorCode::ProcessingError),
        "V6010" | "V6111" => Some(StandardErrorCode::ConfigError),
        _ => None,
    }
}

/// Splits a `"D4405,V6023"` style list.
fn codes(list: Option<&str>) -> Vec<String> {
    list.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn truncate_secret(value: Option<&Secret<String>>, max_chars: usize) -> Option<Secret<String>> {
    value.map(|value| Secret::new(utils::truncate(value.peek(), max_chars)))
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EwayMethod {
    ProcessPayment,
    Authorise,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayCardDetails {
    pub name: Option<Secret<String>>,
    pub number: Option<Secret<String>>,
    pub expiry_month: Option<Secret<String>>,
    pub expiry_year: Option<Secret<String>>,
    #[serde(rename = "CVN")]
    pub cvn: Option<Secret<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayCustomer {
    #[serde(rename = "TokenCustomerID")]
    pub token_customer_id: Option<Secret<String>>,
    pub reference: Option<String>,
    pub first_name: Option<Secret<String>>,
    pub last_name: Option<Secret<String>>,
    pub street1: Option<Secret<String>>,
    pub street2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub postal_code: Option<Secret<String>>,
    pub country: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<Secret<String>>,
    pub card_details: EwayCardDetails,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayPayment {
    pub total_amount: MinorUnit,
    pub invoice_number: Option<String>,
    pub invoice_description: Option<String>,
    pub invoice_reference: Option<String>,
    pub currency_code: Currency,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayPaymentsRequest {
    pub method: EwayMethod,
    pub transaction_type: String,
    pub customer: EwayCustomer,
    pub payment: EwayPayment,
    #[serde(rename = "CustomerIP")]
    pub customer_ip: Option<Secret<String, IpAddress>>,
}

impl TryFrom<EwayRouterData<RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>>
    for EwayPaymentsRequest
{
    type Error = Error;
    fn try_from(
        item: EwayRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let method = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            EwayMethod::ProcessPayment
        } else {
            EwayMethod::Authorise
        };

        let (card_details, token_customer_id) = match &request.payment_method_data {
            PaymentMethodData::Card(card) => (
                EwayCardDetails {
                    name: card.card_holder_name.clone(),
                    number: Some(Secret::new(card.card_number.get_card_no())),
                    expiry_month: Some(card.get_expiry_month_2_digit()),
                    expiry_year: Some(card.get_card_expiry_year_2_digit()?),
                    cvn: Some(card.card_cvc.clone()),
                },
                None,
            ),
            PaymentMethodData::CardToken(token) => (
                EwayCardDetails {
                    name: token.card_holder_name.clone(),
                    number: None,
                    expiry_month: None,
                    expiry_year: None,
                    cvn: None,
                },
                Some(token.token.clone()),
            ),
        };

        let billing = router_data.resource_common_data.get_optional_billing_address();
        let customer = EwayCustomer {
            token_customer_id,
            reference: utils::truncate_optional(request.customer_id.as_deref(), 50),
            first_name: truncate_secret(billing.and_then(|b| b.first_name.as_ref()), 50),
            last_name: truncate_secret(billing.and_then(|b| b.last_name.as_ref()), 50),
            street1: truncate_secret(billing.and_then(|b| b.line1.as_ref()), 50),
            street2: truncate_secret(billing.and_then(|b| b.line2.as_ref()), 50),
            city: utils::truncate_optional(billing.and_then(|b| b.city.as_deref()), 50),
            state: truncate_secret(billing.and_then(|b| b.state.as_ref()), 50),
            postal_code: truncate_secret(billing.and_then(|b| b.zip.as_ref()), 30),
            country: billing
                .and_then(|b| b.country)
                .map(|country| country.to_string().to_lowercase()),
            email: request.email.clone(),
            phone: router_data
                .resource_common_data
                .address
                .get_payment_billing()
                .and_then(|billing| billing.phone.as_ref())
                .and_then(|phone| truncate_secret(phone.number.as_ref(), 32)),
            card_details,
        };

        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;

        Ok(Self {
            method,
            transaction_type: "Purchase".to_string(),
            customer,
            payment: EwayPayment {
                total_amount: amount,
                invoice_number: Some(utils::truncate(
                    &router_data.resource_common_data.connector_request_reference_id,
                    12,
                )),
                invoice_description: utils::truncate_optional(
                    router_data.resource_common_data.description.as_deref(),
                    64,
                ),
                invoice_reference: utils::truncate_optional(
                    request.merchant_order_reference_id.as_deref(),
                    50,
                ),
                currency_code: request.currency,
            },
            customer_ip: request.get_ip_address_as_optional(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayAmount {
    pub total_amount: MinorUnit,
    pub currency_code: Currency,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayCaptureRequest {
    pub payment: EwayAmount,
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
}

impl TryFrom<EwayRouterData<RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>>>
    for EwayCaptureRequest
{
    type Error = Error;
    fn try_from(
        item: EwayRouterData<
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
            payment: EwayAmount {
                total_amount: amount,
                currency_code: request.currency,
            },
            transaction_id: request.connector_transaction_id.get_connector_transaction_id()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct EwayVoidRequest {
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
}

impl TryFrom<EwayRouterData<RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>>
    for EwayVoidRequest
{
    type Error = Error;
    fn try_from(
        item: EwayRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_id: item.router_data.request.connector_transaction_id.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayRefundDetails {
    pub total_amount: MinorUnit,
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
    pub currency_code: Currency,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayRefundRequest {
    pub refund: EwayRefundDetails,
}

impl TryFrom<EwayRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for EwayRefundRequest
{
    type Error = Error;
    fn try_from(
        item: EwayRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self {
            refund: EwayRefundDetails {
                total_amount: amount,
                transaction_id: request.connector_transaction_id.clone(),
                currency_code: request.currency,
            },
        })
    }
}

/// Transaction result shared by every Rapid endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayResponse {
    pub authorisation_code: Option<String>,
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    #[serde(rename = "TransactionID")]
    pub transaction_id: Option<i64>,
    pub transaction_status: Option<bool>,
    pub errors: Option<String>,
}

pub type EwayPaymentsResponse = EwayResponse;
pub type EwayCaptureResponse = EwayResponse;
pub type EwayVoidResponse = EwayResponse;
pub type EwayRefundResponse = EwayResponse;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EwayPSyncResponse {
    pub transactions: Vec<EwayResponse>,
    pub errors: Option<String>,
}

impl EwayResponse {
    pub fn is_success(&self) -> bool {
        self.transaction_status == Some(true) && codes(self.errors.as_deref()).is_empty()
    }

    fn transaction_id(&self) -> Option<String> {
        self.transaction_id.map(|id| id.to_string())
    }

    /// Response message codes first, then validation errors.
    fn all_codes(&self) -> Vec<String> {
        let mut all = codes(self.response_message.as_deref());
        all.extend(codes(self.errors.as_deref()));
        all
    }

    pub fn message(&self) -> Option<String> {
        let all = self.all_codes();
        (!all.is_empty()).then(|| {
            all.iter()
                .map(|code| message_for(code))
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let all = self.all_codes();
        let code = all
            .iter()
            .find(|code| !code.starts_with('A'))
            .cloned()
            .or_else(|| self.response_code.clone())
            .unwrap_or_else(|| NO_ERROR_CODE.to_string());
        ErrorResponse {
            reason: self.response_message.clone(),
            connector_transaction_id: self.transaction_id(),
            standard_error_code: all.iter().find_map(|code| standard_error_code(code)),
            ..ErrorResponse::decline(
                code,
                self.message().unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                status_code,
            )
        }
    }

    fn transaction_response(&self, status_code: u16) -> Result<PaymentsResponseData, Error> {
        let transaction_id = self
            .transaction_id()
            .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?;
        Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(transaction_id),
            connector_metadata: serde_json::to_value(self).ok(),
            network_txn_id: None,
            connector_response_reference_id: self.authorisation_code.clone(),
            avs_result: None,
            cvv_result: None,
            message: self.message(),
            status_code,
        })
    }
}

fn payment_router_data<F, Req>(
    response: EwayResponse,
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
            response_message = ?response.response_message,
            errors = ?response.errors,
            "eway transaction not approved"
        );
        Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(failed_status),
            response: Err(response.error_response(http_code)),
            ..router_data
        })
    }
}

fn approved_status(capture_method: Option<CaptureMethod>) -> Result<AttemptStatus, Error> {
    Ok(if utils::is_auto_capture(capture_method, CONNECTOR)? {
        AttemptStatus::Charged
    } else {
        AttemptStatus::Authorized
    })
}

impl
    TryFrom<
        ResponseRouterData<
            EwayPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EwayPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let approved = approved_status(item.router_data.request.capture_method)?;
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
            EwayPSyncResponse,
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    > for RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EwayPSyncResponse,
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let approved = approved_status(router_data.request.capture_method)?;
        let transaction = response.transactions.into_iter().next().unwrap_or(EwayResponse {
            errors: response.errors,
            ..Default::default()
        });
        payment_router_data(transaction, router_data, http_code, approved, AttemptStatus::Failure)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            EwayCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EwayCaptureResponse,
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
            EwayVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EwayVoidResponse,
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
            EwayRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            EwayRefundResponse,
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
                .transaction_id()
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
    fn message_codes_are_translated() {
        let response = EwayResponse {
            response_message: Some("D4405,V6023".to_string()),
            ..Default::default()
        };
        assert_eq!(
            response.message().as_deref(),
            Some("Do Not Honour, EWAY_CARDCVN Required")
        );
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(message_for("X9999"), "X9999");
        assert_eq!(message_for("A2000"), "Transaction Approved");
    }
}
