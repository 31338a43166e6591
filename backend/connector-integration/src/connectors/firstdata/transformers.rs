use common_enums::{AttemptStatus, Currency, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    errors::CustomResult,
    pii::{Email, IpAddress},
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
    payment_method_data::{CardToken, PaymentMethodData},
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::FirstdataRouterData;
use crate::{
    connectors::macros::GetXmlDocument,
    types::ResponseRouterData,
    utils::{self, xml_utils},
};

const CONNECTOR: &str = "firstdata";

type Error = error_stack::Report<errors::ConnectorError>;

pub struct FirstdataAuthType {
    pub(super) exact_id: Secret<String>,
    pub(super) password: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for FirstdataAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                exact_id: api_key.to_owned(),
                password: key1.to_owned(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

/// GGE4 `Transaction_Type` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionType {
    #[serde(rename = "00")]
    Purchase,
    #[serde(rename = "01")]
    PreAuthorization,
    #[serde(rename = "32")]
    TaggedCompletion,
    #[serde(rename = "33")]
    TaggedVoid,
    #[serde(rename = "34")]
    TaggedRefund,
}

/// The `<Transaction>` document sent for every flow.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct FirstdataTransaction {
    #[serde(rename = "ExactID")]
    pub exact_id: Secret<String>,
    #[serde(rename = "Password")]
    pub password: Secret<String>,
    #[serde(rename = "Transaction_Type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "DollarAmount")]
    pub dollar_amount: StringMajorUnit,
    #[serde(rename = "Currency")]
    pub currency: Option<Currency>,
    #[serde(rename = "Transaction_Tag")]
    pub transaction_tag: Option<String>,
    #[serde(rename = "Authorization_Num")]
    pub authorization_num: Option<String>,
    #[serde(rename = "Card_Number")]
    pub card_number: Option<Secret<String>>,
    #[serde(rename = "TransarmorToken")]
    pub transarmor_token: Option<Secret<String>>,
    #[serde(rename = "Expiry_Date")]
    pub expiry_date: Option<Secret<String>>,
    #[serde(rename = "CardHoldersName")]
    pub card_holders_name: Option<Secret<String>>,
    #[serde(rename = "VerificationStr1")]
    pub verification_str1: Option<Secret<String>>,
    #[serde(rename = "VerificationStr2")]
    pub verification_str2: Option<Secret<String>>,
    #[serde(rename = "CVD_Presence_Ind")]
    pub cvd_presence_ind: Option<u8>,
    #[serde(rename = "ZipCode")]
    pub zip_code: Option<Secret<String>>,
    #[serde(rename = "Reference_No")]
    pub reference_no: Option<String>,
    #[serde(rename = "Customer_Ref")]
    pub customer_ref: Option<String>,
    #[serde(rename = "Reference_3")]
    pub reference_3: Option<String>,
    #[serde(rename = "Client_IP")]
    pub client_ip: Option<Secret<String, IpAddress>>,
    #[serde(rename = "Client_Email")]
    pub client_email: Option<Email>,
}

pub type FirstdataPaymentsRequest = FirstdataTransaction;
pub type FirstdataCaptureRequest = FirstdataTransaction;
pub type FirstdataVoidRequest = FirstdataTransaction;
pub type FirstdataRefundRequest = FirstdataTransaction;

impl GetXmlDocument for FirstdataTransaction {
    fn get_xml_document(&self) -> CustomResult<String, errors::ConnectorError> {
        Ok(xml_utils::to_xml_document("Transaction", self)?)
    }
}

impl FirstdataTransaction {
    fn new(
        auth: FirstdataAuthType,
        transaction_type: TransactionType,
        dollar_amount: StringMajorUnit,
    ) -> Self {
        Self {
            exact_id: auth.exact_id,
            password: auth.password,
            transaction_type,
            dollar_amount,
            currency: None,
            transaction_tag: None,
            authorization_num: None,
            card_number: None,
            transarmor_token: None,
            expiry_date: None,
            card_holders_name: None,
            verification_str1: None,
            verification_str2: None,
            cvd_presence_ind: None,
            zip_code: None,
            reference_no: None,
            customer_ref: None,
            reference_3: None,
            client_ip: None,
            client_email: None,
        }
    }

    /// Tagged follow-up against an earlier authorization.
    fn tagged(
        auth: FirstdataAuthType,
        transaction_type: TransactionType,
        authorization: &FirstdataAuthorization,
        dollar_amount: StringMajorUnit,
    ) -> Self {
        Self {
            transaction_tag: Some(authorization.transaction_tag.clone()),
            authorization_num: Some(authorization.authorization_num.clone()),
            ..Self::new(auth, transaction_type, dollar_amount)
        }
    }
}

/// `Authorization_Num;Transaction_Tag;DollarAmount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstdataAuthorization {
    pub authorization_num: String,
    pub transaction_tag: String,
    pub dollar_amount: String,
}

impl FirstdataAuthorization {
    pub fn parse(authorization: &str) -> Result<Self, Error> {
        let mut parts = utils::split_authorization(authorization, ';', 3)?.into_iter();
        let mut next = || parts.next().unwrap_or_default();
        Ok(Self {
            authorization_num: next(),
            transaction_tag: next(),
            dollar_amount: next(),
        })
    }

    fn encode(&self) -> String {
        format!(
            "{};{};{}",
            self.authorization_num, self.transaction_tag, self.dollar_amount
        )
    }
}

fn token_expiry(token: &CardToken) -> Option<Secret<String>> {
    let month = token.card_exp_month.as_ref()?.peek().trim().to_string();
    let year = token.card_exp_year.as_ref()?.peek().trim().to_string();
    let year = year.get(year.len().saturating_sub(2)..).unwrap_or_default();
    Some(Secret::new(format!("{month:0>2}{year}")))
}

impl
    TryFrom<
        FirstdataRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for FirstdataTransaction
{
    type Error = Error;
    fn try_from(
        item: FirstdataRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let auth = FirstdataAuthType::try_from(&router_data.connector_auth_type)?;
        let transaction_type = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            TransactionType::Purchase
        } else {
            TransactionType::PreAuthorization
        };
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;

        let mut transaction = Self::new(auth, transaction_type, amount);
        transaction.currency = Some(request.currency);

        match &request.payment_method_data {
            PaymentMethodData::Card(card) => {
                transaction.card_number = Some(Secret::new(card.card_number.get_card_no()));
                transaction.expiry_date = Some(card.get_expiry_date_as_mmyy()?);
                transaction.card_holders_name = card.card_holder_name.clone();
                transaction.verification_str2 = Some(card.card_cvc.clone());
                transaction.cvd_presence_ind = Some(1);
            }
            PaymentMethodData::CardToken(token) => {
                transaction.transarmor_token = Some(token.token.clone());
                transaction.expiry_date = token_expiry(token);
                transaction.card_holders_name = token.card_holder_name.clone();
            }
        }

        if let Some(billing) = router_data.resource_common_data.get_optional_billing_address() {
            let field = |value: Option<&Secret<String>>| {
                value.map(|value| value.peek().clone()).unwrap_or_default()
            };
            // street|zip|city|state|country
            transaction.verification_str1 = Some(Secret::new(format!(
                "{}|{}|{}|{}|{}",
                field(billing.get_combined_address_line().as_ref()),
                field(billing.zip.as_ref()),
                billing.city.clone().unwrap_or_default(),
                field(billing.state.as_ref()),
                billing
                    .country
                    .map(|country| country.to_string())
                    .unwrap_or_default(),
            )));
            transaction.zip_code = billing.zip.clone();
        }

        transaction.reference_no = Some(utils::truncate(
            &router_data.resource_common_data.connector_request_reference_id,
            20,
        ));
        transaction.customer_ref = utils::truncate_optional(request.customer_id.as_deref(), 20);
        transaction.reference_3 = utils::truncate_optional(
            router_data.resource_common_data.description.as_deref(),
            30,
        );
        transaction.client_ip = request.get_ip_address_as_optional();
        transaction.client_email = request.email.clone();
        Ok(transaction)
    }
}

impl
    TryFrom<
        FirstdataRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for FirstdataTransaction
{
    type Error = Error;
    fn try_from(
        item: FirstdataRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let auth = FirstdataAuthType::try_from(&item.router_data.connector_auth_type)?;
        let authorization = FirstdataAuthorization::parse(
            &request.connector_transaction_id.get_connector_transaction_id()?,
        )?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self::tagged(
            auth,
            TransactionType::TaggedCompletion,
            &authorization,
            amount,
        ))
    }
}

impl
    TryFrom<
        FirstdataRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for FirstdataTransaction
{
    type Error = Error;
    fn try_from(
        item: FirstdataRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let auth = FirstdataAuthType::try_from(&item.router_data.connector_auth_type)?;
        let authorization =
            FirstdataAuthorization::parse(&item.router_data.request.connector_transaction_id)?;
        // voids repeat the authorized amount carried in the authorization
        let amount = serde_json::from_value::<StringMajorUnit>(serde_json::Value::String(
            authorization.dollar_amount.clone(),
        ))
        .change_context(errors::ConnectorError::InvalidDataFormat {
            field_name: "connector_transaction_id",
        })?;
        Ok(Self::tagged(auth, TransactionType::TaggedVoid, &authorization, amount))
    }
}

impl
    TryFrom<FirstdataRouterData<RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for FirstdataTransaction
{
    type Error = Error;
    fn try_from(
        item: FirstdataRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let auth = FirstdataAuthType::try_from(&item.router_data.connector_auth_type)?;
        let authorization = FirstdataAuthorization::parse(&request.connector_transaction_id)?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        Ok(Self::tagged(
            auth,
            TransactionType::TaggedRefund,
            &authorization,
            amount,
        ))
    }
}

/// Bank and gateway response codes with a standard meaning.
fn standard_error_code(code: &str) -> Option<StandardErrorCode> {
    match code {
        "201" | "31" => Some(StandardErrorCode::IncorrectNumber),
        "22" => Some(StandardErrorCode::InvalidNumber),
        "531" | "503" => Some(StandardErrorCode::InvalidCvc),
        "811" => Some(StandardErrorCode::IncorrectCvc),
        "605" | "25" => Some(StandardErrorCode::InvalidExpiryDate),
        "522" => Some(StandardErrorCode::ExpiredCard),
        "302" | "303" | "530" | "43" => Some(StandardErrorCode::CardDeclined),
        "401" | "402" => Some(StandardErrorCode::CallIssuer),
        "501" | "502" => Some(StandardErrorCode::PickupCard),
        "44" => Some(StandardErrorCode::IncorrectAddress),
        "42" | "68" | "72" => Some(StandardErrorCode::ProcessingError),
        _ => None,
    }
}

/// `<TransactionResult>` content.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FirstdataResponse {
    #[serde(rename = "Transaction_Approved")]
    pub transaction_approved: Option<String>,
    #[serde(rename = "Transaction_Error")]
    pub transaction_error: Option<String>,
    #[serde(rename = "EXact_Resp_Code")]
    pub exact_resp_code: Option<String>,
    #[serde(rename = "EXact_Message")]
    pub exact_message: Option<String>,
    #[serde(rename = "Bank_Resp_Code")]
    pub bank_resp_code: Option<String>,
    #[serde(rename = "Bank_Message")]
    pub bank_message: Option<String>,
    #[serde(rename = "Authorization_Num")]
    pub authorization_num: Option<String>,
    #[serde(rename = "Transaction_Tag")]
    pub transaction_tag: Option<String>,
    #[serde(rename = "DollarAmount")]
    pub dollar_amount: Option<String>,
    #[serde(rename = "AVS")]
    pub avs: Option<String>,
    #[serde(rename = "CVV2")]
    pub cvv2: Option<String>,
    #[serde(rename = "Retrieval_Ref_No")]
    pub retrieval_ref_no: Option<String>,
}

pub type FirstdataPaymentsResponse = FirstdataResponse;
pub type FirstdataCaptureResponse = FirstdataResponse;
pub type FirstdataVoidResponse = FirstdataResponse;
pub type FirstdataRefundResponse = FirstdataResponse;

impl FirstdataResponse {
    pub fn is_approved(&self) -> bool {
        self.transaction_approved.as_deref() == Some("true")
    }

    fn gateway_failed(&self) -> bool {
        self.transaction_error.as_deref() == Some("true")
            || self
                .exact_resp_code
                .as_deref()
                .is_some_and(|code| code != "00")
    }

    pub fn message(&self) -> Option<String> {
        if self.gateway_failed() {
            self.exact_message.clone()
        } else {
            self.bank_message.clone()
        }
    }

    pub fn authorization(&self) -> Option<String> {
        let authorization = FirstdataAuthorization {
            authorization_num: self.authorization_num.clone().unwrap_or_default(),
            transaction_tag: self.transaction_tag.clone()?,
            dollar_amount: self.dollar_amount.clone().unwrap_or_default(),
        };
        Some(authorization.encode())
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let code = if self.gateway_failed() {
            self.exact_resp_code.clone()
        } else {
            self.bank_resp_code.clone()
        }
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| NO_ERROR_CODE.to_string());
        ErrorResponse {
            reason: self.exact_message.clone(),
            connector_transaction_id: self.authorization(),
            standard_error_code: standard_error_code(&code),
            ..ErrorResponse::decline(
                code,
                self.message()
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                status_code,
            )
        }
    }
}

fn payment_router_data<F, Req>(
    response: FirstdataResponse,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    http_code: u16,
    approved_status: AttemptStatus,
    failed_status: AttemptStatus,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    if !response.is_approved() {
        tracing::info!(
            exact_resp_code = ?response.exact_resp_code,
            bank_resp_code = ?response.bank_resp_code,
            "firstdata transaction not approved"
        );
        return Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(failed_status),
            response: Err(response.error_response(http_code)),
            ..router_data
        });
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
            connector_response_reference_id: response.retrieval_ref_no.clone(),
            avs_result: AvsResult::from_code(response.avs.as_deref()),
            cvv_result: CvvResult::from_code(response.cvv2.as_deref()),
            message: response.message(),
            status_code: http_code,
        }),
        ..router_data
    })
}

impl
    TryFrom<
        ResponseRouterData<
            FirstdataPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            FirstdataPaymentsResponse,
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
            FirstdataCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            FirstdataCaptureResponse,
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
            FirstdataVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            FirstdataVoidResponse,
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
            FirstdataRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            FirstdataRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let (status, result) = if response.is_approved() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_needs_three_parts() {
        let authorization = FirstdataAuthorization::parse("ET1700;902006933;10.00").unwrap();
        assert_eq!(authorization.authorization_num, "ET1700");
        assert_eq!(authorization.transaction_tag, "902006933");
        assert_eq!(authorization.dollar_amount, "10.00");
        assert_eq!(authorization.encode(), "ET1700;902006933;10.00");

        assert!(FirstdataAuthorization::parse("902006933").is_err());
    }

    #[test]
    fn token_expiry_is_mmyy() {
        let token = CardToken {
            token: Secret::new("8938737759041111".to_string()),
            card_exp_month: Some(Secret::new("9".to_string())),
            card_exp_year: Some(Secret::new("2030".to_string())),
            card_holder_name: None,
        };
        assert_eq!(
            token_expiry(&token).map(|expiry| expiry.peek().clone()),
            Some("0930".to_string())
        );
    }

    #[test]
    fn gateway_errors_win_over_bank_codes() {
        let response = FirstdataResponse {
            transaction_approved: Some("false".to_string()),
            transaction_error: Some("true".to_string()),
            exact_resp_code: Some("22".to_string()),
            exact_message: Some("Invalid Credit Card Number".to_string()),
            bank_resp_code: Some("000".to_string()),
            ..Default::default()
        };
        let error = response.error_response(201);
        assert_eq!(error.code, "22");
        assert_eq!(error.message, "Invalid Credit Card Number");
        assert_eq!(error.standard_error_code, Some(StandardErrorCode::InvalidNumber));
    }
}
