use common_enums::{AttemptStatus, Currency, RefundStatus, StandardErrorCode};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    pii::{Email, IpAddress},
    types::{AmountConvertor, MinorUnit, StringMajorUnitForConnector},
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

use super::SafechargeRouterData;
use crate::{types::ResponseRouterData, utils};

const CONNECTOR: &str = "safecharge";
const API_VERSION: &str = "4.1.0";
/// XML answers.
const RESPONSE_FORMAT: &str = "4";

type Error = error_stack::Report<errors::ConnectorError>;

pub struct SafechargeAuthType {
    pub(super) client_login_id: Secret<String>,
    pub(super) client_password: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for SafechargeAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                client_login_id: api_key.to_owned(),
                client_password: key1.to_owned(),
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransType {
    Sale,
    Auth,
    Settle,
    Void,
    Credit,
}

/// Legacy `sg_` form; unused fields stay out of the body.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SafechargeRequest {
    #[serde(rename = "sg_TransType")]
    pub trans_type: TransType,
    #[serde(rename = "sg_ClientLoginID")]
    pub client_login_id: Secret<String>,
    #[serde(rename = "sg_ClientPassword")]
    pub client_password: Secret<String>,
    #[serde(rename = "sg_ResponseFormat")]
    pub response_format: &'static str,
    #[serde(rename = "sg_Version")]
    pub version: &'static str,
    #[serde(rename = "sg_Currency")]
    pub currency: String,
    #[serde(rename = "sg_Amount")]
    pub amount: String,
    #[serde(rename = "sg_ClientUniqueID")]
    pub client_unique_id: String,
    #[serde(rename = "sg_NameOnCard")]
    pub name_on_card: Option<Secret<String>>,
    #[serde(rename = "sg_CardNumber")]
    pub card_number: Option<Secret<String>>,
    #[serde(rename = "sg_CCToken")]
    pub cc_token: Option<Secret<String>>,
    #[serde(rename = "sg_ExpMonth")]
    pub exp_month: Option<Secret<String>>,
    #[serde(rename = "sg_ExpYear")]
    pub exp_year: Option<Secret<String>>,
    #[serde(rename = "sg_CVV2")]
    pub cvv2: Option<Secret<String>>,
    #[serde(rename = "sg_IsExternalMPI")]
    pub is_external_mpi: Option<&'static str>,
    #[serde(rename = "sg_Is3dTrans")]
    pub is_3d_trans: Option<&'static str>,
    #[serde(rename = "sg_FirstName")]
    pub first_name: Option<Secret<String>>,
    #[serde(rename = "sg_LastName")]
    pub last_name: Option<Secret<String>>,
    #[serde(rename = "sg_Address")]
    pub address: Option<Secret<String>>,
    #[serde(rename = "sg_City")]
    pub city: Option<String>,
    #[serde(rename = "sg_State")]
    pub state: Option<Secret<String>>,
    #[serde(rename = "sg_Zip")]
    pub zip: Option<Secret<String>>,
    #[serde(rename = "sg_Country")]
    pub country: Option<String>,
    #[serde(rename = "sg_Phone")]
    pub phone: Option<Secret<String>>,
    #[serde(rename = "sg_Email")]
    pub email: Option<Email>,
    #[serde(rename = "sg_IPAddress")]
    pub ip_address: Option<Secret<String, IpAddress>>,
    #[serde(rename = "sg_AuthCode")]
    pub auth_code: Option<String>,
    #[serde(rename = "sg_TransactionID")]
    pub transaction_id: Option<String>,
    #[serde(rename = "sg_CreditType")]
    pub credit_type: Option<&'static str>,
}

pub type SafechargePaymentsRequest = SafechargeRequest;
pub type SafechargeCaptureRequest = SafechargeRequest;
pub type SafechargeVoidRequest = SafechargeRequest;
pub type SafechargeRefundRequest = SafechargeRequest;

impl SafechargeRequest {
    fn new(
        auth_type: &ConnectorAuthType,
        trans_type: TransType,
        amount: String,
        currency: String,
        client_unique_id: String,
    ) -> Result<Self, Error> {
        let auth = SafechargeAuthType::try_from(auth_type)?;
        Ok(Self {
            trans_type,
            client_login_id: auth.client_login_id,
            client_password: auth.client_password,
            response_format: RESPONSE_FORMAT,
            version: API_VERSION,
            currency,
            amount,
            client_unique_id,
            name_on_card: None,
            card_number: None,
            cc_token: None,
            exp_month: None,
            exp_year: None,
            cvv2: None,
            is_external_mpi: None,
            is_3d_trans: None,
            first_name: None,
            last_name: None,
            address: None,
            city: None,
            state: None,
            zip: None,
            country: None,
            phone: None,
            email: None,
            ip_address: None,
            auth_code: None,
            transaction_id: None,
            credit_type: None,
        })
    }

    /// Follow-ups echo the original transaction and card token.
    fn follow_up(
        auth_type: &ConnectorAuthType,
        trans_type: TransType,
        authorization: SafechargeAuthorization,
        amount: String,
        currency: String,
        client_unique_id: String,
    ) -> Result<Self, Error> {
        let mut request =
            Self::new(auth_type, trans_type, amount, currency, client_unique_id)?;
        request.auth_code = Some(authorization.auth_code).filter(|code| !code.is_empty());
        request.transaction_id = Some(authorization.transaction_id);
        request.cc_token = Some(authorization.token)
            .filter(|token| !token.is_empty())
            .map(Secret::new);
        request.exp_month = Some(Secret::new(authorization.exp_month));
        request.exp_year = Some(Secret::new(authorization.exp_year));
        Ok(request)
    }
}

/// `ClientUniqueID|TransactionID|AuthCode|Token|MM|YY|amount|currency`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafechargeAuthorization {
    pub client_unique_id: String,
    pub transaction_id: String,
    pub auth_code: String,
    pub token: String,
    pub exp_month: String,
    pub exp_year: String,
    pub amount: String,
    pub currency: String,
}

impl SafechargeAuthorization {
    pub fn parse(authorization: &str) -> Result<Self, Error> {
        let mut parts = utils::split_authorization(authorization, '|', 8)?.into_iter();
        let mut next = || parts.next().unwrap_or_default();
        Ok(Self {
            client_unique_id: next(),
            transaction_id: next(),
            auth_code: next(),
            token: next(),
            exp_month: next(),
            exp_year: next(),
            amount: next(),
            currency: next(),
        })
    }

    pub fn encode(&self) -> String {
        [
            self.client_unique_id.as_str(),
            self.transaction_id.as_str(),
            self.auth_code.as_str(),
            self.token.as_str(),
            self.exp_month.as_str(),
            self.exp_year.as_str(),
            self.amount.as_str(),
            self.currency.as_str(),
        ]
        .join("|")
    }
}

fn currency_code(currency: Currency) -> String {
    currency.to_string()
}

/// Major unit amount as it went on the wire, for echoing in follow-ups.
fn major_amount(amount: MinorUnit, currency: Currency) -> Result<String, Error> {
    StringMajorUnitForConnector
        .convert(amount, currency)
        .map(|amount| amount.get_amount_as_string())
        .change_context(errors::ConnectorError::AmountConversionFailed)
}

impl
    TryFrom<
        SafechargeRouterData<
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for SafechargeRequest
{
    type Error = Error;
    fn try_from(
        item: SafechargeRouterData<
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
        let trans_type = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            TransType::Sale
        } else {
            TransType::Auth
        };

        let mut safecharge_request = Self::new(
            &router_data.connector_auth_type,
            trans_type,
            amount.get_amount_as_string(),
            currency_code(request.currency),
            utils::truncate(
                &router_data.resource_common_data.connector_request_reference_id,
                64,
            ),
        )?;

        match &request.payment_method_data {
            PaymentMethodData::Card(card) => {
                safecharge_request.name_on_card = card.card_holder_name.clone();
                safecharge_request.card_number = Some(Secret::new(card.card_number.get_card_no()));
                safecharge_request.exp_month = Some(card.get_expiry_month_2_digit());
                safecharge_request.exp_year = Some(card.get_card_expiry_year_2_digit()?);
                safecharge_request.cvv2 = Some(card.card_cvc.clone());
            }
            PaymentMethodData::CardToken(token) => {
                let exp_month = token
                    .card_exp_month
                    .as_ref()
                    .ok_or_else(utils::missing_field_err("card_exp_month"))?;
                let exp_year = token
                    .card_exp_year
                    .as_ref()
                    .ok_or_else(utils::missing_field_err("card_exp_year"))?;
                let year = exp_year.peek();
                safecharge_request.name_on_card = token.card_holder_name.clone();
                safecharge_request.cc_token = Some(token.token.clone());
                safecharge_request.exp_month =
                    Some(Secret::new(format!("{:0>2}", exp_month.peek())));
                safecharge_request.exp_year = Some(Secret::new(
                    year.get(year.len().saturating_sub(2)..)
                        .unwrap_or_default()
                        .to_string(),
                ));
            }
        }
        safecharge_request.is_external_mpi = Some("0");
        safecharge_request.is_3d_trans = Some("0");

        if let Some(billing) = router_data.resource_common_data.address.get_payment_billing() {
            if let Some(details) = billing.address.as_ref() {
                safecharge_request.first_name = details.first_name.clone();
                safecharge_request.last_name = details.last_name.clone();
                safecharge_request.address = details.get_combined_address_line();
                safecharge_request.city = details.city.clone();
                safecharge_request.state = details.state.clone();
                safecharge_request.zip = details.zip.clone();
                safecharge_request.country = details.country.map(|country| country.to_string());
            }
            safecharge_request.phone = billing
                .phone
                .as_ref()
                .and_then(|phone| phone.number.clone());
            safecharge_request.email = billing.email.clone();
        }
        if request.email.is_some() {
            safecharge_request.email = request.email.clone();
        }
        safecharge_request.ip_address = request.get_ip_address_as_optional();
        Ok(safecharge_request)
    }
}

impl
    TryFrom<
        SafechargeRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for SafechargeRequest
{
    type Error = Error;
    fn try_from(
        item: SafechargeRouterData<
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let authorization = SafechargeAuthorization::parse(
            &request.connector_transaction_id.get_connector_transaction_id()?,
        )?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_amount_to_capture, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        let client_unique_id = authorization.client_unique_id.clone();
        Self::follow_up(
            &router_data.connector_auth_type,
            TransType::Settle,
            authorization,
            amount.get_amount_as_string(),
            currency_code(request.currency),
            client_unique_id,
        )
    }
}

impl
    TryFrom<
        SafechargeRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for SafechargeRequest
{
    type Error = Error;
    fn try_from(
        item: SafechargeRouterData<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let authorization =
            SafechargeAuthorization::parse(&router_data.request.connector_transaction_id)?;
        let amount = authorization.amount.clone();
        let currency = authorization.currency.clone();
        let client_unique_id = authorization.client_unique_id.clone();
        Self::follow_up(
            &router_data.connector_auth_type,
            TransType::Void,
            authorization,
            amount,
            currency,
            client_unique_id,
        )
    }
}

impl
    TryFrom<
        SafechargeRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for SafechargeRequest
{
    type Error = Error;
    fn try_from(
        item: SafechargeRouterData<
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = &item.router_data;
        let request = &router_data.request;
        let authorization = SafechargeAuthorization::parse(&request.connector_transaction_id)?;
        let amount = item
            .connector
            .amount_converter
            .convert(request.minor_refund_amount, request.currency)
            .change_context(errors::ConnectorError::AmountConversionFailed)?;
        let mut safecharge_request = Self::follow_up(
            &router_data.connector_auth_type,
            TransType::Credit,
            authorization,
            amount.get_amount_as_string(),
            currency_code(request.currency),
            utils::truncate(&request.refund_id, 64),
        )?;
        // Credit against an earlier transaction.
        safecharge_request.credit_type = Some("2");
        Ok(safecharge_request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafechargeStatus {
    Approved,
    Declined,
    Error,
    Pending,
    #[serde(other)]
    Unknown,
}

/// `<Response>` content.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SafechargeResponse {
    pub status: SafechargeStatus,
    #[serde(rename = "ClientUniqueID")]
    pub client_unique_id: Option<String>,
    #[serde(rename = "TransactionID")]
    pub transaction_id: Option<String>,
    pub auth_code: Option<String>,
    #[serde(rename = "AVSCode")]
    pub avs_code: Option<String>,
    #[serde(rename = "CVV2Reply")]
    pub cvv2_reply: Option<String>,
    pub err_code: Option<String>,
    pub ex_err_code: Option<String>,
    pub reason: Option<String>,
    pub token: Option<String>,
}

pub type SafechargePaymentsResponse = SafechargeResponse;
pub type SafechargeCaptureResponse = SafechargeResponse;
pub type SafechargeVoidResponse = SafechargeResponse;
pub type SafechargeRefundResponse = SafechargeResponse;

/// Extended error codes with a standard meaning.
fn standard_error_code(ex_err_code: &str) -> Option<StandardErrorCode> {
    match ex_err_code {
        "-1" => Some(StandardErrorCode::CardDeclined),
        "1001" => Some(StandardErrorCode::InvalidExpiryDate),
        "1002" => Some(StandardErrorCode::ExpiredCard),
        "1101" | "1102" | "1103" => Some(StandardErrorCode::InvalidNumber),
        "1104" => Some(StandardErrorCode::InvalidCvc),
        "1105" => Some(StandardErrorCode::ProcessingError),
        "1106" | "1111" | "1201" => Some(StandardErrorCode::InvalidAmount),
        "1100" | "1140" => Some(StandardErrorCode::ConfigError),
        _ => None,
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl SafechargeResponse {
    /// `ExErrCode` is more specific than `ErrCode` when the gateway sets it.
    fn error_code(&self) -> Option<String> {
        non_empty(&self.ex_err_code)
            .filter(|code| code != "0")
            .or_else(|| non_empty(&self.err_code))
    }

    pub fn error_response(&self, status_code: u16) -> ErrorResponse {
        let code = self.error_code().unwrap_or_else(|| NO_ERROR_CODE.to_string());
        let message = non_empty(&self.reason).unwrap_or_else(|| {
            match self.status {
                SafechargeStatus::Declined => "Declined".to_string(),
                _ => NO_ERROR_MESSAGE.to_string(),
            }
        });
        ErrorResponse {
            connector_transaction_id: non_empty(&self.transaction_id),
            standard_error_code: standard_error_code(&code),
            ..ErrorResponse::decline(code, message, status_code)
        }
    }

    fn authorization(
        &self,
        exp_month: String,
        exp_year: String,
        amount: String,
        currency: String,
    ) -> Option<String> {
        let authorization = SafechargeAuthorization {
            client_unique_id: self.client_unique_id.clone().unwrap_or_default(),
            transaction_id: non_empty(&self.transaction_id)?,
            auth_code: self.auth_code.clone().unwrap_or_default(),
            token: self.token.clone().unwrap_or_default(),
            exp_month,
            exp_year,
            amount,
            currency,
        };
        Some(authorization.encode())
    }
}

/// Card expiry and amount carried into the authorization value.
struct AuthorizationContext {
    exp_month: String,
    exp_year: String,
    amount: String,
    currency: String,
}

fn payment_router_data<F, Req>(
    response: SafechargeResponse,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    http_code: u16,
    context: AuthorizationContext,
    approved_status: AttemptStatus,
    failed_status: AttemptStatus,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    let status = match response.status {
        SafechargeStatus::Approved => approved_status,
        SafechargeStatus::Pending => AttemptStatus::Pending,
        SafechargeStatus::Declined | SafechargeStatus::Error | SafechargeStatus::Unknown => {
            failed_status
        }
    };
    if status == failed_status {
        tracing::info!(
            status = ?response.status,
            ex_err_code = ?response.ex_err_code,
            "safecharge transaction failed"
        );
        return Ok(RouterDataV2 {
            resource_common_data: router_data.resource_common_data.set_status(status),
            response: Err(response.error_response(http_code)),
            ..router_data
        });
    }

    let authorization = response
        .authorization(
            context.exp_month,
            context.exp_year,
            context.amount,
            context.currency,
        )
        .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?;
    Ok(RouterDataV2 {
        resource_common_data: router_data.resource_common_data.set_status(status),
        response: Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId(authorization),
            connector_metadata: None,
            network_txn_id: None,
            connector_response_reference_id: non_empty(&response.auth_code),
            avs_result: AvsResult::from_code(response.avs_code.as_deref()),
            cvv_result: CvvResult::from_code(response.cvv2_reply.as_deref()),
            message: non_empty(&response.reason).or_else(|| Some("Success".to_string())),
            status_code: http_code,
        }),
        ..router_data
    })
}

impl
    TryFrom<
        ResponseRouterData<
            SafechargePaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SafechargePaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let approved = if utils::is_auto_capture(request.capture_method, CONNECTOR)? {
            AttemptStatus::Charged
        } else {
            AttemptStatus::Authorized
        };
        let (exp_month, exp_year) = match &request.payment_method_data {
            PaymentMethodData::Card(card) => (
                card.get_expiry_month_2_digit().peek().clone(),
                card.get_card_expiry_year_2_digit()?.peek().clone(),
            ),
            PaymentMethodData::CardToken(token) => {
                let month = token
                    .card_exp_month
                    .as_ref()
                    .map(|month| format!("{:0>2}", month.peek()))
                    .unwrap_or_default();
                let year = token
                    .card_exp_year
                    .as_ref()
                    .map(|year| {
                        let year = year.peek();
                        year.get(year.len().saturating_sub(2)..)
                            .unwrap_or_default()
                            .to_string()
                    })
                    .unwrap_or_default();
                (month, year)
            }
        };
        let context = AuthorizationContext {
            exp_month,
            exp_year,
            amount: major_amount(request.minor_amount, request.currency)?,
            currency: currency_code(request.currency),
        };
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            context,
            approved,
            AttemptStatus::Failure,
        )
    }
}

/// Follow-ups keep the card details of the transaction they reference.
fn follow_up_context(
    authorization: &str,
    amount: String,
    currency: String,
) -> Result<AuthorizationContext, Error> {
    let original = SafechargeAuthorization::parse(authorization)?;
    Ok(AuthorizationContext {
        exp_month: original.exp_month,
        exp_year: original.exp_year,
        amount,
        currency,
    })
}

impl
    TryFrom<
        ResponseRouterData<
            SafechargeCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SafechargeCaptureResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let context = follow_up_context(
            &request.connector_transaction_id.get_connector_transaction_id()?,
            major_amount(request.minor_amount_to_capture, request.currency)?,
            currency_code(request.currency),
        )?;
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            context,
            AttemptStatus::Charged,
            AttemptStatus::CaptureFailed,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            SafechargeVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SafechargeVoidResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let original =
            SafechargeAuthorization::parse(&item.router_data.request.connector_transaction_id)?;
        let context = AuthorizationContext {
            exp_month: original.exp_month,
            exp_year: original.exp_year,
            amount: original.amount,
            currency: original.currency,
        };
        payment_router_data(
            item.response,
            item.router_data,
            item.http_code,
            context,
            AttemptStatus::Voided,
            AttemptStatus::VoidFailed,
        )
    }
}

impl
    TryFrom<
        ResponseRouterData<
            SafechargeRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<
            SafechargeRefundResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let refund_status = match response.status {
            SafechargeStatus::Approved => RefundStatus::Success,
            SafechargeStatus::Pending => RefundStatus::Pending,
            _ => RefundStatus::Failure,
        };
        let result = match non_empty(&response.transaction_id) {
            Some(connector_refund_id) if refund_status != RefundStatus::Failure => {
                Ok(RefundsResponseData {
                    connector_refund_id,
                    refund_status,
                    status_code: http_code,
                })
            }
            _ => Err(response.error_response(http_code)),
        };
        let status = if result.is_ok() {
            refund_status
        } else {
            RefundStatus::Failure
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
    fn authorization_has_eight_fields() {
        let authorization = SafechargeAuthorization::parse(
            "order_1001|101510108310|111577|ZQBpAFAA|09|30|10.00|USD",
        )
        .unwrap();
        assert_eq!(authorization.transaction_id, "101510108310");
        assert_eq!(authorization.token, "ZQBpAFAA");
        assert_eq!(authorization.amount, "10.00");
        assert_eq!(
            authorization.encode(),
            "order_1001|101510108310|111577|ZQBpAFAA|09|30|10.00|USD"
        );
        assert!(SafechargeAuthorization::parse("order_1001|101510108310").is_err());
    }

    #[test]
    fn extended_code_wins_over_generic_code() {
        let response = SafechargeResponse {
            status: SafechargeStatus::Error,
            client_unique_id: None,
            transaction_id: None,
            auth_code: None,
            avs_code: None,
            cvv2_reply: None,
            err_code: Some("-1100".to_string()),
            ex_err_code: Some("1001".to_string()),
            reason: Some("Invalid Expiration Date".to_string()),
            token: None,
        };
        let error = response.error_response(200);
        assert_eq!(error.code, "1001");
        assert_eq!(error.standard_error_code, Some(StandardErrorCode::InvalidExpiryDate));

        let generic = SafechargeResponse {
            ex_err_code: Some("0".to_string()),
            ..response
        };
        assert_eq!(generic.error_response(200).code, "-1100");
    }
}
