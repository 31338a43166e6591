use common_enums::{AttemptStatus, CaptureMethod, Currency, RefundStatus};
use common_utils::{
    pii::{Email, IpAddress, SecretSerdeValue},
    types::MinorUnit,
};
use error_stack::ResultExt;
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    card_verification::{AvsResult, CvvResult},
    errors,
    payment_address::{AddressDetails, PaymentAddress},
    payment_method_data::PaymentMethodData,
    router_data::ConnectorAuthType,
    types::Connectors,
    utils::missing_field_err,
};

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectorEnum {
    Checkout,
    Decidir,
    Elavon,
    Eurobank,
    Eway,
    Firstdata,
    Hps,
    Iveri,
    Litle,
    Priority,
    Safecharge,
    Simetrik,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseId {
    ConnectorTransactionId(String),
    EncodedData(String),
    NoResponseId,
}

impl ResponseId {
    pub fn get_connector_transaction_id(
        &self,
    ) -> error_stack::Result<String, errors::ConnectorError> {
        match self {
            Self::ConnectorTransactionId(txn_id) => Ok(txn_id.to_string()),
            _ => Err(errors::ConnectorError::MissingConnectorTransactionID)
                .attach_printable("Expected connector transaction ID not found"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentFlowData {
    pub status: AttemptStatus,
    pub payment_id: String,
    pub attempt_id: String,
    pub description: Option<String>,
    pub address: PaymentAddress,
    /// Merchant side reference sent to processors that accept one.
    pub connector_request_reference_id: String,
    pub test_mode: Option<bool>,
    pub connectors: Connectors,
    pub access_token: Option<AccessTokenResponseData>,
    pub connector_meta_data: Option<SecretSerdeValue>,
    pub raw_connector_response: Option<String>,
}

impl PaymentFlowData {
    pub fn get_billing_address(
        &self,
    ) -> Result<&AddressDetails, error_stack::Report<errors::ConnectorError>> {
        self.address
            .get_billing_address()
            .ok_or_else(missing_field_err("billing.address"))
    }

    pub fn get_optional_billing_address(&self) -> Option<&AddressDetails> {
        self.address.get_billing_address()
    }

    pub fn get_access_token(
        &self,
    ) -> Result<&AccessTokenResponseData, error_stack::Report<errors::ConnectorError>> {
        self.access_token
            .as_ref()
            .ok_or_else(missing_field_err("access_token"))
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode.unwrap_or(true)
    }

    pub fn set_status(mut self, status: AttemptStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RefundFlowData {
    pub status: RefundStatus,
    pub refund_id: Option<String>,
    pub connector_request_reference_id: String,
    pub connectors: Connectors,
    pub access_token: Option<AccessTokenResponseData>,
    pub test_mode: Option<bool>,
    pub raw_connector_response: Option<String>,
}

impl RefundFlowData {
    pub fn get_access_token(
        &self,
    ) -> Result<&AccessTokenResponseData, error_stack::Report<errors::ConnectorError>> {
        self.access_token
            .as_ref()
            .ok_or_else(missing_field_err("access_token"))
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserInformation {
    pub ip_address: Option<Secret<String, IpAddress>>,
    pub user_agent: Option<String>,
    pub accept_header: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentsAuthorizeData {
    pub payment_method_data: PaymentMethodData,
    pub minor_amount: MinorUnit,
    pub currency: Currency,
    pub capture_method: Option<CaptureMethod>,
    pub email: Option<Email>,
    pub customer_name: Option<Secret<String>>,
    pub customer_id: Option<String>,
    pub browser_info: Option<BrowserInformation>,
    pub merchant_order_reference_id: Option<String>,
    pub statement_descriptor: Option<String>,
    /// Free form merchant data; some gateways read options (installments, site ids) from it.
    pub metadata: Option<serde_json::Value>,
}

impl PaymentsAuthorizeData {
    pub fn get_ip_address_as_optional(&self) -> Option<Secret<String, IpAddress>> {
        self.browser_info
            .as_ref()
            .and_then(|browser_info| browser_info.ip_address.clone())
    }

    /// String value of a top level metadata key.
    pub fn get_metadata_string(&self, key: &str) -> Option<String> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.get(key))
            .and_then(|value| match value {
                serde_json::Value::String(value) => Some(value.clone()),
                serde_json::Value::Number(value) => Some(value.to_string()),
                _ => None,
            })
    }
}

#[derive(Debug, Clone)]
pub struct PaymentsCaptureData {
    pub minor_amount_to_capture: MinorUnit,
    pub currency: Currency,
    pub connector_transaction_id: ResponseId,
    pub connector_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct PaymentVoidData {
    pub connector_transaction_id: String,
    pub cancellation_reason: Option<String>,
    pub minor_amount: Option<MinorUnit>,
    pub currency: Option<Currency>,
    pub connector_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct PaymentsSyncData {
    pub connector_transaction_id: ResponseId,
    pub capture_method: Option<CaptureMethod>,
    pub minor_amount: MinorUnit,
    pub currency: Currency,
    pub connector_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct RefundsData {
    pub refund_id: String,
    pub connector_transaction_id: String,
    pub minor_refund_amount: MinorUnit,
    pub minor_payment_amount: MinorUnit,
    pub currency: Currency,
    pub reason: Option<String>,
    pub connector_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct RefundSyncData {
    pub connector_transaction_id: String,
    pub connector_refund_id: String,
    pub reason: Option<String>,
    pub connector_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct AccessTokenRequestData {
    pub client_id: Secret<String>,
    pub client_secret: Secret<String>,
    pub audience: Option<String>,
}

impl TryFrom<&ConnectorAuthType> for AccessTokenRequestData {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                client_id: key1.clone(),
                client_secret: api_key.clone(),
                audience: None,
            }),
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Ok(Self {
                client_id: key1.clone(),
                client_secret: api_secret.clone(),
                audience: Some(hyperswitch_masking::PeekInterface::peek(api_key).clone()),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenResponseData {
    pub access_token: Secret<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PaymentsResponseData {
    TransactionResponse {
        /// The authorization: what later capture/void/refund calls need.
        resource_id: ResponseId,
        /// Raw response params, kept for follow-up calls and callers.
        connector_metadata: Option<serde_json::Value>,
        network_txn_id: Option<String>,
        connector_response_reference_id: Option<String>,
        avs_result: Option<AvsResult>,
        cvv_result: Option<CvvResult>,
        message: Option<String>,
        status_code: u16,
    },
}

impl PaymentsResponseData {
    pub fn authorization(&self) -> Option<&str> {
        match self {
            Self::TransactionResponse {
                resource_id: ResponseId::ConnectorTransactionId(id),
                ..
            }
            | Self::TransactionResponse {
                resource_id: ResponseId::EncodedData(id),
                ..
            } => Some(id.as_str()),
            Self::TransactionResponse { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefundsResponseData {
    pub connector_refund_id: String,
    pub refund_status: RefundStatus,
    pub status_code: u16,
}
