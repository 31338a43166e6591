//! Builds a `RouterDataV2` for one flow from normalized parameters and runs it
//! against the configured processor endpoint.

use std::marker::PhantomData;

use common_enums::{AttemptStatus, CaptureMethod, Currency, RefundStatus};
use common_utils::{errors::CustomResult, pii::Email, types::MinorUnit};
use connector_integration::types::ConnectorData;
use domain_types::{
    connector_flow::{Authorize, Capture, CreateAccessToken, PSync, RSync, Refund, Void},
    connector_types::{
        AccessTokenRequestData, AccessTokenResponseData, ConnectorEnum, PaymentFlowData,
        PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData, PaymentsResponseData,
        PaymentsSyncData, RefundFlowData, RefundSyncData, RefundsData, RefundsResponseData,
        ResponseId,
    },
    payment_address::{Address, AddressDetails, PaymentAddress},
    payment_method_data::PaymentMethodData,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    types::Proxy,
};
use error_stack::ResultExt;
use hyperswitch_masking::ErasedMaskSerialize;
use interfaces::{
    connector_integration_v2::{BoxedConnectorIntegrationV2, ConnectorIntegrationAnyV2},
    connector_types::ConnectorServiceTrait,
};
use serde::Serialize;

use crate::{configs::Config, error::GatewayError, service::execute_connector_processing_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Flow {
    AccessToken,
    Authorize,
    Psync,
    Capture,
    Void,
    Refund,
    Rsync,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::Authorize => "authorize",
            Self::Psync => "psync",
            Self::Capture => "capture",
            Self::Void => "void",
            Self::Refund => "refund",
            Self::Rsync => "rsync",
        }
    }
}

/// Normalized inputs of a single processor call.
#[derive(Debug, Clone)]
pub struct PaymentParams {
    pub auth: ConnectorAuthType,
    pub amount: MinorUnit,
    pub currency: Currency,
    pub capture_method: Option<CaptureMethod>,
    pub payment_method: Option<PaymentMethodData>,
    /// Authorization returned by an earlier call, for follow-up flows.
    pub authorization: Option<String>,
    pub connector_refund_id: Option<String>,
    pub connector_metadata: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
    pub order_id: String,
    pub refund_id: String,
    pub description: Option<String>,
    pub reason: Option<String>,
    pub email: Option<Email>,
    pub customer_id: Option<String>,
    pub billing: Option<AddressDetails>,
}

impl PaymentParams {
    pub fn new(auth: ConnectorAuthType, amount: MinorUnit, currency: Currency) -> Self {
        Self {
            auth,
            amount,
            currency,
            capture_method: None,
            payment_method: None,
            authorization: None,
            connector_refund_id: None,
            connector_metadata: None,
            metadata: None,
            order_id: "order_1".to_string(),
            refund_id: "refund_1".to_string(),
            description: None,
            reason: None,
            email: None,
            customer_id: None,
            billing: None,
        }
    }

    fn authorization(&self) -> Result<String, GatewayError> {
        self.authorization
            .clone()
            .ok_or(GatewayError::MissingArgument("authorization"))
    }
}

/// What the driver prints: the normalized result of one call.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub connector: String,
    pub flow: &'static str,
    pub success: bool,
    pub status: String,
    /// Normalized response or error, secrets masked.
    pub response: serde_json::Value,
}

impl Outcome {
    fn new<T: Serialize>(
        connector: ConnectorEnum,
        flow: Flow,
        status: String,
        response: &Result<T, ErrorResponse>,
    ) -> CustomResult<Self, GatewayError> {
        let rendered = match response {
            Ok(data) => data.masked_serialize(),
            Err(error) => error.masked_serialize(),
        }
        .change_context(GatewayError::OutcomeSerializationFailed)?;
        Ok(Self {
            connector: connector.to_string(),
            flow: flow.as_str(),
            success: response.is_ok(),
            status,
            response: rendered,
        })
    }
}

/// Runs `flow` for `connector_name`, fetching an access token first when the gateway
/// authenticates with one.
pub async fn run_flow(
    config: &Config,
    connector_name: ConnectorEnum,
    flow: Flow,
    params: &PaymentParams,
) -> CustomResult<Outcome, GatewayError> {
    let connector: &'static (dyn ConnectorServiceTrait + Sync) =
        *ConnectorData::get_connector_by_name(&connector_name).connector;
    let proxy = &config.proxy;

    let access_token = if flow != Flow::AccessToken && connector.should_do_access_token() {
        let router_data = create_access_token(proxy, connector, config, params).await?;
        match router_data.response {
            Ok(token) => Some(token),
            Err(error) => {
                tracing::warn!(connector = %connector_name, "access token request was refused");
                return Outcome::new(
                    connector_name,
                    Flow::AccessToken,
                    AttemptStatus::AuthenticationFailed.to_string(),
                    &Err::<AccessTokenResponseData, _>(error),
                );
            }
        }
    } else {
        None
    };

    match flow {
        Flow::AccessToken => {
            let router_data = create_access_token(proxy, connector, config, params).await?;
            Outcome::new(
                connector_name,
                flow,
                router_data.resource_common_data.status.to_string(),
                &router_data.response,
            )
        }
        Flow::Authorize => {
            let payment_method_data = params
                .payment_method
                .clone()
                .ok_or(GatewayError::MissingArgument("card or token"))?;
            let request = PaymentsAuthorizeData {
                payment_method_data,
                minor_amount: params.amount,
                currency: params.currency,
                capture_method: params.capture_method,
                email: params.email.clone(),
                customer_name: None,
                customer_id: params.customer_id.clone(),
                browser_info: None,
                merchant_order_reference_id: Some(params.order_id.clone()),
                statement_descriptor: None,
                metadata: params.metadata.clone(),
            };
            let integration: BoxedConnectorIntegrationV2<
                'static,
                Authorize,
                PaymentFlowData,
                PaymentsAuthorizeData,
                PaymentsResponseData,
            > = connector.get_connector_integration_v2();
            let router_data = execute(
                proxy,
                integration,
                router_data(payment_flow_data(config, params, access_token), params, request),
            )
            .await?;
            payment_outcome(connector_name, flow, router_data)
        }
        Flow::Psync => {
            let request = PaymentsSyncData {
                connector_transaction_id: ResponseId::ConnectorTransactionId(
                    params.authorization()?,
                ),
                capture_method: params.capture_method,
                minor_amount: params.amount,
                currency: params.currency,
                connector_metadata: params.connector_metadata.clone(),
            };
            let integration: BoxedConnectorIntegrationV2<
                'static,
                PSync,
                PaymentFlowData,
                PaymentsSyncData,
                PaymentsResponseData,
            > = connector.get_connector_integration_v2();
            let router_data = execute(
                proxy,
                integration,
                router_data(payment_flow_data(config, params, access_token), params, request),
            )
            .await?;
            payment_outcome(connector_name, flow, router_data)
        }
        Flow::Capture => {
            let request = PaymentsCaptureData {
                minor_amount_to_capture: params.amount,
                currency: params.currency,
                connector_transaction_id: ResponseId::ConnectorTransactionId(
                    params.authorization()?,
                ),
                connector_metadata: params.connector_metadata.clone(),
            };
            let integration: BoxedConnectorIntegrationV2<
                'static,
                Capture,
                PaymentFlowData,
                PaymentsCaptureData,
                PaymentsResponseData,
            > = connector.get_connector_integration_v2();
            let router_data = execute(
                proxy,
                integration,
                router_data(payment_flow_data(config, params, access_token), params, request),
            )
            .await?;
            payment_outcome(connector_name, flow, router_data)
        }
        Flow::Void => {
            let request = PaymentVoidData {
                connector_transaction_id: params.authorization()?,
                cancellation_reason: params.reason.clone(),
                minor_amount: Some(params.amount),
                currency: Some(params.currency),
                connector_metadata: params.connector_metadata.clone(),
            };
            let integration: BoxedConnectorIntegrationV2<
                'static,
                Void,
                PaymentFlowData,
                PaymentVoidData,
                PaymentsResponseData,
            > = connector.get_connector_integration_v2();
            let router_data = execute(
                proxy,
                integration,
                router_data(payment_flow_data(config, params, access_token), params, request),
            )
            .await?;
            payment_outcome(connector_name, flow, router_data)
        }
        Flow::Refund => {
            let request = RefundsData {
                refund_id: params.refund_id.clone(),
                connector_transaction_id: params.authorization()?,
                minor_refund_amount: params.amount,
                minor_payment_amount: params.amount,
                currency: params.currency,
                reason: params.reason.clone(),
                connector_metadata: params.connector_metadata.clone(),
            };
            let integration: BoxedConnectorIntegrationV2<
                'static,
                Refund,
                RefundFlowData,
                RefundsData,
                RefundsResponseData,
            > = connector.get_connector_integration_v2();
            let router_data = execute(
                proxy,
                integration,
                router_data(refund_flow_data(config, params, access_token), params, request),
            )
            .await?;
            refund_outcome(connector_name, flow, router_data)
        }
        Flow::Rsync => {
            let request = RefundSyncData {
                connector_transaction_id: params.authorization()?,
                connector_refund_id: params
                    .connector_refund_id
                    .clone()
                    .ok_or(GatewayError::MissingArgument("connector_refund_id"))?,
                reason: params.reason.clone(),
                connector_metadata: params.connector_metadata.clone(),
            };
            let integration: BoxedConnectorIntegrationV2<
                'static,
                RSync,
                RefundFlowData,
                RefundSyncData,
                RefundsResponseData,
            > = connector.get_connector_integration_v2();
            let router_data = execute(
                proxy,
                integration,
                router_data(refund_flow_data(config, params, access_token), params, request),
            )
            .await?;
            refund_outcome(connector_name, flow, router_data)
        }
    }
}

async fn create_access_token(
    proxy: &Proxy,
    connector: &'static (dyn ConnectorServiceTrait + Sync),
    config: &Config,
    params: &PaymentParams,
) -> CustomResult<
    RouterDataV2<CreateAccessToken, PaymentFlowData, AccessTokenRequestData, AccessTokenResponseData>,
    GatewayError,
> {
    let request = AccessTokenRequestData::try_from(&params.auth)
        .change_context(GatewayError::MissingArgument("client credentials"))?;
    let integration: BoxedConnectorIntegrationV2<
        'static,
        CreateAccessToken,
        PaymentFlowData,
        AccessTokenRequestData,
        AccessTokenResponseData,
    > = connector.get_connector_integration_v2();
    execute(
        proxy,
        integration,
        router_data(payment_flow_data(config, params, None), params, request),
    )
    .await
}

async fn execute<F, C, Req, Resp>(
    proxy: &Proxy,
    integration: BoxedConnectorIntegrationV2<'static, F, C, Req, Resp>,
    router_data: RouterDataV2<F, C, Req, Resp>,
) -> CustomResult<RouterDataV2<F, C, Req, Resp>, GatewayError>
where
    F: Clone + 'static,
    C: Clone + 'static,
    Req: Clone + std::fmt::Debug + 'static,
    Resp: Clone + std::fmt::Debug + 'static,
{
    execute_connector_processing_step(proxy, integration, router_data)
        .await
        .change_context(GatewayError::ProcessingStepFailed)
}

fn payment_outcome<F, Req>(
    connector_name: ConnectorEnum,
    flow: Flow,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
) -> CustomResult<Outcome, GatewayError> {
    Outcome::new(
        connector_name,
        flow,
        router_data.resource_common_data.status.to_string(),
        &router_data.response,
    )
}

fn refund_outcome<F, Req>(
    connector_name: ConnectorEnum,
    flow: Flow,
    router_data: RouterDataV2<F, RefundFlowData, Req, RefundsResponseData>,
) -> CustomResult<Outcome, GatewayError> {
    let status = match &router_data.response {
        Ok(response) => response.refund_status,
        Err(_) => RefundStatus::Failure,
    };
    Outcome::new(connector_name, flow, status.to_string(), &router_data.response)
}

fn router_data<F, C, Req, Resp>(
    resource_common_data: C,
    params: &PaymentParams,
    request: Req,
) -> RouterDataV2<F, C, Req, Resp> {
    RouterDataV2 {
        flow: PhantomData,
        resource_common_data,
        connector_auth_type: params.auth.clone(),
        request,
        response: Err(ErrorResponse::default()),
    }
}

fn is_test_mode(config: &Config) -> Option<bool> {
    Some(config.common.environment != "production")
}

fn payment_flow_data(
    config: &Config,
    params: &PaymentParams,
    access_token: Option<AccessTokenResponseData>,
) -> PaymentFlowData {
    PaymentFlowData {
        status: AttemptStatus::Pending,
        payment_id: params.order_id.clone(),
        attempt_id: format!("{}_1", params.order_id),
        description: params.description.clone(),
        address: PaymentAddress::new(
            params.billing.clone().map(|address| Address {
                address: Some(address),
                phone: None,
                email: params.email.clone(),
            }),
            None,
        ),
        connector_request_reference_id: params.order_id.clone(),
        test_mode: is_test_mode(config),
        connectors: config.connectors.clone(),
        access_token,
        connector_meta_data: None,
        raw_connector_response: None,
    }
}

fn refund_flow_data(
    config: &Config,
    params: &PaymentParams,
    access_token: Option<AccessTokenResponseData>,
) -> RefundFlowData {
    RefundFlowData {
        status: RefundStatus::Pending,
        refund_id: Some(params.refund_id.clone()),
        connector_request_reference_id: params.order_id.clone(),
        connectors: config.connectors.clone(),
        access_token,
        test_mode: is_test_mode(config),
        raw_connector_response: None,
    }
}

#[cfg(test)]
mod tests {
    use hyperswitch_masking::Secret;

    use super::*;

    #[test]
    fn follow_up_flows_need_an_authorization() {
        let params = PaymentParams::new(ConnectorAuthType::NoKey, MinorUnit::new(100), Currency::USD);
        assert!(matches!(
            params.authorization(),
            Err(GatewayError::MissingArgument("authorization"))
        ));
    }

    #[test]
    fn outcome_masks_secrets_in_the_response() {
        let token = AccessTokenResponseData {
            access_token: Secret::new("eyJhbGciOi.secret".to_string()),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3600),
        };
        let outcome = Outcome::new(
            ConnectorEnum::Simetrik,
            Flow::AccessToken,
            "pending".to_string(),
            &Ok::<_, ErrorResponse>(token),
        )
        .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.connector, "simetrik");
        assert!(!outcome.response.to_string().contains("eyJhbGciOi.secret"));
    }

    #[test]
    fn declines_are_reported_as_unsuccessful_outcomes() {
        let outcome = Outcome::new(
            ConnectorEnum::Checkout,
            Flow::Authorize,
            AttemptStatus::Failure.to_string(),
            &Err::<PaymentsResponseData, _>(ErrorResponse::decline("20051", "Insufficient Funds", 200)),
        )
        .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.flow, "authorize");
        assert_eq!(outcome.response["code"], "20051");
    }
}
