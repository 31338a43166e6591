pub mod transformers;

#[cfg(test)]
mod test;

use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    scrubbing::{from_owned_rules, json_field_rule, TranscriptScrubber},
    types::MinorUnit,
};
use domain_types::{
    connector_flow::{Authorize, Capture, CreateAccessToken, PSync, RSync, Refund, Void},
    connector_types::{
        AccessTokenRequestData, AccessTokenResponseData, PaymentFlowData, PaymentVoidData,
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsResponseData, PaymentsSyncData,
        RefundFlowData, RefundSyncData, RefundsData, RefundsResponseData,
    },
    errors,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Connectors,
};
use error_stack::ResultExt;
use hyperswitch_masking::{Mask, Maskable, PeekInterface};
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2, connector_types,
    events::connector_api_logs::ConnectorEvent,
};
use once_cell::sync::Lazy;
use transformers::{
    self as decidir, DecidirCaptureRequest, DecidirCaptureResponse, DecidirPaymentsRequest,
    DecidirPaymentsResponse, DecidirRefundRequest, DecidirRefundResponse, DecidirResponse,
    DecidirVoidRequest, DecidirVoidResponse,
};

use super::macros;
use crate::with_error_response_body;

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const API_KEY: &str = "apikey";
}

static SCRUBBER: Lazy<TranscriptScrubber> = Lazy::new(|| {
    let mut rules = vec![
        json_field_rule("card_number"),
        json_field_rule("security_code"),
    ];
    rules.push((r"(?i)(apikey: )\S+".to_string(), "${1}[FILTERED]".to_string()));
    from_owned_rules(&rules)
});

impl connector_types::ConnectorServiceTrait for Decidir {}
impl connector_types::ValidationTrait for Decidir {}
impl connector_types::PaymentAuthorizeV2 for Decidir {}
impl connector_types::PaymentSyncV2 for Decidir {}
impl connector_types::PaymentVoidV2 for Decidir {}
impl connector_types::PaymentCapture for Decidir {}
impl connector_types::RefundV2 for Decidir {}
impl connector_types::RefundSyncV2 for Decidir {}
impl connector_types::PaymentAccessToken for Decidir {}

impl ConnectorCommon for Decidir {
    fn id(&self) -> &'static str {
        "decidir"
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let auth = decidir::DecidirAuthType::try_from(auth_type)
            .change_context(errors::ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![(
            headers::API_KEY.to_string(),
            auth.api_key.peek().to_owned().into_masked(),
        )])
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.decidir.base_url.as_ref()
    }

    fn build_error_response(
        &self,
        res: Response,
        event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let raw_response = String::from_utf8_lossy(&res.response).into_owned();
        let response: DecidirResponse = res
            .response
            .parse_struct("DecidirResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        with_error_response_body!(event_builder, response);

        Ok(ErrorResponse {
            raw_connector_response: Some(raw_response),
            ..response.error_response(res.status_code)
        })
    }

    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn scrub(&self, transcript: &str) -> String {
        SCRUBBER.scrub(transcript)
    }
}

macros::create_all_prerequisites!(
    connector_name: Decidir,
    api: [
        (
            flow: Authorize,
            request_body: DecidirPaymentsRequest,
            response_body: DecidirPaymentsResponse,
            router_data: RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        ),
        (
            flow: Capture,
            request_body: DecidirCaptureRequest,
            response_body: DecidirCaptureResponse,
            router_data: RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
        ),
        (
            flow: Void,
            request_body: DecidirVoidRequest,
            response_body: DecidirVoidResponse,
            router_data: RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        ),
        (
            flow: Refund,
            request_body: DecidirRefundRequest,
            response_body: DecidirRefundResponse,
            router_data: RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
        )
    ],
    amount_converters: [
        amount_converter: MinorUnit
    ],
    member_functions: {
        pub fn build_headers<F, FCD, Req, Res>(
            &self,
            req: &RouterDataV2<F, FCD, Req, Res>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            let mut header = vec![(
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            )];
            let mut api_key = self.get_auth_header(&req.connector_auth_type)?;
            header.append(&mut api_key);
            Ok(header)
        }

        pub fn payments_url(&self, connectors: &Connectors) -> String {
            format!("{}payments", self.base_url(connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Decidir,
    curl_request: Json(DecidirPaymentsRequest),
    curl_response: DecidirPaymentsResponse,
    flow_name: Authorize,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsAuthorizeData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.payments_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Decidir,
    curl_request: Json(DecidirCaptureRequest),
    curl_response: DecidirCaptureResponse,
    flow_name: Capture,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsCaptureData,
    flow_response: PaymentsResponseData,
    http_method: Put,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            let payment_id = req
                .request
                .connector_transaction_id
                .get_connector_transaction_id()
                .change_context(errors::ConnectorError::MissingConnectorTransactionID)?;
            Ok(format!(
                "{}/{payment_id}",
                self.payments_url(&req.resource_common_data.connectors)
            ))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Decidir,
    curl_request: Json(DecidirVoidRequest),
    curl_response: DecidirVoidResponse,
    flow_name: Void,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentVoidData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(format!(
                "{}/{}/refunds",
                self.payments_url(&req.resource_common_data.connectors),
                req.request.connector_transaction_id
            ))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Decidir,
    curl_request: Json(DecidirRefundRequest),
    curl_response: DecidirRefundResponse,
    flow_name: Refund,
    resource_common_data: RefundFlowData,
    flow_request: RefundsData,
    flow_response: RefundsResponseData,
    http_method: Post,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(format!(
                "{}/{}/refunds",
                self.payments_url(&req.resource_common_data.connectors),
                req.request.connector_transaction_id
            ))
        }
    }
);

impl ConnectorIntegrationV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
    for Decidir
{
}

impl ConnectorIntegrationV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
    for Decidir
{
}

impl
    ConnectorIntegrationV2<
        CreateAccessToken,
        PaymentFlowData,
        AccessTokenRequestData,
        AccessTokenResponseData,
    > for Decidir
{
}
