pub mod transformers;

#[cfg(test)]
mod test;

use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    scrubbing::{from_owned_rules, json_field_rule, TranscriptScrubber},
    types::FloatMajorUnit,
};
use domain_types::{
    connector_flow::{Authorize, Capture, CreateAccessToken, PSync, RSync, Refund, Void},
    connector_types::{
        AccessTokenRequestData, AccessTokenResponseData, PaymentFlowData, PaymentVoidData,
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsResponseData, PaymentsSyncData,
        RefundFlowData, RefundSyncData, RefundsData, RefundsResponseData,
    },
    errors,
    router_data::ErrorResponse,
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Connectors,
};
use hyperswitch_masking::{Mask, Maskable, PeekInterface};
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2, connector_types,
    events::connector_api_logs::ConnectorEvent,
};
use once_cell::sync::Lazy;
use transformers::{
    SimetrikAccessTokenRequest, SimetrikAccessTokenResponse, SimetrikCaptureRequest,
    SimetrikCaptureResponse, SimetrikErrorResponse, SimetrikPaymentsRequest,
    SimetrikPaymentsResponse, SimetrikRefundRequest, SimetrikRefundResponse, SimetrikVoidRequest,
    SimetrikVoidResponse,
};

use super::macros;
use crate::{utils, with_error_response_body};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
}

static SCRUBBER: Lazy<TranscriptScrubber> = Lazy::new(|| {
    let mut rules = vec![
        json_field_rule("number"),
        json_field_rule("security_code"),
        json_field_rule("client_secret"),
        json_field_rule("access_token"),
    ];
    rules.push((
        r"(?i)(Authorization: Bearer )\S+".to_string(),
        "${1}[FILTERED]".to_string(),
    ));
    from_owned_rules(&rules)
});

impl connector_types::ConnectorServiceTrait for Simetrik {}
impl connector_types::PaymentAuthorizeV2 for Simetrik {}
impl connector_types::PaymentSyncV2 for Simetrik {}
impl connector_types::PaymentVoidV2 for Simetrik {}
impl connector_types::PaymentCapture for Simetrik {}
impl connector_types::RefundV2 for Simetrik {}
impl connector_types::RefundSyncV2 for Simetrik {}
impl connector_types::PaymentAccessToken for Simetrik {}

impl connector_types::ValidationTrait for Simetrik {
    fn should_do_access_token(&self) -> bool {
        true
    }
}

impl ConnectorCommon for Simetrik {
    fn id(&self) -> &'static str {
        "simetrik"
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.simetrik.base_url.as_ref()
    }

    fn build_error_response(
        &self,
        res: Response,
        event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let raw_response = String::from_utf8_lossy(&res.response).into_owned();
        match res
            .response
            .parse_struct::<SimetrikErrorResponse>("SimetrikErrorResponse")
        {
            Ok(response) => {
                with_error_response_body!(event_builder, response);
                Ok(ErrorResponse {
                    raw_connector_response: Some(raw_response),
                    ..response.error_response(res.status_code)
                })
            }
            Err(_) => Ok(ErrorResponse {
                status_code: res.status_code,
                code: res.status_code.to_string(),
                message: "Simetrik error response".to_string(),
                reason: (!raw_response.is_empty()).then(|| raw_response.clone()),
                raw_connector_response: Some(raw_response),
                ..Default::default()
            }),
        }
    }

    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn scrub(&self, transcript: &str) -> String {
        SCRUBBER.scrub(transcript)
    }
}

macros::create_all_prerequisites!(
    connector_name: Simetrik,
    api: [
        (
            flow: CreateAccessToken,
            request_body: SimetrikAccessTokenRequest,
            response_body: SimetrikAccessTokenResponse,
            router_data: RouterDataV2<CreateAccessToken, PaymentFlowData, AccessTokenRequestData, AccessTokenResponseData>
        ),
        (
            flow: Authorize,
            request_body: SimetrikPaymentsRequest,
            response_body: SimetrikPaymentsResponse,
            router_data: RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        ),
        (
            flow: Capture,
            request_body: SimetrikCaptureRequest,
            response_body: SimetrikCaptureResponse,
            router_data: RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
        ),
        (
            flow: Void,
            request_body: SimetrikVoidRequest,
            response_body: SimetrikVoidResponse,
            router_data: RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        ),
        (
            flow: Refund,
            request_body: SimetrikRefundRequest,
            response_body: SimetrikRefundResponse,
            router_data: RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
        )
    ],
    amount_converters: [
        amount_converter: FloatMajorUnit
    ],
    member_functions: {
        /// Content type plus the bearer token obtained through `CreateAccessToken`.
        pub fn bearer_headers(
            &self,
            access_token: &AccessTokenResponseData,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            Ok(vec![
                (
                    headers::CONTENT_TYPE.to_string(),
                    self.common_get_content_type().to_string().into(),
                ),
                (
                    headers::AUTHORIZATION.to_string(),
                    format!("Bearer {}", access_token.access_token.peek()).into_masked(),
                ),
            ])
        }

        pub fn endpoint_url(&self, connectors: &Connectors, endpoint: &str) -> String {
            format!("{}{endpoint}", self.base_url(connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Simetrik,
    curl_request: Json(SimetrikAccessTokenRequest),
    curl_response: SimetrikAccessTokenResponse,
    flow_name: CreateAccessToken,
    resource_common_data: PaymentFlowData,
    flow_request: AccessTokenRequestData,
    flow_response: AccessTokenResponseData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            _req: &RouterDataV2<CreateAccessToken, PaymentFlowData, AccessTokenRequestData, AccessTokenResponseData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            Ok(vec![(
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            )])
        }

        fn get_url(
            &self,
            req: &RouterDataV2<CreateAccessToken, PaymentFlowData, AccessTokenRequestData, AccessTokenResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            let auth_url = req
                .resource_common_data
                .connectors
                .simetrik
                .secondary_base_url
                .as_deref()
                .ok_or(errors::ConnectorError::FailedToObtainIntegrationUrl)?;
            Ok(format!("{auth_url}oauth/token"))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Simetrik,
    curl_request: Json(SimetrikPaymentsRequest),
    curl_response: SimetrikPaymentsResponse,
    flow_name: Authorize,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsAuthorizeData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.bearer_headers(req.resource_common_data.get_access_token()?)
        }

        fn get_url(
            &self,
            req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            let endpoint = if utils::is_auto_capture(req.request.capture_method, self.id())? {
                "charge"
            } else {
                "authorize"
            };
            Ok(self.endpoint_url(&req.resource_common_data.connectors, endpoint))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Simetrik,
    curl_request: Json(SimetrikCaptureRequest),
    curl_response: SimetrikCaptureResponse,
    flow_name: Capture,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsCaptureData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.bearer_headers(req.resource_common_data.get_access_token()?)
        }

        fn get_url(
            &self,
            req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.endpoint_url(&req.resource_common_data.connectors, "capture"))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Simetrik,
    curl_request: Json(SimetrikVoidRequest),
    curl_response: SimetrikVoidResponse,
    flow_name: Void,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentVoidData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.bearer_headers(req.resource_common_data.get_access_token()?)
        }

        fn get_url(
            &self,
            req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.endpoint_url(&req.resource_common_data.connectors, "void"))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Simetrik,
    curl_request: Json(SimetrikRefundRequest),
    curl_response: SimetrikRefundResponse,
    flow_name: Refund,
    resource_common_data: RefundFlowData,
    flow_request: RefundsData,
    flow_response: RefundsResponseData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.bearer_headers(req.resource_common_data.get_access_token()?)
        }

        fn get_url(
            &self,
            req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.endpoint_url(&req.resource_common_data.connectors, "refund"))
        }
    }
);

impl ConnectorIntegrationV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
    for Simetrik
{
}

impl ConnectorIntegrationV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
    for Simetrik
{
}
