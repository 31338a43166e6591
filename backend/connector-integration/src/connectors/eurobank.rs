pub mod transformers;


use bytes::Bytes;
use common_utils::{
    errors::CustomResult, ext_traits::BytesExt, scrubbing::TranscriptScrubber, types::MinorUnit,
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
use hyperswitch_masking::Maskable;
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2, connector_types,
    events::connector_api_logs::ConnectorEvent,
};
use once_cell::sync::Lazy;
use transformers::{
    EurobankCaptureRequest, EurobankCaptureResponse, EurobankPaymentsRequest,
    EurobankPaymentsResponse, EurobankRefundRequest, EurobankRefundResponse, EurobankResponse,
    EurobankVoidRequest, EurobankVoidResponse,
};

use super::macros;
use crate::{utils::preprocess_xml_response_bytes, with_error_response_body};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

// The command travels form encoded, so tags may appear as %3C...%3E.
static SCRUBBER: Lazy<TranscriptScrubber> = Lazy::new(|| {
    TranscriptScrubber::new(&[
        (r"(?i)((?:<|%3C)CCN(?:>|%3E))[^<%]*", "${1}[FILTERED]"),
        (r"(?i)((?:<|%3C)CVCCVV(?:>|%3E))[^<%]*", "${1}[FILTERED]"),
        (r"(?i)((?:<|%3C)Password(?:>|%3E))[^<%]*", "${1}[FILTERED]"),
    ])
});

impl connector_types::ConnectorServiceTrait for Eurobank {}
impl connector_types::ValidationTrait for Eurobank {}
impl connector_types::PaymentAuthorizeV2 for Eurobank {}
impl connector_types::PaymentSyncV2 for Eurobank {}
impl connector_types::PaymentVoidV2 for Eurobank {}
impl connector_types::PaymentCapture for Eurobank {}
impl connector_types::RefundV2 for Eurobank {}
impl connector_types::RefundSyncV2 for Eurobank {}
impl connector_types::PaymentAccessToken for Eurobank {}

impl ConnectorCommon for Eurobank {
    fn id(&self) -> &'static str {
        "eurobank"
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.eurobank.base_url.as_ref()
    }

    fn build_error_response(
        &self,
        res: Response,
        event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let raw_response = String::from_utf8_lossy(&res.response).into_owned();
        let parsed = self
            .preprocess_response_bytes(res.response.clone())
            .ok()
            .and_then(|bytes| bytes.parse_struct::<EurobankResponse>("EurobankResponse").ok());
        match parsed {
            Some(response) => {
                with_error_response_body!(event_builder, response);
                Ok(ErrorResponse {
                    raw_connector_response: Some(raw_response),
                    ..response.error_response(res.status_code)
                })
            }
            None => Ok(ErrorResponse {
                status_code: res.status_code,
                code: res.status_code.to_string(),
                message: "Eurobank error response".to_string(),
                reason: Some(raw_response.clone()),
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
    connector_name: Eurobank,
    api: [
        (
            flow: Authorize,
            request_body: EurobankPaymentsRequest,
            response_body: EurobankPaymentsResponse,
            router_data: RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        ),
        (
            flow: Capture,
            request_body: EurobankCaptureRequest,
            response_body: EurobankCaptureResponse,
            router_data: RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
        ),
        (
            flow: Void,
            request_body: EurobankVoidRequest,
            response_body: EurobankVoidResponse,
            router_data: RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        ),
        (
            flow: Refund,
            request_body: EurobankRefundRequest,
            response_body: EurobankRefundResponse,
            router_data: RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
        )
    ],
    amount_converters: [
        amount_converter: MinorUnit
    ],
    member_functions: {
        pub fn preprocess_response_bytes(
            &self,
            response_bytes: Bytes,
        ) -> Result<Bytes, errors::ConnectorError> {
            preprocess_xml_response_bytes(response_bytes)
        }

        pub fn build_headers<F, FCD, Req, Res>(
            &self,
            _req: &RouterDataV2<F, FCD, Req, Res>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            Ok(vec![(
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            )])
        }

        pub fn apacs_url(&self, connectors: &Connectors) -> String {
            format!("{}apacsonline", self.base_url(connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eurobank,
    curl_request: FormUrlEncoded(EurobankPaymentsRequest),
    curl_response: EurobankPaymentsResponse,
    flow_name: Authorize,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsAuthorizeData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    preprocess_response: true,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.apacs_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eurobank,
    curl_request: FormUrlEncoded(EurobankCaptureRequest),
    curl_response: EurobankCaptureResponse,
    flow_name: Capture,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsCaptureData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    preprocess_response: true,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.apacs_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eurobank,
    curl_request: FormUrlEncoded(EurobankVoidRequest),
    curl_response: EurobankVoidResponse,
    flow_name: Void,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentVoidData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    preprocess_response: true,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.apacs_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eurobank,
    curl_request: FormUrlEncoded(EurobankRefundRequest),
    curl_response: EurobankRefundResponse,
    flow_name: Refund,
    resource_common_data: RefundFlowData,
    flow_request: RefundsData,
    flow_response: RefundsResponseData,
    http_method: Post,
    preprocess_response: true,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.apacs_url(&req.resource_common_data.connectors))
        }
    }
);

impl ConnectorIntegrationV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
    for Eurobank
{
}

impl ConnectorIntegrationV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
    for Eurobank
{
}

impl
    ConnectorIntegrationV2<
        CreateAccessToken,
        PaymentFlowData,
        AccessTokenRequestData,
        AccessTokenResponseData,
    > for Eurobank
{
}
