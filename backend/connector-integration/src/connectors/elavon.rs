pub mod transformers;

#[cfg(test)]
mod test;

use bytes::Bytes;
use common_utils::{
    errors::CustomResult, ext_traits::BytesExt, scrubbing::TranscriptScrubber,
    types::StringMajorUnit,
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
    ElavonCaptureRequest, ElavonCaptureResponse, ElavonPSyncRequest, ElavonPSyncResponse,
    ElavonPaymentsRequest, ElavonPaymentsResponse, ElavonRSyncRequest, ElavonRSyncResponse,
    ElavonRefundRequest, ElavonRefundResponse, ElavonResponse, ElavonVoidRequest,
    ElavonVoidResponse,
};

use super::macros;
use crate::{utils::preprocess_xml_response_bytes, with_error_response_body};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

static SCRUBBER: Lazy<TranscriptScrubber> = Lazy::new(|| {
    TranscriptScrubber::new(&[
        (
            r"(?i)((?:<|%3C)ssl_card_number(?:>|%3E))[^<%]*",
            "${1}[FILTERED]",
        ),
        (
            r"(?i)((?:<|%3C)ssl_cvv2cvc2(?:>|%3E))[^<%]*",
            "${1}[FILTERED]",
        ),
        (r"(?i)((?:<|%3C)ssl_pin(?:>|%3E))[^<%]*", "${1}[FILTERED]"),
        (r"(?i)((?:<|%3C)ssl_token(?:>|%3E))[^<%]*", "${1}[FILTERED]"),
    ])
});

impl connector_types::ConnectorServiceTrait for Elavon {}
impl connector_types::ValidationTrait for Elavon {}
impl connector_types::PaymentAuthorizeV2 for Elavon {}
impl connector_types::PaymentSyncV2 for Elavon {}
impl connector_types::PaymentVoidV2 for Elavon {}
impl connector_types::PaymentCapture for Elavon {}
impl connector_types::RefundV2 for Elavon {}
impl connector_types::RefundSyncV2 for Elavon {}
impl connector_types::PaymentAccessToken for Elavon {}

impl ConnectorCommon for Elavon {
    fn id(&self) -> &'static str {
        "elavon"
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.elavon.base_url.as_ref()
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
            .and_then(|bytes| bytes.parse_struct::<ElavonResponse>("ElavonResponse").ok());
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
                message: "Elavon error response".to_string(),
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
    connector_name: Elavon,
    api: [
        (
            flow: Authorize,
            request_body: ElavonPaymentsRequest,
            response_body: ElavonPaymentsResponse,
            router_data: RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        ),
        (
            flow: PSync,
            request_body: ElavonPSyncRequest,
            response_body: ElavonPSyncResponse,
            router_data: RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
        ),
        (
            flow: Capture,
            request_body: ElavonCaptureRequest,
            response_body: ElavonCaptureResponse,
            router_data: RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
        ),
        (
            flow: Void,
            request_body: ElavonVoidRequest,
            response_body: ElavonVoidResponse,
            router_data: RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        ),
        (
            flow: Refund,
            request_body: ElavonRefundRequest,
            response_body: ElavonRefundResponse,
            router_data: RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
        ),
        (
            flow: RSync,
            request_body: ElavonRSyncRequest,
            response_body: ElavonRSyncResponse,
            router_data: RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
        )
    ],
    amount_converters: [
        amount_converter: StringMajorUnit
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

        pub fn processxml_url(&self, connectors: &Connectors) -> String {
            format!("{}processxml.do", self.base_url(connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Elavon,
    curl_request: FormUrlEncoded(ElavonPaymentsRequest),
    curl_response: ElavonPaymentsResponse,
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
            Ok(self.processxml_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Elavon,
    curl_request: FormUrlEncoded(ElavonPSyncRequest),
    curl_response: ElavonPSyncResponse,
    flow_name: PSync,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsSyncData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    preprocess_response: true,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.processxml_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Elavon,
    curl_request: FormUrlEncoded(ElavonCaptureRequest),
    curl_response: ElavonCaptureResponse,
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
            Ok(self.processxml_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Elavon,
    curl_request: FormUrlEncoded(ElavonVoidRequest),
    curl_response: ElavonVoidResponse,
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
            Ok(self.processxml_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Elavon,
    curl_request: FormUrlEncoded(ElavonRefundRequest),
    curl_response: ElavonRefundResponse,
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
            Ok(self.processxml_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Elavon,
    curl_request: FormUrlEncoded(ElavonRSyncRequest),
    curl_response: ElavonRSyncResponse,
    flow_name: RSync,
    resource_common_data: RefundFlowData,
    flow_request: RefundSyncData,
    flow_response: RefundsResponseData,
    http_method: Post,
    preprocess_response: true,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.processxml_url(&req.resource_common_data.connectors))
        }
    }
);

impl
    ConnectorIntegrationV2<
        CreateAccessToken,
        PaymentFlowData,
        AccessTokenRequestData,
        AccessTokenResponseData,
    > for Elavon
{
}
