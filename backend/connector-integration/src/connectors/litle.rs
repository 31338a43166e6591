pub mod transformers;

#[cfg(test)]
mod test;

use bytes::Bytes;
use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    scrubbing::{from_owned_rules, xml_element_rule, TranscriptScrubber},
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
    LitleCaptureRequest, LitleCaptureResponse, LitlePaymentsRequest, LitlePaymentsResponse,
    LitleRefundRequest, LitleRefundResponse, LitleResponse, LitleVoidRequest,
    LitleVoidResponse,
};

use super::macros;
use crate::{utils::preprocess_xml_response_bytes, with_error_response_body};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

static SCRUBBER: Lazy<TranscriptScrubber> = Lazy::new(|| {
    from_owned_rules(&[
        xml_element_rule("number"),
        xml_element_rule("cardValidationNum"),
        xml_element_rule("password"),
    ])
});

impl connector_types::ConnectorServiceTrait for Litle {}
impl connector_types::ValidationTrait for Litle {}
impl connector_types::PaymentAuthorizeV2 for Litle {}
impl connector_types::PaymentSyncV2 for Litle {}
impl connector_types::PaymentVoidV2 for Litle {}
impl connector_types::PaymentCapture for Litle {}
impl connector_types::RefundV2 for Litle {}
impl connector_types::RefundSyncV2 for Litle {}
impl connector_types::PaymentAccessToken for Litle {}

impl ConnectorCommon for Litle {
    fn id(&self) -> &'static str {
        "litle"
    }

    fn common_get_content_type(&self) -> &'static str {
        "text/xml; charset=utf-8"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.litle.base_url.as_ref()
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
            .and_then(|bytes| bytes.parse_struct::<LitleResponse>("LitleResponse").ok())
            .filter(|response| response.response.is_some());
        if let Some(response) = parsed {
            with_error_response_body!(event_builder, response);
            return Ok(ErrorResponse {
                raw_connector_response: Some(raw_response),
                ..response.error_response(res.status_code)
            });
        }

        Ok(ErrorResponse {
            status_code: res.status_code,
            code: res.status_code.to_string(),
            message: "Litle error response".to_string(),
            reason: Some(raw_response.clone()),
            raw_connector_response: Some(raw_response),
            ..Default::default()
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
    connector_name: Litle,
    api: [
        (
            flow: Authorize,
            request_body: LitlePaymentsRequest,
            response_body: LitlePaymentsResponse,
            router_data: RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        ),
        (
            flow: Capture,
            request_body: LitleCaptureRequest,
            response_body: LitleCaptureResponse,
            router_data: RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
        ),
        (
            flow: Void,
            request_body: LitleVoidRequest,
            response_body: LitleVoidResponse,
            router_data: RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        ),
        (
            flow: Refund,
            request_body: LitleRefundRequest,
            response_body: LitleRefundResponse,
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

        pub fn service_url(&self, connectors: &Connectors) -> String {
            format!("{}vap/communicator/online", self.base_url(connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Litle,
    curl_request: RawXml(LitlePaymentsRequest),
    curl_response: LitlePaymentsResponse,
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
            Ok(self.service_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Litle,
    curl_request: RawXml(LitleCaptureRequest),
    curl_response: LitleCaptureResponse,
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
            Ok(self.service_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Litle,
    curl_request: RawXml(LitleVoidRequest),
    curl_response: LitleVoidResponse,
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
            Ok(self.service_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Litle,
    curl_request: RawXml(LitleRefundRequest),
    curl_response: LitleRefundResponse,
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
            Ok(self.service_url(&req.resource_common_data.connectors))
        }
    }
);

impl ConnectorIntegrationV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
    for Litle
{
}

impl ConnectorIntegrationV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
    for Litle
{
}

impl
    ConnectorIntegrationV2<
        CreateAccessToken,
        PaymentFlowData,
        AccessTokenRequestData,
        AccessTokenResponseData,
    > for Litle
{
}
