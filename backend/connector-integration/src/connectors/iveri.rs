pub mod transformers;

#[cfg(test)]
mod test;

use bytes::Bytes;
use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    scrubbing::TranscriptScrubber,
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
    IveriCaptureRequest, IveriCaptureResponse, IveriPaymentsRequest, IveriPaymentsResponse,
    IveriRefundRequest, IveriRefundResponse, IveriResponse, IveriVoidRequest,
    IveriVoidResponse,
};

use super::macros;
use crate::{utils::xml_utils, with_error_response_body};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const SOAP_ACTION: &str = "SOAPAction";
}

const EXECUTE_ACTION: &str = "http://iveri.com/Execute";

static SCRUBBER: Lazy<TranscriptScrubber> = Lazy::new(|| {
    TranscriptScrubber::new(&[
        (r"(?i)((?:<|&lt;)PAN(?:>|&gt;))[^<&]*", "${1}[FILTERED]"),
        (r"(?i)((?:<|&lt;)CardSecurityCode(?:>|&gt;))[^<&]*", "${1}[FILTERED]"),
        (r#"(CertificateID=(?:"|&quot;))[^"&]*"#, "${1}[FILTERED]"),
    ])
});

impl connector_types::ConnectorServiceTrait for Iveri {}
impl connector_types::ValidationTrait for Iveri {}
impl connector_types::PaymentAuthorizeV2 for Iveri {}
impl connector_types::PaymentSyncV2 for Iveri {}
impl connector_types::PaymentVoidV2 for Iveri {}
impl connector_types::PaymentCapture for Iveri {}
impl connector_types::RefundV2 for Iveri {}
impl connector_types::RefundSyncV2 for Iveri {}
impl connector_types::PaymentAccessToken for Iveri {}

impl ConnectorCommon for Iveri {
    fn id(&self) -> &'static str {
        "iveri"
    }

    fn common_get_content_type(&self) -> &'static str {
        "text/xml; charset=utf-8"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.iveri.base_url.as_ref()
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
            .and_then(|bytes| bytes.parse_struct::<IveriResponse>("IveriResponse").ok());
        if let Some(response) = parsed {
            with_error_response_body!(event_builder, response);
            return Ok(ErrorResponse {
                raw_connector_response: Some(raw_response),
                ..response.error_response(res.status_code)
            });
        }

        Ok(match xml_utils::soap_fault(res.response) {
            Some(fault) => ErrorResponse {
                status_code: res.status_code,
                code: fault
                    .faultcode
                    .unwrap_or_else(|| res.status_code.to_string()),
                message: fault
                    .faultstring
                    .unwrap_or_else(|| "iVeri SOAP fault".to_string()),
                reason: None,
                raw_connector_response: Some(raw_response),
                ..Default::default()
            },
            None => ErrorResponse {
                status_code: res.status_code,
                code: res.status_code.to_string(),
                message: "iVeri error response".to_string(),
                reason: Some(raw_response.clone()),
                raw_connector_response: Some(raw_response),
                ..Default::default()
            },
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
    connector_name: Iveri,
    api: [
        (
            flow: Authorize,
            request_body: IveriPaymentsRequest,
            response_body: IveriPaymentsResponse,
            router_data: RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        ),
        (
            flow: Capture,
            request_body: IveriCaptureRequest,
            response_body: IveriCaptureResponse,
            router_data: RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
        ),
        (
            flow: Void,
            request_body: IveriVoidRequest,
            response_body: IveriVoidResponse,
            router_data: RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        ),
        (
            flow: Refund,
            request_body: IveriRefundRequest,
            response_body: IveriRefundResponse,
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
            transformers::unwrap_v_xml(response_bytes)
        }

        pub fn build_headers<F, FCD, Req, Res>(
            &self,
            _req: &RouterDataV2<F, FCD, Req, Res>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            Ok(vec![
                (
                    headers::CONTENT_TYPE.to_string(),
                    self.common_get_content_type().to_string().into(),
                ),
                (headers::SOAP_ACTION.to_string(), EXECUTE_ACTION.to_string().into()),
            ])
        }

        pub fn service_url(&self, connectors: &Connectors) -> String {
            format!("{}iVeriWebService/Service.asmx", self.base_url(connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Iveri,
    curl_request: RawXml(IveriPaymentsRequest),
    curl_response: IveriPaymentsResponse,
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
    connector: Iveri,
    curl_request: RawXml(IveriCaptureRequest),
    curl_response: IveriCaptureResponse,
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
    connector: Iveri,
    curl_request: RawXml(IveriVoidRequest),
    curl_response: IveriVoidResponse,
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
    connector: Iveri,
    curl_request: RawXml(IveriRefundRequest),
    curl_response: IveriRefundResponse,
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
    for Iveri
{
}

impl ConnectorIntegrationV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
    for Iveri
{
}

impl
    ConnectorIntegrationV2<
        CreateAccessToken,
        PaymentFlowData,
        AccessTokenRequestData,
        AccessTokenResponseData,
    > for Iveri
{
}
