pub mod transformers;

#[cfg(test)]
mod test;

use bytes::Bytes;
use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    scrubbing::{from_owned_rules, json_field_rule, TranscriptScrubber},
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
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Connectors,
};
use error_stack::ResultExt;
use hyperswitch_masking::{ExposeInterface, Mask, Maskable};
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2, connector_types,
    events::connector_api_logs::ConnectorEvent,
};
use once_cell::sync::Lazy;
use transformers::{
    self as priority, PriorityCaptureRequest, PriorityCaptureResponse, PriorityErrorResponse,
    PriorityPaymentsRequest, PriorityPaymentsResponse, PriorityRefundRequest,
    PriorityRefundResponse, PriorityVoidResponse,
};

use super::macros;
use crate::{utils, with_error_response_body};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
}

static SCRUBBER: Lazy<TranscriptScrubber> = Lazy::new(|| {
    let mut rules = vec![json_field_rule("number"), json_field_rule("cvv")];
    rules.push((
        r"(?i)(Authorization: Basic )\S+".to_string(),
        "${1}[FILTERED]".to_string(),
    ));
    from_owned_rules(&rules)
});

impl connector_types::ConnectorServiceTrait for Priority {}
impl connector_types::ValidationTrait for Priority {}
impl connector_types::PaymentAuthorizeV2 for Priority {}
impl connector_types::PaymentSyncV2 for Priority {}
impl connector_types::PaymentVoidV2 for Priority {}
impl connector_types::PaymentCapture for Priority {}
impl connector_types::RefundV2 for Priority {}
impl connector_types::RefundSyncV2 for Priority {}
impl connector_types::PaymentAccessToken for Priority {}

impl ConnectorCommon for Priority {
    fn id(&self) -> &'static str {
        "priority"
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let auth = priority::PriorityAuthType::try_from(auth_type)
            .change_context(errors::ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![(
            headers::AUTHORIZATION.to_string(),
            utils::basic_auth_header(&auth.api_key, &auth.api_secret)
                .expose()
                .into_masked(),
        )])
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.priority.base_url.as_ref()
    }

    fn build_error_response(
        &self,
        res: Response,
        event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let raw_response = String::from_utf8_lossy(&res.response).into_owned();
        match res
            .response
            .parse_struct::<PriorityErrorResponse>("PriorityErrorResponse")
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
                message: "Priority error response".to_string(),
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
    connector_name: Priority,
    api: [
        (
            flow: Authorize,
            request_body: PriorityPaymentsRequest,
            response_body: PriorityPaymentsResponse,
            router_data: RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        ),
        (
            flow: Capture,
            request_body: PriorityCaptureRequest,
            response_body: PriorityCaptureResponse,
            router_data: RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
        ),
        (
            flow: Void,
            response_body: PriorityVoidResponse,
            router_data: RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        ),
        (
            flow: Refund,
            request_body: PriorityRefundRequest,
            response_body: PriorityRefundResponse,
            router_data: RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
        )
    ],
    amount_converters: [
        amount_converter: StringMajorUnit
    ],
    member_functions: {
        /// Cancelling answers with an empty body.
        pub fn preprocess_response_bytes(
            &self,
            response_bytes: Bytes,
        ) -> Result<Bytes, errors::ConnectorError> {
            if response_bytes.iter().all(u8::is_ascii_whitespace) {
                Ok(Bytes::from_static(b"{}"))
            } else {
                Ok(response_bytes)
            }
        }

        pub fn build_headers<F, FCD, Req, Res>(
            &self,
            req: &RouterDataV2<F, FCD, Req, Res>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            let mut header = vec![(
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            )];
            let mut auth = self.get_auth_header(&req.connector_auth_type)?;
            header.append(&mut auth);
            Ok(header)
        }

        pub fn payment_url(&self, connectors: &Connectors) -> String {
            format!("{}payment", self.base_url(connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Priority,
    curl_request: Json(PriorityPaymentsRequest),
    curl_response: PriorityPaymentsResponse,
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
            Ok(format!(
                "{}?includeCustomerMatches=false&echo=true",
                self.payment_url(&req.resource_common_data.connectors)
            ))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Priority,
    curl_request: Json(PriorityCaptureRequest),
    curl_response: PriorityCaptureResponse,
    flow_name: Capture,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsCaptureData,
    flow_response: PaymentsResponseData,
    http_method: Post,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(format!(
                "{}?includeCustomerMatches=false&echo=true",
                self.payment_url(&req.resource_common_data.connectors)
            ))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Priority,
    curl_response: PriorityVoidResponse,
    flow_name: Void,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentVoidData,
    flow_response: PaymentsResponseData,
    http_method: Delete,
    preprocess_response: true,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(format!(
                "{}/{}?force=true",
                self.payment_url(&req.resource_common_data.connectors),
                req.request.connector_transaction_id
            ))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Priority,
    curl_request: Json(PriorityRefundRequest),
    curl_response: PriorityRefundResponse,
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
                "{}?includeCustomerMatches=false&echo=true",
                self.payment_url(&req.resource_common_data.connectors)
            ))
        }
    }
);

impl ConnectorIntegrationV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
    for Priority
{
}

impl ConnectorIntegrationV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData>
    for Priority
{
}

impl
    ConnectorIntegrationV2<
        CreateAccessToken,
        PaymentFlowData,
        AccessTokenRequestData,
        AccessTokenResponseData,
    > for Priority
{
}
