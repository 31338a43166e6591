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
use hyperswitch_masking::{ExposeInterface, Mask, Maskable};
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2, connector_types,
    events::connector_api_logs::ConnectorEvent,
};
use once_cell::sync::Lazy;
use transformers::{
    self as eway, EwayCaptureRequest, EwayCaptureResponse, EwayPSyncResponse,
    EwayPaymentsRequest, EwayPaymentsResponse, EwayRefundRequest, EwayRefundResponse,
    EwayResponse, EwayVoidRequest, EwayVoidResponse,
};

use super::macros;
use crate::{utils, with_error_response_body};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
}

static SCRUBBER: Lazy<TranscriptScrubber> = Lazy::new(|| {
    let mut rules = vec![json_field_rule("Number"), json_field_rule("CVN")];
    rules.push((
        r"(?i)(Authorization: Basic )\S+".to_string(),
        "${1}[FILTERED]".to_string(),
    ));
    from_owned_rules(&rules)
});

impl connector_types::ConnectorServiceTrait for Eway {}
impl connector_types::ValidationTrait for Eway {}
impl connector_types::PaymentAuthorizeV2 for Eway {}
impl connector_types::PaymentSyncV2 for Eway {}
impl connector_types::PaymentVoidV2 for Eway {}
impl connector_types::PaymentCapture for Eway {}
impl connector_types::RefundV2 for Eway {}
impl connector_types::RefundSyncV2 for Eway {}
impl connector_types::PaymentAccessToken for Eway {}

impl ConnectorCommon for Eway {
    fn id(&self) -> &'static str {
        "eway"
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let auth = eway::EwayAuthType::try_from(auth_type)
            .change_context(errors::ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![(
            headers::AUTHORIZATION.to_string(),
            utils::basic_auth_header(&auth.api_key, &auth.password)
                .expose()
                .into_masked(),
        )])
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.eway.base_url.as_ref()
    }

    fn build_error_response(
        &self,
        res: Response,
        event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let raw_response = String::from_utf8_lossy(&res.response).into_owned();
        match res.response.parse_struct::<EwayResponse>("EwayResponse") {
            Ok(response) => {
                with_error_response_body!(event_builder, response);
                Ok(ErrorResponse {
                    raw_connector_response: Some(raw_response),
                    ..response.error_response(res.status_code)
                })
            }
            // 401s come back with an empty or html body
            Err(_) => Ok(ErrorResponse {
                status_code: res.status_code,
                code: res.status_code.to_string(),
                message: "eWAY error response".to_string(),
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
    connector_name: Eway,
    api: [
        (
            flow: Authorize,
            request_body: EwayPaymentsRequest,
            response_body: EwayPaymentsResponse,
            router_data: RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        ),
        (
            flow: PSync,
            response_body: EwayPSyncResponse,
            router_data: RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
        ),
        (
            flow: Capture,
            request_body: EwayCaptureRequest,
            response_body: EwayCaptureResponse,
            router_data: RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
        ),
        (
            flow: Void,
            request_body: EwayVoidRequest,
            response_body: EwayVoidResponse,
            router_data: RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        ),
        (
            flow: Refund,
            request_body: EwayRefundRequest,
            response_body: EwayRefundResponse,
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
            let mut auth = self.get_auth_header(&req.connector_auth_type)?;
            header.append(&mut auth);
            Ok(header)
        }

        pub fn transaction_url(&self, connectors: &Connectors) -> String {
            format!("{}Transaction", self.base_url(connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eway,
    curl_request: Json(EwayPaymentsRequest),
    curl_response: EwayPaymentsResponse,
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
            Ok(self.transaction_url(&req.resource_common_data.connectors))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eway,
    curl_response: EwayPSyncResponse,
    flow_name: PSync,
    resource_common_data: PaymentFlowData,
    flow_request: PaymentsSyncData,
    flow_response: PaymentsResponseData,
    http_method: Get,
    other_functions: {
        fn get_url(
            &self,
            req: &RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            let transaction_id = req
                .request
                .connector_transaction_id
                .get_connector_transaction_id()
                .change_context(errors::ConnectorError::MissingConnectorTransactionID)?;
            Ok(format!(
                "{}/{transaction_id}",
                self.transaction_url(&req.resource_common_data.connectors)
            ))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eway,
    curl_request: Json(EwayCaptureRequest),
    curl_response: EwayCaptureResponse,
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
                "{}CapturePayment",
                self.base_url(&req.resource_common_data.connectors)
            ))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eway,
    curl_request: Json(EwayVoidRequest),
    curl_response: EwayVoidResponse,
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
                "{}CancelAuthorisation",
                self.base_url(&req.resource_common_data.connectors)
            ))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_headers, get_content_type, get_error_response_v2],
    connector: Eway,
    curl_request: Json(EwayRefundRequest),
    curl_response: EwayRefundResponse,
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
                "{}/{}/Refund",
                self.transaction_url(&req.resource_common_data.connectors),
                req.request.connector_transaction_id
            ))
        }
    }
);

impl ConnectorIntegrationV2<RSync, RefundFlowData, RefundSyncData, RefundsResponseData> for Eway {}

impl
    ConnectorIntegrationV2<
        CreateAccessToken,
        PaymentFlowData,
        AccessTokenRequestData,
        AccessTokenResponseData,
    > for Eway
{
}
