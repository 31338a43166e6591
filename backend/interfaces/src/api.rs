use common_enums::CurrencyUnit;
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    errors::CustomResult,
};
use domain_types::{
    router_data::{ConnectorAuthType, ErrorResponse},
    types::Connectors,
};

use crate::events::connector_api_logs::ConnectorEvent;

pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// Connector accepted currency unit as either "Base" or "Minor"
    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Minor
    }

    /// HTTP header used for authorization.
    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<
        Vec<(String, hyperswitch_masking::Maskable<String>)>,
        domain_types::errors::ConnectorError,
    > {
        Ok(Vec::new())
    }

    /// HTTP `Content-Type` to be used for POST requests.
    /// Defaults to `application/json`.
    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// The base URL for interacting with the connector's API.
    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str;

    /// common error response for a connector if it is same in all case
    fn build_error_response(
        &self,
        res: domain_types::router_response_types::Response,
        _event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, domain_types::errors::ConnectorError> {
        Ok(ErrorResponse {
            status_code: res.status_code,
            code: NO_ERROR_CODE.to_string(),
            message: NO_ERROR_MESSAGE.to_string(),
            raw_connector_response: Some(String::from_utf8_lossy(&res.response).into_owned()),
            ..Default::default()
        })
    }

    /// Whether `scrub` redacts this connector's transcripts.
    fn supports_scrubbing(&self) -> bool {
        false
    }

    /// Redacts card data and credentials from a request/response transcript.
    fn scrub(&self, transcript: &str) -> String {
        transcript.to_string()
    }
}
