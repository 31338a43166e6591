use std::{str::FromStr, time::Duration};

use common_utils::{
    errors::CustomResult,
    request::{Headers, Method, Request},
};
use domain_types::{
    errors::{ApiClientError, ConnectorError},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Proxy,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ExposeInterface, Maskable};
use interfaces::{
    connector_integration_v2::BoxedConnectorIntegrationV2,
    events::connector_api_logs::ConnectorEvent,
};
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::json;
use tracing::field::Empty;

use crate::shared_metrics::ApiCallLabels;

/// Builds the processor request for `router_data`, sends it and lets the connector
/// turn the answer into the normalized result.
///
/// A decline or a non-2xx answer comes back as `Ok` with `response: Err(ErrorResponse)`.
/// `Err` means the request could not be built, sent or understood.
pub async fn execute_connector_processing_step<F, ResourceCommonData, Req, Resp>(
    proxy: &Proxy,
    connector: BoxedConnectorIntegrationV2<'static, F, ResourceCommonData, Req, Resp>,
    router_data: RouterDataV2<F, ResourceCommonData, Req, Resp>,
) -> CustomResult<RouterDataV2<F, ResourceCommonData, Req, Resp>, ConnectorError>
where
    F: Clone + 'static,
    Req: Clone + 'static + std::fmt::Debug,
    Resp: Clone + 'static + std::fmt::Debug,
    ResourceCommonData: Clone + 'static,
{
    let flow = flow_name::<F>();
    let labels = ApiCallLabels {
        connector: connector.id(),
        flow,
    };
    let span = tracing::info_span!(
        "gateway_outgoing_api",
        connector = connector.id(),
        flow,
        request_headers = Empty,
        request_body = Empty,
        response_body = Empty,
        status_code = Empty,
        latency = Empty,
        url = Empty,
        method = Empty,
    );
    let _enter = span.enter();
    let start = tokio::time::Instant::now();
    let connector_request = connector.build_request_v2(&router_data)?;

    let Some(request) = connector_request else {
        return Ok(router_data);
    };

    let masked_headers = mask_headers(&request.headers);
    let masked_request = request
        .body
        .as_ref()
        .map(|body| match body.get_masked_value() {
            Some(masked) => masked,
            None => json!(connector.scrub(&body.get_inner_value().expose())),
        })
        .unwrap_or(serde_json::Value::Null);
    tracing::info!(request = %masked_request, "request of connector");

    let request_transcript = request
        .body
        .as_ref()
        .map(|body| body.get_inner_value().expose())
        .unwrap_or_default();
    let url = request.url.clone();
    let method = request.method;
    tracing::Span::current().record("url", tracing::field::display(&url));
    tracing::Span::current().record("method", tracing::field::display(method));
    tracing::Span::current().record("request_headers", tracing::field::display(&masked_headers));
    tracing::Span::current().record("request_body", tracing::field::display(&masked_request));

    labels.record_call();
    let response = call_connector_api(proxy, request, flow)
        .await
        .inspect_err(|err| {
            labels.record_error(&error_label(err.current_context()));
            info_log(
                "NETWORK_ERROR",
                &json!(format!(
                    "Failed getting response from connector. Error: {:?}",
                    err
                )),
            );
        });
    let elapsed = start.elapsed();
    labels.record_latency(elapsed.as_secs_f64());
    tracing::Span::current().record("latency", elapsed.as_millis());

    let result = match response {
        Ok(body) => {
            let raw = match &body {
                Ok(response) | Err(response) => response,
            };
            tracing::Span::current().record("status_code", raw.status_code);
            let response_transcript = String::from_utf8_lossy(&raw.response);
            tracing::Span::current().record(
                "response_body",
                tracing::field::display(connector.scrub(&response_transcript)),
            );
            tracing::debug!(
                transcript = %connector.scrub(&format!(
                    "{method} {url}\n{request_transcript}\n\n{response_transcript}"
                )),
                "connector transcript"
            );

            let mut connector_event = ConnectorEvent::new(
                connector.id().to_string(),
                flow,
                masked_request,
                url,
                method,
                elapsed.as_millis(),
                raw.status_code,
            );

            let handled = match body {
                Ok(body) => {
                    connector.handle_response_v2(&router_data, Some(&mut connector_event), body)
                }
                Err(body) => {
                    let status_code = body.status_code;
                    labels.record_error(&status_code.to_string());
                    let error = match status_code {
                        500..=511 => connector
                            .get_error_response_v2(body.clone(), Some(&mut connector_event))
                            .or_else(|_| {
                                connector.get_5xx_error_response(body, Some(&mut connector_event))
                            }),
                        _ => connector.get_error_response_v2(body, Some(&mut connector_event)),
                    };
                    error.map(|error| {
                        let mut router_data = router_data;
                        router_data.response = Err(error);
                        router_data
                    })
                }
            };
            connector_event.emit();
            handled
        }
        Err(err) => Err(err.change_context(ConnectorError::ProcessingStepFailed(None))),
    };
    tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
    result
}

/// Short flow name (`Authorize`, `Capture`, ...) of a flow marker type.
pub fn flow_name<F>() -> &'static str {
    let full = std::any::type_name::<F>();
    full.rsplit("::").next().unwrap_or(full)
}

fn mask_headers(headers: &Headers) -> serde_json::Value {
    let masked_headers = headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => {
                    serde_json::Value::String("*** alloc::string::String ***".to_string())
                }
                Maskable::Normal(iv) => serde_json::Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    serde_json::Value::Object(masked_headers)
}

fn error_label(error: &ApiClientError) -> String {
    match error {
        ApiClientError::RequestNotSent(_) => "RequestNotSent".to_string(),
        other => format!("{other:?}"),
    }
}

pub async fn call_connector_api(
    proxy: &Proxy,
    request: Request,
    flow_name: &str,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = !proxy.is_proxy_configured(url.as_str());

    let client = get_base_client(proxy, should_bypass_proxy)?;

    let headers = request.headers.construct_header_map()?;

    let body = request.body.as_ref().map(|body| body.get_body_bytes());
    let request_builder = match request.method {
        Method::Get => client.get(url),
        Method::Post => client.post(url),
        Method::Put => client.put(url),
        Method::Patch => client.patch(url),
        Method::Delete => client.delete(url),
    }
    .add_headers(headers);
    let request_builder = match body {
        Some(body) => request_builder.body(body),
        None => request_builder,
    };

    tracing::info!(tag = ?Tag::InitiatedToConnector, flow = flow_name, "Sending request to connector");
    let response = request_builder.send().await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
            _ => ApiClientError::RequestNotSent(error.to_string()),
        };
        info_log(
            "REQUEST_FAILURE",
            &json!(format!("Unable to send request to connector.")),
        );
        report!(api_error)
    })?;

    handle_response(response).await
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if should_bypass_proxy {
        &NON_PROXIED_CLIENT
    } else {
        &PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                info_log(
                    "ERROR",
                    &json!(format!("Failed to construct base client. Error: {:?}", err)),
                );
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    // Only the configured proxy applies, never the process environment's.
    let mut client_builder = Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTPS proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTP proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    response: reqwest::Response,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let status_code = response.status().as_u16();
    let headers = Some(response.headers().to_owned());
    match status_code {
        200..=299 | 302 => {
            let response = response
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Ok(Response {
                headers,
                response,
                status_code,
            }))
        }
        400..=599 => {
            let bytes = response
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;

            Ok(Err(Response {
                headers,
                response: bytes,
                status_code,
            }))
        }
        _ => {
            info_log(
                "UNEXPECTED_RESPONSE",
                &json!("Unexpected response from server."),
            );
            Err(report!(ApiClientError::UnexpectedServerResponse))
        }
    }
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(super) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub enum Tag {
    #[default]
    General,
    /// Call initiated to connector.
    InitiatedToConnector,
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn info_log(action: &str, message: &serde_json::Value) {
    tracing::info!(tags = %action, json_value= %message);
}
