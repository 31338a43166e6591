//! Connector API logs interface

use common_utils::request::Method;
use hyperswitch_masking::ErasedMaskSerialize;
use serde::Serialize;
use serde_json::json;
use time::OffsetDateTime;

/// One outbound call to a processor, as it is logged.
#[derive(Debug, Serialize)]
pub struct ConnectorEvent {
    connector_name: String,
    flow: String,
    request: String,
    masked_response: Option<String>,
    error: Option<String>,
    url: String,
    method: String,
    #[serde(with = "time::serde::timestamp")]
    created_at: OffsetDateTime,
    latency: u128,
    status_code: u16,
}

impl ConnectorEvent {
    pub fn new(
        connector_name: String,
        flow: &str,
        request: serde_json::Value,
        url: String,
        method: Method,
        latency: u128,
        status_code: u16,
    ) -> Self {
        Self {
            connector_name,
            flow: flow
                .rsplit_once("::")
                .map(|(_, s)| s)
                .unwrap_or(flow)
                .to_string(),
            request: request.to_string(),
            masked_response: None,
            error: None,
            url,
            method: method.to_string(),
            created_at: OffsetDateTime::now_utc(),
            latency,
            status_code,
        }
    }

    /// fn set_response_body
    pub fn set_response_body<T: Serialize>(&mut self, response: &T) {
        match response.masked_serialize() {
            Ok(masked) => {
                self.masked_response.replace(masked.to_string());
            }
            Err(er) => self.set_error(json!({"error": er.to_string()})),
        }
    }

    /// fn set_error_response_body
    pub fn set_error_response_body<T: Serialize>(&mut self, response: &T) {
        match response.masked_serialize() {
            Ok(masked) => {
                self.error.replace(masked.to_string());
            }
            Err(er) => self.set_error(json!({"error": er.to_string()})),
        }
    }

    /// fn set_error
    pub fn set_error(&mut self, error: serde_json::Value) {
        self.error.replace(error.to_string());
    }

    pub fn masked_response(&self) -> Option<&str> {
        self.masked_response.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Writes the event to the structured log.
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(event) => tracing::info!(target: "connector_api_logs", %event, "connector api call"),
            Err(error) => tracing::warn!(?error, "failed to serialize connector event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use hyperswitch_masking::Secret;

    use super::*;

    #[derive(Serialize)]
    struct Body {
        authorization: String,
        token: Secret<String>,
    }

    #[test]
    fn response_body_is_masked() {
        let mut event = ConnectorEvent::new(
            "elavon".to_string(),
            "domain_types::connector_flow::Authorize",
            json!({}),
            "https://example.test".to_string(),
            Method::Post,
            0,
            200,
        );
        event.set_response_body(&Body {
            authorization: "123456".to_string(),
            token: Secret::new("tok_secret".to_string()),
        });
        let masked = event.masked_response().unwrap();
        assert!(masked.contains("123456"));
        assert!(!masked.contains("tok_secret"));
        assert_eq!(event.flow, "Authorize");
    }
}
