use base64::Engine;
use common_enums::CaptureMethod;
use common_utils::fp_utils::when;
use domain_types::errors;
use hyperswitch_masking::{PeekInterface, Secret};

pub use domain_types::utils::missing_field_err;

type Error = error_stack::Report<errors::ConnectorError>;

pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

#[macro_export]
macro_rules! with_error_response_body {
    ($event_builder:ident, $response:ident) => {
        if let Some(body) = $event_builder {
            body.set_error_response_body(&$response);
        }
    };
}

#[macro_export]
macro_rules! with_response_body {
    ($event_builder:ident, $response:ident) => {
        if let Some(body) = $event_builder {
            body.set_response_body(&$response);
        }
    };
}

/// `true` when the authorization should be captured in the same call.
pub fn is_auto_capture(
    capture_method: Option<CaptureMethod>,
    connector: &'static str,
) -> Result<bool, Error> {
    match capture_method {
        None | Some(CaptureMethod::Automatic) | Some(CaptureMethod::SequentialAutomatic) => {
            Ok(true)
        }
        Some(CaptureMethod::Manual) => Ok(false),
        Some(other) => Err(errors::ConnectorError::FlowNotSupported {
            flow: format!("{other} capture"),
            connector: connector.to_string(),
        }
        .into()),
    }
}

/// Cuts `value` to at most `max_chars` characters.
pub fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

pub fn truncate_optional(value: Option<&str>, max_chars: usize) -> Option<String> {
    value.map(|value| truncate(value, max_chars))
}

/// `Basic base64(user:password)` header value.
pub fn basic_auth_header(user: &Secret<String>, password: &Secret<String>) -> Secret<String> {
    let encoded = BASE64_ENGINE.encode(format!("{}:{}", user.peek(), password.peek()));
    Secret::new(format!("Basic {encoded}"))
}

pub fn get_unimplemented_payment_method_error_message(connector: &str) -> String {
    format!("Selected payment method through {connector}")
}

/// Splits a delimiter joined authorization into exactly `parts` pieces.
pub fn split_authorization(
    authorization: &str,
    delimiter: char,
    parts: usize,
) -> Result<Vec<String>, Error> {
    let pieces: Vec<String> = authorization.split(delimiter).map(str::to_string).collect();
    when(pieces.len() != parts, || {
        Err(errors::ConnectorError::InvalidDataFormat {
            field_name: "connector_transaction_id",
        })
    })?;
    Ok(pieces)
}

pub mod xml_utils;
pub use xml_utils::{preprocess_xml_response_at, preprocess_xml_response_bytes};

#[cfg(test)]
mod tests {
    use hyperswitch_masking::ExposeInterface;

    use super::*;

    #[test]
    fn capture_method_selects_sale_or_auth() {
        assert!(is_auto_capture(None, "elavon").unwrap());
        assert!(is_auto_capture(Some(CaptureMethod::Automatic), "elavon").unwrap());
        assert!(!is_auto_capture(Some(CaptureMethod::Manual), "elavon").unwrap());
        let error = is_auto_capture(Some(CaptureMethod::Scheduled), "elavon").unwrap_err();
        assert!(matches!(
            error.current_context(),
            errors::ConnectorError::FlowNotSupported { .. }
        ));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("héllo wörld", 7), "héllo w");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn basic_auth_is_base64() {
        let header = basic_auth_header(
            &Secret::new("user".to_string()),
            &Secret::new("pass".to_string()),
        );
        assert_eq!(header.expose(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn authorization_parts_are_checked() {
        assert_eq!(
            split_authorization("a;b;100", ';', 3).unwrap(),
            vec!["a", "b", "100"]
        );
        assert!(split_authorization("a;b", ';', 3).is_err());
    }
}
