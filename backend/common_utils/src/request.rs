use hyperswitch_masking::{Maskable, Secret};
use serde::{Deserialize, Serialize};

pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

fn default_request_headers() -> [(String, Maskable<String>); 1] {
    use http::header;

    [(header::VIA.to_string(), "UCS".to_string().into())]
}

#[derive(Debug)]
pub struct Request {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
            Self::FormUrlEncoded(_) => "FormUrlEncodedRequestBody",
            Self::Xml(_) => "XmlRequestBody",
            Self::RawBytes(_) => "RawBytesRequestBody",
        })
    }
}

/// Outbound document. Structured variants are serialized at send time so the
/// same value can also be rendered masked for logging.
pub enum RequestContent {
    Json(Box<dyn hyperswitch_masking::ErasedMaskSerialize + Send>),
    FormUrlEncoded(Box<dyn hyperswitch_masking::ErasedMaskSerialize + Send>),
    Xml(Box<dyn hyperswitch_masking::ErasedMaskSerialize + Send>),
    /// Pre-rendered documents (SOAP envelopes, XML with a declaration).
    RawBytes(Vec<u8>),
}

impl RequestContent {
    /// Wire representation of the body, secrets exposed.
    pub fn get_inner_value(&self) -> Secret<String> {
        match self {
            Self::Json(i) => serde_json::to_string(&i).unwrap_or_default().into(),
            Self::FormUrlEncoded(i) => serde_urlencoded::to_string(i).unwrap_or_default().into(),
            Self::Xml(i) => quick_xml::se::to_string(&i).unwrap_or_default().into(),
            Self::RawBytes(bytes) => String::from_utf8_lossy(bytes).into_owned().into(),
        }
    }

    /// Body with `Secret` fields masked, for structured logs. Raw documents have
    /// no field structure and are returned as `None`; callers scrub those instead.
    pub fn get_masked_value(&self) -> Option<serde_json::Value> {
        match self {
            Self::Json(i) | Self::FormUrlEncoded(i) | Self::Xml(i) => i.masked_serialize().ok(),
            Self::RawBytes(_) => None,
        }
    }

    pub fn get_body_bytes(&self) -> Vec<u8> {
        use hyperswitch_masking::ExposeInterface;
        match self {
            Self::RawBytes(bytes) => bytes.clone(),
            Self::Json(_) | Self::FormUrlEncoded(_) | Self::Xml(_) => {
                self.get_inner_value().expose().into_bytes()
            }
        }
    }
}

impl Request {
    pub fn get_headers_map(&self) -> std::collections::HashMap<String, String> {
        use hyperswitch_masking::PeekInterface;
        let mut map = std::collections::HashMap::new();
        for (k, v) in &self.headers {
            let val = match v {
                Maskable::Masked(s) => s.peek().to_string(),
                Maskable::Normal(s) => s.to_string(),
            };
            map.insert(k.clone(), val);
        }
        map
    }
}

#[derive(Debug)]
pub struct RequestBuilder {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn attach_default_headers(mut self) -> Self {
        self.headers.extend(default_request_headers());
        self
    }

    pub fn header(mut self, header: &str, value: &str) -> Self {
        self.headers.insert((header.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn set_optional_body<T: Into<RequestContent>>(mut self, body: Option<T>) -> Self {
        body.map(|body| self.body.replace(body.into()));
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use hyperswitch_masking::{ExposeInterface, Secret};

    use super::*;

    #[derive(Serialize)]
    struct Body {
        name: String,
        card: Secret<String>,
    }

    #[test]
    fn json_body_exposes_secret_on_wire_but_masks_in_logs() {
        let content = RequestContent::Json(Box::new(Body {
            name: "gateway".to_string(),
            card: Secret::new("4111111111111111".to_string()),
        }));
        let wire = content.get_inner_value().expose();
        assert!(wire.contains("4111111111111111"));

        let masked = content.get_masked_value().unwrap().to_string();
        assert!(!masked.contains("4111111111111111"));
    }

    #[test]
    fn form_body_is_url_encoded() {
        let content = RequestContent::FormUrlEncoded(Box::new(Body {
            name: "a b".to_string(),
            card: Secret::new("1".to_string()),
        }));
        assert_eq!(content.get_inner_value().expose(), "name=a+b&card=1");
    }

    #[test]
    fn builder_sets_method_and_default_headers() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("https://example.test/pay")
            .attach_default_headers()
            .header("Content-Type", "application/json")
            .build();
        assert_eq!(request.method, Method::Post);
        let headers = request.get_headers_map();
        assert_eq!(headers.get("via").map(String::as_str), Some("UCS"));
        assert_eq!(
            headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn optional_body_is_attached_only_when_present() {
        let request = RequestBuilder::new()
            .set_optional_body(None::<RequestContent>)
            .build();
        assert!(request.body.is_none());

        let request = RequestBuilder::new()
            .set_optional_body(Some(RequestContent::FormUrlEncoded(Box::new(Body {
                name: "gateway".to_string(),
                card: Secret::new("1".to_string()),
            }))))
            .build();
        let body = request.body.map(|body| body.get_inner_value().expose());
        assert_eq!(body.as_deref(), Some("name=gateway&card=1"));
    }
}
