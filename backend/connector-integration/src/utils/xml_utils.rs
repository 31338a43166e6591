use bytes::Bytes;
use domain_types::errors;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open element while the document is walked.
struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(element: &BytesStart<'_>) -> Result<Self, errors::ConnectorError> {
        Ok(Self {
            name: local_name(element),
            children: attributes(element)?,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let value = if self.children.is_empty() {
            Value::String(self.text)
        } else {
            let mut children = self.children;
            if !self.text.is_empty() {
                children.insert("$text".to_string(), Value::String(self.text));
            }
            Value::Object(children)
        };
        (self.name, value)
    }
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

fn attributes(element: &BytesStart<'_>) -> Result<Map<String, Value>, errors::ConnectorError> {
    let mut map = Map::new();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|error| {
            tracing::error!(?error, "malformed xml attribute");
            errors::ConnectorError::ResponseDeserializationFailed
        })?;
        if attribute.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = format!(
            "@{}",
            String::from_utf8_lossy(attribute.key.local_name().as_ref())
        );
        let value = attribute
            .unescape_value()
            .map_err(|_| errors::ConnectorError::ResponseDeserializationFailed)?;
        map.insert(key, Value::String(value.into_owned()));
    }
    Ok(map)
}

/// Repeated siblings collapse into an array under one key.
fn insert_child(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(existing)) => existing.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}

/// Converts an XML document into a JSON tree keyed by local element names.
///
/// Namespace prefixes are dropped, attributes become `@name` keys, leaf elements
/// become strings (empty elements become `""`) and repeated elements become arrays.
/// The result is an object holding the root element under its own name.
pub fn xml_to_json(xml: &str) -> Result<Value, errors::ConnectorError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => stack.push(Frame::open(&element)?),
            Ok(Event::Empty(element)) => {
                let attributes = attributes(&element)?;
                let value = if attributes.is_empty() {
                    Value::String(String::new())
                } else {
                    Value::Object(attributes)
                };
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, local_name(&element), value),
                    None => root = Some((local_name(&element), value)),
                }
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|_| errors::ConnectorError::ResponseDeserializationFailed)?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or(errors::ConnectorError::ResponseDeserializationFailed)?;
                let (name, value) = frame.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => root = Some((name, value)),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => {
                tracing::error!(?error, position = reader.buffer_position(), "failed to parse xml");
                return Err(errors::ConnectorError::ResponseDeserializationFailed);
            }
        }
    }

    if !stack.is_empty() {
        tracing::error!(open_elements = stack.len(), "xml document ended early");
        return Err(errors::ConnectorError::ResponseDeserializationFailed);
    }

    let (name, value) = root.ok_or(errors::ConnectorError::ResponseDeserializationFailed)?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

/// Walks down `path` (local element names) from the root element's content.
pub fn select_path<'a>(root_content: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root_content, |value, segment| value.get(*segment))
}

/// Rewrites an XML response into JSON bytes holding the root element's content,
/// so the regular serde response structs can be used for it.
pub fn preprocess_xml_response_bytes(xml_data: Bytes) -> Result<Bytes, errors::ConnectorError> {
    preprocess_xml_response_at(xml_data, &[])
}

/// Like [`preprocess_xml_response_bytes`] but descends into a nested element first,
/// for SOAP envelopes and other wrapped payloads.
pub fn preprocess_xml_response_at(
    xml_data: Bytes,
    path: &[&str],
) -> Result<Bytes, errors::ConnectorError> {
    let response_str = std::str::from_utf8(&xml_data)
        .map_err(|_| errors::ConnectorError::ResponseDeserializationFailed)?
        .trim();

    let document = xml_to_json(response_str)?;
    let root_content = document
        .as_object()
        .and_then(|document| document.values().next())
        .ok_or(errors::ConnectorError::ResponseDeserializationFailed)?;

    let selected = select_path(root_content, path).ok_or_else(|| {
        tracing::error!(?path, "expected element missing from xml response");
        errors::ConnectorError::ResponseDeserializationFailed
    })?;

    let json_string = serde_json::to_string(selected).map_err(|error| {
        tracing::error!(?error, "failed to convert xml response to json");
        errors::ConnectorError::ResponseDeserializationFailed
    })?;
    tracing::debug!(json = %json_string, "xml response converted to json");

    Ok(Bytes::from(json_string.into_bytes()))
}

/// SOAP 1.1 `<Fault>` content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoapFault {
    pub faultcode: Option<String>,
    pub faultstring: Option<String>,
}

/// Reads the fault out of a SOAP error envelope, `None` for anything else.
pub fn soap_fault(xml_data: Bytes) -> Option<SoapFault> {
    let bytes = preprocess_xml_response_at(xml_data, &["Body", "Fault"]).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Serializes `value` as the element `root`, without a declaration.
pub fn to_xml_element<T: Serialize>(
    root: &str,
    value: &T,
) -> Result<String, errors::ConnectorError> {
    quick_xml::se::to_string_with_root(root, value).map_err(|error| {
        tracing::error!(?error, root, "failed to serialize xml request");
        errors::ConnectorError::RequestEncodingFailed
    })
}

/// Serializes `value` as a standalone document with an XML declaration.
pub fn to_xml_document<T: Serialize>(
    root: &str,
    value: &T,
) -> Result<String, errors::ConnectorError> {
    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>{}"#,
        to_xml_element(root, value)?
    ))
}
