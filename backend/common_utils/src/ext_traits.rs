//! Extension traits for parsing raw processor payloads into typed structs.

use error_stack::ResultExt;
use hyperswitch_masking::{ExposeInterface, Secret};
use serde::Deserialize;

use crate::errors::{self, CustomResult};

/// Parse a byte buffer into a deserializable type.
pub trait BytesExt {
    fn parse_struct<'de, T>(
        &'de self,
        type_name: &'static str,
    ) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>;
}

impl BytesExt for bytes::Bytes {
    fn parse_struct<'de, T>(
        &'de self,
        type_name: &'static str,
    ) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>,
    {
        use bytes::Buf;

        serde_json::from_slice::<T>(self.chunk())
            .change_context(errors::ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                format!("Unable to parse {type_name} from bytes {self:?}")
            })
    }
}

pub trait ByteSliceExt {
    fn parse_struct<'de, T>(
        &'de self,
        type_name: &'static str,
    ) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>;
}

impl ByteSliceExt for [u8] {
    fn parse_struct<'de, T>(
        &'de self,
        type_name: &'static str,
    ) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>,
    {
        serde_json::from_slice(self)
            .change_context(errors::ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                format!(
                    "Unable to parse {type_name} from &[u8] {:?}",
                    String::from_utf8_lossy(self)
                )
            })
    }
}

pub trait ValueExt {
    fn parse_value<T>(self, type_name: &'static str) -> CustomResult<T, errors::ParsingError>
    where
        T: serde::de::DeserializeOwned;
}

impl ValueExt for serde_json::Value {
    fn parse_value<T>(self, type_name: &'static str) -> CustomResult<T, errors::ParsingError>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value::<T>(self)
            .change_context(errors::ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from serde_json::Value"))
    }
}

impl<MaskingStrategy> ValueExt for Secret<serde_json::Value, MaskingStrategy>
where
    MaskingStrategy: hyperswitch_masking::Strategy<serde_json::Value>,
{
    fn parse_value<T>(self, type_name: &'static str) -> CustomResult<T, errors::ParsingError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.expose().parse_value(type_name)
    }
}

pub trait OptionExt<T> {
    /// Return the inner value or a `MissingRequiredField` report naming the field.
    fn get_required_value(
        self,
        field_name: &'static str,
    ) -> CustomResult<T, errors::ValidationError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn get_required_value(
        self,
        field_name: &'static str,
    ) -> CustomResult<T, errors::ValidationError> {
        self.ok_or(errors::ValidationError::MissingRequiredField {
            field_name: field_name.to_string(),
        })
        .attach_printable_lazy(|| format!("Missing required field {field_name}"))
    }
}

/// Serialize a value to a JSON string.
pub trait Encode: serde::Serialize {
    fn encode_to_string_of_json(&self) -> CustomResult<String, errors::ParsingError> {
        serde_json::to_string(self)
            .change_context(errors::ParsingError::EncodeError("json"))
            .attach_printable("Unable to convert to JSON string")
    }

    fn encode_to_value(&self) -> CustomResult<serde_json::Value, errors::ParsingError> {
        serde_json::to_value(self)
            .change_context(errors::ParsingError::EncodeError("json-value"))
            .attach_printable("Unable to convert to serde_json::Value")
    }
}

impl<T: serde::Serialize + ?Sized> Encode for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        id: String,
    }

    #[test]
    fn parses_bytes_into_struct() {
        let bytes = bytes::Bytes::from_static(br#"{"id":"abc"}"#);
        let parsed: Sample = bytes.parse_struct("Sample").unwrap();
        assert_eq!(parsed.id, "abc");
    }

    #[test]
    fn reports_parse_failure() {
        let parsed = b"not-json".parse_struct::<Sample>("Sample");
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_option_names_field() {
        let err = None::<u8>.get_required_value("card_cvc").unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ValidationError::MissingRequiredField {
                field_name: "card_cvc".to_string()
            }
        );
    }
}
