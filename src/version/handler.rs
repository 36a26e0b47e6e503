//! Handler trait for fetching and parsing version information from a source

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::USER_AGENT;
use crate::types::SourceKind;
use crate::version::data::VersionData;
use crate::version::error::{ExtractError, InputError, TransportError};
use crate::version::value::Version;

/// Per-source fetch and parse strategy.
///
/// `fetch` stores the raw response verbatim, `parse` derives the version and
/// version data from whatever was fetched last. Neither step retries.
#[async_trait::async_trait]
pub trait SourceHandler: Send + Sync {
    /// Returns the source this handler reads from
    fn source_kind(&self) -> SourceKind;

    /// Checks required collaborators and fills in source-specific defaults
    fn validate_input(&mut self) -> Result<(), InputError>;

    /// Issues one request and replaces the stored raw response
    async fn fetch(&mut self) -> Result<(), TransportError>;

    /// Recomputes version and version data from the stored raw response
    ///
    /// On error the previously parsed values are left untouched.
    fn parse(&mut self) -> Result<(), ExtractError>;

    fn version(&self) -> Option<&Version>;

    fn version_data(&self) -> &VersionData;
}

/// State every handler carries between fetch and parse
#[derive(Debug, Clone, Default)]
pub struct HandlerState {
    pub raw: Option<Value>,
    pub version: Option<Version>,
    pub version_data: VersionData,
}

impl HandlerState {
    pub fn raw(&self) -> Result<&Value, ExtractError> {
        self.raw.as_ref().ok_or(ExtractError::NotFetched)
    }

    pub fn commit(&mut self, version: Option<Version>, version_data: VersionData) {
        self.version = version;
        self.version_data = version_data;
    }
}

/// Sends a GET with the default header set and decodes the JSON body
pub(crate) async fn get_json(client: &reqwest::Client, url: &str) -> Result<Value, TransportError> {
    debug!("Fetching version information: {}", url);

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warn!("Version source returned status {}: {}", status, url);
        return Err(TransportError::Status(status));
    }

    response.json::<Value>().await.map_err(|e| {
        warn!("Failed to decode version response: {}", e);
        TransportError::Network(e)
    })
}

/// Returns `value` as an object, failing with a wrong-type error at `key`
pub(crate) fn as_object<'a>(
    value: &'a Value,
    key: &str,
) -> Result<&'a Map<String, Value>, ExtractError> {
    value.as_object().ok_or_else(|| ExtractError::WrongType {
        key: key.to_string(),
        expected: "an object",
    })
}

/// Looks up `key` in `object`; a missing key or null is `None`
pub(crate) fn optional_string(
    object: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, ExtractError> {
    object
        .get(key)
        .map(|v| scalar_to_string(v, key))
        .transpose()
        .map(Option::flatten)
}

/// Looks up `key` in an optional nested object under `parent`
pub(crate) fn nested_string(
    object: &Map<String, Value>,
    parent: &str,
    key: Option<&str>,
) -> Result<Option<String>, ExtractError> {
    let Some(nested) = object.get(parent).filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    let nested = as_object(nested, parent)?;
    match key {
        Some(key) => optional_string(nested, key),
        None => Ok(None),
    }
}

/// Decodes the stored raw response into a typed response struct
pub(crate) fn decode<T: DeserializeOwned>(raw: &Value) -> Result<T, ExtractError> {
    Ok(T::deserialize(raw)?)
}

fn scalar_to_string(value: &Value, key: &str) -> Result<Option<String>, ExtractError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(ExtractError::WrongType {
            key: key.to_string(),
            expected: "a string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_before_fetch_is_not_fetched() {
        let state = HandlerState::default();

        assert!(matches!(state.raw(), Err(ExtractError::NotFetched)));
    }

    #[test]
    fn optional_string_handles_missing_null_and_numbers() {
        let value = json!({"a": "1.0", "b": null, "c": 11});
        let object = value.as_object().unwrap();

        assert_eq!(optional_string(object, "a").unwrap().as_deref(), Some("1.0"));
        assert_eq!(optional_string(object, "b").unwrap(), None);
        assert_eq!(optional_string(object, "c").unwrap().as_deref(), Some("11"));
        assert_eq!(optional_string(object, "missing").unwrap(), None);
    }

    #[test]
    fn optional_string_rejects_nested_values() {
        let value = json!({"a": ["1.0"]});
        let object = value.as_object().unwrap();

        assert!(matches!(
            optional_string(object, "a"),
            Err(ExtractError::WrongType { key, expected: "a string" }) if key == "a"
        ));
    }

    #[test]
    fn nested_string_returns_none_for_missing_parent_or_key() {
        let value = json!({"hassos": {"ova": "11.4"}});
        let object = value.as_object().unwrap();

        assert_eq!(
            nested_string(object, "hassos", Some("ova")).unwrap().as_deref(),
            Some("11.4")
        );
        assert_eq!(nested_string(object, "hassos", Some("rpi4")).unwrap(), None);
        assert_eq!(nested_string(object, "hassos", None).unwrap(), None);
        assert_eq!(nested_string(object, "missing", Some("ova")).unwrap(), None);
    }

    #[test]
    fn decode_reports_missing_field() {
        #[derive(Debug, serde::Deserialize)]
        struct Manifest {
            #[allow(dead_code)]
            current_version: String,
        }

        let result = decode::<Manifest>(&json!({"version": "2024.1.0"}));

        let err = result.unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
        assert!(err.to_string().contains("missing field `current_version`"));
    }

    #[test]
    fn nested_string_rejects_non_object_parent() {
        let value = json!({"hassos": "11.4"});
        let object = value.as_object().unwrap();

        assert!(matches!(
            nested_string(object, "hassos", Some("ova")),
            Err(ExtractError::WrongType { .. })
        ));
    }
}
