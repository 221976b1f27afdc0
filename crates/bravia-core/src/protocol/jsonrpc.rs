//! JSON-RPC messages for the Bravia REST API.
//!
//! Bravia TVs expose a small JSON-RPC 1.0 dialect over HTTP.  Each request
//! goes to a service endpoint (`sony/system`, `sony/audio`, …) and looks like:
//!
//! ```json
//! { "method": "getRemoteControllerInfo", "id": 1, "params": [], "version": "1.0" }
//! ```
//!
//! Responses carry either a `result` array or an `error` array.  The shape of
//! `result` differs per method, so it is kept as raw [`serde_json::Value`]s
//! and decoded by a method-specific function such as
//! [`decode_remote_controller_info`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::directory::DirectoryEntry;

/// Errors produced while decoding a JSON-RPC response.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The TV answered with an `error` payload, typically `[code, message]`.
    #[error("device returned error: {0}")]
    DeviceError(Value),

    /// The response had neither `result` nor `error`.
    #[error("response has no result")]
    MissingResult,

    /// `result` was present but contained no list of entries.
    #[error("result contains no entry list")]
    NoEntryList,

    /// The response body was not valid JSON-RPC.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// The API service a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Service {
    System,
    Audio,
    AppControl,
}

impl Service {
    /// URL path of the service endpoint, relative to the TV's base URL.
    pub fn path(self) -> &'static str {
        match self {
            Service::System => "sony/system",
            Service::Audio => "sony/audio",
            Service::AppControl => "sony/appControl",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub method: String,
    pub id: u32,
    pub params: Vec<Value>,
    pub version: String,
}

impl JsonRpcRequest {
    /// Creates a parameterless request with `id = 1` and `version = "1.0"`.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            id: 1,
            params: Vec::new(),
            version: "1.0".to_string(),
        }
    }

    /// Appends one parameter object.
    pub fn with_param(mut self, param: Value) -> Self {
        self.params.push(param);
        self
    }

    /// `system/getRemoteControllerInfo`: lists the TV's named IRCC commands.
    pub fn get_remote_controller_info() -> (Service, Self) {
        (Service::System, Self::new("getRemoteControllerInfo"))
    }

    /// `appControl/setTextForm`: fills the focused text field directly.
    ///
    /// Only works while the TV shows a software keyboard that accepts it;
    /// otherwise the on-screen keyboard has to be walked key by key.
    pub fn set_text_form(text: impl Into<String>) -> (Service, Self) {
        let request = Self::new("setTextForm").with_param(Value::String(text.into()));
        (Service::AppControl, request)
    }
}

/// A JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<Value>>,
}

impl JsonRpcResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Malformed`] when `body` is not a JSON-RPC response.
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(body).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }

    /// Returns the `result` array, or the matching error when there is none.
    pub fn into_result(self) -> Result<Vec<Value>, ProtocolError> {
        if let Some(error) = self.error {
            return Err(ProtocolError::DeviceError(Value::Array(error)));
        }
        self.result.ok_or(ProtocolError::MissingResult)
    }
}

/// Decodes a `getRemoteControllerInfo` response into directory entries.
///
/// The result is `[ {bundled, type}, [ {name, value}, … ] ]`; the entries are
/// the first array inside `result`.  Items that are not objects are dropped;
/// `name` and `value` are kept only when they are strings, so incomplete
/// items survive as partial [`DirectoryEntry`]s and are filtered by
/// [`CommandDirectory::from_entries`](crate::CommandDirectory::from_entries).
///
/// # Errors
///
/// - [`ProtocolError::DeviceError`] when the TV reported an error.
/// - [`ProtocolError::MissingResult`] when there is no `result`.
/// - [`ProtocolError::NoEntryList`] when `result` holds no array.
pub fn decode_remote_controller_info(
    response: JsonRpcResponse,
) -> Result<Vec<DirectoryEntry>, ProtocolError> {
    let result = response.into_result()?;
    let list = result
        .iter()
        .find_map(Value::as_array)
        .ok_or(ProtocolError::NoEntryList)?;

    let string_field = |item: &serde_json::Map<String, Value>, key: &str| {
        item.get(key).and_then(Value::as_str).map(str::to_string)
    };

    Ok(list
        .iter()
        .filter_map(Value::as_object)
        .map(|item| DirectoryEntry {
            name: string_field(item, "name"),
            code: string_field(item, "value"),
        })
        .collect())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults_match_bravia_dialect() {
        // Arrange / Act
        let (service, request) = JsonRpcRequest::get_remote_controller_info();
        let json = serde_json::to_value(&request).unwrap();

        // Assert
        assert_eq!(service, Service::System);
        assert_eq!(
            json,
            json!({
                "method": "getRemoteControllerInfo",
                "id": 1,
                "params": [],
                "version": "1.0"
            })
        );
    }

    #[test]
    fn test_with_param_appends_parameter() {
        let request = JsonRpcRequest::new("setAudioVolume")
            .with_param(json!({"target": "speaker", "volume": "+1"}));
        assert_eq!(request.params.len(), 1);
        assert_eq!(request.params[0]["volume"], "+1");
    }

    #[test]
    fn test_set_text_form_targets_app_control_with_text_param() {
        // Arrange / Act
        let (service, request) = JsonRpcRequest::set_text_form("ねこ");

        // Assert
        assert_eq!(service, Service::AppControl);
        assert_eq!(request.method, "setTextForm");
        assert_eq!(request.params, vec![json!("ねこ")]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"method": "setTextForm", "id": 1, "params": ["ねこ"], "version": "1.0"})
        );
    }

    #[test]
    fn test_service_paths() {
        assert_eq!(Service::System.path(), "sony/system");
        assert_eq!(Service::Audio.path(), "sony/audio");
        assert_eq!(Service::AppControl.path(), "sony/appControl");
        assert_eq!(Service::AppControl.to_string(), "sony/appControl");
    }

    #[test]
    fn test_decode_remote_controller_info_extracts_entries() {
        // Arrange
        let body = r#"{
            "id": 1,
            "result": [
                {"bundled": true, "type": "IR_REMOTE_BUNDLE_TYPE_AEP_N"},
                [
                    {"name": "Power", "value": "AAAAAQAAAAEAAAAVAw=="},
                    {"name": "YouTube", "value": "X1"}
                ]
            ]
        }"#;
        let response = JsonRpcResponse::from_json(body).unwrap();

        // Act
        let entries = decode_remote_controller_info(response).unwrap();

        // Assert
        assert_eq!(
            entries,
            vec![
                DirectoryEntry::new("Power", "AAAAAQAAAAEAAAAVAw=="),
                DirectoryEntry::new("YouTube", "X1"),
            ]
        );
    }

    #[test]
    fn test_decode_keeps_partial_items_and_drops_non_objects() {
        let response = JsonRpcResponse {
            id: 1,
            result: Some(vec![json!([
                {"name": "Home"},
                {"name": 7, "value": "code"},
                "junk",
                {"name": "Mute", "value": "m"}
            ])]),
            error: None,
        };

        let entries = decode_remote_controller_info(response).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].code, None);
        assert_eq!(entries[1].name, None);
        assert_eq!(entries[2], DirectoryEntry::new("Mute", "m"));
    }

    #[test]
    fn test_decode_device_error() {
        let body = r#"{"id": 1, "error": [401, "Unauthorized"]}"#;
        let response = JsonRpcResponse::from_json(body).unwrap();

        let err = decode_remote_controller_info(response).unwrap_err();

        assert_eq!(err, ProtocolError::DeviceError(json!([401, "Unauthorized"])));
    }

    #[test]
    fn test_decode_missing_result() {
        let response = JsonRpcResponse::from_json(r#"{"id": 1}"#).unwrap();
        assert_eq!(
            decode_remote_controller_info(response),
            Err(ProtocolError::MissingResult)
        );
    }

    #[test]
    fn test_decode_result_without_list() {
        let response = JsonRpcResponse {
            id: 1,
            result: Some(vec![json!({"bundled": true})]),
            error: None,
        };
        assert_eq!(
            decode_remote_controller_info(response),
            Err(ProtocolError::NoEntryList)
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = JsonRpcResponse::from_json("<html>").unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
    }
}
