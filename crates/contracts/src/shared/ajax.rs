//! admin-ajax envelope and error taxonomy shared by every frontend request.
//!
//! WordPress answers each action with `wp_send_json_success` /
//! `wp_send_json_error`, i.e. `{"success": bool, "data": ...}`. On failure
//! `data` is either a plain message string or an object with a `message` key.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fallback text when the backend reports a failure without any message
pub const GENERIC_BACKEND_ERROR: &str = "The server reported an error without details";

/// Backend actions, one per operation exposed by the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AjaxAction {
    TestConnection,
    GetHeaders,
    SaveMapping,
    GetMapping,
    ImportData,
    Export,
    GetTableData,
    UpdateItem,
    DeleteItem,
    UploadImage,
}

impl AjaxAction {
    /// WordPress action name (`wp_ajax_<name>` hook on the PHP side)
    pub fn as_str(&self) -> &'static str {
        match self {
            AjaxAction::TestConnection => "catalog_master_test_connection",
            AjaxAction::GetHeaders => "catalog_master_get_headers",
            AjaxAction::SaveMapping => "catalog_master_save_mapping",
            AjaxAction::GetMapping => "catalog_master_get_mapping",
            AjaxAction::ImportData => "catalog_master_import_data",
            AjaxAction::Export => "catalog_master_export",
            AjaxAction::GetTableData => "catalog_master_get_table_data",
            AjaxAction::UpdateItem => "catalog_master_update_item",
            AjaxAction::DeleteItem => "catalog_master_delete_item",
            AjaxAction::UploadImage => "catalog_master_upload_image",
        }
    }
}

impl std::fmt::Display for AjaxAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a failure should be presented to the administrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Every way a single user action can fail. None of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Network failure, non-OK HTTP status, undecodable body or timeout
    #[error("Connection error: {0}")]
    Transport(String),

    /// `success: false` envelope; message is shown verbatim
    #[error("{0}")]
    Backend(String),

    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),
}

impl CatalogError {
    pub fn severity(&self) -> Severity {
        match self {
            CatalogError::Validation(_) => Severity::Warning,
            CatalogError::Transport(_) | CatalogError::Backend(_) => Severity::Error,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CatalogError::Validation(msg.into())
    }
}

/// `{success, data}` wrapper around every admin-ajax response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AjaxEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Value,
}

impl AjaxEnvelope {
    /// Unwrap the payload or turn the envelope into a `Backend` error
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, CatalogError> {
        if !self.success {
            return Err(CatalogError::Backend(failure_message(&self.data)));
        }
        // `wp_send_json_success()` without arguments carries no data at all
        let data = if self.data.is_null() {
            Value::Object(Default::default())
        } else {
            self.data
        };
        serde_json::from_value(data)
            .map_err(|e| CatalogError::Transport(format!("Unexpected response payload: {e}")))
    }
}

fn failure_message(data: &Value) -> String {
    match data {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_BACKEND_ERROR.to_string()),
        _ => GENERIC_BACKEND_ERROR.to_string(),
    }
}

/// Payload of endpoints that only acknowledge (`wp_send_json_success()` or a message)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_payload_is_decoded() {
        let env: AjaxEnvelope =
            serde_json::from_value(json!({"success": true, "data": {"message": "ok"}})).unwrap();
        let ack: Ack = env.into_result().unwrap();
        assert_eq!(ack.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_failure_string_is_shown_verbatim() {
        let env: AjaxEnvelope =
            serde_json::from_value(json!({"success": false, "data": "Sheet not found"})).unwrap();
        let err = env.into_result::<Ack>().unwrap_err();
        assert_eq!(err, CatalogError::Backend("Sheet not found".to_string()));
        assert_eq!(err.to_string(), "Sheet not found");
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn test_failure_object_message() {
        let env: AjaxEnvelope = serde_json::from_value(
            json!({"success": false, "data": {"message": "Invalid nonce"}}),
        )
        .unwrap();
        let err = env.into_result::<Ack>().unwrap_err();
        assert_eq!(err, CatalogError::Backend("Invalid nonce".to_string()));
    }

    #[test]
    fn test_failure_without_message_uses_generic_text() {
        let env: AjaxEnvelope = serde_json::from_value(json!({"success": false})).unwrap();
        let err = env.into_result::<Ack>().unwrap_err();
        assert_eq!(err, CatalogError::Backend(GENERIC_BACKEND_ERROR.to_string()));
    }

    #[test]
    fn test_bare_success_decodes_into_ack() {
        let env: AjaxEnvelope = serde_json::from_value(json!({"success": true})).unwrap();
        let ack: Ack = env.into_result().unwrap();
        assert!(ack.message.is_none());
    }

    #[test]
    fn test_validation_is_a_warning() {
        let err = CatalogError::validation("Please add at least one filter");
        assert_eq!(err.severity(), Severity::Warning);
    }
}
