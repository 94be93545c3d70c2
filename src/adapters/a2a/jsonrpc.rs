//! JSON-RPC 2.0 envelopes and A2A method parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::models::Message;

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC and A2A-specific error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum A2AErrorCode {
    /// Task not found.
    TaskNotFound = -32001,
    /// Agent doesn't support webhooks.
    PushNotificationNotSupported = -32003,
    /// Requested operation not supported.
    UnsupportedOperation = -32004,
    /// Invalid JSON-RPC envelope.
    InvalidRequest = -32600,
    /// Method not found.
    MethodNotFound = -32601,
    /// Invalid request parameters.
    InvalidParams = -32602,
    /// Internal error.
    InternalError = -32603,
    /// Parse error.
    ParseError = -32700,
}

impl A2AErrorCode {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::TaskNotFound => "Task not found",
            Self::PushNotificationNotSupported => "Push notifications not supported",
            Self::UnsupportedOperation => "Operation not supported",
            Self::InvalidRequest => "Invalid request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::ParseError => "Parse error",
        }
    }
}

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: A2AErrorCode, data: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: code.code(),
                message: code.message().to_string(),
                data,
            }),
        }
    }

    pub fn from_rpc_error(id: Option<Value>, err: &RpcError) -> Self {
        Self::error(id, err.code(), Some(err.data()))
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Failure of an A2A method, mapped onto a JSON-RPC error.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Task {0} not found")]
    TaskNotFound(String),

    #[error("{0}")]
    InvalidParams(String),

    #[error("{0}")]
    Internal(String),
}

impl RpcError {
    pub const fn code(&self) -> A2AErrorCode {
        match self {
            Self::TaskNotFound(_) => A2AErrorCode::TaskNotFound,
            Self::InvalidParams(_) => A2AErrorCode::InvalidParams,
            Self::Internal(_) => A2AErrorCode::InternalError,
        }
    }

    fn data(&self) -> Value {
        match self {
            Self::TaskNotFound(task_id) => serde_json::json!({ "taskId": task_id }),
            _ => serde_json::json!({ "message": self.to_string() }),
        }
    }
}

/// Per-request delivery options for `message/send`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSendConfiguration {
    #[serde(default)]
    pub history_length: Option<usize>,
    #[serde(default)]
    pub accepted_output_modes: Vec<String>,
}

/// Parameters of `message/send` and `message/stream`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSendParams {
    pub message: Message,
    #[serde(default)]
    pub configuration: Option<MessageSendConfiguration>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl MessageSendParams {
    pub fn history_length(&self) -> Option<usize> {
        self.configuration
            .as_ref()
            .and_then(|config| config.history_length)
    }
}

/// Parameters of `tasks/get`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueryParams {
    pub id: String,
    #[serde(default)]
    pub history_length: Option<usize>,
}

/// Parameters of `tasks/cancel`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskIdParams {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_jsonrpc_request_parsing() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "message/send",
            "params": {"message": {"role": "user", "messageId": "m1", "parts": [{"kind": "text", "text": "Hello"}]}}
        }"#;
        let request: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method, "message/send");

        let params: MessageSendParams = serde_json::from_value(request.params).unwrap();
        assert_eq!(params.message.text_content(), "Hello");
        assert_eq!(params.history_length(), None);
    }

    #[test]
    fn test_jsonrpc_response_error() {
        let response = JsonRpcResponse::error(Some(json!(1)), A2AErrorCode::TaskNotFound, None);
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32001);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(A2AErrorCode::PushNotificationNotSupported.code(), -32003);
        assert_eq!(A2AErrorCode::InvalidRequest.code(), -32600);
        assert_eq!(A2AErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(A2AErrorCode::InvalidParams.code(), -32602);
        assert_eq!(A2AErrorCode::ParseError.code(), -32700);
    }

    #[test]
    fn test_rpc_error_mapping() {
        let err = RpcError::TaskNotFound("t-9".to_string());
        let response = JsonRpcResponse::from_rpc_error(Some(json!("a")), &err);
        let error = response.error.unwrap();
        assert_eq!(error.code, -32001);
        assert_eq!(error.data.unwrap()["taskId"], json!("t-9"));
    }

    #[test]
    fn test_history_length_from_configuration() {
        let params: MessageSendParams = serde_json::from_value(json!({
            "message": {"role": "user", "messageId": "m1", "parts": []},
            "configuration": {"historyLength": 2}
        }))
        .unwrap();
        assert_eq!(params.history_length(), Some(2));
    }
}
