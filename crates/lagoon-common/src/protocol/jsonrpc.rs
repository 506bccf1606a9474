//! Lagoon JSON-RPC Envelope Types
//!
//! Lagoon speaks a small JSON-RPC 2.0 dialect:
//! - Request: `{"jsonrpc": "2.0", "id": <int>, "method": "...", "params": [...]}`
//! - Success response: `{"id": <int>, "result": <value>}`
//! - Error response: `{"id": <int>, "error": {"code": <int>, "message": "..."}}`
//!
//! Requests carry the `jsonrpc` version tag; the server omits it on responses,
//! so [`JsonRpcResponse`] does not model it. Parameters are strictly
//! positional. Request ids on the wire are always in `[0, MAX_ID)`.
//!
//! # Error Codes
//!
//! Standard JSON-RPC 2.0 error codes the server is known to use:
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::LagoonError;

/// Protocol version tag carried on every request.
pub const PROTOCOL_VERSION: &str = "2.0";

/// Exclusive upper bound for request ids on the wire.
///
/// The client's counter may grow past this; it is reduced modulo `MAX_ID`
/// at send time only.
pub const MAX_ID: u64 = 2 << 16;

// Standard JSON-RPC 2.0 error codes
/// Invalid JSON was received by the server
pub const PARSE_ERROR: i64 = -32700;
/// The JSON sent is not a valid Request object
pub const INVALID_REQUEST: i64 = -32600;
/// The method does not exist / is not available
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid method parameter(s)
pub const INVALID_PARAMS: i64 = -32602;
/// Internal JSON-RPC error
pub const INTERNAL_ERROR: i64 = -32603;

/// A single request envelope. Created per call, serialized, discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Correlation id, in `[0, MAX_ID)`
    pub id: u64,
    /// Name of the remote method to invoke
    pub method: String,
    /// Positional parameters, passed through unvalidated
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    /// Builds a request envelope. The id is reduced modulo [`MAX_ID`] here,
    /// so callers may hand in a raw monotonic counter value.
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: PROTOCOL_VERSION.into(),
            id: id % MAX_ID,
            method: method.into(),
            params,
        }
    }
}

/// A response envelope: either `result` or `error` is present, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    /// Correlation id echoed from the request
    pub id: u64,
    /// Result value on success. A present-but-null result is a legitimate
    /// success value, distinct from the key being absent.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<Value>,
    /// Error object on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// Maps any present JSON value, including `null`, to `Some`; only a missing
/// `result` key falls through to the field default of `None`.
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Structured failure reported by the server for a specific request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    /// Error code (standard codes are negative integers)
    pub code: i64,
    /// Short description of the error
    pub message: String,
}

impl JsonRpcResponse {
    /// Creates a success response (used by tests and mock servers).
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Creates an error response (used by tests and mock servers).
    pub fn error(id: u64, code: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Splits the envelope into an outcome: a protocol-level `error` member
    /// becomes [`LagoonError::Rpc`], otherwise the `result` value is returned
    /// verbatim. A response carrying neither member is malformed.
    pub fn into_result(self) -> super::error::Result<Value> {
        if let Some(err) = self.error {
            return Err(LagoonError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        self.result.ok_or_else(|| {
            LagoonError::Decode("response has neither result nor error".to_string())
        })
    }
}
