//! Lagoon Common Types and Transport
//!
//! This crate provides the wire protocol definitions and the synchronous TCP
//! transport layer for the Lagoon key/collection store client.
//!
//! # Overview
//!
//! Lagoon speaks a line-delimited JSON-RPC dialect over a persistent TCP
//! connection: one JSON object per line, terminated by a single `\n`. This
//! crate contains the pieces shared by anything that talks that dialect:
//!
//! - **Protocol Layer**: request/response envelopes, error codes, error type
//! - **Transport Layer**: connection management, liveness probing, and
//!   newline-delimited framing over blocking TCP
//!
//! # Wire Protocol
//!
//! - **Transport**: raw TCP, one persistent connection, one request in flight
//! - **Serialization**: JSON
//! - **Framing**: one message per line, `\n`-terminated
//! - **Max Frame Size**: 1 MiB (bounds allocation on malformed input)
//!
//! # Example
//!
//! ```
//! use lagoon_common::{JsonRpcRequest, JsonRpcResponse};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new(1, "hasKey", vec![json!("users"), json!("alice")]);
//! assert_eq!(request.id, 1);
//!
//! let response = JsonRpcResponse::success(1, json!(true));
//! assert_eq!(response.into_result().unwrap(), json!(true));
//! ```

pub mod protocol;
pub mod transport;

pub use protocol::*;
