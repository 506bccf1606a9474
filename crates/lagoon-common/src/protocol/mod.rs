pub mod error;
pub mod jsonrpc;

#[cfg(test)]
mod tests;

pub use error::{LagoonError, Result};
pub use jsonrpc::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS,
    INVALID_REQUEST, MAX_ID, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};
