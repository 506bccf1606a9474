use crate::protocol::error::Result;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};

/// Codec for the newline-delimited JSON wire format.
///
/// One message per line: the JSON text of an envelope followed by exactly one
/// `\n` terminator, encoded as UTF-8. The codec does not validate method
/// names or parameter types; invalid input is rejected only by the server.
///
/// # Example
///
/// ```
/// use lagoon_common::transport::LineCodec;
/// use lagoon_common::protocol::JsonRpcRequest;
/// use serde_json::json;
///
/// let request = JsonRpcRequest::new(1, "setKey", vec![json!("c"), json!("k")]);
/// let encoded = LineCodec::encode_request(&request).unwrap();
/// assert_eq!(*encoded.last().unwrap(), b'\n');
/// ```
pub struct LineCodec;

impl LineCodec {
    /// Encodes a request envelope to a single newline-terminated line.
    pub fn encode_request(request: &JsonRpcRequest) -> Result<Vec<u8>> {
        let mut data = serde_json::to_vec(request)?;
        data.push(b'\n');
        Ok(data)
    }

    /// Decodes one response line. A single trailing `\n` is stripped if
    /// present; the framing layer normally hands in a terminated line, but a
    /// bare JSON object is accepted too.
    pub fn decode_response(data: &[u8]) -> Result<JsonRpcResponse> {
        let line = match data.last() {
            Some(b'\n') => &data[..data.len() - 1],
            _ => data,
        };
        Ok(serde_json::from_slice(line)?)
    }
}
