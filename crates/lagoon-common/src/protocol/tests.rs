use super::error::LagoonError;
use super::jsonrpc::*;
use serde_json::json;

#[test]
fn test_request_serialization_shape() {
    let req = JsonRpcRequest::new(1, "setKey", vec![json!("c"), json!("k")]);
    let serialized = serde_json::to_string(&req).unwrap();
    assert!(serialized.contains("\"jsonrpc\":\"2.0\""));
    assert!(serialized.contains("\"id\":1"));
    assert!(serialized.contains("\"method\":\"setKey\""));
    assert!(serialized.contains("\"params\":[\"c\",\"k\"]"));
}

#[test]
fn test_request_id_reduced_modulo_max_id() {
    let req = JsonRpcRequest::new(MAX_ID + 7, "hasKey", vec![]);
    assert_eq!(req.id, 7);

    let req = JsonRpcRequest::new(MAX_ID - 1, "hasKey", vec![]);
    assert_eq!(req.id, MAX_ID - 1);

    let req = JsonRpcRequest::new(MAX_ID, "hasKey", vec![]);
    assert_eq!(req.id, 0);
}

#[test]
fn test_wire_id_sequence_wraps() {
    // For the k-th call the transmitted id is (initial + k) mod MAX_ID.
    let initial = MAX_ID - 2;
    let ids: Vec<u64> = (0..5)
        .map(|k| JsonRpcRequest::new(initial + k, "hasKey", vec![]).id)
        .collect();
    assert_eq!(ids, vec![MAX_ID - 2, MAX_ID - 1, 0, 1, 2]);
    assert!(ids.iter().all(|id| *id < MAX_ID));
}

#[test]
fn test_success_response_deserialization() {
    let res: JsonRpcResponse = serde_json::from_str(r#"{"id":1,"result":true}"#).unwrap();
    assert_eq!(res.id, 1);
    assert_eq!(res.result, Some(json!(true)));
    assert_eq!(res.error, None);
    assert_eq!(res.into_result().unwrap(), json!(true));
}

#[test]
fn test_error_response_deserialization() {
    let raw = r#"{"id":1,"error":{"code":-32601,"message":"method not found"}}"#;
    let res: JsonRpcResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(res.id, 1);
    assert_eq!(res.result, None);

    match res.into_result() {
        Err(LagoonError::Rpc { code, message }) => {
            assert_eq!(code, METHOD_NOT_FOUND);
            assert_eq!(message, "method not found");
        }
        other => panic!("expected Rpc error, got {:?}", other),
    }
}

#[test]
fn test_null_result_is_a_success_value() {
    let res: JsonRpcResponse = serde_json::from_str(r#"{"id":5,"result":null}"#).unwrap();
    assert_eq!(res.result, Some(json!(null)));
    assert_eq!(res.into_result().unwrap(), json!(null));
}

#[test]
fn test_response_without_result_or_error_is_decode_error() {
    let res: JsonRpcResponse = serde_json::from_str(r#"{"id":3}"#).unwrap();
    assert!(matches!(res.into_result(), Err(LagoonError::Decode(_))));
}

#[test]
fn test_error_code_constants() {
    assert_eq!(PARSE_ERROR, -32700);
    assert_eq!(INVALID_REQUEST, -32600);
    assert_eq!(METHOD_NOT_FOUND, -32601);
    assert_eq!(INVALID_PARAMS, -32602);
    assert_eq!(INTERNAL_ERROR, -32603);
}

#[test]
fn test_io_error_mapping() {
    let reset = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
    assert!(matches!(
        LagoonError::from_io(reset, "sending request"),
        LagoonError::Connection(_)
    ));

    let interrupted = std::io::Error::new(std::io::ErrorKind::Interrupted, "eintr");
    assert!(matches!(
        LagoonError::from_io(interrupted, "sending request"),
        LagoonError::Io(_)
    ));
}
