use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

pub const JSONRPC_VERSION: &str = "2.0";

/// A validated JSON-RPC 2.0 request. `id` is `Null` when the caller omitted it.
#[derive(Debug, Clone)]
pub struct JsonRpcRequest {
    pub method: String,
    pub params: Option<Value>,
    pub id: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: Value,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }
}

/// Parses one raw request. Unparseable input gets a Parse error response with
/// a null id since no id is recoverable from the input.
pub fn parse_request(input: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return Err(JsonRpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                "Parse error",
            ))
        }
    };
    validate_envelope(value)
}

/// Checks the envelope shape: an object with `jsonrpc == "2.0"` and a
/// non-empty `method` string. The id is echoed even on rejection.
pub fn validate_envelope(value: Value) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let id = value.get("id").cloned().unwrap_or(Value::Null);

    let version_ok = value.get("jsonrpc").and_then(Value::as_str) == Some(JSONRPC_VERSION);
    let method = value
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if !version_ok || method.is_empty() {
        return Err(JsonRpcResponse::error(
            id,
            INVALID_REQUEST,
            "Invalid Request",
        ));
    }

    let params = value.get("params").cloned().filter(|p| !p.is_null());

    Ok(JsonRpcRequest {
        method: method.to_string(),
        params,
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_and_error_are_mutually_exclusive() {
        let ok = JsonRpcResponse::success(json!(1), json!({"a": 1}));
        assert!(ok.result.is_some());
        assert!(ok.error.is_none());

        let err = JsonRpcResponse::error(json!(1), METHOD_NOT_FOUND, "Method not found");
        assert!(err.result.is_none());
        assert!(err.error.is_some());
    }

    #[test]
    fn serialized_success_omits_error_field() {
        let resp = JsonRpcResponse::success(json!("abc"), json!([1, 2]));
        let encoded = serde_json::to_value(&resp).unwrap();
        assert_eq!(encoded["jsonrpc"], "2.0");
        assert_eq!(encoded["id"], "abc");
        assert!(encoded.get("error").is_none());
    }

    #[test]
    fn serialized_error_omits_result_field() {
        let resp = JsonRpcResponse::error(Value::Null, PARSE_ERROR, "Parse error");
        let encoded = serde_json::to_value(&resp).unwrap();
        assert_eq!(encoded["error"]["code"], -32700);
        assert_eq!(encoded["id"], Value::Null);
        assert!(encoded.get("result").is_none());
    }

    #[test]
    fn parse_failure_yields_parse_error_with_null_id() {
        let resp = parse_request("{not json").unwrap_err();
        assert_eq!(resp.error.as_ref().unwrap().code, PARSE_ERROR);
        assert_eq!(resp.id, Value::Null);
    }

    #[test]
    fn missing_jsonrpc_is_invalid_request() {
        let resp = validate_envelope(json!({"method": "tools/list", "id": 7})).unwrap_err();
        assert_eq!(resp.error.as_ref().unwrap().code, INVALID_REQUEST);
        assert_eq!(resp.id, json!(7));
    }

    #[test]
    fn wrong_version_is_invalid_request() {
        let resp =
            validate_envelope(json!({"jsonrpc": "1.0", "method": "tools/list"})).unwrap_err();
        assert_eq!(resp.error.as_ref().unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn missing_method_is_invalid_request() {
        let resp = validate_envelope(json!({"jsonrpc": "2.0", "id": null})).unwrap_err();
        assert_eq!(resp.error.as_ref().unwrap().code, INVALID_REQUEST);
        assert_eq!(resp.id, Value::Null);
    }

    #[test]
    fn valid_envelope_extracts_fields() {
        let req = validate_envelope(json!({
            "jsonrpc": "2.0",
            "method": "get_cats",
            "params": {"n": 3},
            "id": 2
        }))
        .unwrap();
        assert_eq!(req.method, "get_cats");
        assert_eq!(req.params, Some(json!({"n": 3})));
        assert_eq!(req.id, json!(2));
    }

    #[test]
    fn null_params_treated_as_absent() {
        let req = validate_envelope(json!({
            "jsonrpc": "2.0",
            "method": "get_random_cat",
            "params": null
        }))
        .unwrap();
        assert!(req.params.is_none());
        assert_eq!(req.id, Value::Null);
    }

    #[test]
    fn zero_id_is_echoed_not_nulled() {
        let resp = validate_envelope(json!({"method": "x", "id": 0})).unwrap_err();
        assert_eq!(resp.id, json!(0));
    }
}
