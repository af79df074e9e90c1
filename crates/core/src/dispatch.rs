use std::sync::Arc;

use serde_json::{json, Number, Value};
use tracing::{debug, error};

use crate::catalog::list_tools;
use crate::config::McpConfig;
use crate::rpc::{
    parse_request, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS,
    METHOD_NOT_FOUND,
};
use crate::upstream::CatsClient;

/// Which calling convention applies. HTTP exposes the cat tools as top-level
/// methods only; stdio additionally accepts the `tools/call` indirection and
/// gets `examples` in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Http,
    Stdio,
}

pub struct Dispatcher {
    config: Arc<McpConfig>,
    client: CatsClient,
}

impl Dispatcher {
    pub fn new(config: Arc<McpConfig>) -> Self {
        let client = CatsClient::new(config.api.base_url.clone());
        Self { config, client }
    }

    pub fn config(&self) -> &McpConfig {
        &self.config
    }

    /// Handles one raw request string end to end: parse, validate, dispatch.
    /// Every outcome is a response; faults never escape a request.
    pub async fn handle_request(&self, input: &str, mode: TransportMode) -> JsonRpcResponse {
        match parse_request(input) {
            Ok(request) => self.dispatch(request, mode).await,
            Err(response) => response,
        }
    }

    pub async fn dispatch(&self, request: JsonRpcRequest, mode: TransportMode) -> JsonRpcResponse {
        match request.method.as_str() {
            "tools/list" => self.handle_tools_list(request, mode),
            "tools/call" if mode == TransportMode::Stdio => self.handle_tools_call(request).await,
            "get_random_cat" => self.handle_random_cat(request).await,
            "get_cats" => self.handle_get_cats(request).await,
            other => {
                debug!("method not found: {other}");
                JsonRpcResponse::error(request.id, METHOD_NOT_FOUND, "Method not found")
            }
        }
    }

    fn handle_tools_list(&self, request: JsonRpcRequest, mode: TransportMode) -> JsonRpcResponse {
        let tools = list_tools(&self.config, mode == TransportMode::Stdio);
        debug!("returning tools list with {} tools", tools.len());
        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    async fn handle_random_cat(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match self.fetch_random_cat().await {
            Ok(data) => JsonRpcResponse::success(request.id, data),
            Err(message) => {
                error!("{message}");
                JsonRpcResponse::error(request.id, INTERNAL_ERROR, message)
            }
        }
    }

    async fn handle_get_cats(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let n = match request.params.as_ref().and_then(|p| p.get("n")) {
            Some(Value::Number(n)) if is_positive(n) => n.clone(),
            _ => {
                return JsonRpcResponse::error(request.id, INVALID_PARAMS, "Invalid params");
            }
        };

        match self.fetch_cats(&n).await {
            Ok(data) => JsonRpcResponse::success(request.id, data),
            Err(message) => {
                error!("{message}");
                JsonRpcResponse::error(request.id, INTERNAL_ERROR, message)
            }
        }
    }

    /// The `tools/call` indirection (stdio only). Tool-level failures are
    /// reported inside a successful result via `isError`; the JSON-RPC `error`
    /// field is reserved for protocol faults like a missing tool name.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let name = request
            .params
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str);

        let Some(name) = name else {
            debug!("invalid tool call: missing tool name");
            return JsonRpcResponse::error(request.id, INVALID_PARAMS, "Invalid params");
        };

        let parameters = request
            .params
            .as_ref()
            .and_then(|p| p.get("parameters"))
            .cloned()
            .unwrap_or_else(|| json!({}));

        debug!("tool call: {name} with params: {parameters}");

        let result = match self.call_tool(name, &parameters).await {
            Ok(content) => json!({ "content": content, "isError": false }),
            Err(message) => {
                error!("{message}");
                json!({ "content": { "error": message }, "isError": true })
            }
        };

        JsonRpcResponse::success(request.id, result)
    }

    async fn call_tool(&self, name: &str, parameters: &Value) -> Result<Value, String> {
        match name {
            "get_random_cat" => self.fetch_random_cat().await,
            "get_cats" => {
                let n = match parameters.get("n") {
                    None => Number::from(5u8),
                    Some(Value::Number(n)) if is_positive(n) => n.clone(),
                    Some(_) => {
                        return Err(
                            "Invalid parameter: n must be a positive integer".to_string()
                        )
                    }
                };
                self.fetch_cats(&n).await
            }
            other => Err(format!("Tool not found: {other}")),
        }
    }

    async fn fetch_random_cat(&self) -> Result<Value, String> {
        let path = self
            .config
            .endpoint_path("get_random_cat")
            .ok_or_else(|| "Error fetching random cat: endpoint not configured".to_string())?;
        debug!("fetching from endpoint: {path}");
        self.client
            .get(path)
            .await
            .map_err(|e| format!("Error fetching random cat: {e}"))
    }

    async fn fetch_cats(&self, n: &Number) -> Result<Value, String> {
        let path = self
            .config
            .endpoint_path("get_cats")
            .ok_or_else(|| "Error fetching cats: endpoint not configured".to_string())?;
        debug!("fetching from endpoint: {path}?n={n}");
        self.client
            .get_with_count(path, n)
            .await
            .map_err(|e| format!("Error fetching cats: {e}"))
    }
}

fn is_positive(n: &Number) -> bool {
    n.as_f64().map_or(false, |v| v >= 1.0)
}
