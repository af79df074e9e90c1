pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod rpc;
pub mod upstream;

pub use catalog::{list_tools, ToolDescriptor};
pub use config::{ApiConfig, Endpoint, McpConfig, ServerInfo, ToolSpec};
pub use dispatch::{Dispatcher, TransportMode};
pub use rpc::{
    parse_request, validate_envelope, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};
pub use upstream::{CatsClient, UpstreamError};
