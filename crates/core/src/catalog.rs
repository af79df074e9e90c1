use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::McpConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    pub returns: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
}

/// Builds the `tools/list` catalog from the descriptor. Recomputed per call;
/// the config's ordered map keeps the result deterministic.
///
/// The stdio transport includes an `examples` array (empty when none are
/// configured); the HTTP transport omits the field entirely.
pub fn list_tools(config: &McpConfig, with_examples: bool) -> Vec<ToolDescriptor> {
    config
        .tools
        .iter()
        .map(|(name, spec)| ToolDescriptor {
            name: name.clone(),
            description: spec.description.clone(),
            parameters: spec.parameters.clone(),
            returns: spec.returns.clone(),
            examples: if with_examples {
                Some(spec.examples.clone().unwrap_or_default())
            } else {
                None
            },
        })
        .collect()
}
