use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// The MCP descriptor: server metadata, upstream API endpoints, and the tool
/// catalog source. Loaded once at startup and immutable for the process
/// lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    pub server: ServerInfo,
    pub api: ApiConfig,
    pub tools: BTreeMap<String, ToolSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    pub endpoints: BTreeMap<String, Endpoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub description: String,
    pub parameters: Value,
    pub returns: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
}

impl McpConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(Into::into)
    }

    pub fn endpoint_path(&self, tool: &str) -> Option<&str> {
        self.api.endpoints.get(tool).map(|e| e.path.as_str())
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// The stock cats descriptor, used when no descriptor file is supplied.
    pub fn builtin() -> Self {
        let cat_properties = json!({
            "uuid": { "type": "string" },
            "name": { "type": "string" },
            "description": { "type": "string" },
            "image": { "type": "string" },
            "date_created": { "type": "string" }
        });

        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            "get_random_cat".to_string(),
            Endpoint {
                path: "/cats/random".to_string(),
            },
        );
        endpoints.insert(
            "get_cats".to_string(),
            Endpoint {
                path: "/cats".to_string(),
            },
        );

        let mut tools = BTreeMap::new();
        tools.insert(
            "get_random_cat".to_string(),
            ToolSpec {
                description: "Get a single random fictional cat".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
                returns: json!({
                    "type": "object",
                    "properties": cat_properties.clone(),
                    "required": ["uuid", "name", "description", "image", "date_created"]
                }),
                examples: None,
            },
        );
        tools.insert(
            "get_cats".to_string(),
            ToolSpec {
                description: "Get a list of fictional cats".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "n": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Number of cats to return"
                        }
                    },
                    "required": ["n"]
                }),
                returns: json!({
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": cat_properties
                    }
                }),
                examples: None,
            },
        );

        Self {
            server: ServerInfo {
                name: "fictional-cats-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                endpoints,
            },
            tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_has_both_cat_tools() {
        let config = McpConfig::builtin();
        assert_eq!(config.tool_names(), vec!["get_cats", "get_random_cat"]);
        assert_eq!(config.endpoint_path("get_cats"), Some("/cats"));
        assert_eq!(config.endpoint_path("get_random_cat"), Some("/cats/random"));
    }

    #[test]
    fn load_reads_descriptor_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cats_mcp.json");
        fs::write(
            &path,
            r#"{
                "server": { "name": "cats-test", "version": "9.9.9" },
                "api": {
                    "baseUrl": "http://cats.example",
                    "endpoints": {
                        "get_random_cat": { "path": "/random" },
                        "get_cats": { "path": "/many" }
                    }
                },
                "tools": {
                    "get_random_cat": {
                        "description": "one cat",
                        "parameters": { "type": "object" },
                        "returns": { "type": "object" },
                        "examples": [{ "input": {} }]
                    }
                }
            }"#,
        )
        .unwrap();

        let config = McpConfig::load(&path).unwrap();
        assert_eq!(config.server.name, "cats-test");
        assert_eq!(config.api.base_url, "http://cats.example");
        assert_eq!(config.endpoint_path("get_cats"), Some("/many"));
        assert_eq!(config.tools["get_random_cat"].examples.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(McpConfig::load(Path::new("/nonexistent/cats_mcp.json")).is_err());
    }

    #[test]
    fn load_rejects_malformed_descriptor() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"server\": {}}").unwrap();
        assert!(McpConfig::load(&path).is_err());
    }
}
