//! Value types exchanged between caller, registry and tool.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key the registry stamps with the tool's wall-clock duration.
pub const EXECUTION_TIME_KEY: &str = "execution_time_ms";

/// A requested invocation, usually produced by the LLM's structured output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Map::new())
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            arguments,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Uniform outcome of an invocation, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub result_for_llm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_component: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ToolResult {
    pub fn success(result_for_llm: impl Into<String>) -> Self {
        Self {
            success: true,
            result_for_llm: result_for_llm.into(),
            ui_component: None,
            error: None,
            metadata: Map::new(),
        }
    }

    /// Failed result whose LLM text and error carry the same message.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            result_for_llm: message.clone(),
            ui_component: None,
            error: Some(message),
            metadata: Map::new(),
        }
    }

    pub fn with_ui_component(mut self, component: Value) -> Self {
        self.ui_component = Some(component);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn execution_time_ms(&self) -> Option<f64> {
        self.metadata.get(EXECUTION_TIME_KEY).and_then(Value::as_f64)
    }
}

/// Returned by an argument transform to refuse a call. A handled outcome, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRejection {
    pub reason: String,
}

impl ToolRejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ToolRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Published description of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    #[serde(default)]
    pub access_groups: Vec<String>,
}

impl ToolSchema {
    /// OpenAI function-calling shape. Access groups are not exposed to the model.
    pub fn to_function_declaration(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters
            }
        })
    }
}
