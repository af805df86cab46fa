//! Tool declarations and tool-call results exchanged with the agent service

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Tool declared on an agent definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDefinition {
    /// Locally executed function; the service asks for it via `function_call` items.
    Function {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        parameters: Value, // JSON Schema
        #[serde(default)]
        strict: bool,
    },
    /// Managed retrieval over one or more vector stores.
    FileSearch { vector_store_ids: Vec<String> },
    /// Remote MCP server, called by the service itself.
    Mcp {
        server_label: String,
        server_url: String,
        require_approval: ApprovalMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        allowed_tools: Option<Vec<String>>,
    },
}

impl ToolDefinition {
    pub fn name(&self) -> &str {
        match self {
            ToolDefinition::Function { name, .. } => name,
            ToolDefinition::FileSearch { .. } => "file_search",
            ToolDefinition::Mcp { server_label, .. } => server_label,
        }
    }
}

/// When the service must ask before calling a remote MCP tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalMode {
    Always,
    Never,
}

/// Result sent back to the service to resume generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolCallResult {
    FunctionCallOutput { call_id: String, output: String },
    McpApprovalResponse { approval_request_id: String, approve: bool },
}

impl ToolCallResult {
    pub fn function_output(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        ToolCallResult::FunctionCallOutput {
            call_id: call_id.into(),
            output: output.into(),
        }
    }

    pub fn approval(approval_request_id: impl Into<String>, approve: bool) -> Self {
        ToolCallResult::McpApprovalResponse {
            approval_request_id: approval_request_id.into(),
            approve,
        }
    }

    /// Identifier of the request this result answers.
    pub fn identifier(&self) -> &str {
        match self {
            ToolCallResult::FunctionCallOutput { call_id, .. } => call_id,
            ToolCallResult::McpApprovalResponse {
                approval_request_id,
                ..
            } => approval_request_id,
        }
    }
}

/// Outcome of invoking a local tool handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_name: String,
    pub content: Value,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(tool_name: impl Into<String>, content: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            content,
            is_error: false,
        }
    }

    /// Structured failure: `{"kind": ..., "message": ...}`.
    pub fn failure(tool_name: impl Into<String>, err: &crate::Error) -> Self {
        Self {
            tool_name: tool_name.into(),
            content: json!({ "kind": err.kind(), "message": err.to_string() }),
            is_error: true,
        }
    }

    /// Wire payload: `{"result": ...}` on success, `{"error": ...}` on failure.
    pub fn into_payload(self) -> Value {
        if self.is_error {
            json!({ "error": self.content })
        } else {
            json!({ "result": self.content })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_definition_wire_shape() {
        let def = ToolDefinition::Function {
            name: "calculate_pizza_for_people".into(),
            description: None,
            parameters: json!({"type": "object"}),
            strict: true,
        };
        assert_eq!(
            serde_json::to_value(&def).unwrap(),
            json!({
                "type": "function",
                "name": "calculate_pizza_for_people",
                "parameters": {"type": "object"},
                "strict": true
            })
        );
    }

    #[test]
    fn test_tool_call_result_wire_shape() {
        let approve = ToolCallResult::approval("mcpr_1", true);
        assert_eq!(
            serde_json::to_value(&approve).unwrap(),
            json!({"type": "mcp_approval_response", "approval_request_id": "mcpr_1", "approve": true})
        );
        assert_eq!(approve.identifier(), "mcpr_1");

        let output = ToolCallResult::function_output("call_9", "{}");
        assert_eq!(output.identifier(), "call_9");
    }

    #[test]
    fn test_payload_wrapping() {
        let ok = ToolResult::success("t", json!(3)).into_payload();
        assert_eq!(ok, json!({"result": 3}));

        let err = crate::Error::UnknownTool { name: "t".into() };
        let failed = ToolResult::failure("t", &err).into_payload();
        assert_eq!(failed["error"]["kind"], "unknown_tool");
    }
}
