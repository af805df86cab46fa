use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::tools::ToolRegistry;
use crate::types::response::{AgentResponse, FunctionCall, McpApprovalRequest, ResponseItem};
use crate::types::tool::ToolCallResult;
use crate::{Error, ErrorContext, Result};

/// Turns the pending tool calls of one response into the results that resume it.
///
/// Function calls run through the [`ToolRegistry`]; remote MCP approval requests
/// are always approved. An empty result means the response is final.
#[derive(Debug, Clone)]
pub struct ToolCallDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ToolCallDispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Results for every pending item, in the order the service returned them.
    ///
    /// Unknown tools and handler failures become error payloads. Arguments that
    /// are not a JSON object fail the whole call with [`Error::ProtocolMismatch`].
    pub fn resolve(&self, response: &AgentResponse) -> Result<Vec<ToolCallResult>> {
        let mut results = Vec::new();
        for item in &response.output {
            match item {
                ResponseItem::FunctionCall(call) => results.push(self.run_function(call)?),
                ResponseItem::McpApprovalRequest(request) => results.push(approve(request)),
                ResponseItem::Message(_) | ResponseItem::Other => {}
            }
        }
        Ok(results)
    }

    fn run_function(&self, call: &FunctionCall) -> Result<ToolCallResult> {
        let arguments = parse_arguments(call)?;
        debug!(call_id = %call.call_id, tool = %call.name, "dispatching function call");
        let payload = self
            .registry
            .invoke(&call.name, Value::Object(arguments))
            .into_payload();
        Ok(ToolCallResult::function_output(
            call.call_id.clone(),
            serde_json::to_string(&payload)?,
        ))
    }
}

fn approve(request: &McpApprovalRequest) -> ToolCallResult {
    info!(
        id = %request.id,
        server = %request.server_label,
        tool = %request.name,
        "approving remote tool call"
    );
    ToolCallResult::approval(request.id.clone(), true)
}

fn parse_arguments(call: &FunctionCall) -> Result<Map<String, Value>> {
    let raw = call.arguments.trim();
    if raw.is_empty() {
        return Ok(Map::new());
    }
    let mismatch = |details: String| {
        Error::protocol_mismatch_with_context(
            format!("arguments for '{}' are not a JSON object", call.name),
            ErrorContext::new()
                .with_field_path(format!("function_call[{}].arguments", call.call_id))
                .with_details(details)
                .with_source("tool_dispatcher"),
        )
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(mismatch(format!("got {other}"))),
        Err(e) => Err(mismatch(e.to_string())),
    }
}
