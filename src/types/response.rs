//! Response requests and the output items the agent service returns

use serde::{Deserialize, Serialize};

use crate::types::tool::ToolCallResult;

/// Points a response request at a named agent instead of a raw model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReference {
    pub name: String,
    #[serde(rename = "type")]
    pub reference_type: String,
}

impl AgentReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference_type: "agent_reference".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseInput {
    Text(String),
    Items(Vec<ToolCallResult>),
}

/// Body of a `POST /openai/responses` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseRequest {
    pub input: ResponseInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_response_id: Option<String>,
    pub agent: AgentReference,
}

impl ResponseRequest {
    /// First request of a turn: user text within the persisted conversation.
    pub fn user_turn(
        conversation_id: impl Into<String>,
        agent: AgentReference,
        text: impl Into<String>,
    ) -> Self {
        Self {
            input: ResponseInput::Text(text.into()),
            conversation: Some(conversation_id.into()),
            previous_response_id: None,
            agent,
        }
    }

    /// Follow-up request carrying tool results, chained to the response that asked for them.
    pub fn tool_results(
        previous_response_id: impl Into<String>,
        agent: AgentReference,
        results: Vec<ToolCallResult>,
    ) -> Self {
        Self {
            input: ResponseInput::Items(results),
            conversation: None,
            previous_response_id: Some(previous_response_id.into()),
            agent,
        }
    }
}

/// A response from the agent service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Vec<ResponseItem>,
}

impl AgentResponse {
    /// Concatenated text of all assistant message parts, in output order.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .filter_map(|item| match item {
                ResponseItem::Message(msg) => Some(msg),
                _ => None,
            })
            .flat_map(|msg| msg.content.iter())
            .filter_map(|part| match part {
                MessageContent::OutputText { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// One entry of a response's `output` array, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseItem {
    Message(OutputMessage),
    FunctionCall(FunctionCall),
    McpApprovalRequest(McpApprovalRequest),
    /// file_search_call, mcp_call, mcp_list_tools, reasoning, ...
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    OutputText { text: String },
    Refusal { refusal: String },
    #[serde(other)]
    Other,
}

/// Request to run a locally registered function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub id: Option<String>,
    pub call_id: String,
    pub name: String,
    /// JSON-encoded argument object.
    #[serde(default)]
    pub arguments: String,
}

/// Request to approve a remote MCP tool call before the service performs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpApprovalRequest {
    pub id: String,
    #[serde(default)]
    pub server_label: String,
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_mixed_output() {
        let resp: AgentResponse = serde_json::from_value(json!({
            "id": "resp_1",
            "status": "completed",
            "output": [
                {"type": "file_search_call", "id": "fs_1", "queries": ["hours"]},
                {"type": "function_call", "id": "fc_1", "call_id": "call_1",
                 "name": "calculate_pizza_for_people", "arguments": "{\"people_count\":4}"},
                {"type": "mcp_approval_request", "id": "mcpr_1", "server_label": "contoso",
                 "name": "place_order", "arguments": "{}"},
                {"type": "message", "role": "assistant",
                 "content": [{"type": "output_text", "text": "Hi", "annotations": []}]}
            ]
        }))
        .unwrap();

        assert_eq!(resp.output.len(), 4);
        assert_eq!(resp.output[0], ResponseItem::Other);
        assert!(matches!(&resp.output[1], ResponseItem::FunctionCall(c) if c.call_id == "call_1"));
        assert!(matches!(&resp.output[2], ResponseItem::McpApprovalRequest(r) if r.id == "mcpr_1"));
        assert_eq!(resp.output_text(), "Hi");
    }

    #[test]
    fn test_output_text_joins_parts_and_skips_refusals() {
        let resp: AgentResponse = serde_json::from_value(json!({
            "id": "resp_2",
            "output": [
                {"type": "message", "content": [
                    {"type": "output_text", "text": "Order "},
                    {"type": "refusal", "refusal": "no"}
                ]},
                {"type": "message", "content": [{"type": "output_text", "text": "5 pizzas."}]}
            ]
        }))
        .unwrap();
        assert_eq!(resp.output_text(), "Order 5 pizzas.");
    }

    #[test]
    fn test_request_shapes() {
        let first = ResponseRequest::user_turn("conv_1", AgentReference::new("pizza-bot"), "hello");
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            json!({
                "input": "hello",
                "conversation": "conv_1",
                "agent": {"name": "pizza-bot", "type": "agent_reference"}
            })
        );

        let follow_up = ResponseRequest::tool_results(
            "resp_1",
            AgentReference::new("pizza-bot"),
            vec![ToolCallResult::approval("mcpr_1", true)],
        );
        let value = serde_json::to_value(&follow_up).unwrap();
        assert_eq!(value["previous_response_id"], "resp_1");
        assert!(value.get("conversation").is_none());
        assert_eq!(value["input"][0]["type"], "mcp_approval_response");
    }
}
