//! Records returned when provisioning the agent's server-side resources

use serde::{Deserialize, Serialize};

use crate::types::tool::ToolDefinition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStore {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// An uploaded file object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Indexing state of a file attached to a vector store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStoreFile {
    pub id: String,
    pub status: IngestionStatus,
    #[serde(default)]
    pub last_error: Option<serde_json::Value>,
}

/// Prompt-based agent definition: model, instructions, tools and sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptAgentDefinition {
    pub kind: String,
    pub model: String,
    pub instructions: String,
    pub tools: Vec<ToolDefinition>,
    pub top_p: f32,
    pub temperature: f32,
}

impl PromptAgentDefinition {
    pub fn new(model: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            kind: "prompt".to_string(),
            model: model.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
            top_p: 1.0,
            temperature: 1.0,
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_sampling(mut self, temperature: f32, top_p: f32) -> Self {
        self.temperature = temperature;
        self.top_p = top_p;
        self
    }
}

/// A created agent version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentVersion {
    pub id: String,
    pub name: String,
    pub version: String,
}
