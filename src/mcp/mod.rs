//! MCP 工具声明：远程 MCP 服务器作为智能体工具
//!
//! Remote MCP (Model Context Protocol) server declared as an agent tool.
//!
//! The agent service talks to the MCP server itself; this side only declares
//! the server on the agent definition and answers the approval requests the
//! service raises before each remote call. The allow list is declared to the
//! service and enforced there, never locally.

use std::collections::BTreeSet;
use url::Url;

pub use crate::types::tool::ApprovalMode;
use crate::types::tool::ToolDefinition;

/// A remote MCP server exposed to the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpServerConfig {
    /// Label the service uses to refer to this server in tool-call items.
    pub label: String,
    pub url: Url,
    pub approval: ApprovalMode,
    /// Allowed tool names (empty = all allowed).
    pub allowed_tools: BTreeSet<String>,
}

impl McpServerConfig {
    pub fn new(label: impl Into<String>, url: Url) -> Self {
        Self {
            label: label.into(),
            url,
            approval: ApprovalMode::Always,
            allowed_tools: BTreeSet::new(),
        }
    }

    pub fn with_approval(mut self, approval: ApprovalMode) -> Self {
        self.approval = approval;
        self
    }

    /// Set allowed tools filter.
    pub fn with_allow_filter(mut self, tools: impl IntoIterator<Item = String>) -> Self {
        self.allowed_tools = tools.into_iter().collect();
        self
    }

    /// Tool declaration for the agent definition.
    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::Mcp {
            server_label: self.label.clone(),
            server_url: self.url.to_string(),
            require_approval: self.approval,
            allowed_tools: if self.allowed_tools.is_empty() {
                None
            } else {
                Some(self.allowed_tools.iter().cloned().collect())
            },
        }
    }
}
