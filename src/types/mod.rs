//! 类型系统模块：与智能体服务交换的线路类型。
//!
//! # Types Module
//!
//! Strongly-typed representations of everything exchanged with the agent
//! service: tool declarations, response items, tool-call results and the
//! records returned when provisioning conversations, vector stores and agents.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tool`] | Tool declarations, tool-call results, local tool outcomes |
//! | [`response`] | Response requests and the items a response carries |
//! | [`conversation`] | Conversation handles and turns |
//! | [`resources`] | Vector stores, uploaded files, agent definitions |

pub mod conversation;
pub mod resources;
pub mod response;
pub mod tool;

pub use conversation::{Conversation, ConversationTurn};
pub use response::{AgentReference, AgentResponse, ResponseInput, ResponseItem, ResponseRequest};
pub use tool::{ApprovalMode, ToolCallResult, ToolDefinition, ToolResult};
