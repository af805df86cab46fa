//! 客户端模块：智能体服务的抽象与 HTTP 实现。
//!
//! # Client Module
//!
//! [`AgentService`] is the seam between conversation logic and the remote agent
//! platform. [`FoundryClient`] implements it over HTTP against a project
//! endpoint and also provisions the resources the agent needs (vector store,
//! uploaded documents, agent version); [`provision_agent`] runs that startup
//! sequence end to end.

mod foundry;
mod provision;

pub use foundry::FoundryClient;
pub use provision::{provision_agent, ProvisionedAgent};

use async_trait::async_trait;

use crate::types::conversation::Conversation;
use crate::types::response::{AgentResponse, ResponseRequest};
use crate::Result;

/// The conversational surface of the remote agent service.
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Open a new server-side conversation.
    async fn create_conversation(&self) -> Result<Conversation>;

    /// Submit user input or tool results and wait for the response.
    async fn create_response(&self, request: &ResponseRequest) -> Result<AgentResponse>;
}
