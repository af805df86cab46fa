//! # pizza-agent
//!
//! 披萨智能体：文件检索、披萨计算工具、远程 MCP 工具与一个小型 HTTP 接口。
//!
//! Contoso Pizza agent. Wires a hosted agent (file search over uploaded
//! documents, a local pizza calculator tool, an optional remote MCP server) to
//! a terminal chat loop, and exposes the same calculator over HTTP.
//!
//! ## Overview
//!
//! The hosted service owns model calls, retrieval and conversation storage.
//! This crate owns the pieces around it:
//!
//! - **Estimator**: [`pizza::PizzaEstimator`] turns a head count and appetite into an order
//! - **Tools**: [`tools::ToolRegistry`] routes function calls to local handlers
//! - **Dispatch**: [`agent::ToolCallDispatcher`] answers the tool calls a response asks for
//! - **Sessions**: [`agent::ConversationSession`] drives a multi-turn conversation
//! - **HTTP**: [`server::create_app`] serves `POST /calculate_pizza`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pizza_agent::agent::{ConversationSession, ToolCallDispatcher};
//! use pizza_agent::client::{provision_agent, FoundryClient};
//! use pizza_agent::{AgentConfig, ToolRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pizza_agent::Result<()> {
//!     let config = AgentConfig::from_env()?;
//!     let registry = Arc::new(ToolRegistry::with_defaults());
//!     let client = Arc::new(FoundryClient::new(&config)?);
//!
//!     let agent = provision_agent(&client, &config, &registry).await?;
//!     let mut session = ConversationSession::start(
//!         client.clone(),
//!         ToolCallDispatcher::new(registry),
//!         agent.agent_reference(),
//!         config.max_tool_rounds,
//!     )
//!     .await?;
//!
//!     let reply = session.send("We are 10 hungry people, how many pizzas?").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pizza`] | Pizza order estimation |
//! | [`tools`] | Tool handlers and registry |
//! | [`agent`] | Tool-call dispatch and conversation sessions |
//! | [`client`] | Agent service seam, HTTP client, provisioning |
//! | [`mcp`] | Remote MCP server declaration |
//! | [`server`] | HTTP facade |
//! | [`types`] | Wire types |
//! | [`transport`] | HTTP transport |
//! | [`config`] | Environment configuration |
//! | [`telemetry`] | Logging setup |

pub mod agent;
pub mod client;
pub mod config;
pub mod mcp;
pub mod pizza;
pub mod server;
pub mod telemetry;
pub mod tools;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use agent::{ConversationSession, ToolCallDispatcher};
pub use client::{AgentService, FoundryClient};
pub use config::{AgentConfig, ServerConfig};
pub use pizza::{estimate, AppetiteLevel, PizzaEstimator, PizzaOrderEstimate};
pub use tools::{ToolHandler, ToolRegistry};
pub use types::{ToolCallResult, ToolDefinition};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
