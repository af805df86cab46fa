//! 配置模块：启动时从环境变量读取一次。
//!
//! Startup configuration read once from the process environment.
//!
//! Required values (project endpoint, agent name, model deployment) are fatal
//! when missing. Everything else has a default. Parsing goes through a lookup
//! function so callers (and tests) can supply values without touching the
//! process environment.

use crate::mcp::{ApprovalMode, McpServerConfig};
use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const ENV_PROJECT_ENDPOINT: &str = "AZURE_AI_FOUNDRY_PROJECT_ENDPOINT";
pub const ENV_AGENT_NAME: &str = "AZURE_AI_FOUNDRY_AGENT_NAME";
pub const ENV_MODEL_DEPLOYMENT: &str = "AZURE_AI_FOUNDRY_MODEL_DEPLOYMENT_NAME";
pub const ENV_API_VERSION: &str = "AZURE_AI_FOUNDRY_API_VERSION";
pub const ENV_ACCESS_TOKEN: &str = "AZURE_AI_FOUNDRY_ACCESS_TOKEN";
pub const ENV_INSTRUCTIONS: &str = "PIZZA_AGENT_INSTRUCTIONS";
pub const ENV_DOCUMENTS: &str = "PIZZA_AGENT_DOCUMENTS";
pub const ENV_VECTOR_STORE_NAME: &str = "PIZZA_AGENT_VECTOR_STORE_NAME";
pub const ENV_MCP_SERVER_URL: &str = "PIZZA_AGENT_MCP_SERVER_URL";
pub const ENV_MCP_SERVER_LABEL: &str = "PIZZA_AGENT_MCP_SERVER_LABEL";
pub const ENV_MCP_ALLOWED_TOOLS: &str = "PIZZA_AGENT_MCP_ALLOWED_TOOLS";
pub const ENV_MAX_TOOL_ROUNDS: &str = "PIZZA_AGENT_MAX_TOOL_ROUNDS";
pub const ENV_TEMPERATURE: &str = "PIZZA_AGENT_TEMPERATURE";
pub const ENV_TOP_P: &str = "PIZZA_AGENT_TOP_P";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "PIZZA_AGENT_HTTP_TIMEOUT_SECS";
pub const ENV_CLEANUP: &str = "PIZZA_AGENT_CLEANUP";
pub const ENV_API_ADDR: &str = "PIZZA_API_ADDR";

pub const DEFAULT_API_VERSION: &str = "2025-11-15-preview";
pub const DEFAULT_INSTRUCTIONS: &str = "instructions.txt";
pub const DEFAULT_DOCUMENT: &str = "workshop/documents/contoso_pizza_sofia.md";
pub const DEFAULT_VECTOR_STORE_NAME: &str = "agentcon-pizza-vector-store";
pub const DEFAULT_MCP_SERVER_LABEL: &str = "contoso-pizza-mcp";
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 8;
pub const DEFAULT_API_ADDR: &str = "127.0.0.1:8000";

/// Everything the chat front-end needs to provision and talk to the agent.
#[derive(Clone)]
pub struct AgentConfig {
    pub project_endpoint: Url,
    pub agent_name: String,
    pub model_deployment: String,
    pub api_version: String,
    /// Bearer token; when absent the transport falls back to the OS keyring.
    pub access_token: Option<String>,
    pub instructions_path: PathBuf,
    pub documents: Vec<PathBuf>,
    pub vector_store_name: String,
    pub mcp: Option<McpServerConfig>,
    pub max_tool_rounds: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub request_timeout: Duration,
    pub cleanup_on_exit: bool,
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("project_endpoint", &self.project_endpoint.as_str())
            .field("agent_name", &self.agent_name)
            .field("model_deployment", &self.model_deployment)
            .field("api_version", &self.api_version)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("instructions_path", &self.instructions_path)
            .field("documents", &self.documents)
            .field("vector_store_name", &self.vector_store_name)
            .field("mcp", &self.mcp)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("request_timeout", &self.request_timeout)
            .field("cleanup_on_exit", &self.cleanup_on_exit)
            .finish()
    }
}

impl AgentConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_raw = required(&lookup, ENV_PROJECT_ENDPOINT)?;
        let project_endpoint = Url::parse(&endpoint_raw).map_err(|e| {
            Error::configuration_with_context(
                format!("project endpoint is not a valid URL: {e}"),
                ErrorContext::new()
                    .with_field_path(ENV_PROJECT_ENDPOINT)
                    .with_details(endpoint_raw.clone()),
            )
        })?;

        let documents = match optional(&lookup, ENV_DOCUMENTS) {
            Some(list) => comma_separated(&list).into_iter().map(PathBuf::from).collect(),
            None => vec![PathBuf::from(DEFAULT_DOCUMENT)],
        };

        let mcp = match optional(&lookup, ENV_MCP_SERVER_URL) {
            Some(raw) => {
                let url = Url::parse(&raw).map_err(|e| {
                    Error::configuration_with_context(
                        format!("MCP server URL is not a valid URL: {e}"),
                        ErrorContext::new().with_field_path(ENV_MCP_SERVER_URL),
                    )
                })?;
                let label = optional(&lookup, ENV_MCP_SERVER_LABEL)
                    .unwrap_or_else(|| DEFAULT_MCP_SERVER_LABEL.to_string());
                let allowed = optional(&lookup, ENV_MCP_ALLOWED_TOOLS)
                    .map(|list| comma_separated(&list))
                    .unwrap_or_default();
                Some(
                    McpServerConfig::new(label, url)
                        .with_approval(ApprovalMode::Always)
                        .with_allow_filter(allowed),
                )
            }
            None => None,
        };

        let max_tool_rounds: u32 = parsed(&lookup, ENV_MAX_TOOL_ROUNDS, DEFAULT_MAX_TOOL_ROUNDS)?;
        if max_tool_rounds == 0 {
            return Err(Error::configuration_with_context(
                "tool round limit must be at least 1",
                ErrorContext::new().with_field_path(ENV_MAX_TOOL_ROUNDS),
            ));
        }

        Ok(Self {
            project_endpoint,
            agent_name: required(&lookup, ENV_AGENT_NAME)?,
            model_deployment: required(&lookup, ENV_MODEL_DEPLOYMENT)?,
            api_version: optional(&lookup, ENV_API_VERSION)
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            access_token: optional(&lookup, ENV_ACCESS_TOKEN),
            instructions_path: optional(&lookup, ENV_INSTRUCTIONS)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INSTRUCTIONS)),
            documents,
            vector_store_name: optional(&lookup, ENV_VECTOR_STORE_NAME)
                .unwrap_or_else(|| DEFAULT_VECTOR_STORE_NAME.to_string()),
            mcp,
            max_tool_rounds,
            temperature: parsed(&lookup, ENV_TEMPERATURE, 0.7)?,
            top_p: parsed(&lookup, ENV_TOP_P, 0.7)?,
            request_timeout: Duration::from_secs(parsed(&lookup, ENV_HTTP_TIMEOUT_SECS, 60)?),
            cleanup_on_exit: parse_flag(&lookup, ENV_CLEANUP)?,
        })
    }
}

/// Bind address for the HTTP facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = optional(&lookup, ENV_API_ADDR).unwrap_or_else(|| DEFAULT_API_ADDR.to_string());
        let bind_addr = raw.parse::<SocketAddr>().map_err(|e| {
            Error::configuration_with_context(
                format!("invalid bind address: {e}"),
                ErrorContext::new()
                    .with_field_path(ENV_API_ADDR)
                    .with_details(raw.clone()),
            )
        })?;
        Ok(Self { bind_addr })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn comma_separated(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| {
        Error::configuration_with_context(
            format!("missing required environment variable {key}"),
            ErrorContext::new().with_field_path(key),
        )
    })
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match optional(lookup, key) {
        Some(raw) => raw.parse::<T>().map_err(|e| {
            Error::configuration_with_context(
                format!("cannot parse {key}: {e}"),
                ErrorContext::new().with_field_path(key).with_details(raw),
            )
        }),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, key).map(|v| v.to_ascii_lowercase()).as_deref() {
        None | Some("0") | Some("false") | Some("no") => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some(other) => Err(Error::configuration_with_context(
            format!("cannot parse {key} as a boolean"),
            ErrorContext::new()
                .with_field_path(key)
                .with_details(other.to_string()),
        )),
    }
}
