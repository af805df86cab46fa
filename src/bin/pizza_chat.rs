//! Contoso Pizza chat: terminal conversation with the provisioned agent
//!
//! Usage:
//!   pizza-chat
//!
//! Reads one message per line from stdin. `exit` or `quit` (any case) ends the
//! conversation, as does end of input.
//!
//! ENVIRONMENT (a `.env` file in the working directory is loaded first):
//!   AZURE_AI_FOUNDRY_PROJECT_ENDPOINT        Project endpoint URL (required)
//!   AZURE_AI_FOUNDRY_AGENT_NAME              Agent name (required)
//!   AZURE_AI_FOUNDRY_MODEL_DEPLOYMENT_NAME   Model deployment (required)
//!   AZURE_AI_FOUNDRY_ACCESS_TOKEN            Bearer token (optional, keyring fallback)
//!   PIZZA_AGENT_MCP_SERVER_URL               Remote MCP server (optional)

use anyhow::Context;
use pizza_agent::agent::{ConversationSession, ToolCallDispatcher};
use pizza_agent::client::{provision_agent, FoundryClient, ProvisionedAgent};
use pizza_agent::telemetry::{init_tracing, DEFAULT_FILTER};
use pizza_agent::{AgentConfig, ToolRegistry};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

fn is_exit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "You: ")?;
    stdout.flush()
}

/// Run the conversation until the user leaves or input ends.
async fn chat(
    client: &Arc<FoundryClient>,
    config: &AgentConfig,
    registry: Arc<ToolRegistry>,
    provisioned: &ProvisionedAgent,
) -> anyhow::Result<()> {
    let mut session = ConversationSession::start(
        client.clone(),
        ToolCallDispatcher::new(registry),
        provisioned.agent_reference(),
        config.max_tool_rounds,
    )
    .await?;
    println!("Conversation started (id: {})", session.conversation_id());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if is_exit_command(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match session.send(&line).await {
            Ok(reply) => println!("Agent: {reply}"),
            Err(err) => {
                tracing::error!(error = %err, kind = err.kind(), "turn failed");
                println!("Agent: (turn failed: {err})");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(DEFAULT_FILTER);

    let config = AgentConfig::from_env().context("loading agent configuration")?;
    let registry = Arc::new(ToolRegistry::with_defaults());
    let client = Arc::new(FoundryClient::new(&config)?);

    let provisioned = provision_agent(&client, &config, &registry)
        .await
        .context("provisioning agent")?;
    println!(
        "Agent ready (name: {}, version: {})",
        provisioned.agent.name, provisioned.agent.version
    );

    let outcome = chat(&client, &config, registry, &provisioned).await;

    if config.cleanup_on_exit {
        if let Err(err) = provisioned.release(&client).await {
            tracing::warn!(error = %err, "failed to release agent resources");
        }
    }
    outcome?;
    println!("Conversation ended.");
    Ok(())
}
