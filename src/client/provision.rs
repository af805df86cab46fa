use tracing::{info, warn};

use crate::client::FoundryClient;
use crate::config::AgentConfig;
use crate::tools::ToolRegistry;
use crate::types::resources::{AgentVersion, PromptAgentDefinition, VectorStore};
use crate::types::response::AgentReference;
use crate::types::tool::ToolDefinition;
use crate::{Error, ErrorContext, Result};

/// Server-side resources created at startup. Owned by the entry point.
#[derive(Debug, Clone)]
pub struct ProvisionedAgent {
    pub agent: AgentVersion,
    pub vector_store: VectorStore,
    pub tools: Vec<ToolDefinition>,
}

impl ProvisionedAgent {
    pub fn agent_reference(&self) -> AgentReference {
        AgentReference::new(self.agent.name.clone())
    }

    /// Delete the vector store created for this agent.
    pub async fn release(self, client: &FoundryClient) -> Result<()> {
        client.delete_vector_store(&self.vector_store.id).await
    }
}

/// Create the vector store, index the documents and publish a new agent version
/// carrying file search, every registered function tool and the optional MCP server.
///
/// If any step after the vector store is created fails, the store is deleted
/// before the error is returned.
pub async fn provision_agent(
    client: &FoundryClient,
    config: &AgentConfig,
    registry: &ToolRegistry,
) -> Result<ProvisionedAgent> {
    let instructions = tokio::fs::read_to_string(&config.instructions_path)
        .await
        .map_err(|e| {
            Error::configuration_with_context(
                format!("cannot read agent instructions: {e}"),
                ErrorContext::new().with_field_path(config.instructions_path.display().to_string()),
            )
        })?;

    let vector_store = client.create_vector_store(&config.vector_store_name).await?;
    match publish(client, config, registry, &vector_store, instructions).await {
        Ok((agent, tools)) => {
            info!(
                agent = %agent.name,
                version = %agent.version,
                tools = tools.len(),
                "agent provisioned"
            );
            Ok(ProvisionedAgent {
                agent,
                vector_store,
                tools,
            })
        }
        Err(err) => {
            if let Err(cleanup) = client.delete_vector_store(&vector_store.id).await {
                warn!(
                    vector_store_id = %vector_store.id,
                    error = %cleanup,
                    "could not delete vector store after failed provisioning"
                );
            }
            Err(err)
        }
    }
}

// Everything after the vector store exists; the caller deletes the store on error.
async fn publish(
    client: &FoundryClient,
    config: &AgentConfig,
    registry: &ToolRegistry,
    vector_store: &VectorStore,
    instructions: String,
) -> Result<(AgentVersion, Vec<ToolDefinition>)> {
    for document in &config.documents {
        client.upload_file_and_poll(&vector_store.id, document).await?;
    }

    let mut tools = vec![ToolDefinition::FileSearch {
        vector_store_ids: vec![vector_store.id.clone()],
    }];
    tools.extend(registry.definitions());
    if let Some(mcp) = &config.mcp {
        tools.push(mcp.to_definition());
    }

    let definition = PromptAgentDefinition::new(&config.model_deployment, instructions)
        .with_tools(tools.clone())
        .with_sampling(config.temperature, config.top_p);
    let agent = client
        .create_agent_version(&config.agent_name, &definition)
        .await?;
    Ok((agent, tools))
}
