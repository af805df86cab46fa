use async_trait::async_trait;
use reqwest::multipart;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::client::AgentService;
use crate::config::AgentConfig;
use crate::transport::HttpTransport;
use crate::types::conversation::Conversation;
use crate::types::resources::{
    AgentVersion, FileObject, IngestionStatus, PromptAgentDefinition, VectorStore, VectorStoreFile,
};
use crate::types::response::{AgentResponse, ResponseRequest};
use crate::{Error, ErrorContext, Result};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_POLLS: u32 = 120;

/// HTTP client for an agent project endpoint.
pub struct FoundryClient {
    transport: HttpTransport,
    poll_interval: Duration,
    max_polls: u32,
}

impl FoundryClient {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        })
    }

    /// How often and how many times to poll file ingestion.
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls.max(1);
        self
    }

    pub async fn create_vector_store(&self, name: &str) -> Result<VectorStore> {
        let store: VectorStore = self
            .transport
            .post_json("openai/vector_stores", &json!({ "name": name }))
            .await?;
        info!(vector_store_id = %store.id, %name, "vector store created");
        Ok(store)
    }

    pub async fn delete_vector_store(&self, vector_store_id: &str) -> Result<()> {
        self.transport
            .delete(&format!("openai/vector_stores/{vector_store_id}"))
            .await?;
        info!(%vector_store_id, "vector store deleted");
        Ok(())
    }

    /// Upload a file, attach it to the vector store and wait until it is indexed.
    pub async fn upload_file_and_poll(
        &self,
        vector_store_id: &str,
        path: &Path,
    ) -> Result<VectorStoreFile> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let form = multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", multipart::Part::bytes(bytes).file_name(file_name));

        let file: FileObject = self.transport.post_multipart("openai/files", form).await?;
        debug!(file_id = %file.id, path = %path.display(), "file uploaded");

        let mut attached: VectorStoreFile = self
            .transport
            .post_json(
                &format!("openai/vector_stores/{vector_store_id}/files"),
                &json!({ "file_id": file.id }),
            )
            .await?;

        let mut polls = 0;
        while attached.status == IngestionStatus::InProgress {
            if polls >= self.max_polls {
                return Err(Error::runtime_with_context(
                    "timed out waiting for file ingestion",
                    ErrorContext::new()
                        .with_details(format!("file {} after {polls} polls", attached.id))
                        .with_source("vector_store"),
                ));
            }
            polls += 1;
            tokio::time::sleep(self.poll_interval).await;
            attached = self
                .transport
                .get_json(&format!(
                    "openai/vector_stores/{vector_store_id}/files/{}",
                    attached.id
                ))
                .await?;
        }

        match attached.status {
            IngestionStatus::Completed => {
                info!(file_id = %attached.id, %vector_store_id, "file indexed in vector store");
                Ok(attached)
            }
            status => Err(Error::runtime_with_context(
                format!("file ingestion ended with status {status:?}"),
                ErrorContext::new()
                    .with_details(
                        attached
                            .last_error
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| attached.id.clone()),
                    )
                    .with_source("vector_store"),
            )),
        }
    }

    /// Create a new version of the named agent.
    pub async fn create_agent_version(
        &self,
        agent_name: &str,
        definition: &PromptAgentDefinition,
    ) -> Result<AgentVersion> {
        let agent: AgentVersion = self
            .transport
            .post_json(
                &format!("agents/{agent_name}/versions"),
                &json!({ "definition": definition }),
            )
            .await?;
        info!(agent_id = %agent.id, name = %agent.name, version = %agent.version, "agent version created");
        Ok(agent)
    }
}

#[async_trait]
impl AgentService for FoundryClient {
    async fn create_conversation(&self) -> Result<Conversation> {
        self.transport
            .post_json("openai/conversations", &json!({}))
            .await
    }

    async fn create_response(&self, request: &ResponseRequest) -> Result<AgentResponse> {
        self.transport.post_json("openai/responses", request).await
    }
}
