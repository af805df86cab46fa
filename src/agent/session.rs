use std::sync::Arc;
use tracing::{debug, info};

use crate::agent::ToolCallDispatcher;
use crate::client::AgentService;
use crate::types::conversation::ConversationTurn;
use crate::types::response::{AgentReference, ResponseRequest};
use crate::{Error, Result};

/// A multi-turn conversation with one agent.
///
/// The conversation id is assigned by the service in [`ConversationSession::start`]
/// and reused for every turn. Each [`send`](ConversationSession::send) blocks until
/// all tool-call rounds are resolved and the service produces a final answer.
pub struct ConversationSession {
    service: Arc<dyn AgentService>,
    dispatcher: ToolCallDispatcher,
    agent: AgentReference,
    conversation_id: String,
    max_tool_rounds: u32,
    turns: Vec<ConversationTurn>,
}

impl ConversationSession {
    pub async fn start(
        service: Arc<dyn AgentService>,
        dispatcher: ToolCallDispatcher,
        agent: AgentReference,
        max_tool_rounds: u32,
    ) -> Result<Self> {
        let conversation = service.create_conversation().await?;
        info!(conversation_id = %conversation.id, agent = %agent.name, "conversation started");
        Ok(Self {
            service,
            dispatcher,
            agent,
            conversation_id: conversation.id,
            max_tool_rounds,
            turns: Vec::new(),
        })
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Completed turns, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Send one user message and return the agent's final reply.
    ///
    /// Fails with [`Error::LoopExceeded`] when the service keeps asking for tools
    /// after `max_tool_rounds` rounds of results. A failed turn is not recorded.
    pub async fn send(&mut self, user_text: &str) -> Result<String> {
        let request = ResponseRequest::user_turn(&self.conversation_id, self.agent.clone(), user_text);
        let mut response = self.service.create_response(&request).await?;

        let mut rounds = 0u32;
        loop {
            let results = self.dispatcher.resolve(&response)?;
            if results.is_empty() {
                break;
            }
            if rounds >= self.max_tool_rounds {
                return Err(Error::LoopExceeded { rounds });
            }
            rounds += 1;
            debug!(
                response_id = %response.id,
                round = rounds,
                results = results.len(),
                "submitting tool results"
            );
            let follow_up = ResponseRequest::tool_results(&response.id, self.agent.clone(), results);
            response = self.service.create_response(&follow_up).await?;
        }

        let agent_text = response.output_text();
        self.turns.push(ConversationTurn {
            conversation_id: self.conversation_id.clone(),
            user_text: user_text.to_string(),
            agent_text: agent_text.clone(),
        });
        Ok(agent_text)
    }
}
