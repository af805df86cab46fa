use serde::{Deserialize, Serialize};

/// Server-side conversation handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
}

/// One completed exchange. Turns are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub conversation_id: String,
    pub user_text: String,
    pub agent_text: String,
}
