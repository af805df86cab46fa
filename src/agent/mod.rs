//! 智能体会话：工具调用分发与多轮对话。
//!
//! Conversation driving: [`ConversationSession`] exchanges user messages for
//! agent replies and uses [`ToolCallDispatcher`] to answer the tool calls the
//! service raises in between. Each turn moves through
//! awaiting-response → dispatching → awaiting-response … → final, strictly
//! sequentially, with a bounded number of dispatch rounds.

mod dispatcher;
mod session;

pub use dispatcher::ToolCallDispatcher;
pub use session::ConversationSession;
