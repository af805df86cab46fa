//! Conversation sessions against a mock agent service over HTTP.

mod common;

use common::{mock_post, test_config};
use mockito::{Matcher, Server};
use pizza_agent::agent::{ConversationSession, ToolCallDispatcher};
use pizza_agent::types::AgentReference;
use pizza_agent::{Error, FoundryClient, ToolRegistry};
use serde_json::json;
use std::sync::Arc;

async fn start_session(server_url: &str) -> ConversationSession {
    let config = test_config(server_url, &[]);
    let client = Arc::new(FoundryClient::new(&config).unwrap());
    ConversationSession::start(
        client,
        ToolCallDispatcher::new(Arc::new(ToolRegistry::with_defaults())),
        AgentReference::new("pizza-bot"),
        config.max_tool_rounds,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_turn_resolves_tool_calls_before_answering() {
    let mut server = Server::new_async().await;

    let conversation = mock_post(
        &mut server,
        "/openai/conversations",
        Matcher::Any,
        json!({"id": "conv_1", "object": "conversation"}),
    )
    .await;

    let first = mock_post(
        &mut server,
        "/openai/responses",
        Matcher::PartialJson(json!({
            "conversation": "conv_1",
            "input": "We are 10 hungry people",
            "agent": {"name": "pizza-bot", "type": "agent_reference"}
        })),
        json!({
            "id": "resp_1",
            "status": "completed",
            "output": [
                {"type": "function_call", "id": "fc_1", "call_id": "call_1",
                 "name": "calculate_pizza_for_people",
                 "arguments": "{\"people_count\":10,\"appetite_level\":\"heavy\"}"},
                {"type": "mcp_approval_request", "id": "mcpr_1",
                 "server_label": "contoso-pizza-mcp", "name": "place_order", "arguments": "{}"}
            ]
        }),
    )
    .await;

    let follow_up = mock_post(
        &mut server,
        "/openai/responses",
        Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"previous_response_id": "resp_1"})),
            Matcher::Regex(r#""call_id":"call_1""#.to_string()),
            Matcher::Regex(r#"pizza_count"#.to_string()),
            Matcher::Regex(r#""approval_request_id":"mcpr_1","approve":true"#.to_string()),
        ]),
        json!({
            "id": "resp_2",
            "status": "completed",
            "output": [
                {"type": "mcp_call", "id": "mcp_1", "name": "place_order"},
                {"type": "message", "role": "assistant",
                 "content": [{"type": "output_text", "text": "Order 5 pizzas.", "annotations": []}]}
            ]
        }),
    )
    .await;

    let mut session = start_session(&server.url()).await;
    assert_eq!(session.conversation_id(), "conv_1");

    let reply = session.send("We are 10 hungry people").await.unwrap();
    assert_eq!(reply, "Order 5 pizzas.");
    assert_eq!(session.turns().len(), 1);
    assert_eq!(session.turns()[0].agent_text, "Order 5 pizzas.");
    assert_eq!(session.turns()[0].conversation_id, "conv_1");

    conversation.assert_async().await;
    first.assert_async().await;
    follow_up.assert_async().await;
}

#[tokio::test]
async fn test_plain_answer_needs_single_call() {
    let mut server = Server::new_async().await;
    let _conversation =
        mock_post(&mut server, "/openai/conversations", Matcher::Any, json!({"id": "conv_2"})).await;
    let responses = mock_post(
        &mut server,
        "/openai/responses",
        Matcher::PartialJson(json!({"conversation": "conv_2"})),
        json!({
            "id": "resp_9",
            "output": [{"type": "message", "content": [{"type": "output_text", "text": "We open at 11."}]}]
        }),
    )
    .await;

    let mut session = start_session(&server.url()).await;
    assert_eq!(session.send("When do you open?").await.unwrap(), "We open at 11.");
    responses.assert_async().await;
}

#[tokio::test]
async fn test_remote_error_propagates_unmodified() {
    let mut server = Server::new_async().await;
    let _conversation =
        mock_post(&mut server, "/openai/conversations", Matcher::Any, json!({"id": "conv_3"})).await;
    let _responses = server
        .mock("POST", "/openai/responses")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":"rate_limited","message":"slow down"}}"#)
        .create_async()
        .await;

    let mut session = start_session(&server.url()).await;
    let err = session.send("hello").await.unwrap_err();
    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "slow down");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert!(session.turns().is_empty());
}

#[tokio::test]
async fn test_conversation_creation_failure() {
    let mut server = Server::new_async().await;
    let _conversation = server
        .mock("POST", "/openai/conversations")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let config = test_config(&server.url(), &[]);
    let client = Arc::new(FoundryClient::new(&config).unwrap());
    let result = ConversationSession::start(
        client,
        ToolCallDispatcher::new(Arc::new(ToolRegistry::with_defaults())),
        AgentReference::new("pizza-bot"),
        config.max_tool_rounds,
    )
    .await;
    assert!(matches!(result, Err(Error::Remote { status: 401, .. })));
}
