//! Dispatch-loop behavior against an in-process agent service.

use async_trait::async_trait;
use pizza_agent::agent::{ConversationSession, ToolCallDispatcher};
use pizza_agent::types::conversation::Conversation;
use pizza_agent::types::{AgentReference, AgentResponse, ResponseInput, ResponseRequest};
use pizza_agent::{AgentService, Error, ToolCallResult, ToolRegistry};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted responses; once the script runs out it repeats the last one.
struct ScriptedService {
    script: Mutex<VecDeque<AgentResponse>>,
    last: Mutex<Option<AgentResponse>>,
    requests: Mutex<Vec<ResponseRequest>>,
}

impl ScriptedService {
    fn new(script: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|v| serde_json::from_value(v).unwrap())
                    .collect(),
            ),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ResponseRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentService for ScriptedService {
    async fn create_conversation(&self) -> pizza_agent::Result<Conversation> {
        Ok(Conversation {
            id: "conv_fake".into(),
        })
    }

    async fn create_response(&self, request: &ResponseRequest) -> pizza_agent::Result<AgentResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(resp) = next {
            *last = Some(resp);
        }
        Ok(last.clone().expect("script must not be empty"))
    }
}

fn function_call(id: &str, name: &str, arguments: &str) -> Value {
    json!({
        "id": id,
        "output": [{"type": "function_call", "call_id": format!("call_{id}"), "name": name, "arguments": arguments}]
    })
}

fn final_text(id: &str, text: &str) -> Value {
    json!({
        "id": id,
        "output": [{"type": "message", "content": [{"type": "output_text", "text": text}]}]
    })
}

async fn session(service: Arc<ScriptedService>, max_rounds: u32) -> ConversationSession {
    ConversationSession::start(
        service,
        ToolCallDispatcher::new(Arc::new(ToolRegistry::with_defaults())),
        AgentReference::new("pizza-bot"),
        max_rounds,
    )
    .await
    .unwrap()
}

fn follow_up_items(request: &ResponseRequest) -> &[ToolCallResult] {
    match &request.input {
        ResponseInput::Items(items) => items,
        other => panic!("expected tool results, got {other:?}"),
    }
}

#[tokio::test]
async fn test_loop_cap_surfaces_loop_exceeded() {
    let service = ScriptedService::new(vec![function_call(
        "r",
        "calculate_pizza_for_people",
        r#"{"people_count":2,"appetite_level":"light"}"#,
    )]);
    let mut session = session(service.clone(), 2).await;

    let err = session.send("loop forever").await.unwrap_err();
    assert!(matches!(err, Error::LoopExceeded { rounds: 2 }));
    // one user turn plus two rounds of tool results
    assert_eq!(service.requests().len(), 3);
    assert!(session.turns().is_empty());
}

#[tokio::test]
async fn test_protocol_mismatch_stops_turn_without_follow_up() {
    let service = ScriptedService::new(vec![function_call(
        "r1",
        "calculate_pizza_for_people",
        "people_count=4",
    )]);
    let mut session = session(service.clone(), 4).await;

    let err = session.send("four people").await.unwrap_err();
    assert!(matches!(err, Error::ProtocolMismatch { .. }));
    assert_eq!(service.requests().len(), 1);
}

#[tokio::test]
async fn test_unknown_tool_is_reported_back_and_turn_completes() {
    let service = ScriptedService::new(vec![
        function_call("r1", "order_drinks", "{}"),
        final_text("r2", "I can only help with pizza."),
    ]);
    let mut session = session(service.clone(), 4).await;

    let reply = session.send("and some cola").await.unwrap();
    assert_eq!(reply, "I can only help with pizza.");

    let requests = service.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].previous_response_id.as_deref(), Some("r1"));
    match &follow_up_items(&requests[1])[0] {
        ToolCallResult::FunctionCallOutput { call_id, output } => {
            assert_eq!(call_id, "call_r1");
            let payload: Value = serde_json::from_str(output).unwrap();
            assert_eq!(payload["error"]["kind"], "unknown_tool");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn test_conversation_id_reused_and_turns_appended() {
    let service = ScriptedService::new(vec![
        final_text("r1", "Hello!"),
        function_call("r2", "calculate_pizza_for_people", r#"{"people_count":10,"appetite_level":"heavy"}"#),
        final_text("r3", "You need 5 pizzas."),
    ]);
    let mut session = session(service.clone(), 4).await;

    assert_eq!(session.send("hi").await.unwrap(), "Hello!");
    assert_eq!(session.send("10 heavy eaters").await.unwrap(), "You need 5 pizzas.");

    let requests = service.requests();
    let user_turns: Vec<_> = requests
        .iter()
        .filter(|r| matches!(r.input, ResponseInput::Text(_)))
        .collect();
    assert_eq!(user_turns.len(), 2);
    assert!(user_turns
        .iter()
        .all(|r| r.conversation.as_deref() == Some("conv_fake")));

    let payload: Value = match &follow_up_items(&requests[2])[0] {
        ToolCallResult::FunctionCallOutput { output, .. } => serde_json::from_str(output).unwrap(),
        other => panic!("unexpected result {other:?}"),
    };
    assert_eq!(payload["result"]["pizza_count"], 5);

    let turns = session.turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].user_text, "hi");
    assert_eq!(turns[1].agent_text, "You need 5 pizzas.");
}
