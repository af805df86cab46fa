//! Shared fixtures for integration tests

#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use pizza_agent::config::{ENV_ACCESS_TOKEN, ENV_AGENT_NAME, ENV_MODEL_DEPLOYMENT, ENV_PROJECT_ENDPOINT};
use pizza_agent::AgentConfig;
use std::collections::HashMap;

pub const TEST_TOKEN: &str = "test-token";

/// Config pointing at `endpoint`, plus any extra variables.
pub fn test_config(endpoint: &str, extra: &[(&str, &str)]) -> AgentConfig {
    let mut vars: HashMap<String, String> = [
        (ENV_PROJECT_ENDPOINT, endpoint),
        (ENV_AGENT_NAME, "pizza-bot"),
        (ENV_MODEL_DEPLOYMENT, "gpt-4o-mini"),
        (ENV_ACCESS_TOKEN, TEST_TOKEN),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    AgentConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// JSON POST mock that also checks auth and the api-version parameter.
pub async fn mock_post(
    server: &mut ServerGuard,
    path: &str,
    body: Matcher,
    response: serde_json::Value,
) -> Mock {
    server
        .mock("POST", path)
        .match_query(Matcher::UrlEncoded(
            "api-version".into(),
            pizza_agent::config::DEFAULT_API_VERSION.into(),
        ))
        .match_header("authorization", format!("Bearer {TEST_TOKEN}").as_str())
        .match_body(body)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(response.to_string())
        .create_async()
        .await
}
