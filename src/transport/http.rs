use crate::config::AgentConfig;
use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use reqwest::{multipart, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

const KEYRING_SERVICE: &str = "pizza-agent";
const REQUEST_ID_HEADER: &str = "x-client-request-id";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    access_token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let access_token = config
            .access_token
            .clone()
            .or_else(|| Self::get_access_token(&config.project_endpoint));

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: config.project_endpoint.as_str().trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            access_token,
        })
    }

    /// Look up a stored token for this endpoint's host in the OS keyring.
    fn get_access_token(endpoint: &url::Url) -> Option<String> {
        let host = endpoint.host_str()?;
        Entry::new(KEYRING_SERVICE, host).ok()?.get_password().ok()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.client.get(self.url(path))).await?;
        Self::decode(resp).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(self.client.post(self.url(path)).json(body)).await?;
        Self::decode(resp).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T> {
        let resp = self
            .send(self.client.post(self.url(path)).multipart(form))
            .await?;
        Self::decode(resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    async fn send(&self, mut req: RequestBuilder) -> Result<reqwest::Response> {
        let request_id = Uuid::new_v4().to_string();
        req = req
            .query(&[("api-version", self.api_version.as_str())])
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = resp.status();
        debug!(%request_id, status = status.as_u16(), url = %resp.url().path(), "agent service response");
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Error::Remote {
            status: status.as_u16(),
            message: remote_message(status, &body),
        })
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::protocol_mismatch_with_context(
                format!("unexpected response body: {e}"),
                ErrorContext::new()
                    .with_source("http_transport")
                    .with_details(String::from_utf8_lossy(&bytes).chars().take(256).collect::<String>()),
            )
        })
    }
}

/// Prefer the service's `{"error": {"message": ...}}` envelope, fall back to the raw body.
fn remote_message(status: StatusCode, body: &str) -> String {
    let from_envelope = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });
    match from_envelope {
        Some(msg) => msg,
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        None => body.trim().to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_prefers_error_envelope() {
        let body = r#"{"error":{"code":"invalid_request","message":"conversation not found"}}"#;
        assert_eq!(
            remote_message(StatusCode::NOT_FOUND, body),
            "conversation not found"
        );
    }

    #[test]
    fn test_remote_message_falls_back() {
        assert_eq!(remote_message(StatusCode::BAD_GATEWAY, "upstream down\n"), "upstream down");
        assert_eq!(remote_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    }
}
