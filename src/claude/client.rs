// HTTP client for Claude API

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::types::{MessageRequest, MessageResponse};

pub const CLAUDE_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct ClaudeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ClaudeClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, CLAUDE_API_URL.to_string())
    }

    /// Point the client at a different host (proxies, test servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Send a request and parse the typed response
    pub async fn send_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let raw = self.send_raw(request, None).await?;
        serde_json::from_value(raw).context("Failed to parse Claude API response")
    }

    /// Send a request and hand back the provider JSON untouched.
    ///
    /// `api_key` overrides the configured key for this call only. A failed or
    /// timed-out request is returned as an error; there is no retry.
    pub async fn send_raw(&self, request: &MessageRequest, api_key: Option<&str>) -> Result<Value> {
        let key = api_key
            .filter(|k| !k.is_empty())
            .unwrap_or(self.api_key.as_str());
        if key.is_empty() {
            anyhow::bail!("No Anthropic API key configured");
        }

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending request to Claude API"
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .context("Failed to send request to Claude API")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Claude API request failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse Claude API response")?;

        tracing::debug!("Received response from Claude API");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claude::Message;

    #[test]
    fn test_client_creation() {
        let client = ClaudeClient::new("test-key".to_string());
        assert!(client.is_ok());
        assert!(client.unwrap().has_api_key());
    }

    #[test]
    fn test_message_request_creation() {
        let request = MessageRequest::new("Hello");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0], Message::user("Hello"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = ClaudeClient::with_base_url(String::new(), "http://127.0.0.1:9".into()).unwrap();
        let err = client
            .send_raw(&MessageRequest::new("hi"), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("API key"), "{err}");
    }

    #[tokio::test]
    async fn test_send_raw_returns_provider_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "override-key")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"msg_1","type":"message","role":"assistant","model":"m","stop_reason":"end_turn","content":[{"type":"text","text":"Hey!"}]}"#)
            .create_async()
            .await;

        let client = ClaudeClient::with_base_url("configured".into(), server.url()).unwrap();
        let raw = client
            .send_raw(&MessageRequest::new("hi"), Some("override-key"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(raw["content"][0]["text"], "Hey!");
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_body(r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#)
            .create_async()
            .await;

        let client = ClaudeClient::with_base_url("bad".into(), server.url()).unwrap();
        let err = client.send_message(&MessageRequest::new("hi")).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("401"), "{text}");
        assert!(text.contains("invalid x-api-key"), "{text}");
    }
}
