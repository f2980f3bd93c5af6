// Claude generator implementation

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::claude::{ClaudeClient, Message, MessageRequest};

use super::Generator;

/// Claude API generator implementation
pub struct ClaudeGenerator {
    client: Arc<ClaudeClient>,
    model: String,
    /// Per-request key that overrides the client's configured one
    api_key: Option<String>,
}

impl ClaudeGenerator {
    pub fn new(client: Arc<ClaudeClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }
}

#[async_trait]
impl Generator for ClaudeGenerator {
    async fn generate(
        &self,
        system: Option<&str>,
        messages: Vec<Message>,
        max_tokens: u32,
    ) -> Result<String> {
        let mut request = MessageRequest::from_messages(messages)
            .with_model(self.model.clone())
            .with_max_tokens(max_tokens);
        if let Some(system) = system {
            request = request.with_system(system);
        }

        let raw = self
            .client
            .send_raw(&request, self.api_key.as_deref())
            .await?;
        let response: crate::claude::MessageResponse = serde_json::from_value(raw)?;
        Ok(response.text())
    }

    fn name(&self) -> &str {
        "claude"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_joins_text_blocks() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"system":"be brief","max_tokens":64}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"id":"m","type":"message","role":"assistant","model":"x","stop_reason":null,"content":[{"type":"text","text":"{}"}]}"#)
            .create_async()
            .await;

        let client = Arc::new(ClaudeClient::with_base_url("k".into(), server.url()).unwrap());
        let generator = ClaudeGenerator::new(client, "claude-test");
        let text = generator
            .generate(Some("be brief"), vec![Message::user("hi")], 64)
            .await
            .unwrap();
        assert_eq!(text, "{}");
        assert_eq!(generator.name(), "claude");
    }
}
