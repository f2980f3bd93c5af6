// Text generation interface used by the summary pipeline

use anyhow::Result;
use async_trait::async_trait;

use crate::claude::Message;

pub mod claude;

pub use claude::ClaudeGenerator;

/// Anything that can turn a system prompt plus messages into text
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a single text completion
    async fn generate(
        &self,
        system: Option<&str>,
        messages: Vec<Message>,
        max_tokens: u32,
    ) -> Result<String>;

    /// Get generator name for logging
    fn name(&self) -> &str;
}
