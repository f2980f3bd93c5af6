// Request and response bodies for the HTTP API
//
// Field names are camelCase to match what the web client sends.

use serde::{Deserialize, Serialize};

use crate::claude::Message;
use crate::conversation::ConversationSummary;

/// Body for `POST /api/chat`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Caller-supplied Anthropic key; falls back to the server's key
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Body for `POST /api/create-checkout-session`
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub tier: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
}

/// Body for `POST /api/purchase`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub package_id: String,
}

/// Body for `POST /api/metrics`
#[derive(Debug, Deserialize)]
pub struct MetricsRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Body for `POST /api/summary`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Summary from the previous refresh, merged with the new one
    #[serde(default)]
    pub previous: Option<ConversationSummary>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: ConversationSummary,
    pub prose: String,
    pub turns: usize,
}

/// Body for `POST /api/system-prompt`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemPromptRequest {
    /// Built-in companion name; the configured companion when absent
    #[serde(default)]
    pub companion: Option<String>,
    #[serde(default)]
    pub summary: Option<ConversationSummary>,
    /// Prose from `/api/summary`; rendered locally from `summary` when absent
    #[serde(default)]
    pub summary_prose: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemPromptResponse {
    pub companion: String,
    pub system_prompt: String,
    pub summary_due: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanionInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub greeting: String,
}
